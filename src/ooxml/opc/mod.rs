/// Open Packaging Conventions (OPC) reading.
///
/// The subset needed to walk a SpreadsheetML package: the content type
/// manifest, relationship parts and on-demand access to zip members.
///
/// - Uses `quick-xml` for streaming parsing of manifests and `.rels` parts
/// - Uses `zip` for member access without loading the whole archive

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use error::{OpcError, Result};
pub use package::{ContentTypeMap, OpcPackage};
pub use packuri::PackURI;
pub use rel::{Relationship, Relationships};
