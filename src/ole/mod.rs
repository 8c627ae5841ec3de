/// Constants for OLE file format
pub mod consts;

/// Main OLE file parsing implementation
mod file;

/// Legacy Excel workbook (.xls) record stream checks
///
/// BIFF records live in the `Workbook` stream of an OLE2 container; this
/// module walks them far enough to prove the stream is well formed.
pub mod xls;

// Re-export public types for convenient access
pub use file::{DirectoryEntry, OleError, OleFile};
