//! Tabgate - upload gate for tabular templates
//!
//! This library decides whether an uploaded file is an acceptable CSV or
//! Excel template before anything tries to import it.
//!
//! # Features
//!
//! - **Type detection**: magic-number MIME sniffing, OOXML manifest
//!   refinement and a delimiter/line-break heuristic for CSV
//! - **Encoding enforcement**: CSV must be UTF-8, with or without a BOM;
//!   statistical guesses are confirmed by a strict streaming decode
//! - **Shallow workbook checks**: `.xlsx` packages must resolve to a sheet,
//!   `.xls` compound files must hold a well-framed BIFF record stream
//! - **Scoped scratch files**: uploaded streams are spooled to temporary
//!   copies that never outlive the call
//!
//! # Example - Validating an upload
//!
//! ```no_run
//! use tabgate::{MemoryUpload, TemplateValidator};
//!
//! let validator = TemplateValidator::new();
//! let upload = MemoryUpload::new(std::fs::read("template.xlsx")?).with_filename("template.xlsx");
//!
//! let result = validator.validate_upload(&upload);
//! if result.is_ok() {
//!     println!("accepted as {:?}", result.file_type());
//! } else {
//!     println!("rejected: {}", result.message());
//! }
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Example - Validating a file on disk
//!
//! ```no_run
//! use tabgate::{TemplateValidator, ValidatorConfig};
//!
//! let config = ValidatorConfig::new().with_charset_sample_bytes(256 * 1024);
//! let validator = TemplateValidator::with_config(config);
//!
//! // Remove the spooled file once validated
//! let result = validator.validate_path("/tmp/spool/8f3a", Some("people.csv"), true);
//! println!("{}", result);
//! ```

/// Shared building blocks: configuration, errors, MIME constants, BOM and
/// head sampling helpers
pub mod common;

/// MIME sniffing, OOXML container refinement and CSV/Excel classification
pub mod detection;

/// Charset detection and UTF-8 normalization for CSV templates
pub mod encoding;

/// Shallow structural checks for Excel workbooks
pub mod excel;

/// OLE2 compound file reader
///
/// Legacy Excel (.xls) workbooks are OLE2 files; the `xls` submodule walks
/// their BIFF record stream.
pub mod ole;

/// OOXML (Office Open XML) package reader
///
/// Only as much of the OPC model as is needed to reach the first sheet of an
/// `.xlsx` workbook.
pub mod ooxml;

/// Template validation entry point
pub mod validator;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types for convenience
pub use common::{FailureKind, ValidationError, ValidatorConfig};
pub use detection::{FileType, MimeSniffer, SignatureSniffer};
pub use encoding::{CanonicalEncoding, CharsetDetector, CharsetMatch, StatisticalCharsetDetector};
pub use validator::{MemoryUpload, PathUpload, TemplateValidator, UploadedFile, ValidationResult};
