//! Validation error types.
//!
//! Every failure the validator can report is one [`ValidationError`]. Decoder
//! errors from the OLE2, BIFF and OPC layers are converted into it at the
//! boundary of the component that invoked them.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{FailureKind, Result, ValidationError};
