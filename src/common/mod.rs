//! Building blocks shared by detection, encoding and the validator.

pub mod bom;
pub mod config;
pub mod error;
pub mod mime;
pub mod sample;

pub use config::ValidatorConfig;
pub use error::{FailureKind, Result, ValidationError};
pub use sample::ByteSample;
