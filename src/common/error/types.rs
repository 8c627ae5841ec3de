//! Validation error taxonomy.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a template failed validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// No file, or a zero-length file
    #[error("empty file.")]
    EmptyInput,

    /// Neither CSV nor Excel signals matched
    #[error("only CSV or Excel (xls/xlsx) files are allowed (detected MIME: {0})")]
    UnsupportedType(String),

    /// No BOM and the charset detector found no usable match
    #[error("unable to determine CSV encoding")]
    EncodingUndetermined,

    /// A non-UTF-8 encoding was detected and the strict decode did not succeed
    #[error("CSV must be UTF-8 (detected: {0})")]
    EncodingInvalid(String),

    /// Encoding is fine but there is not a single line to read
    #[error("CSV content is empty")]
    CsvContentEmpty,

    /// The OPC package or its first sheet could not be opened
    #[error("XLSX format error: {0}")]
    XlsxFormat(String),

    /// The compound file or its BIFF record stream could not be parsed
    #[error("XLS format error: {0}")]
    XlsFormat(String),

    /// Autodetected workbook open failed
    #[error("Excel format error: {0}")]
    ExcelFormat(String),

    /// Unexpected I/O failure while copying or reading the file
    #[error("file processing error: {0}")]
    Io(#[from] std::io::Error),
}

impl ValidationError {
    /// The taxonomy entry of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            ValidationError::EmptyInput => FailureKind::EmptyInput,
            ValidationError::UnsupportedType(_) => FailureKind::UnsupportedType,
            ValidationError::EncodingUndetermined => FailureKind::EncodingUndetermined,
            ValidationError::EncodingInvalid(_) => FailureKind::EncodingInvalid,
            ValidationError::CsvContentEmpty => FailureKind::CsvContentEmpty,
            ValidationError::XlsxFormat(_)
            | ValidationError::XlsFormat(_)
            | ValidationError::ExcelFormat(_) => FailureKind::ExcelFormat,
            ValidationError::Io(_) => FailureKind::Io,
        }
    }
}

/// Payload-free mirror of [`ValidationError`] carried by failed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    EmptyInput,
    UnsupportedType,
    EncodingUndetermined,
    EncodingInvalid,
    CsvContentEmpty,
    ExcelFormat,
    Io,
}

/// Result type for validation steps.
pub type Result<T> = std::result::Result<T, ValidationError>;
