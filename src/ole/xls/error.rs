//! Error types for XLS record stream checks

use std::fmt;

/// Result type alias for XLS operations
pub type XlsResult<T> = Result<T, XlsError>;

/// Errors that can occur while walking an XLS workbook
#[derive(Debug)]
pub enum XlsError {
    /// I/O error
    Io(std::io::Error),
    /// CFB (Compound File Binary) error
    Cfb(crate::ole::OleError),
    /// The container has no `Workbook`/`Book` stream
    MissingWorkbookStream,
    /// The workbook stream holds no bytes at all
    EmptyStream,
    /// The first record is not a BOF record
    MissingBof(u16),
    /// Invalid BIFF record
    InvalidRecord {
        /// Record type
        record_type: u16,
        /// Error description
        message: String,
    },
    /// Unsupported BIFF version
    UnsupportedBiffVersion(u16),
    /// End of stream reached unexpectedly
    UnexpectedEndOfStream(String),
}

impl fmt::Display for XlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XlsError::Io(e) => write!(f, "I/O error: {}", e),
            XlsError::Cfb(e) => write!(f, "CFB error: {}", e),
            XlsError::MissingWorkbookStream => write!(f, "no Workbook stream in container"),
            XlsError::EmptyStream => write!(f, "Workbook stream is empty"),
            XlsError::MissingBof(found) => {
                write!(f, "expected BOF record, found 0x{:04X}", found)
            },
            XlsError::InvalidRecord {
                record_type,
                message,
            } => {
                write!(f, "Invalid record 0x{:04X}: {}", record_type, message)
            },
            XlsError::UnsupportedBiffVersion(version) => {
                write!(f, "Unsupported BIFF version: 0x{:04X}", version)
            },
            XlsError::UnexpectedEndOfStream(context) => {
                write!(f, "Unexpected end of stream: {}", context)
            },
        }
    }
}

impl std::error::Error for XlsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            XlsError::Io(e) => Some(e),
            XlsError::Cfb(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for XlsError {
    fn from(err: std::io::Error) -> Self {
        XlsError::Io(err)
    }
}

impl From<crate::ole::OleError> for XlsError {
    fn from(err: crate::ole::OleError) -> Self {
        match err {
            crate::ole::OleError::Io(e) => XlsError::Io(e),
            other => XlsError::Cfb(other),
        }
    }
}
