//! Errors raised while reading an OPC package.
//!
//! Messages end up after `XLSX format error: ` in validation results, so they
//! name the offending part or relationship.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    /// A part name that is not an absolute, non-empty URI
    #[error("invalid part name '{0}'")]
    InvalidPackUri(String),

    /// The zip has no member for a part the package refers to
    #[error("missing package part {0}")]
    PartNotFound(String),

    #[error("no relationship {0}")]
    RelationshipNotFound(String),

    /// Neither an Override nor a Default in `[Content_Types].xml` matches
    #[error("no content type declared for {0}")]
    ContentTypeNotFound(String),

    /// The main part is not a SpreadsheetML workbook
    #[error("part {partname} has content type {content_type}, not a workbook")]
    UnexpectedContentType {
        partname: String,
        content_type: String,
    },

    #[error("malformed relationship: {0}")]
    InvalidRelationship(String),

    #[error("malformed XML: {0}")]
    XmlError(String),

    #[error("zip container: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("read failed: {0}")]
    IoError(#[from] std::io::Error),

    #[error("malformed XML attribute: {0}")]
    AttrError(String),
}

impl From<quick_xml::events::attributes::AttrError> for OpcError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OpcError::AttrError(err.to_string())
    }
}

impl From<quick_xml::Error> for OpcError {
    fn from(err: quick_xml::Error) -> Self {
        OpcError::XmlError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpcError>;
