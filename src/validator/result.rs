//! The outcome of one validation call.

use std::fmt;

use serde::Serialize;

use crate::common::error::{FailureKind, ValidationError};
use crate::detection::FileType;
use crate::encoding::CanonicalEncoding;

/// Outcome of validating one template file.
///
/// A successful result always names the file type, and a successful CSV
/// result always names its encoding. Failed results carry only the message
/// and the [`FailureKind`]; the detected MIME type of an unsupported file is
/// part of its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    ok: bool,
    message: String,
    mime_type: Option<String>,
    file_type: Option<FileType>,
    encoding: Option<CanonicalEncoding>,
    failure: Option<FailureKind>,
}

impl ValidationResult {
    pub(crate) fn csv(mime_type: String, encoding: CanonicalEncoding) -> Self {
        Self {
            ok: true,
            message: format!("validation succeeded (CSV, {})", encoding),
            mime_type: Some(mime_type),
            file_type: Some(FileType::Csv),
            encoding: Some(encoding),
            failure: None,
        }
    }

    pub(crate) fn excel(mime_type: String) -> Self {
        Self {
            ok: true,
            message: "validation succeeded (Excel)".to_string(),
            mime_type: Some(mime_type),
            file_type: Some(FileType::Excel),
            encoding: None,
            failure: None,
        }
    }

    pub(crate) fn failed(error: &ValidationError) -> Self {
        Self {
            ok: false,
            message: error.to_string(),
            mime_type: None,
            file_type: None,
            encoding: None,
            failure: Some(error.kind()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// MIME type the file was accepted under.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn file_type(&self) -> Option<FileType> {
        self.file_type
    }

    pub fn encoding(&self) -> Option<CanonicalEncoding> {
        self.encoding
    }

    /// Taxonomy entry of a failed result.
    pub fn failure(&self) -> Option<FailureKind> {
        self.failure
    }
}

impl From<ValidationError> for ValidationResult {
    fn from(error: ValidationError) -> Self {
        Self::failed(&error)
    }
}

fn or_dash<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ok        : {}", self.ok)?;
        writeln!(f, "message   : {}", self.message)?;
        writeln!(f, "mime_type : {}", or_dash(self.mime_type.as_deref()))?;
        writeln!(f, "file_type : {}", or_dash(self.file_type))?;
        write!(f, "encoding  : {}", or_dash(self.encoding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shapes() {
        let csv = ValidationResult::csv("text/plain".to_string(), CanonicalEncoding::Utf8WithBom);
        assert!(csv.is_ok());
        assert_eq!(csv.message(), "validation succeeded (CSV, UTF-8 (with BOM))");
        assert_eq!(csv.file_type(), Some(FileType::Csv));
        assert_eq!(csv.failure(), None);

        let excel = ValidationResult::excel("application/vnd.ms-excel".to_string());
        assert_eq!(excel.message(), "validation succeeded (Excel)");
        assert_eq!(excel.encoding(), None);
        assert_eq!(excel.mime_type(), Some("application/vnd.ms-excel"));
    }

    #[test]
    fn test_failure_carries_kind_only() {
        let result = ValidationResult::from(ValidationError::UnsupportedType("image/png".into()));
        assert!(!result.is_ok());
        assert_eq!(
            result.message(),
            "only CSV or Excel (xls/xlsx) files are allowed (detected MIME: image/png)"
        );
        assert_eq!(result.failure(), Some(FailureKind::UnsupportedType));
        assert_eq!(result.mime_type(), None);
        assert_eq!(result.file_type(), None);
    }

    #[test]
    fn test_display() {
        let text = ValidationResult::excel("application/zip".to_string()).to_string();
        assert!(text.contains("ok        : true"));
        assert!(text.contains("file_type : EXCEL"));
        assert!(text.ends_with("encoding  : -"));
    }

    #[test]
    fn test_serialize() {
        let result = ValidationResult::csv("text/csv".to_string(), CanonicalEncoding::Utf8);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["file_type"], "CSV");
        assert_eq!(json["encoding"], "UTF-8");
        assert!(json["failure"].is_null());

        let failed = serde_json::to_value(ValidationResult::from(ValidationError::EmptyInput)).unwrap();
        assert_eq!(failed["failure"], "empty_input");
        assert_eq!(failed["message"], "empty file.");
    }
}
