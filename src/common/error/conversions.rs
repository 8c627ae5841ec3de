//! Error conversion implementations.
//!
//! The dedicated `.xls` and `.xlsx` checks surface decoder errors under their
//! own sub-format. The autodetecting fallback maps explicitly to
//! [`ValidationError::ExcelFormat`] instead of going through these.

use super::types::ValidationError;

impl From<crate::ole::xls::XlsError> for ValidationError {
    fn from(err: crate::ole::xls::XlsError) -> Self {
        ValidationError::XlsFormat(err.to_string())
    }
}

impl From<crate::ooxml::opc::OpcError> for ValidationError {
    fn from(err: crate::ooxml::opc::OpcError) -> Self {
        ValidationError::XlsxFormat(err.to_string())
    }
}

impl From<crate::ooxml::xlsx::XlsxError> for ValidationError {
    fn from(err: crate::ooxml::xlsx::XlsxError) -> Self {
        ValidationError::XlsxFormat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::FailureKind;

    #[test]
    fn test_decoder_errors_keep_sub_format() {
        let err: ValidationError = crate::ole::xls::XlsError::EmptyStream.into();
        assert!(err.to_string().starts_with("XLS format error: "));
        assert_eq!(err.kind(), FailureKind::ExcelFormat);

        let err: ValidationError =
            crate::ooxml::opc::OpcError::PartNotFound("/xl/workbook.xml".to_string()).into();
        assert!(err.to_string().starts_with("XLSX format error: "));

        let err: ValidationError = crate::ooxml::xlsx::XlsxError::NoWorksheet.into();
        assert_eq!(
            err.to_string(),
            "XLSX format error: no worksheet found in workbook"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::EmptyInput.to_string(), "empty file.");
        assert_eq!(
            ValidationError::EncodingInvalid("EUC-KR".to_string()).to_string(),
            "CSV must be UTF-8 (detected: EUC-KR)"
        );
        assert!(
            ValidationError::UnsupportedType("application/pdf".to_string())
                .to_string()
                .contains("application/pdf")
        );
    }
}
