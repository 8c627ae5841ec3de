use crate::ooxml::opc::OpcError;
use thiserror::Error;

/// Errors raised while walking a SpreadsheetML package.
#[derive(Error, Debug)]
pub enum XlsxError {
    #[error(transparent)]
    Opc(#[from] OpcError),

    #[error("no worksheet found in workbook")]
    NoWorksheet,

    #[error("sheet '{name}' refers to missing relationship {r_id}")]
    DanglingSheet { name: String, r_id: String },

    #[error("sheet index {0} out of range")]
    SheetIndex(usize),
}

impl From<std::io::Error> for XlsxError {
    fn from(err: std::io::Error) -> Self {
        XlsxError::Opc(OpcError::IoError(err))
    }
}

pub type XlsxResult<T> = std::result::Result<T, XlsxError>;
