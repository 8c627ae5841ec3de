//! Accepted template kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of template a file was accepted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    /// Delimited text (comma, semicolon or tab separated)
    Csv,
    /// Excel workbook, legacy (.xls) or OOXML (.xlsx)
    Excel,
}

impl FileType {
    /// Upper-case label used in messages and serialized output.
    pub const fn as_str(self) -> &'static str {
        match self {
            FileType::Csv => "CSV",
            FileType::Excel => "EXCEL",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
