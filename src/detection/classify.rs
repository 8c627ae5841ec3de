//! CSV / Excel classification.
//!
//! MIME hints for delimited text are unreliable: CSV is routinely reported
//! as `text/plain`, and some CSV files are even reported as legacy Excel.
//! The classifier therefore accepts CSV only when two of three independent
//! signals agree, with the MIME hint required to be backed by either the
//! filename or the content.

use std::path::Path;

use memchr::{memchr2, memchr3};
use tracing::debug;

use super::types::FileType;
use crate::common::config::DEFAULT_CSV_SNIFF_BYTES;
use crate::common::{mime, sample};

/// Whether `mime` is one of the two Excel workbook types.
pub fn is_excel_mime(mime: &str) -> bool {
    mime.eq_ignore_ascii_case(mime::XLS) || mime.eq_ignore_ascii_case(mime::XLSX)
}

/// Whether `mime` is a type CSV uploads are known to be reported as.
///
/// Legacy Excel is included on purpose: some CSV files sniff as XLS.
pub fn is_csv_mime(mime: &str) -> bool {
    mime.eq_ignore_ascii_case(mime::TEXT_CSV)
        || mime.eq_ignore_ascii_case(mime::TEXT_PLAIN)
        || mime.eq_ignore_ascii_case(mime::XLS)
}

/// Whether `filename` ends in `.csv`, ignoring case.
pub fn has_csv_extension(filename: Option<&str>) -> bool {
    mime::extension(filename).eq_ignore_ascii_case(".csv")
}

/// Whether `head` contains a delimiter (`,` `;` TAB) and a line break.
///
/// The head is read as ISO-8859-1, which maps every byte to one character,
/// so a plain byte search gives the same answer as a decoded search.
pub fn looks_like_csv(head: &[u8]) -> bool {
    memchr3(b',', b';', b'\t', head).is_some() && memchr2(b'\n', b'\r', head).is_some()
}

/// The three independent CSV indicators for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CsvSignals {
    pub by_mime: bool,
    pub by_extension: bool,
    pub by_content: bool,
}

impl CsvSignals {
    /// `(mime ∧ (extension ∨ content)) ∨ (extension ∧ content)`
    pub fn is_csv(&self) -> bool {
        (self.by_mime && (self.by_extension || self.by_content))
            || (self.by_extension && self.by_content)
    }
}

/// Decides whether a file is a CSV or an Excel template.
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    sniff_bytes: usize,
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_CSV_SNIFF_BYTES)
    }
}

impl TypeClassifier {
    /// Classifier that inspects at most `sniff_bytes` of the file head.
    pub fn new(sniff_bytes: usize) -> Self {
        Self {
            sniff_bytes: sniff_bytes.max(1),
        }
    }

    /// Collect the CSV signals for the file at `path`.
    ///
    /// An unreadable file simply has no content signal.
    pub fn signals(&self, path: &Path, mime_hint: &str, filename: Option<&str>) -> CsvSignals {
        let head = sample::read_head_lossy(path, self.sniff_bytes);
        CsvSignals {
            by_mime: is_csv_mime(mime_hint),
            by_extension: has_csv_extension(filename),
            by_content: looks_like_csv(head.without_bom()),
        }
    }

    /// `Some(Csv)`, `Some(Excel)` or `None` when the file is neither.
    ///
    /// A CSV decision wins over an Excel MIME hint.
    pub fn classify(
        &self,
        path: &Path,
        mime_hint: &str,
        filename: Option<&str>,
    ) -> Option<FileType> {
        let signals = self.signals(path, mime_hint, filename);
        let decided = if signals.is_csv() {
            Some(FileType::Csv)
        } else if is_excel_mime(mime_hint) {
            Some(FileType::Excel)
        } else {
            None
        };
        debug!(mime = mime_hint, ?signals, ?decided, "classified upload");
        decided
    }
}
