//! File type detection.
//!
//! Detection runs in three steps, each reading only the head of the file or
//! a single container entry:
//!
//! 1. [`MimeSniffer`] names the content from its signature
//! 2. [`container::refine`] resolves generic OOXML containers by manifest
//! 3. [`TypeClassifier`] turns MIME type, filename and content into a
//!    [`FileType`]

pub mod classify;
pub mod container;
pub mod signature;
pub mod sniffer;
pub mod types;

use std::path::Path;

use crate::common::mime;

pub use classify::{CsvSignals, TypeClassifier, is_excel_mime};
pub use sniffer::{MimeSniffer, SignatureSniffer};
pub use types::FileType;

/// Sniff the MIME type of `path` and refine it when it names a generic
/// OOXML container.
pub fn detect_mime<S: MimeSniffer + ?Sized>(
    sniffer: &S,
    path: &Path,
    filename: Option<&str>,
) -> String {
    let sniffed = sniffer.sniff(path, filename);
    if mime::is_generic_container(&sniffed) {
        container::refine(path, &sniffed)
    } else {
        sniffed
    }
}
