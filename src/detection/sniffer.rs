//! MIME type sniffing.
//!
//! [`SignatureSniffer`] looks at magic numbers first and only consults the
//! filename when the content itself is inconclusive. Containers are probed
//! just deep enough to name them: an OLE2 file by its top-level streams, a
//! zip by the presence of an OPC manifest. Telling one OOXML document kind
//! from another is left to [`refine`](super::container::refine).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use super::signature;
use crate::common::config::DEFAULT_CSV_SNIFF_BYTES;
use crate::common::{mime, sample};
use crate::ole::OleFile;

/// Reports the MIME type of a file.
///
/// Implementations never fail: anything that cannot be identified is
/// `application/octet-stream`.
pub trait MimeSniffer {
    /// MIME type of the file at `path`, uploaded as `filename`.
    fn sniff(&self, path: &Path, filename: Option<&str>) -> String;
}

impl<T: MimeSniffer + ?Sized> MimeSniffer for &T {
    fn sniff(&self, path: &Path, filename: Option<&str>) -> String {
        (**self).sniff(path, filename)
    }
}

/// Magic-number sniffer with filename glob fallback.
#[derive(Debug, Clone)]
pub struct SignatureSniffer {
    head_bytes: usize,
}

impl Default for SignatureSniffer {
    fn default() -> Self {
        Self {
            head_bytes: DEFAULT_CSV_SNIFF_BYTES,
        }
    }
}

impl SignatureSniffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes read from the head of the file for signature checks.
    pub fn with_head_bytes(mut self, bytes: usize) -> Self {
        self.head_bytes = bytes.max(signature::OLE2_SIGNATURE.len());
        self
    }

    fn sniff_ole2(&self, path: &Path, filename: Option<&str>) -> &'static str {
        let opened = File::open(path)
            .map_err(crate::ole::OleError::from)
            .and_then(|file| OleFile::open(BufReader::new(file)));
        let ole = match opened {
            Ok(ole) => ole,
            Err(err) => {
                debug!(error = %err, "unreadable OLE2 container, falling back to filename");
                return mime::glob(filename).unwrap_or(mime::OLE2_CONTAINER);
            },
        };

        if ole.exists(&["Workbook"]) || ole.exists(&["Book"]) {
            mime::XLS
        } else if ole.exists(&["WordDocument"]) {
            mime::MSWORD
        } else if ole.exists(&["PowerPoint Document"]) {
            mime::MSPOWERPOINT
        } else {
            mime::OLE2_CONTAINER
        }
    }

    fn sniff_zip(&self, path: &Path, filename: Option<&str>) -> &'static str {
        let opened = File::open(path)
            .map_err(zip::result::ZipError::from)
            .and_then(|file| ZipArchive::new(BufReader::new(file)));
        match opened {
            Ok(archive) if archive.index_for_name("[Content_Types].xml").is_some() => {
                mime::OOXML_CONTAINER
            },
            Ok(_) => mime::ZIP,
            Err(err) => {
                debug!(error = %err, "unreadable zip container, falling back to filename");
                mime::glob(filename).unwrap_or(mime::ZIP)
            },
        }
    }
}

impl MimeSniffer for SignatureSniffer {
    fn sniff(&self, path: &Path, filename: Option<&str>) -> String {
        let head = sample::read_head_lossy(path, self.head_bytes);
        let bytes = head.as_bytes();

        let detected = if bytes.is_empty() {
            mime::OCTET_STREAM
        } else if signature::is_ole2(bytes) {
            self.sniff_ole2(path, filename)
        } else if signature::is_zip(bytes) {
            self.sniff_zip(path, filename)
        } else if signature::looks_textual(bytes) {
            // A glob can only narrow text down to another text type
            mime::glob(filename)
                .filter(|glob| mime::is_text(glob))
                .unwrap_or(mime::TEXT_PLAIN)
        } else {
            mime::glob(filename).unwrap_or(mime::OCTET_STREAM)
        };

        detected.to_string()
    }
}
