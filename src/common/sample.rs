//! Bounded head sampling.
//!
//! Every heuristic in the crate looks at the leading bytes of a file only.
//! [`read_head`] reads at most `cap` bytes and never touches the rest of the
//! stream, so sniffing a multi-gigabyte workbook costs one small read.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::common::bom;

/// Leading bytes of a file, at most the cap it was read with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteSample {
    bytes: Vec<u8>,
}

impl ByteSample {
    /// Wraps already-read bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The sample with a leading UTF-8 BOM removed.
    #[inline]
    pub fn without_bom(&self) -> &[u8] {
        bom::strip_utf8_bom(&self.bytes)
    }

    /// Whether the sample starts with `signature`.
    #[inline]
    pub fn starts_with(&self, signature: &[u8]) -> bool {
        self.bytes.starts_with(signature)
    }
}

/// Read up to `cap` bytes from the start of the file at `path`.
pub fn read_head<P: AsRef<Path>>(path: P, cap: usize) -> io::Result<ByteSample> {
    let file = File::open(path)?;
    read_head_from(file, cap)
}

/// Read up to `cap` bytes from `reader`.
pub fn read_head_from<R: Read>(reader: R, cap: usize) -> io::Result<ByteSample> {
    let mut bytes = Vec::with_capacity(cap.min(64 * 1024));
    reader.take(cap as u64).read_to_end(&mut bytes)?;
    Ok(ByteSample::new(bytes))
}

/// Like [`read_head`], but a read failure yields an empty sample.
///
/// Heuristics use this: an unreadable head simply matches nothing.
pub fn read_head_lossy<P: AsRef<Path>>(path: P, cap: usize) -> ByteSample {
    read_head(path, cap).unwrap_or_default()
}
