//! Uploaded file sources.

use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// A file handed in by a caller, read once as a stream.
///
/// The validator only ever needs the original filename and a reader; the
/// whole content is never required in memory.
pub trait UploadedFile {
    /// Name the client gave the file, if any.
    fn original_filename(&self) -> Option<&str>;

    /// Size in bytes.
    fn size(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Open a fresh reader over the content.
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// Upload held in memory.
#[derive(Debug, Clone)]
pub struct MemoryUpload {
    filename: Option<String>,
    bytes: Vec<u8>,
}

impl MemoryUpload {
    pub fn new<B: Into<Vec<u8>>>(bytes: B) -> Self {
        Self {
            filename: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

impl UploadedFile for MemoryUpload {
    fn original_filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.bytes.as_slice())))
    }
}

/// Upload that a web framework already spooled to disk.
///
/// The original filename defaults to the path's file name.
#[derive(Debug, Clone)]
pub struct PathUpload {
    path: PathBuf,
    filename: Option<String>,
}

impl PathUpload {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Self { path, filename }
    }

    pub fn with_filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UploadedFile for PathUpload {
    fn original_filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Zero when the file cannot be inspected.
    fn size(&self) -> u64 {
        fs::metadata(&self.path).map(|meta| meta.len()).unwrap_or(0)
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }
}
