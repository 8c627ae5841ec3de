//! Scoped removal of files a validation call is responsible for.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Removes a file when dropped, if armed.
///
/// A file that is already gone counts as removed. Any other failure is
/// logged and swallowed.
#[derive(Debug)]
pub(crate) struct RemoveOnDrop {
    path: PathBuf,
    armed: bool,
}

impl RemoveOnDrop {
    pub(crate) fn new(path: &Path, armed: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            armed,
        }
    }
}

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed validated file"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {},
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to remove validated file")
            },
        }
    }
}

/// Delete a scratch copy, logging instead of failing.
pub(crate) fn discard_temp(temp: NamedTempFile) {
    let path = temp.path().to_path_buf();
    if let Err(err) = temp.close() {
        warn!(path = %path.display(), error = %err, "failed to remove temporary copy");
    }
}
