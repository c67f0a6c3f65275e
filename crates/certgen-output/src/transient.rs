//! Short-lived local certificate files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{OutputError, Result};

/// A file that exists only while one row is processed.
///
/// Call [`TransientFile::remove`] once the file has been consumed; a file
/// that is dropped without it is removed on a best-effort basis.
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
    removed: bool,
}

impl TransientFile {
    /// Write `bytes` to `dir/file_name`.
    pub fn write(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<Self> {
        let path = dir.join(file_name);
        fs::write(&path, bytes).map_err(|e| OutputError::io(&path, e))?;
        Ok(Self {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file. Failure is logged, not returned.
    pub fn remove(mut self) {
        self.delete();
    }

    fn delete(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        if let Err(error) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %error, "failed to delete transient file");
        }
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        self.delete();
    }
}
