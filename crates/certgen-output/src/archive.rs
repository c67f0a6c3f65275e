//! Zip archive of certificates.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{OutputError, Result};

/// File name of the archive written in archive mode.
pub const ARCHIVE_FILE_NAME: &str = "certificates.zip";

/// Deflate level used for entries (maximum compression).
const COMPRESSION_LEVEL: i64 = 9;

/// Streaming zip writer. Entries are appended one at a time; the central
/// directory is written by [`CertificateArchive::finish`].
pub struct CertificateArchive {
    path: PathBuf,
    writer: ZipWriter<File>,
    entries: Vec<String>,
}

/// A finalized archive on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedArchive {
    pub path: PathBuf,
    pub entries: Vec<String>,
    pub bytes: u64,
}

impl CertificateArchive {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: ZipWriter::new(file),
            entries: Vec::new(),
        })
    }

    fn options() -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(COMPRESSION_LEVEL))
    }

    /// Stream the contents of `source` into a new entry `entry_name`.
    pub fn add_file(&mut self, entry_name: &str, source: &Path) -> Result<()> {
        let mut input = File::open(source).map_err(|e| OutputError::io(source, e))?;
        self.writer.start_file(entry_name, Self::options())?;
        let written =
            io::copy(&mut input, &mut self.writer).map_err(|e| OutputError::io(&self.path, e))?;
        debug!(entry = %entry_name, bytes = written, "archive entry added");
        self.entries.push(entry_name.to_string());
        Ok(())
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the central directory and close the file.
    pub fn finish(self) -> Result<FinishedArchive> {
        let Self {
            path,
            writer,
            entries,
        } = self;
        let file = writer.finish()?;
        let bytes = file
            .metadata()
            .map_err(|e| OutputError::io(&path, e))?
            .len();
        Ok(FinishedArchive {
            path,
            entries,
            bytes,
        })
    }
}
