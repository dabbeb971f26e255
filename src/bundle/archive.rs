//! Archive construction.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Deflate-compressed archive handle, opened once per run.
///
/// Every entry uses the same compression scheme. Archive paths are
/// claimed on write: a second entry targeting an already-used path fails
/// with [`Error::DuplicateEntry`] instead of silently overwriting.
///
/// Dropping the writer without [`ArchiveWriter::finish`] closes the
/// underlying resource but leaves the archive without its central
/// directory; a failed run leaves the partial artifact on disk.
pub struct ArchiveWriter<W: Write + Seek> {
    inner: ZipWriter<W>,
    claimed: HashSet<String>,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    /// Begin an archive at the writer's current position. The writer may
    /// already hold leading bytes (the bootstrap header); the archive is
    /// appended after them.
    pub fn new(writer: W) -> Self {
        Self {
            inner: ZipWriter::new(writer),
            claimed: HashSet::new(),
        }
    }

    fn options() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
    }

    fn claim(&mut self, archive_path: &str) -> Result<()> {
        if !self.claimed.insert(archive_path.to_string()) {
            return Err(Error::DuplicateEntry {
                path: archive_path.to_string(),
            });
        }
        Ok(())
    }

    /// Add a file from the filesystem under the given archive path.
    #[allow(dead_code)] // Public API - preserved for external consumers
    pub fn add_path(&mut self, path: &Path, archive_path: &str) -> Result<()> {
        self.claim(archive_path)?;
        self.inner.start_file(archive_path, Self::options())?;
        let mut file = std::fs::File::open(path)?;
        std::io::copy(&mut file, &mut self.inner)?;
        Ok(())
    }

    /// Add an in-memory buffer under the given archive path.
    pub fn add_bytes(&mut self, archive_path: &str, content: &[u8]) -> Result<()> {
        self.claim(archive_path)?;
        self.inner.start_file(archive_path, Self::options())?;
        self.inner.write_all(content)?;
        Ok(())
    }

    /// Flush all entries and write the central directory, returning the
    /// underlying writer.
    pub fn finish(self) -> Result<W> {
        Ok(self.inner.finish()?)
    }
}
