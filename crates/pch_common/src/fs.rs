//! Minimal filesystem interface consumed by the decision engine.
//!
//! The engine only needs metadata lookups, directory creation, and whole-file
//! reads and writes. Keeping these behind a trait lets tests observe exactly
//! which operations a decision performs.

use std::path::{Path, PathBuf};

use crate::metadata::FileMetadata;

/// Errors that can occur during filesystem operations.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// An I/O error occurred at the given path.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A read returned a different number of bytes than expected.
    #[error("short read from {}: expected {expected} bytes, got {actual}", .path.display())]
    ShortRead {
        /// The file being read.
        path: PathBuf,
        /// The byte count announced by the file's metadata.
        expected: u64,
        /// The byte count actually read.
        actual: u64,
    },
}

impl FsError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Filesystem primitives used by the staleness checks.
pub trait FileSystem {
    /// Returns a metadata snapshot, or `None` if the entry cannot be stat'ed.
    ///
    /// Symlinks are followed.
    fn metadata(&self, path: &Path) -> Option<FileMetadata>;

    /// Creates a single directory. The parent must already exist.
    fn create_dir(&self, path: &Path) -> Result<(), FsError>;

    /// Reads exactly `expected_len` bytes from the file at `path`.
    ///
    /// A file that turns out shorter or longer than `expected_len` yields
    /// [`FsError::ShortRead`].
    fn read_exact_len(&self, path: &Path, expected_len: u64) -> Result<Vec<u8>, FsError>;

    /// Replaces the contents of the file at `path` with `data`.
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), FsError>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn metadata(&self, path: &Path) -> Option<FileMetadata> {
        std::fs::metadata(path)
            .ok()
            .map(|m| FileMetadata::from_std(&m))
    }

    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        std::fs::create_dir(path).map_err(|e| FsError::io(path, e))
    }

    fn read_exact_len(&self, path: &Path, expected_len: u64) -> Result<Vec<u8>, FsError> {
        let data = std::fs::read(path).map_err(|e| FsError::io(path, e))?;
        if data.len() as u64 != expected_len {
            return Err(FsError::ShortRead {
                path: path.to_path_buf(),
                expected: expected_len,
                actual: data.len() as u64,
            });
        }
        Ok(data)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        std::fs::write(path, data).map_err(|e| FsError::io(path, e))
    }
}
