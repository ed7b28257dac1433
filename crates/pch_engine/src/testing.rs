//! In-memory filesystem for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pch_common::{FileKind, FileMetadata, FileSystem, FsError, Timestamp};

#[derive(Clone, Debug)]
enum Entry {
    Dir,
    File { data: Vec<u8>, mtime: i64 },
}

/// A filesystem held in a map. Writes stamp files with `clock`.
#[derive(Debug, Default)]
pub struct MemoryFs {
    entries: RefCell<HashMap<PathBuf, Entry>>,
    pub clock: i64,
    pub writes: RefCell<Vec<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self {
            clock: 10_000,
            ..Self::default()
        }
    }

    pub fn dir(&self, path: &str) {
        self.entries
            .borrow_mut()
            .insert(PathBuf::from(path), Entry::Dir);
    }

    pub fn file(&self, path: &str, data: &[u8], mtime: i64) {
        self.entries.borrow_mut().insert(
            PathBuf::from(path),
            Entry::File {
                data: data.to_vec(),
                mtime,
            },
        );
    }

    pub fn remove(&self, path: &str) {
        self.entries.borrow_mut().remove(Path::new(path));
    }

    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        match self.entries.borrow().get(Path::new(path)) {
            Some(Entry::File { data, .. }) => Some(data.clone()),
            _ => None,
        }
    }
}

fn io_error(path: &Path, kind: std::io::ErrorKind) -> FsError {
    FsError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::from(kind),
    }
}

impl FileSystem for MemoryFs {
    fn metadata(&self, path: &Path) -> Option<FileMetadata> {
        match self.entries.borrow().get(path)? {
            Entry::Dir => Some(FileMetadata::new(
                FileKind::Directory,
                0,
                Timestamp::new(0, 0),
            )),
            Entry::File { data, mtime } => Some(FileMetadata::new(
                FileKind::File,
                data.len() as u64,
                Timestamp::new(*mtime, 0),
            )),
        }
    }

    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        let mut entries = self.entries.borrow_mut();
        if entries.contains_key(path) {
            return Err(io_error(path, std::io::ErrorKind::AlreadyExists));
        }
        entries.insert(path.to_path_buf(), Entry::Dir);
        Ok(())
    }

    fn read_exact_len(&self, path: &Path, expected_len: u64) -> Result<Vec<u8>, FsError> {
        match self.entries.borrow().get(path) {
            Some(Entry::File { data, .. }) if data.len() as u64 == expected_len => Ok(data.clone()),
            Some(Entry::File { data, .. }) => Err(FsError::ShortRead {
                path: path.to_path_buf(),
                expected: expected_len,
                actual: data.len() as u64,
            }),
            _ => Err(io_error(path, std::io::ErrorKind::NotFound)),
        }
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        self.writes.borrow_mut().push(path.to_path_buf());
        self.entries.borrow_mut().insert(
            path.to_path_buf(),
            Entry::File {
                data: data.to_vec(),
                mtime: self.clock,
            },
        );
        Ok(())
    }
}
