//! Filesystem metadata snapshots.

use std::time::{SystemTime, UNIX_EPOCH};

/// A modification timestamp split into whole seconds and a nanosecond remainder.
///
/// Ordering compares seconds first and nanoseconds second, which is the
/// derived lexicographic order of the fields. Times before the Unix epoch
/// have negative `secs` with a non-negative `nanos` remainder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    /// Whole seconds relative to the Unix epoch.
    pub secs: i64,
    /// Sub-second remainder in nanoseconds, always below 1e9.
    pub nanos: u32,
}

impl Timestamp {
    /// Creates a timestamp from seconds and a nanosecond remainder.
    pub fn new(secs: i64, nanos: u32) -> Self {
        Self { secs, nanos }
    }

    /// Converts a [`SystemTime`] into a timestamp, saturating out-of-range values.
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(d) => Self {
                secs: i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
                nanos: d.subsec_nanos(),
            },
            Err(e) => {
                let d = e.duration();
                let secs = i64::try_from(d.as_secs()).unwrap_or(i64::MAX);
                if d.subsec_nanos() == 0 {
                    Self {
                        secs: -secs,
                        nanos: 0,
                    }
                } else {
                    Self {
                        secs: -secs - 1,
                        nanos: 1_000_000_000 - d.subsec_nanos(),
                    }
                }
            }
        }
    }
}

/// The kind of a filesystem entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    /// A regular file (or anything that is not a directory).
    File,
    /// A directory.
    Directory,
}

/// An immutable snapshot of a filesystem entry's kind, size and mtime.
///
/// Snapshots are taken fresh for every check and never cached across calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileMetadata {
    kind: FileKind,
    len: u64,
    modified: Timestamp,
}

impl FileMetadata {
    /// Creates a snapshot from its parts.
    pub fn new(kind: FileKind, len: u64, modified: Timestamp) -> Self {
        Self {
            kind,
            len,
            modified,
        }
    }

    /// Builds a snapshot from [`std::fs::Metadata`].
    ///
    /// Platforms without modification times report the epoch.
    pub fn from_std(meta: &std::fs::Metadata) -> Self {
        let kind = if meta.is_dir() {
            FileKind::Directory
        } else {
            FileKind::File
        };
        let modified = meta
            .modified()
            .map(Timestamp::from_system_time)
            .unwrap_or(Timestamp::new(0, 0));
        Self::new(kind, meta.len(), modified)
    }

    /// Returns `true` if the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    /// Returns the length in bytes as reported by the filesystem.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the entry has zero length.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the modification timestamp.
    pub fn modified(&self) -> Timestamp {
        self.modified
    }

    /// Returns `true` if this entry was modified strictly after `other`.
    ///
    /// Equal timestamps are not newer, so an entry is never newer than itself.
    pub fn is_newer_than(&self, other: &FileMetadata) -> bool {
        self.modified > other.modified
    }
}
