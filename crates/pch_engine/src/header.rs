//! Keeping the cached copy of the reference header in sync.

use std::path::Path;

use pch_common::{FileMetadata, FileSystem};
use pch_config::LimitsConfig;

use crate::artifact::ArtifactSet;
use crate::error::FatalError;
use crate::report::{Event, Reporter};

/// Result of comparing the reference header with its cached copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HeaderSync {
    /// Both files have identical bytes. Carries the cached copy's metadata.
    InSync(FileMetadata),
    /// The cached copy was missing or different and has been overwritten.
    Copied,
    /// The reference header exceeds the copy limit; the cache was not touched.
    TooLarge { size: u64 },
}

/// Compares the reference header against the cached copy and refreshes the
/// copy when they differ.
pub(crate) fn sync_reference_header(
    fs: &dyn FileSystem,
    reporter: &mut dyn Reporter,
    artifacts: &ArtifactSet,
    limits: &LimitsConfig,
) -> Result<HeaderSync, FatalError> {
    let source = &artifacts.source_header;
    let cached = &artifacts.cached_header;

    let source_meta = fs
        .metadata(source)
        .ok_or_else(|| FatalError::HeaderMissing(source.clone()))?;

    if let Some(cached_meta) = fs.metadata(cached) {
        if cached_meta.len() == source_meta.len()
            && files_identical(fs, source, cached, source_meta.len())
        {
            reporter.emit(Event::IdenticalFiles {
                source: source.clone(),
                cached: cached.clone(),
            });
            return Ok(HeaderSync::InSync(cached_meta));
        }
    }

    if source_meta.is_empty() {
        return Err(FatalError::HeaderEmpty(source.clone()));
    }
    let size = source_meta.len();
    if size > limits.max_header_bytes {
        reporter.emit(Event::HeaderTooLarge {
            path: source.clone(),
            size,
            limit: limits.max_header_bytes,
        });
        return Ok(HeaderSync::TooLarge { size });
    }

    reporter.emit(Event::CopyingHeader {
        from: source.clone(),
        to: cached.clone(),
        bytes: size,
    });
    let data = fs.read_exact_len(source, size)?;
    fs.write(cached, &data)?;
    Ok(HeaderSync::Copied)
}

/// Byte comparison of two files of known length. Any read problem counts as
/// a difference.
fn files_identical(fs: &dyn FileSystem, a: &Path, b: &Path, len: u64) -> bool {
    match (fs.read_exact_len(a, len), fs.read_exact_len(b, len)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}
