//! Error types for the helper.
//!
//! Only problems that make a decision impossible are errors. Anything that
//! merely casts doubt on the cache is a [`RebuildReason`](crate::RebuildReason).

use std::path::PathBuf;

use pch_common::FsError;
use pch_launch::LaunchError;

/// Unrecoverable problems with the folders or the reference header.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    /// A folder given on the command line cannot be stat'ed.
    #[error("unable to access {}", .0.display())]
    Inaccessible(PathBuf),

    /// A folder given on the command line is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The cache directory could not be created, or is not a directory.
    #[error("unable to create dir: {}: {reason}", .path.display())]
    CacheDirUncreatable {
        /// The cache directory path.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The reference header does not exist in the source folder.
    #[error("unable to find file: {}", .0.display())]
    HeaderMissing(PathBuf),

    /// The reference header is empty.
    #[error("file {} is empty", .0.display())]
    HeaderEmpty(PathBuf),

    /// Copying the reference header into the cache failed.
    #[error("failed to copy reference header: {0}")]
    HeaderCopy(#[from] FsError),
}

/// Any error that ends a helper run with exit status 1.
#[derive(Debug, thiserror::Error)]
pub enum HelperError {
    /// The staleness decision could not be made.
    #[error(transparent)]
    Fatal(#[from] FatalError),

    /// The compiler could not be run.
    #[error(transparent)]
    Launch(#[from] LaunchError),
}
