//! Shared foundational types for the precompiled header helper.
//!
//! This crate provides filesystem metadata snapshots, the timestamp freshness
//! relation used for staleness decisions, and the minimal filesystem interface
//! consumed by the decision engine.

#![warn(missing_docs)]

pub mod freshness;
pub mod fs;
pub mod metadata;

pub use freshness::TieBreak;
pub use fs::{FileSystem, FsError, OsFileSystem};
pub use metadata::{FileKind, FileMetadata, Timestamp};
