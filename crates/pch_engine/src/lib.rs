//! Staleness decisions for a cached precompiled header.
//!
//! Given a source folder holding the reference header and a destination
//! folder holding the cache, this crate decides whether the cached
//! precompiled header is still valid. Every check is fail-safe: anything
//! missing, oversized, unreadable or ambiguous results in a rebuild rather
//! than an error. Only configuration problems (missing folders, an
//! uncreatable cache directory, a missing reference header) are fatal.

#![warn(missing_docs)]

pub mod artifact;
mod depcheck;
pub mod engine;
pub mod error;
mod header;
pub mod helper;
pub mod report;
pub mod verdict;

#[cfg(test)]
mod testing;

pub use artifact::ArtifactSet;
pub use engine::StalenessEngine;
pub use error::{FatalError, HelperError};
pub use helper::{compile, run_helper, Outcome};
pub use report::{Event, MemoryReporter, Reporter, Severity, TerminalReporter};
pub use verdict::{OutputKind, RebuildReason, Verdict};
