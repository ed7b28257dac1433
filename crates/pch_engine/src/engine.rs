//! The staleness decision chain.
//!
//! Checks run in a fixed order and the first failing check decides:
//!
//! 1. Source and destination folders exist and are directories (fatal).
//! 2. The cache directory exists, creating it if needed (fatal).
//! 3. The cached header matches the reference header byte for byte;
//!    otherwise it is refreshed and a rebuild follows.
//! 4. The dependency rule file exists and is fresh relative to the header.
//! 5. The precompiled header exists and is fresh relative to the header.
//! 6. No dependency listed in the rule is newer than the rule target, the
//!    precompiled header, or the rule file.

use std::path::Path;

use pch_common::{FileMetadata, FileSystem};
use pch_config::HelperConfig;

use crate::artifact::ArtifactSet;
use crate::depcheck::check_dependencies;
use crate::error::FatalError;
use crate::header::{sync_reference_header, HeaderSync};
use crate::report::{Event, Reporter};
use crate::verdict::{RebuildReason, Verdict};

/// Decides whether a cached precompiled header can be reused.
///
/// Metadata is looked up fresh for every check; nothing is cached between
/// calls to [`evaluate`](Self::evaluate).
pub struct StalenessEngine<'a> {
    fs: &'a dyn FileSystem,
    reporter: &'a mut dyn Reporter,
    config: &'a HelperConfig,
}

impl<'a> StalenessEngine<'a> {
    /// Creates an engine over the given filesystem, reporter and settings.
    pub fn new(
        fs: &'a dyn FileSystem,
        reporter: &'a mut dyn Reporter,
        config: &'a HelperConfig,
    ) -> Self {
        Self {
            fs,
            reporter,
            config,
        }
    }

    /// Runs the decision chain for `artifacts`.
    ///
    /// May write the cache directory and the cached header; never touches the
    /// dependency rule or the precompiled header.
    pub fn evaluate(&mut self, artifacts: &ArtifactSet) -> Result<Verdict, FatalError> {
        self.verify_directories(artifacts)?;
        self.ensure_cache_dir(artifacts)?;

        let header_meta = match sync_reference_header(
            self.fs,
            self.reporter,
            artifacts,
            &self.config.limits,
        )? {
            HeaderSync::InSync(meta) => meta,
            HeaderSync::Copied => return Ok(Verdict::Rebuild(RebuildReason::HeaderChanged)),
            HeaderSync::TooLarge { size } => {
                return Ok(Verdict::Rebuild(RebuildReason::HeaderTooLarge { size }))
            }
        };

        let depfile_meta = match self.fresh_output(artifacts, Generated::Depfile, &header_meta) {
            Ok(meta) => meta,
            Err(reason) => return Ok(Verdict::Rebuild(reason)),
        };
        let artifact_meta = match self.fresh_output(artifacts, Generated::Artifact, &header_meta) {
            Ok(meta) => meta,
            Err(reason) => return Ok(Verdict::Rebuild(reason)),
        };

        if let Some(reason) = check_dependencies(
            self.fs,
            self.reporter,
            artifacts,
            &self.config.limits,
            self.config.freshness.ties,
            &depfile_meta,
            &artifact_meta,
        ) {
            return Ok(Verdict::Rebuild(reason));
        }

        self.reporter.emit(Event::AllChecksPassed);
        Ok(Verdict::Reuse)
    }

    fn verify_directories(&self, artifacts: &ArtifactSet) -> Result<(), FatalError> {
        let src = self
            .fs
            .metadata(&artifacts.source_dir)
            .ok_or_else(|| FatalError::Inaccessible(artifacts.source_dir.clone()))?;
        let dest = self
            .fs
            .metadata(&artifacts.dest_dir)
            .ok_or_else(|| FatalError::Inaccessible(artifacts.dest_dir.clone()))?;
        if !src.is_dir() {
            return Err(FatalError::NotADirectory(artifacts.source_dir.clone()));
        }
        if !dest.is_dir() {
            return Err(FatalError::NotADirectory(artifacts.dest_dir.clone()));
        }
        Ok(())
    }

    fn ensure_cache_dir(&mut self, artifacts: &ArtifactSet) -> Result<(), FatalError> {
        let path = &artifacts.cache_dir;
        let uncreatable = |reason: String| FatalError::CacheDirUncreatable {
            path: path.clone(),
            reason,
        };

        if let Some(meta) = self.fs.metadata(path) {
            if meta.is_dir() {
                return Ok(());
            }
            return Err(uncreatable("exists and is not a directory".to_string()));
        }

        self.reporter.emit(Event::CreatingCacheDir(path.clone()));
        self.fs
            .create_dir(path)
            .map_err(|e| uncreatable(e.to_string()))?;
        match self.fs.metadata(path) {
            Some(meta) if meta.is_dir() => Ok(()),
            _ => Err(uncreatable("not a directory after creation".to_string())),
        }
    }

    /// Looks up a generated file and checks it against the cached header.
    fn fresh_output(
        &mut self,
        artifacts: &ArtifactSet,
        generated: Generated,
        header_meta: &FileMetadata,
    ) -> Result<FileMetadata, RebuildReason> {
        let output = generated.path(artifacts);
        let Some(meta) = self.fs.metadata(output) else {
            self.reporter.emit(Event::FileMissing(output.to_path_buf()));
            return Err(generated.missing());
        };
        if !self.config.freshness.ties.is_fresh(&meta, header_meta) {
            self.reporter.emit(Event::OutputOutdated {
                input: artifacts.cached_header.clone(),
                output: output.to_path_buf(),
            });
            return Err(generated.outdated());
        }
        self.reporter.emit(Event::LooksOk(output.to_path_buf()));
        Ok(meta)
    }
}

/// A file written by the last compile, checked against the cached header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Generated {
    Depfile,
    Artifact,
}

impl Generated {
    fn path(self, artifacts: &ArtifactSet) -> &Path {
        match self {
            Generated::Depfile => &artifacts.depfile,
            Generated::Artifact => &artifacts.artifact,
        }
    }

    fn missing(self) -> RebuildReason {
        match self {
            Generated::Depfile => RebuildReason::DepfileMissing,
            Generated::Artifact => RebuildReason::ArtifactMissing,
        }
    }

    fn outdated(self) -> RebuildReason {
        match self {
            Generated::Depfile => RebuildReason::DepfileOutdated,
            Generated::Artifact => RebuildReason::ArtifactOutdated,
        }
    }
}
