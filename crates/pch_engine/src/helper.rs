//! One complete helper run: decide, then either reuse or compile.

use std::path::PathBuf;

use pch_common::FileSystem;
use pch_config::HelperConfig;
use pch_launch::{Invocation, LaunchError, Launcher};

use crate::artifact::ArtifactSet;
use crate::engine::StalenessEngine;
use crate::error::HelperError;
use crate::report::{Event, Reporter};
use crate::verdict::{RebuildReason, Verdict};

/// What a helper run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The cached precompiled header was kept and the compiler did not run.
    Reused {
        /// The precompiled header in use.
        artifact: PathBuf,
    },
    /// The compiler ran.
    Compiled {
        /// Exit code reported by the launcher.
        exit_code: i32,
        /// Why the cache was not reused.
        reason: RebuildReason,
    },
}

impl Outcome {
    /// The exit code the helper process should finish with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Reused { .. } => 0,
            Outcome::Compiled { exit_code, .. } => *exit_code,
        }
    }
}

/// Checks the cache and runs the compiler if it is stale.
pub fn run_helper(
    artifacts: &ArtifactSet,
    invocation: &Invocation,
    config: &HelperConfig,
    fs: &dyn FileSystem,
    reporter: &mut dyn Reporter,
    launcher: &mut dyn Launcher,
) -> Result<Outcome, HelperError> {
    let verdict = StalenessEngine::new(fs, reporter, config).evaluate(artifacts)?;
    match verdict {
        Verdict::Reuse => {
            reporter.emit(Event::CacheHit(artifacts.artifact.clone()));
            reporter.emit(Event::BannerEnd);
            Ok(Outcome::Reused {
                artifact: artifacts.artifact.clone(),
            })
        }
        Verdict::Rebuild(reason) => {
            reporter.emit(Event::Rebuilding(reason.clone()));
            let exit_code = compile(invocation, reporter, launcher)?;
            Ok(Outcome::Compiled { exit_code, reason })
        }
    }
}

/// Narrates the command line, then hands it to `launcher`.
pub fn compile(
    invocation: &Invocation,
    reporter: &mut dyn Reporter,
    launcher: &mut dyn Launcher,
) -> Result<i32, LaunchError> {
    reporter.emit(Event::RunningCompiler);
    for arg in invocation.argv() {
        reporter.emit(Event::CompilerArg(arg.clone()));
    }
    reporter.emit(Event::CompilerProgram(invocation.program().to_string()));
    reporter.emit(Event::BannerEnd);
    launcher.launch(invocation)
}
