//! The outcome of a staleness check.

use std::fmt;
use std::path::PathBuf;

use pch_depfile::RuleError;

/// Whether the cached precompiled header can be used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Every check passed; the compiler does not need to run.
    Reuse,
    /// The compiler must regenerate the artifact.
    Rebuild(RebuildReason),
}

/// One of the outputs a dependency is compared against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    /// The target named by the dependency rule.
    Target,
    /// The precompiled header.
    Artifact,
    /// The dependency rule file itself.
    Depfile,
}

/// Why the cached artifact cannot be reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RebuildReason {
    /// The reference header differed from the cached copy and was copied over.
    HeaderChanged,
    /// The reference header exceeds the copy limit and was left alone.
    HeaderTooLarge {
        /// Size of the reference header in bytes.
        size: u64,
    },
    /// There is no dependency rule file.
    DepfileMissing,
    /// The dependency rule file is older than the cached header.
    DepfileOutdated,
    /// There is no precompiled header.
    ArtifactMissing,
    /// The precompiled header is older than the cached header.
    ArtifactOutdated,
    /// The dependency rule file is empty.
    DepfileEmpty,
    /// The dependency rule file exceeds the parse limit.
    DepfileTooLarge {
        /// Size of the dependency rule file in bytes.
        size: u64,
    },
    /// The dependency rule file could not be read.
    DepfileUnreadable,
    /// The dependency rule file is not valid UTF-8.
    DepfileNotUtf8,
    /// The dependency rule has no target or the target lacks its colon.
    MalformedRule(RuleError),
    /// The rule's target cannot be stat'ed.
    TargetUnresolvable(PathBuf),
    /// A listed dependency cannot be stat'ed.
    DependencyUnresolvable(PathBuf),
    /// A listed dependency is newer than one of the outputs.
    DependencyNewer {
        /// The dependency that changed.
        dependency: PathBuf,
        /// The output it is newer than.
        output: OutputKind,
    },
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputKind::Target => "the rule target",
            OutputKind::Artifact => "the precompiled header",
            OutputKind::Depfile => "the dependency file",
        })
    }
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildReason::HeaderChanged => write!(f, "reference header changed"),
            RebuildReason::HeaderTooLarge { size } => {
                write!(f, "reference header too large to cache ({size} bytes)")
            }
            RebuildReason::DepfileMissing => write!(f, "dependency file missing"),
            RebuildReason::DepfileOutdated => write!(f, "dependency file older than header"),
            RebuildReason::ArtifactMissing => write!(f, "precompiled header missing"),
            RebuildReason::ArtifactOutdated => write!(f, "precompiled header older than header"),
            RebuildReason::DepfileEmpty => write!(f, "dependency file empty"),
            RebuildReason::DepfileTooLarge { size } => {
                write!(f, "dependency file too large to parse ({size} bytes)")
            }
            RebuildReason::DepfileUnreadable => write!(f, "dependency file unreadable"),
            RebuildReason::DepfileNotUtf8 => write!(f, "dependency file is not UTF-8"),
            RebuildReason::MalformedRule(err) => write!(f, "{err}"),
            RebuildReason::TargetUnresolvable(p) => {
                write!(f, "cannot stat rule target {}", p.display())
            }
            RebuildReason::DependencyUnresolvable(p) => {
                write!(f, "cannot stat dependency {}", p.display())
            }
            RebuildReason::DependencyNewer { dependency, output } => {
                write!(f, "{} is newer than {output}", dependency.display())
            }
        }
    }
}
