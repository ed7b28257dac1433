//! Narration of the decision process.
//!
//! The engine emits an [`Event`] at every decision point. A [`Reporter`]
//! decides what reaches the terminal: notes only in verbose mode, status
//! lines always on stdout, warnings always on stderr.

use std::fmt;
use std::path::PathBuf;

use pch_depfile::RuleError;

use crate::verdict::RebuildReason;

/// How an event is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Verbose-only narration.
    Note,
    /// A result line that is always printed.
    Status,
    /// A problem that forces a rebuild and is always printed.
    Warning,
}

const BANNER_RULE: &str = "********************************************";

/// A decision point reached while checking the cache or launching the compiler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Start of a verbose run.
    Banner {
        /// Tool version.
        version: String,
    },
    /// End of a verbose run.
    BannerEnd,
    /// The cache directory is being created.
    CreatingCacheDir(PathBuf),
    /// The reference header matches the cached copy.
    IdenticalFiles {
        /// The reference header.
        source: PathBuf,
        /// The cached copy.
        cached: PathBuf,
    },
    /// The reference header is being copied into the cache.
    CopyingHeader {
        /// The reference header.
        from: PathBuf,
        /// The cached copy.
        to: PathBuf,
        /// Number of bytes copied.
        bytes: u64,
    },
    /// The reference header exceeds the copy limit.
    HeaderTooLarge {
        /// The reference header.
        path: PathBuf,
        /// Its size in bytes.
        size: u64,
        /// The configured limit.
        limit: u64,
    },
    /// A generated file does not exist.
    FileMissing(PathBuf),
    /// A generated file is older than the input it was built from.
    OutputOutdated {
        /// The newer input.
        input: PathBuf,
        /// The stale output.
        output: PathBuf,
    },
    /// A generated file passed its freshness check.
    LooksOk(PathBuf),
    /// The dependency rule file is about to be read.
    ReadingDepfile(PathBuf),
    /// The dependency rule file is empty.
    DepfileEmpty(PathBuf),
    /// The dependency rule file exceeds the parse limit.
    DepfileTooLarge {
        /// The dependency rule file.
        path: PathBuf,
        /// Its size in bytes.
        size: u64,
        /// The configured limit.
        limit: u64,
    },
    /// The dependency rule file could not be read.
    DepfileUnreadable {
        /// The dependency rule file.
        path: PathBuf,
        /// The read error.
        reason: String,
    },
    /// The dependency rule file is not valid UTF-8.
    DepfileNotUtf8(PathBuf),
    /// The dependency rule is about to be parsed.
    ParsingDepfile {
        /// Size of the rule text in bytes.
        bytes: u64,
    },
    /// The dependency rule has an unusable shape.
    MalformedRule(RuleError),
    /// The rule's target.
    TargetFile(PathBuf),
    /// A listed dependency.
    DependencyFile(PathBuf),
    /// A file listed in the rule cannot be stat'ed.
    NoMetadata(PathBuf),
    /// The current dependency is newer than this output.
    DependencyNewer {
        /// The output that is now stale.
        output: PathBuf,
    },
    /// Every check passed.
    AllChecksPassed,
    /// The cache was rejected and the compiler will run.
    Rebuilding(RebuildReason),
    /// The cached artifact will be used.
    CacheHit(PathBuf),
    /// The compiler is about to run.
    RunningCompiler,
    /// One compiler argument, program included.
    CompilerArg(String),
    /// The compiler program.
    CompilerProgram(String),
}

impl Event {
    /// How this event is presented.
    pub fn severity(&self) -> Severity {
        match self {
            Event::HeaderTooLarge { .. }
            | Event::DepfileEmpty(_)
            | Event::DepfileTooLarge { .. }
            | Event::DepfileUnreadable { .. }
            | Event::DepfileNotUtf8(_) => Severity::Warning,
            Event::CacheHit(_) => Severity::Status,
            _ => Severity::Note,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Banner { version } => {
                write!(f, "\n{BANNER_RULE}\n      precompile_helper {version}")
            }
            Event::BannerEnd => write!(f, "\n{BANNER_RULE}"),
            Event::CreatingCacheDir(p) => write!(f, "create dir: {}", p.display()),
            Event::IdenticalFiles { source, cached } => write!(
                f,
                "identical files: {} and {}",
                source.display(),
                cached.display()
            ),
            Event::CopyingHeader { from, to, bytes } => write!(
                f,
                "Copy {} to {}, {bytes} bytes",
                from.display(),
                to.display()
            ),
            Event::HeaderTooLarge { path, size, limit } => write!(
                f,
                "{} is unexpectedly large ({size} bytes, limit {limit})",
                path.display()
            ),
            Event::FileMissing(p) => write!(f, "{} not found, compile req'd", p.display()),
            Event::OutputOutdated { input, output } => write!(
                f,
                "{} is newer than {}, compile req'd",
                input.display(),
                output.display()
            ),
            Event::LooksOk(p) => write!(f, "{} looks ok", p.display()),
            Event::ReadingDepfile(p) => write!(f, "Read {}...", p.display()),
            Event::DepfileEmpty(p) => write!(f, "File {} is empty", p.display()),
            Event::DepfileTooLarge { path, size, limit } => write!(
                f,
                "{} is unexpectedly large ({size} bytes, limit {limit}), not parsing",
                path.display()
            ),
            Event::DepfileUnreadable { path, reason } => {
                write!(f, "Unable to read {}: {reason}", path.display())
            }
            Event::DepfileNotUtf8(p) => {
                write!(f, "{} is not valid UTF-8, not parsing", p.display())
            }
            Event::ParsingDepfile { bytes } => write!(f, "Parse depfile, {bytes} bytes"),
            Event::MalformedRule(err) => write!(f, "{err}"),
            Event::TargetFile(p) => write!(f, "target file: {}", p.display()),
            Event::DependencyFile(p) => write!(f, " dep file: {}", p.display()),
            Event::NoMetadata(p) => write!(f, "  can't get info for {}", p.display()),
            Event::DependencyNewer { output } => {
                write!(f, "  newer than {}, compile req'd", output.display())
            }
            Event::AllChecksPassed => {
                write!(f, "All dependency checks passed, no need to run compiler")
            }
            Event::Rebuilding(reason) => write!(f, "Compile required: {reason}"),
            Event::CacheHit(p) => write!(f, "Using previously compiled file: {}", p.display()),
            Event::RunningCompiler => write!(f, "Running Compiler:"),
            Event::CompilerArg(a) => write!(f, "arg: {a}"),
            Event::CompilerProgram(p) => write!(f, "prog: {p}"),
        }
    }
}

/// Receives events as they happen.
pub trait Reporter {
    /// Handles one event.
    fn emit(&mut self, event: Event);
}

/// Prints events to the terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    /// Creates a reporter; notes are printed only when `verbose` is set.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Returns `true` if `event` would be printed.
    pub fn shows(&self, event: &Event) -> bool {
        match event.severity() {
            Severity::Note => self.verbose,
            Severity::Status | Severity::Warning => true,
        }
    }
}

impl Reporter for TerminalReporter {
    fn emit(&mut self, event: Event) {
        if !self.shows(&event) {
            return;
        }
        match event.severity() {
            Severity::Warning => eprintln!("warning: {event}"),
            Severity::Note | Severity::Status => println!("{event}"),
        }
    }
}

/// Records events in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryReporter {
    /// Every event emitted so far, in order.
    pub events: Vec<Event>,
}

impl MemoryReporter {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rendered text of every recorded event.
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(|e| e.to_string()).collect()
    }

    /// Returns the recorded warnings.
    pub fn warnings(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.severity() == Severity::Warning)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
