//! The compiler command line.

use crate::error::LaunchError;

/// A compiler command line: the program followed by its arguments.
///
/// `argv[0]` is both the program that gets executed and the `argv[0]` the
/// compiler sees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    argv: Vec<String>,
}

impl Invocation {
    /// Builds an invocation from a full argument vector.
    pub fn from_argv(argv: Vec<String>) -> Result<Self, LaunchError> {
        if argv.first().map_or(true, |p| p.is_empty()) {
            return Err(LaunchError::EmptyCommand);
        }
        Ok(Self { argv })
    }

    /// The compiler executable.
    ///
    /// A path containing a separator is used as given; a bare name is looked
    /// up on `PATH` in both launch modes.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments after the program.
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// The complete argument vector, program included.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}
