//! The "run the compiler and obtain its status" operation.

use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::LaunchError;
use crate::filter::OutputFilter;
use crate::invocation::Invocation;
use crate::relay::relay_child;

/// Runs a compiler invocation and reports the exit code this tool should use.
pub trait Launcher {
    /// Runs `invocation`.
    ///
    /// Implementations that replace the current process only return on failure.
    fn launch(&mut self, invocation: &Invocation) -> Result<i32, LaunchError>;
}

/// How the compiler process is started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaunchMode {
    /// Replace this process with the compiler (`exec`). Unix only; elsewhere
    /// this behaves as [`LaunchMode::Relay`].
    Replace,
    /// Spawn the compiler as a child, forward its output, and wait for it.
    Relay,
}

impl LaunchMode {
    /// The preferred mode for the current platform.
    pub fn platform_default() -> Self {
        if cfg!(unix) {
            LaunchMode::Replace
        } else {
            LaunchMode::Relay
        }
    }
}

/// [`Launcher`] that starts a real operating-system process.
#[derive(Clone, Debug)]
pub struct ProcessLauncher {
    mode: LaunchMode,
    filter: OutputFilter,
    propagate_exit_status: bool,
}

impl ProcessLauncher {
    /// Creates a launcher using `mode`, with no output filtering and exit
    /// status propagation enabled.
    pub fn new(mode: LaunchMode) -> Self {
        Self {
            mode,
            filter: OutputFilter::default(),
            propagate_exit_status: true,
        }
    }

    /// Sets the filter applied to relayed output.
    pub fn with_filter(mut self, filter: OutputFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Chooses whether a relayed compiler's exit code becomes this tool's
    /// exit code. When disabled, relaying always yields 0.
    pub fn with_exit_status_propagation(mut self, propagate: bool) -> Self {
        self.propagate_exit_status = propagate;
        self
    }

    /// The configured launch mode.
    pub fn mode(&self) -> LaunchMode {
        self.mode
    }

    /// Maps a relayed child's status to this tool's exit code.
    ///
    /// A child terminated by a signal has no code and maps to 1.
    pub fn exit_code(&self, status: ExitStatus) -> i32 {
        if !self.propagate_exit_status {
            return 0;
        }
        status.code().unwrap_or(1)
    }

    #[cfg(unix)]
    fn replace(&self, invocation: &Invocation) -> Result<i32, LaunchError> {
        use std::os::unix::process::CommandExt;

        let source = Command::new(invocation.program())
            .args(invocation.args())
            .exec();
        Err(LaunchError::Spawn {
            program: invocation.program().to_string(),
            source,
        })
    }

    #[cfg(not(unix))]
    fn replace(&self, invocation: &Invocation) -> Result<i32, LaunchError> {
        self.relay(invocation)
    }

    fn relay(&self, invocation: &Invocation) -> Result<i32, LaunchError> {
        let mut child = Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: invocation.program().to_string(),
                source,
            })?;

        let stdout = io::stdout();
        let stderr = io::stderr();
        let status = relay_child(
            &mut child,
            &mut stdout.lock(),
            &mut stderr.lock(),
            self.filter,
        )
        .map_err(LaunchError::Relay)?;
        Ok(self.exit_code(status))
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&mut self, invocation: &Invocation) -> Result<i32, LaunchError> {
        // Anything already printed must precede the compiler's output.
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        match self.mode {
            LaunchMode::Replace => self.replace(invocation),
            LaunchMode::Relay => self.relay(invocation),
        }
    }
}
