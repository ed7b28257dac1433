//! Error types for compiler invocation.

/// Errors that can occur while starting or supervising the compiler.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// No compiler program was given.
    #[error("no compiler command given")]
    EmptyCommand,

    /// The compiler could not be started (or `exec` returned).
    #[error("unable to run compiler {program}: {source}")]
    Spawn {
        /// The program that failed to start.
        program: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Forwarding the compiler's output or waiting for it to exit failed.
    #[error("failed to relay compiler output: {0}")]
    Relay(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_display_names_program() {
        let err = LaunchError::Spawn {
            program: "/opt/arm/bin/arm-none-eabi-g++".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("unable to run compiler"));
        assert!(msg.contains("arm-none-eabi-g++"));
    }

    #[test]
    fn empty_command_display() {
        assert_eq!(
            LaunchError::EmptyCommand.to_string(),
            "no compiler command given"
        );
    }

    #[test]
    fn relay_display() {
        let err = LaunchError::Relay(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));
        assert!(err.to_string().contains("pipe closed"));
    }
}
