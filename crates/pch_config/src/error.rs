//! Errors raised while reading `precompile_helper.toml`.

/// A configuration file that cannot be used. Always fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file named by `--config` could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid TOML or has unknown keys or wrongly typed values.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A layout name or size limit is out of range.
    #[error("validation error: {0}")]
    ValidationError(String),
}
