//! Configuration file loading and validation.

use std::path::{Component, Path};

use crate::error::ConfigError;
use crate::types::HelperConfig;

/// Loads and validates a helper configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<HelperConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a helper configuration from a string.
///
/// Missing sections and keys take their defaults; unknown keys are rejected.
pub fn load_config_from_str(content: &str) -> Result<HelperConfig, ConfigError> {
    let config: HelperConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks that file names are single path components and limits are positive.
fn validate_config(config: &HelperConfig) -> Result<(), ConfigError> {
    require_file_name("layout.header", &config.layout.header)?;
    require_file_name("layout.cache_dir", &config.layout.cache_dir)?;
    if config.limits.max_header_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "limits.max_header_bytes must be positive".to_string(),
        ));
    }
    if config.limits.max_depfile_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "limits.max_depfile_bytes must be positive".to_string(),
        ));
    }
    if config.limits.max_token_len == 0 {
        return Err(ConfigError::ValidationError(
            "limits.max_token_len must be positive".to_string(),
        ));
    }
    Ok(())
}

fn require_file_name(key: &str, value: &str) -> Result<(), ConfigError> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ConfigError::ValidationError(format!(
            "{key} must be a plain file name, got '{value}'"
        ))),
    }
}
