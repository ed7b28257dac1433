//! Configuration types deserialized from the helper's TOML file.

use pch_common::TieBreak;
use serde::Deserialize;

/// The top-level helper configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelperConfig {
    /// File names of the cached header and its cache directory.
    pub layout: LayoutConfig,
    /// File size ceilings.
    pub limits: LimitsConfig,
    /// Timestamp comparison policy.
    pub freshness: FreshnessConfig,
    /// How the compiler is launched when a rebuild is needed.
    pub compiler: CompilerConfig,
}

/// Names of the managed files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// File name of the reference header inside the source folder.
    pub header: String,
    /// Cache subdirectory inside the destination folder.
    pub cache_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header: "Arduino.h".to_string(),
            cache_dir: "pch".to_string(),
        }
    }
}

impl LayoutConfig {
    /// File name of the dependency rule written next to the cached header.
    pub fn depfile_name(&self) -> String {
        format!("{}.d", self.header)
    }

    /// File name of the precompiled header artifact.
    pub fn artifact_name(&self) -> String {
        format!("{}.gch", self.header)
    }
}

/// Size ceilings applied before reading files into memory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Largest reference header that will be copied, in bytes.
    pub max_header_bytes: u64,
    /// Largest dependency rule file that will be parsed, in bytes.
    pub max_depfile_bytes: u64,
    /// Longest filename accepted from a dependency rule, in characters.
    pub max_token_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_header_bytes: 65_536,
            max_depfile_bytes: 262_144,
            max_token_len: 4095,
        }
    }
}

/// Timestamp comparison settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FreshnessConfig {
    /// Whether equal modification times count as fresh or stale.
    pub ties: TieBreak,
}

/// How the compiler process is started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchSetting {
    /// Replace the helper process where the platform supports it, otherwise relay.
    #[default]
    Auto,
    /// Replace the helper process with the compiler.
    Replace,
    /// Spawn the compiler as a child and forward its output.
    Relay,
}

/// Compiler invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Launch strategy.
    pub launch: LaunchSetting,
    /// Drop `\r` bytes from relayed compiler output.
    pub strip_carriage_returns: bool,
    /// Exit with the compiler's own status after relaying (otherwise always 0).
    pub propagate_exit_status: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            launch: LaunchSetting::Auto,
            strip_carriage_returns: false,
            propagate_exit_status: true,
        }
    }
}
