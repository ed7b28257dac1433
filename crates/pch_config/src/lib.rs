//! Parsing and validation of the helper's optional TOML configuration.
//!
//! Every setting has a default matching the stock Arduino/Teensy layout, so a
//! configuration file is only needed to rename the cached header, move the
//! cache directory, adjust size limits, or change how the compiler is run.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::*;
