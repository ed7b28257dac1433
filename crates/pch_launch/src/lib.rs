//! Running the external compiler.
//!
//! The compiler is an opaque program: its argument vector is passed through
//! verbatim and its output is either inherited (process replacement) or
//! forwarded chunk by chunk (relay). Neither path interprets the output.

#![warn(missing_docs)]

pub mod error;
pub mod filter;
pub mod invocation;
pub mod launcher;
pub mod relay;

pub use error::LaunchError;
pub use filter::OutputFilter;
pub use invocation::Invocation;
pub use launcher::{LaunchMode, Launcher, ProcessLauncher};
