//! Parsing of Makefile-style dependency rules emitted by compilers.
//!
//! A dependency rule names a build target followed by every file the compiler
//! read while producing it, for example:
//!
//! ```text
//! /build/pch/Arduino.h.gch: /build/pch/Arduino.h \
//!   /cores/teensy4/WProgram.h /cores/teensy4/my\ header.h
//! ```
//!
//! [`parse_next`] extracts one filename at a time; [`DependencyList`] splits a
//! whole rule into its target and prerequisites.

#![warn(missing_docs)]

pub mod rule;
pub mod tokenizer;

pub use rule::{DependencyList, RuleError};
pub use tokenizer::{parse_next, DepTokens, DEFAULT_MAX_TOKEN_LEN};
