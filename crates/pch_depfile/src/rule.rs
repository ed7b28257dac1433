//! Splitting a dependency rule into its target and prerequisites.

use crate::tokenizer::DepTokens;

/// Problems with the shape of a dependency rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The rule contains no filenames at all.
    #[error("dependency rule is empty")]
    Empty,

    /// The first filename is not followed by a colon.
    #[error("target file doesn't end with colon: {0}")]
    TargetMissingColon(String),
}

/// A parsed dependency rule: one target and the files it depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyList {
    /// The build target, without its trailing colon.
    pub target: String,
    /// The prerequisites, in the order the compiler listed them.
    pub prerequisites: Vec<String>,
}

impl DependencyList {
    /// Parses `text` as `target: prereq prereq ...`.
    ///
    /// The colon must be attached to the target filename. Only the first rule
    /// is meaningful; any later `name:` tokens are treated as prerequisites.
    pub fn parse(text: &str, max_token_len: usize) -> Result<Self, RuleError> {
        let mut tokens = DepTokens::new(text, max_token_len);
        let first = tokens.next().ok_or(RuleError::Empty)?;
        let target = match first.strip_suffix(':') {
            Some(t) => t.to_string(),
            None => return Err(RuleError::TargetMissingColon(first)),
        };
        Ok(Self {
            target,
            prerequisites: tokens.collect(),
        })
    }
}
