//! The freshness relation between two filesystem entries.

use serde::Deserialize;

use crate::metadata::FileMetadata;

/// How equal modification times are treated when checking freshness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Equal timestamps count as fresh: only a strictly newer input is stale.
    #[default]
    Fresh,
    /// Equal timestamps count as stale: the output must be strictly newer.
    Stale,
}

impl TieBreak {
    /// Returns `true` if `output` is fresh enough relative to `input`.
    ///
    /// With [`TieBreak::Fresh`] this is "input is not newer than output".
    /// With [`TieBreak::Stale`] this is "output is newer than input".
    pub fn is_fresh(self, output: &FileMetadata, input: &FileMetadata) -> bool {
        match self {
            TieBreak::Fresh => !input.is_newer_than(output),
            TieBreak::Stale => output.is_newer_than(input),
        }
    }
}
