//! Optional normalization of relayed compiler output.

use std::borrow::Cow;

/// Byte-level transformation applied to each relayed output chunk.
///
/// The default filter passes bytes through untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputFilter {
    /// Drop every `\r` byte.
    pub strip_carriage_returns: bool,
}

impl OutputFilter {
    /// Applies the filter to one chunk, borrowing when nothing changes.
    pub fn apply<'a>(&self, chunk: &'a [u8]) -> Cow<'a, [u8]> {
        if self.strip_carriage_returns && chunk.contains(&b'\r') {
            Cow::Owned(chunk.iter().copied().filter(|&b| b != b'\r').collect())
        } else {
            Cow::Borrowed(chunk)
        }
    }
}
