//! Filename tokenizer for dependency rules.

/// Default maximum token length, in characters.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 4095;

/// Extracts the next filename from `input`.
///
/// Leading spaces, tabs, line terminators and backslash line continuations
/// are skipped. The token ends at unescaped whitespace, at a line
/// continuation, or at the end of input. `\ ` is an escaped space and
/// contributes a literal space to the token.
///
/// Tokens longer than `max_len` characters are cut at the limit; the rest of
/// the filename stays in the returned remainder and comes back as the next
/// token.
///
/// Returns `None` when nothing but separators remains. An empty token is never
/// returned.
pub fn parse_next(input: &str, max_len: usize) -> Option<(String, &str)> {
    let rest = skip_separators(input);
    let bytes = rest.as_bytes();

    let mut token = String::new();
    let mut count = 0;
    let mut pos = 0;
    while count < max_len {
        let Some(c) = rest[pos..].chars().next() else {
            break;
        };
        match c {
            ' ' | '\t' | '\r' | '\n' => break,
            '\\' if matches!(bytes.get(pos + 1), Some(b'\r' | b'\n')) => break,
            '\\' if bytes.get(pos + 1) == Some(&b' ') => {
                token.push(' ');
                pos += 2;
            }
            _ => {
                token.push(c);
                pos += c.len_utf8();
            }
        }
        count += 1;
    }

    if token.is_empty() {
        return None;
    }
    Some((token, &rest[pos..]))
}

/// Skips whitespace and backslash-newline continuations.
fn skip_separators(mut s: &str) -> &str {
    loop {
        let b = s.as_bytes();
        match b.first() {
            Some(b'\\') if matches!(b.get(1), Some(b'\r' | b'\n')) => s = &s[2..],
            Some(b' ' | b'\t' | b'\r' | b'\n') => s = &s[1..],
            _ => return s,
        }
    }
}

/// Iterator over the filenames of a dependency rule.
#[derive(Clone, Debug)]
pub struct DepTokens<'a> {
    rest: &'a str,
    max_len: usize,
}

impl<'a> DepTokens<'a> {
    /// Creates a tokenizer over `input` with the given per-token limit.
    pub fn new(input: &'a str, max_len: usize) -> Self {
        Self {
            rest: input,
            max_len,
        }
    }
}

impl Iterator for DepTokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (token, rest) = parse_next(self.rest, self.max_len)?;
        self.rest = rest;
        Some(token)
    }
}
