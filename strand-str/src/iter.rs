//! Tokenization: separator-set tokens and substring splitting.

use crate::bytestr::ByteStr;
use crate::search::{find_set_in, find_sub};

/// Iterator over maximal runs of bytes outside a separator set.
///
/// Runs of separators are skipped, so no empty tokens are produced.
pub struct Tokens<'a> {
    rest: &'a [u8],
    set: &'a [u8],
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let start = match find_set_in(self.rest, self.set, false) {
            Some(i) => i,
            None => {
                self.rest = &[];
                return None;
            }
        };
        let rest = &self.rest[start..];
        let end = find_set_in(rest, self.set, true).unwrap_or(rest.len());
        self.rest = &rest[end..];
        Some(&rest[..end])
    }
}

/// Iterator over the segments between occurrences of a separator substring.
///
/// A separator directly following the previous one yields an empty segment;
/// a trailing separator yields a final empty segment.
pub struct SplitStr<'a> {
    rest: Option<&'a [u8]>,
    sep: &'a [u8],
}

impl<'a> Iterator for SplitStr<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let rest = self.rest?;
        if self.sep.is_empty() {
            self.rest = None;
            return Some(rest);
        }
        match find_sub(rest, self.sep) {
            Some(i) => {
                // The cursor skips the separator before the next search, so
                // the separator itself is never part of a segment.
                self.rest = Some(&rest[i + self.sep.len()..]);
                Some(&rest[..i])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

impl ByteStr {
    /// Iterate maximal runs of bytes that are not members of `set`.
    pub fn tokens<'a>(&'a self, set: &'a [u8]) -> Tokens<'a> {
        Tokens {
            rest: self.as_slice(),
            set,
        }
    }

    /// Iterate the segments between occurrences of `sep`. An empty
    /// separator yields the whole value once.
    pub fn split_str<'a>(&'a self, sep: &'a [u8]) -> SplitStr<'a> {
        SplitStr {
            rest: Some(self.as_slice()),
            sep,
        }
    }
}
