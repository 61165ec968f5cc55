//! Match atoms: the unit a `Match` operation repeats.
//!
//! An atom record is stored inline in the bytecode after the `Match`
//! operands: a one-byte kind discriminant, then a single operand byte for
//! `Byte` and `Class`, nothing for `Any`, or a word-length-prefixed payload
//! for `Utf8`, `Set` and `NegSet`.

use strand_types::{Error, Result};

use crate::opcode::{push_word, read_word, WORD};

const KIND_BYTE: u8 = 0;
const KIND_CLASS: u8 = 1;
const KIND_ANY: u8 = 2;
const KIND_UTF8: u8 = 3;
const KIND_SET: u8 = 4;
const KIND_NEGSET: u8 = 5;

/// One matchable unit, borrowing any payload from the bytecode (or, before
/// emission, from the parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Atom<'p> {
    /// A single literal byte.
    Byte(u8),
    /// A character class escape: one of `d D s S w W`.
    Class(u8),
    /// `.`: one whole UTF-8 codepoint (one byte on malformed input).
    Any,
    /// A multibyte UTF-8 literal, matched as an atomic unit.
    Utf8(&'p [u8]),
    /// Bracket set contents (ranges unexpanded).
    Set(&'p [u8]),
    /// Negated bracket set.
    NegSet(&'p [u8]),
}

fn class_match(class: u8, b: u8) -> bool {
    match class {
        b'd' => b.is_ascii_digit(),
        b'D' => !b.is_ascii_digit(),
        b's' => matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c),
        b'S' => !matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c),
        b'w' => b.is_ascii_alphanumeric() || b == b'_',
        b'W' => !(b.is_ascii_alphanumeric() || b == b'_'),
        _ => false,
    }
}

/// Membership in bracket-set `payload`, interpreting `x-y` triples as
/// inclusive ranges; a `-` at either end is literal.
fn set_match(payload: &[u8], b: u8) -> bool {
    let mut i = 0;
    while i < payload.len() {
        if i + 2 < payload.len() && payload[i + 1] == b'-' {
            let (lo, hi) = (payload[i], payload[i + 2]);
            if lo <= b && b <= hi {
                return true;
            }
            i += 3;
        } else {
            if payload[i] == b {
                return true;
            }
            i += 1;
        }
    }
    false
}

/// Length of the UTF-8 sequence led by `b`; `1` for anything malformed.
fn utf8_stride(input: &[u8], pos: usize) -> usize {
    let lead = input[pos];
    let len = match lead {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return 1,
    };
    if pos + len <= input.len() && input[pos + 1..pos + len].iter().all(|&b| b & 0xc0 == 0x80) {
        len
    } else {
        1
    }
}

impl<'p> Atom<'p> {
    /// Try to consume this atom at `input[pos]`; the returned stride is the
    /// byte count consumed.
    pub(crate) fn match_at(&self, input: &[u8], pos: usize) -> Option<usize> {
        if pos >= input.len() {
            return None;
        }
        match self {
            Atom::Byte(b) => (input[pos] == *b).then_some(1),
            Atom::Class(c) => class_match(*c, input[pos]).then_some(1),
            Atom::Any => Some(utf8_stride(input, pos)),
            Atom::Utf8(bytes) => input[pos..].starts_with(bytes).then_some(bytes.len()),
            Atom::Set(payload) => set_match(payload, input[pos]).then_some(1),
            Atom::NegSet(payload) => (!set_match(payload, input[pos])).then_some(1),
        }
    }

    /// Append the record to `code`.
    pub(crate) fn emit(&self, code: &mut Vec<u8>) {
        match self {
            Atom::Byte(b) => code.extend_from_slice(&[KIND_BYTE, *b]),
            Atom::Class(c) => code.extend_from_slice(&[KIND_CLASS, *c]),
            Atom::Any => code.push(KIND_ANY),
            Atom::Utf8(payload) => {
                code.push(KIND_UTF8);
                push_word(code, payload.len());
                code.extend_from_slice(payload);
            }
            Atom::Set(payload) => {
                code.push(KIND_SET);
                push_word(code, payload.len());
                code.extend_from_slice(payload);
            }
            Atom::NegSet(payload) => {
                code.push(KIND_NEGSET);
                push_word(code, payload.len());
                code.extend_from_slice(payload);
            }
        }
    }

    /// Decode the record at `code[at]`, returning it with the offset of the
    /// byte past it.
    pub(crate) fn decode(code: &'p [u8], at: usize) -> Result<(Atom<'p>, usize)> {
        let kind = *code.get(at).ok_or(Error::InvalidArgument)?;
        match kind {
            KIND_BYTE => Ok((Atom::Byte(code[at + 1]), at + 2)),
            KIND_CLASS => Ok((Atom::Class(code[at + 1]), at + 2)),
            KIND_ANY => Ok((Atom::Any, at + 1)),
            KIND_UTF8 | KIND_SET | KIND_NEGSET => {
                let len = read_word(code, at + 1);
                let start = at + 1 + WORD;
                let payload = code
                    .get(start..start + len)
                    .ok_or(Error::InvalidArgument)?;
                let atom = match kind {
                    KIND_UTF8 => Atom::Utf8(payload),
                    KIND_SET => Atom::Set(payload),
                    _ => Atom::NegSet(payload),
                };
                Ok((atom, start + len))
            }
            _ => Err(Error::InvalidArgument),
        }
    }
}
