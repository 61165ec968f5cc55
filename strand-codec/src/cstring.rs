//! C-style string escaping.
//!
//! Encoding keeps printable ASCII, uses the short escape table for the
//! common control bytes, and renders everything else as three-digit octal.
//! Decoding additionally accepts `\x` with one or two hex digits, `\uXXXX`
//! and `\U00XXXXXX` (emitted as UTF-8), rejecting surrogates and
//! out-of-range codepoints.

use strand_str::ByteStr;
use strand_types::{Error, Result};

use crate::appending;
use crate::hex::hex_val;
use crate::utf8::push_codepoint;

fn short_escape(b: u8) -> Option<u8> {
    match b {
        0x07 => Some(b'a'),
        0x08 => Some(b'b'),
        b'\t' => Some(b't'),
        b'\n' => Some(b'n'),
        0x0b => Some(b'v'),
        0x0c => Some(b'f'),
        b'\r' => Some(b'r'),
        b'\\' => Some(b'\\'),
        b'"' => Some(b'"'),
        _ => None,
    }
}

/// Append the escaped rendering of `src` to `dst`.
pub fn encode(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    appending(dst, |dst| {
        for &b in src {
            if let Some(esc) = short_escape(b) {
                dst.append(&[b'\\', esc])?;
            } else if (0x20..=0x7e).contains(&b) {
                dst.append_byte(b)?;
            } else {
                dst.append(&[
                    b'\\',
                    b'0' + (b >> 6),
                    b'0' + ((b >> 3) & 7),
                    b'0' + (b & 7),
                ])?;
            }
        }
        Ok(())
    })
}

/// Append the bytes described by the escaped text `src` to `dst`.
pub fn decode(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    appending(dst, |dst| {
        let mut i = 0;
        while i < src.len() {
            let b = src[i];
            if b != b'\\' {
                dst.append_byte(b)?;
                i += 1;
                continue;
            }
            i += 1;
            let Some(&esc) = src.get(i) else {
                return Err(Error::InvalidArgument);
            };
            i += 1;
            match esc {
                b'a' => dst.append_byte(0x07)?,
                b'b' => dst.append_byte(0x08)?,
                b't' => dst.append_byte(b'\t')?,
                b'n' => dst.append_byte(b'\n')?,
                b'v' => dst.append_byte(0x0b)?,
                b'f' => dst.append_byte(0x0c)?,
                b'r' => dst.append_byte(b'\r')?,
                b'\\' => dst.append_byte(b'\\')?,
                b'\'' => dst.append_byte(b'\'')?,
                b'"' => dst.append_byte(b'"')?,
                b'0'..=b'7' => {
                    // Up to three octal digits, first one already consumed.
                    let mut value = (esc - b'0') as u32;
                    let mut digits = 1;
                    while digits < 3 {
                        match src.get(i) {
                            Some(&d @ b'0'..=b'7') => {
                                value = value * 8 + (d - b'0') as u32;
                                i += 1;
                                digits += 1;
                            }
                            _ => break,
                        }
                    }
                    if value > 0xff {
                        return Err(Error::InvalidArgument);
                    }
                    dst.append_byte(value as u8)?;
                }
                b'x' => {
                    // One or two hex digits.
                    let hi = src
                        .get(i)
                        .copied()
                        .and_then(hex_val)
                        .ok_or(Error::InvalidArgument)?;
                    i += 1;
                    let mut value = hi;
                    if let Some(lo) = src.get(i).copied().and_then(hex_val) {
                        value = (value << 4) | lo;
                        i += 1;
                    }
                    dst.append_byte(value)?;
                }
                b'u' => {
                    let cp = read_hex_exact(src, &mut i, 4)?;
                    push_codepoint(dst, cp)?;
                }
                b'U' => {
                    let cp = read_hex_exact(src, &mut i, 8)?;
                    push_codepoint(dst, cp)?;
                }
                _ => return Err(Error::InvalidArgument),
            }
        }
        Ok(())
    })
}

fn read_hex_exact(src: &[u8], i: &mut usize, digits: usize) -> Result<u32> {
    let mut value = 0u32;
    for _ in 0..digits {
        let d = src
            .get(*i)
            .copied()
            .and_then(hex_val)
            .ok_or(Error::InvalidArgument)?;
        value = (value << 4) | d as u32;
        *i += 1;
    }
    Ok(value)
}
