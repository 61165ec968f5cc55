//! JSON string escaping.
//!
//! Encoding escapes the quote, backslash and control bytes (`\b \f \n \r
//! \t`, `\u00XX` for the rest); other bytes pass through untouched.
//! Decoding understands the standard escape set including `\uXXXX` with
//! surrogate pairs, emitting UTF-8.

use strand_str::ByteStr;
use strand_types::{Error, Result};

use crate::appending;
use crate::hex::hex_val;
use crate::utf8::push_codepoint;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Append the JSON-escaped rendering of `src` to `dst`.
pub fn encode(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    appending(dst, |dst| {
        for &b in src {
            match b {
                b'"' => dst.append(br#"\""#)?,
                b'\\' => dst.append(br"\\")?,
                0x08 => dst.append(br"\b")?,
                0x0c => dst.append(br"\f")?,
                b'\n' => dst.append(br"\n")?,
                b'\r' => dst.append(br"\r")?,
                b'\t' => dst.append(br"\t")?,
                0x00..=0x1f => dst.append(&[
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    DIGITS[(b >> 4) as usize],
                    DIGITS[(b & 0xf) as usize],
                ])?,
                _ => dst.append_byte(b)?,
            }
        }
        Ok(())
    })
}

fn read_u16_escape(src: &[u8], i: &mut usize) -> Result<u32> {
    let mut value = 0u32;
    for _ in 0..4 {
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

/// Append the bytes described by the JSON-escaped text `src` to `dst`.
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
                b'"' => dst.append_byte(b'"')?,
                b'\\' => dst.append_byte(b'\\')?,
                b'/' => dst.append_byte(b'/')?,
                b'b' => dst.append_byte(0x08)?,
                b'f' => dst.append_byte(0x0c)?,
                b'n' => dst.append_byte(b'\n')?,
                b'r' => dst.append_byte(b'\r')?,
                b't' => dst.append_byte(b'\t')?,
                b'u' => {
                    let unit = read_u16_escape(src, &mut i)?;
                    if (0xdc00..=0xdfff).contains(&unit) {
                        // A low surrogate cannot lead.
                        return Err(Error::InvalidArgument);
                    }
                    if (0xd800..=0xdbff).contains(&unit) {
                        // High surrogate: the pair is mandatory.
                        if src.get(i) != Some(&b'\\') || src.get(i + 1) != Some(&b'u') {
                            return Err(Error::InvalidArgument);
                        }
                        i += 2;
                        let low = read_u16_escape(src, &mut i)?;
                        if !(0xdc00..=0xdfff).contains(&low) {
                            return Err(Error::InvalidArgument);
                        }
                        let cp = 0x10000 + ((unit - 0xd800) << 10) + (low - 0xdc00);
                        push_codepoint(dst, cp)?;
                    } else {
                        push_codepoint(dst, unit)?;
                    }
                }
                _ => return Err(Error::InvalidArgument),
            }
        }
        Ok(())
    })
}
