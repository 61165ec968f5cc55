//! XML/HTML entity escaping.
//!
//! Decoding accepts the five named entities plus decimal and hexadecimal
//! character references. An ampersand that does not open a recognized
//! entity stays literal, which keeps decoding idempotent over already
//! decoded text.

use strand_str::ByteStr;
use strand_types::{Error, Result};

use crate::appending;
use crate::utf8::push_codepoint;

/// Append the XML-escaped rendering of `src` to `dst`.
pub fn encode(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    appending(dst, |dst| {
        for &b in src {
            match b {
                b'&' => dst.append(b"&amp;")?,
                b'<' => dst.append(b"&lt;")?,
                b'>' => dst.append(b"&gt;")?,
                b'"' => dst.append(b"&quot;")?,
                b'\'' => dst.append(b"&apos;")?,
                _ => dst.append_byte(b)?,
            }
        }
        Ok(())
    })
}

/// Append the HTML-escaped rendering of `src` to `dst`; like XML but the
/// apostrophe uses its numeric reference.
pub fn encode_html(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    appending(dst, |dst| {
        for &b in src {
            match b {
                b'&' => dst.append(b"&amp;")?,
                b'<' => dst.append(b"&lt;")?,
                b'>' => dst.append(b"&gt;")?,
                b'"' => dst.append(b"&quot;")?,
                b'\'' => dst.append(b"&#39;")?,
                _ => dst.append_byte(b)?,
            }
        }
        Ok(())
    })
}

const NAMED: &[(&[u8], u8)] = &[
    (b"amp;", b'&'),
    (b"lt;", b'<'),
    (b"gt;", b'>'),
    (b"quot;", b'"'),
    (b"apos;", b'\''),
];

/// Append the bytes described by the entity-escaped text `src` to `dst`.
pub fn decode(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    appending(dst, |dst| {
        let mut i = 0;
        'outer: while i < src.len() {
            let b = src[i];
            if b != b'&' {
                dst.append_byte(b)?;
                i += 1;
                continue;
            }
            for (name, byte) in NAMED {
                if src[i + 1..].starts_with(name) {
                    dst.append_byte(*byte)?;
                    i += 1 + name.len();
                    continue 'outer;
                }
            }
            if src[i + 1..].starts_with(b"#") {
                if let Some((cp, used)) = numeric_reference(&src[i + 2..]) {
                    push_codepoint(dst, cp)?;
                    i += 2 + used;
                    continue;
                }
            }
            // Not an entity; the ampersand is literal.
            dst.append_byte(b'&')?;
            i += 1;
        }
        Ok(())
    })
}

/// Alias of [`decode`]; HTML input uses the same entity set.
pub fn decode_html(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    decode(dst, src)
}

/// Parse `123;` or `x1F600;`, returning the codepoint and consumed length.
fn numeric_reference(src: &[u8]) -> Option<(u32, usize)> {
    let (radix, digits_at): (u32, usize) = if matches!(src.first(), Some(b'x') | Some(b'X')) {
        (16, 1)
    } else {
        (10, 0)
    };
    let mut value: u32 = 0;
    let mut i = digits_at;
    while let Some(&d) = src.get(i) {
        if d == b';' {
            if i == digits_at {
                return None;
            }
            return Some((value, i + 1));
        }
        let digit = (d as char).to_digit(radix)?;
        value = value.checked_mul(radix)?.checked_add(digit)?;
        i += 1;
    }
    None
}
