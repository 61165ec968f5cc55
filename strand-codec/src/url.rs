//! Percent-encoding. The unreserved set is the alphanumerics plus
//! `-`, `_`, `~` and `.`; everything else becomes `%HH` with uppercase hex.

use strand_str::ByteStr;
use strand_types::{Error, Result};

use crate::appending;
use crate::hex::hex_val;

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

fn unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'~' | b'.')
}

/// Append the percent-encoded rendering of `src` to `dst`.
pub fn encode(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    appending(dst, |dst| {
        for &b in src {
            if unreserved(b) {
                dst.append_byte(b)?;
            } else {
                dst.append(&[b'%', DIGITS[(b >> 4) as usize], DIGITS[(b & 0xf) as usize]])?;
            }
        }
        Ok(())
    })
}

/// Append the bytes decoded from the percent-encoded `src` to `dst`.
///
/// A `%` with nothing after it stays a literal `%`; a `%` followed by
/// anything other than two hex digits is rejected.
pub fn decode(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    appending(dst, |dst| {
        let mut i = 0;
        while i < src.len() {
            let b = src[i];
            if b != b'%' {
                dst.append_byte(b)?;
                i += 1;
                continue;
            }
            if i + 1 == src.len() {
                // Trailing orphan.
                dst.append_byte(b'%')?;
                break;
            }
            let (hi, lo) = match (src.get(i + 1), src.get(i + 2)) {
                (Some(&h), Some(&l)) => (
                    hex_val(h).ok_or(Error::InvalidArgument)?,
                    hex_val(l).ok_or(Error::InvalidArgument)?,
                ),
                _ => return Err(Error::InvalidArgument),
            };
            dst.append_byte((hi << 4) | lo)?;
            i += 3;
        }
        Ok(())
    })
}
