//! Base64 with the standard and URL-safe alphabets, `=` padding, and an
//! entry point for any caller-supplied 64-byte alphabet.

use strand_str::ByteStr;
use strand_types::{Error, Result};

use crate::appending;

/// RFC 4648 standard alphabet.
pub const STANDARD: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// RFC 4648 URL-safe alphabet.
pub const URL_SAFE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Append the base64 rendering of `src` (standard alphabet) to `dst`.
pub fn encode(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    encode_with(dst, src, STANDARD)
}

/// Append the base64 rendering of `src` (URL-safe alphabet) to `dst`.
pub fn encode_url(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    encode_with(dst, src, URL_SAFE)
}

/// Append the base64 rendering of `src` under a caller-chosen alphabet.
pub fn encode_with(dst: &mut ByteStr, src: &[u8], table: &[u8; 64]) -> Result<()> {
    appending(dst, |dst| {
        dst.reserve(src.len().div_ceil(3).checked_mul(4).ok_or(Error::OutOfMemory)?)?;
        let mut chunks = src.chunks_exact(3);
        for chunk in &mut chunks {
            let n = (chunk[0] as u32) << 16 | (chunk[1] as u32) << 8 | chunk[2] as u32;
            dst.append(&[
                table[(n >> 18) as usize & 63],
                table[(n >> 12) as usize & 63],
                table[(n >> 6) as usize & 63],
                table[n as usize & 63],
            ])?;
        }
        match chunks.remainder() {
            [] => {}
            [a] => {
                let n = (*a as u32) << 16;
                dst.append(&[
                    table[(n >> 18) as usize & 63],
                    table[(n >> 12) as usize & 63],
                    b'=',
                    b'=',
                ])?;
            }
            [a, b] => {
                let n = (*a as u32) << 16 | (*b as u32) << 8;
                dst.append(&[
                    table[(n >> 18) as usize & 63],
                    table[(n >> 12) as usize & 63],
                    table[(n >> 6) as usize & 63],
                    b'=',
                ])?;
            }
            _ => unreachable!("chunks_exact(3) remainder"),
        }
        Ok(())
    })
}

/// Append the bytes decoded from base64 text (standard alphabet) to `dst`.
pub fn decode(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    decode_with(dst, src, STANDARD)
}

/// Append the bytes decoded from base64 text (URL-safe alphabet) to `dst`.
pub fn decode_url(dst: &mut ByteStr, src: &[u8]) -> Result<()> {
    decode_with(dst, src, URL_SAFE)
}

/// Append the bytes decoded from base64 text under a caller-chosen
/// alphabet. Padding may be present or omitted; anything else malformed is
/// rejected.
pub fn decode_with(dst: &mut ByteStr, src: &[u8], table: &[u8; 64]) -> Result<()> {
    appending(dst, |dst| {
        let mut rev = [0xffu8; 256];
        for (i, &c) in table.iter().enumerate() {
            if rev[c as usize] != 0xff || c == b'=' {
                // Alphabet with duplicates (or '=') cannot round-trip.
                return Err(Error::InvalidArgument);
            }
            rev[c as usize] = i as u8;
        }

        // Padding is only meaningful at the very end.
        let body = match src {
            [head @ .., b'=', b'='] => head,
            [head @ .., b'='] => head,
            _ => src,
        };

        let mut chunks = body.chunks_exact(4);
        for chunk in &mut chunks {
            let mut n = 0u32;
            for &c in chunk {
                let v = rev[c as usize];
                if v == 0xff {
                    return Err(Error::InvalidArgument);
                }
                n = n << 6 | v as u32;
            }
            dst.append(&[(n >> 16) as u8, (n >> 8) as u8, n as u8])?;
        }
        match chunks.remainder() {
            [] => {}
            [_] => return Err(Error::InvalidArgument),
            rem => {
                let mut n = 0u32;
                for &c in rem {
                    let v = rev[c as usize];
                    if v == 0xff {
                        return Err(Error::InvalidArgument);
                    }
                    n = n << 6 | v as u32;
                }
                match rem.len() {
                    2 => dst.append_byte((n >> 4) as u8)?,
                    3 => dst.append(&[(n >> 10) as u8, (n >> 2) as u8])?,
                    _ => unreachable!("chunks_exact(4) remainder"),
                }
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"" as &[u8], b"" as &[u8])]
    #[case(b"f", b"Zg==")]
    #[case(b"fo", b"Zm8=")]
    #[case(b"foo", b"Zm9v")]
    #[case(b"foob", b"Zm9vYg==")]
    #[case(b"fooba", b"Zm9vYmE=")]
    #[case(b"foobar", b"Zm9vYmFy")]
    fn rfc4648_vectors(#[case] plain: &[u8], #[case] encoded: &[u8]) {
        let mut enc = ByteStr::new();
        encode(&mut enc, plain).unwrap();
        assert_eq!(enc.as_slice(), encoded);

        let mut dec = ByteStr::new();
        decode(&mut dec, encoded).unwrap();
        assert_eq!(dec.as_slice(), plain);
    }

    #[test]
    fn url_safe_alphabet_differs_on_62_63() {
        let mut std_out = ByteStr::new();
        encode(&mut std_out, b"\xfb\xef\xbe").unwrap();
        assert_eq!(std_out.as_slice(), b"++++");

        let mut url_out = ByteStr::new();
        encode_url(&mut url_out, b"\xfb\xef\xbe").unwrap();
        assert_eq!(url_out.as_slice(), b"----");

        let mut back = ByteStr::new();
        decode_url(&mut back, b"----").unwrap();
        assert_eq!(back.as_slice(), b"\xfb\xef\xbe");
    }

    #[test]
    fn unpadded_input_is_accepted() {
        let mut out = ByteStr::new();
        decode(&mut out, b"Zm9vYg").unwrap();
        assert_eq!(out.as_slice(), b"foob");
    }

    #[test]
    fn custom_alphabet_round_trips() {
        let mut table = *STANDARD;
        table.reverse();
        let mut enc = ByteStr::new();
        encode_with(&mut enc, b"custom!", &table).unwrap();
        let mut dec = ByteStr::new();
        decode_with(&mut dec, enc.as_slice(), &table).unwrap();
        assert_eq!(dec.as_slice(), b"custom!");
    }

    #[test]
    fn malformed_input_is_rejected() {
        let mut out = ByteStr::from_bytes(b"keep").unwrap();
        assert_eq!(decode(&mut out, b"Z"), Err(Error::InvalidArgument));
        assert_eq!(decode(&mut out, b"Zm9!"), Err(Error::InvalidArgument));
        let dup = [b'A'; 64];
        assert_eq!(decode_with(&mut out, b"AAAA", &dup), Err(Error::InvalidArgument));
        assert_eq!(out.as_slice(), b"keep");
    }
}
