//! Byte-in, byte-out transforms over [`ByteStr`](strand_str::ByteStr)
//! values.
//!
//! Every encoder and decoder appends to its destination, leaving the bytes
//! already present untouched; on any error the destination's length is
//! rolled back to its pre-call value (capacity grown on the way stays).

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod base64;
pub mod cstring;
pub mod hex;
pub mod json;
pub mod url;
pub mod utf8;
pub mod xml;

pub use strand_types::{Error, Result};

use strand_str::ByteStr;

/// Run `f` against `dst`, restoring the destination length on error.
pub(crate) fn appending<F>(dst: &mut ByteStr, f: F) -> Result<()>
where
    F: FnOnce(&mut ByteStr) -> Result<()>,
{
    let mark = dst.len();
    let res = f(dst);
    if res.is_err() {
        dst.truncate(mark);
    }
    res
}
