//! strand: a byte-string toolkit.
//!
//! The pieces live in focused member crates and are re-exported here:
//!
//! - [`ByteStr`]: the tri-variant string value (inline, owned or borrowed
//!   storage) with search, editing, stripping, distance and hashing.
//! - [`Dict`]: an open-addressed dictionary keyed by [`ByteStr`], probed
//!   through the scan kernel.
//! - [`Stream`], [`FileStream`], [`StrStream`] and the directive printer
//!   [`print_into`]/[`sprint`].
//! - [`codec`]: hex, URL, Base64, C-escape, UTF-8, JSON and XML transforms.
//! - [`Pattern`]: the regex-like engine with bytecode compilation,
//!   backtracking and captures.
//! - [`scan`]: the SIMD/scalar block-scan kernel the hot paths dispatch to.

#![warn(missing_docs)]

pub use strand_codec as codec;
pub use strand_scan as scan;

pub use strand_dict::{Dict, Entries, HashFn, BUCKET};
pub use strand_pattern::{Captures, Pattern, MATCHER_DEPTH, PARSER_DEPTH};
pub use strand_str::{
    edit_distance, fnv1a, ByteStr, SplitStr, Storage, Tokens, INLINE_CAP, WHITESPACE,
};
pub use strand_stream::{
    print_into, sprint, Arg, FileStream, OwnedValue, SeekFrom, SerialKind, SerialValue,
    StrStream, Stream,
};
pub use strand_types::{AllocFlags, AllocRef, Allocator, Error, Result, System};

mod fs;

pub use fs::{read_to_bytestr, write_bytestr};
