//! Streams and formatted printing.
//!
//! A [`Stream`] dispatches the eight stream operations over a concrete
//! transport: a platform file ([`FileStream`]), a string value
//! ([`StrStream`]) or any user implementation. The directive printer
//! ([`print_into`]) walks a `printf`-like format and pushes every byte
//! through a stream, so printing into a string-backed stream concatenates
//! into a [`ByteStr`](strand_str::ByteStr).

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

mod file;
mod print;
mod stream;
mod string;

pub use file::FileStream;
pub use print::{print_into, sprint, Arg};
pub use stream::{OwnedValue, SerialKind, SerialValue, Stream};
pub use string::StrStream;

pub use std::io::SeekFrom;

pub use strand_types::{Error, Result};
