//! The tri-variant byte-string value.
//!
//! A [`ByteStr`] stores its bytes in one of three ways behind a single
//! observational interface:
//!
//! - **inline**, for short strings, inside the value itself;
//! - **owned**, in a heap buffer obtained from a named allocator;
//! - **slice**, a non-owning view of bytes that live elsewhere.
//!
//! The variant is observable through [`ByteStr::storage`] but every
//! operation works uniformly where the storage discipline allows it; resizing
//! a slice is the one rejected family. Hot search loops dispatch to the
//! [`strand_scan`] kernel and fall back to per-byte scans where no vector
//! unit is available.

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

mod bytestr;
mod distance;
mod edit;
mod fmt;
mod hash;
mod iter;
mod raw;
mod search;
#[cfg(feature = "serde")]
mod serde_impl;
mod strip;

pub use bytestr::{ByteStr, Storage, INLINE_CAP, SSO_EXTEND};
pub use distance::edit_distance;
pub use hash::fnv1a;
pub use iter::{SplitStr, Tokens};
pub use strip::WHITESPACE;

pub use strand_types::{AllocFlags, AllocRef, Allocator, Error, Result};
