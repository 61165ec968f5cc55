//! Open-addressed dictionary keyed by [`ByteStr`].
//!
//! Slots are grouped into 16-wide buckets, each carrying a metadata strip of
//! one byte per slot: `0` marks an empty slot, `1` a tombstone, and any other
//! value is the low byte of the slot's key hash (remapped away from 0 and 1).
//! Probing matches a whole strip at a time through the scan kernel and walks
//! buckets linearly from the hashed home bucket, wrapping at the end; an
//! empty slot terminates the probe, tombstones do not.

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

mod map;

pub use map::{Dict, Entries, HashFn, BUCKET};

pub use strand_types::{Error, Result};
