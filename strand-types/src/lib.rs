//! Shared foundation of the strand toolkit: the closed error taxonomy and the
//! allocator capability threaded through every buffer-owning value.

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

mod alloc;
mod error;

pub use alloc::{AllocFlags, AllocRef, Allocator, System};
pub use error::{Error, Result};
