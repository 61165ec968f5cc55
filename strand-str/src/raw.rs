use core::ptr::NonNull;

use strand_types::{AllocFlags, AllocRef, Error, Result};

/// Allocation sizes are rounded up to the widest kernel block, so a block
/// load starting at any in-bounds byte stays inside the allocation.
fn rounded(usable: usize) -> Result<usize> {
    usable
        .checked_add(1)
        .and_then(|n| n.checked_next_multiple_of(strand_scan::MAX_WIDTH))
        .ok_or(Error::OutOfMemory)
}

/// Owned heap block backing the owned string variant.
///
/// `size` is the allocated byte count; the usable capacity is one less, the
/// final byte being reserved for the trailing null the owned variant
/// maintains at `buf[len]`.
pub(crate) struct RawBuf {
    ptr: NonNull<u8>,
    size: usize,
}

impl RawBuf {
    /// Allocate a block with room for `usable` content bytes plus the
    /// sentinel.
    pub(crate) fn allocate(usable: usize, alloc: AllocRef) -> Result<Self> {
        let size = rounded(usable)?;
        let ptr = alloc
            .allocate(size, 0, AllocFlags::empty())
            .ok_or(Error::OutOfMemory)?;
        Ok(Self { ptr, size })
    }

    /// Resize in place or by moving; on failure the block is untouched.
    ///
    /// # Safety
    ///
    /// `alloc` must be the allocator the block came from.
    pub(crate) unsafe fn resize(&mut self, usable: usize, alloc: AllocRef) -> Result<()> {
        let size = rounded(usable)?;
        if size == self.size {
            return Ok(());
        }
        // SAFETY: ptr/size describe this live block, per the caller contract.
        let moved = unsafe { alloc.reallocate(self.ptr, self.size, size, 0, AllocFlags::empty()) }
            .ok_or(Error::OutOfMemory)?;
        self.ptr = moved;
        self.size = size;
        Ok(())
    }

    /// Return the block to its allocator.
    ///
    /// # Safety
    ///
    /// `alloc` must be the allocator the block came from; the buffer must not
    /// be used afterwards.
    pub(crate) unsafe fn release(&mut self, alloc: AllocRef) {
        // SAFETY: ptr/size describe this live block, per the caller contract.
        unsafe { alloc.deallocate(self.ptr, self.size, 0) };
    }

    pub(crate) fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Usable content capacity, excluding the sentinel byte.
    pub(crate) fn usable(&self) -> usize {
        self.size - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_reserves_the_sentinel() {
        assert_eq!(rounded(0).unwrap(), strand_scan::MAX_WIDTH);
        assert_eq!(rounded(31).unwrap(), 32);
        assert_eq!(rounded(32).unwrap(), 64);
        assert!(rounded(usize::MAX).is_err());
    }

    #[test]
    fn allocate_resize_release() {
        let alloc = AllocRef::system();
        let mut buf = RawBuf::allocate(10, alloc).unwrap();
        assert!(buf.usable() >= 10);
        // SAFETY: buf is live and owned by `alloc`.
        unsafe {
            buf.as_ptr().write_bytes(0xcd, 10);
            buf.resize(100, alloc).unwrap();
            assert!(buf.usable() >= 100);
            assert_eq!(*buf.as_ptr().add(9), 0xcd);
            buf.release(alloc);
        }
    }
}
