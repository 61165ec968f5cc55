use core::fmt;
use core::ptr::NonNull;

bitflags::bitflags! {
    /// Request modifiers understood by every [`Allocator`].
    pub struct AllocFlags: u32 {
        /// Zero-initialize every byte that was not live before the call.
        ///
        /// On [`Allocator::allocate`] the whole block is zeroed; on
        /// [`Allocator::reallocate`] only the bytes past `old_size`.
        const ZEROED = 0b0001;
    }
}

/// Allocation capability threaded through buffer-owning values.
///
/// The four call shapes of a byte allocator are split into one method each.
/// `align` is the requested alignment in bytes; `0` requests the natural
/// (single-byte) alignment. Returning `None` signals out-of-memory and is
/// surfaced by callers as [`Error::OutOfMemory`](crate::Error::OutOfMemory);
/// an allocator never aborts on its own.
///
/// Implementations must be callable from any thread holding a reference
/// (`Sync`); values built on top of an allocator are themselves
/// single-threaded.
pub trait Allocator: Sync {
    /// Obtain a fresh block of `size` bytes. `size == 0` yields `None`.
    fn allocate(&self, size: usize, align: usize, flags: AllocFlags) -> Option<NonNull<u8>>;

    /// Resize a block previously obtained from this allocator, in place when
    /// possible, otherwise by moving it. The alignment promise of the
    /// original allocation is kept.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator with exactly
    /// `old_size` and `align`, and must not have been freed.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        new_size: usize,
        align: usize,
        flags: AllocFlags,
    ) -> Option<NonNull<u8>>;

    /// Return a block to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator with exactly `size`
    /// and `align`, and must not have been freed already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize);

    /// Drop all bookkeeping at once, for arena-style allocators. Standard
    /// allocators return `false` and free nothing.
    fn release_all(&self) -> bool {
        false
    }
}

/// The process-wide standard allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct System;

static SYSTEM: System = System;

impl Allocator for System {
    fn allocate(&self, size: usize, align: usize, flags: AllocFlags) -> Option<NonNull<u8>> {
        if size == 0 {
            return None;
        }
        let layout = std::alloc::Layout::from_size_align(size, align.max(1)).ok()?;
        let ptr = if flags.contains(AllocFlags::ZEROED) {
            // SAFETY: layout has non-zero size.
            unsafe { std::alloc::alloc_zeroed(layout) }
        } else {
            // SAFETY: layout has non-zero size.
            unsafe { std::alloc::alloc(layout) }
        };
        NonNull::new(ptr)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        new_size: usize,
        align: usize,
        flags: AllocFlags,
    ) -> Option<NonNull<u8>> {
        if new_size == 0 {
            // SAFETY: forwarded caller contract.
            unsafe { self.deallocate(ptr, old_size, align) };
            return None;
        }
        let layout = std::alloc::Layout::from_size_align(old_size, align.max(1)).ok()?;
        // SAFETY: caller guarantees ptr/layout describe a live allocation;
        // realloc keeps the layout's alignment.
        let moved = unsafe { std::alloc::realloc(ptr.as_ptr(), layout, new_size) };
        let moved = NonNull::new(moved)?;
        if flags.contains(AllocFlags::ZEROED) && new_size > old_size {
            // SAFETY: the tail past old_size is owned by the fresh block.
            unsafe { moved.as_ptr().add(old_size).write_bytes(0, new_size - old_size) };
        }
        Some(moved)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        if size == 0 {
            return;
        }
        let Ok(layout) = std::alloc::Layout::from_size_align(size, align.max(1)) else {
            return;
        };
        // SAFETY: caller guarantees ptr/layout describe a live allocation.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) };
    }
}

/// Copyable handle to an [`Allocator`], threaded through constructors.
///
/// Two handles compare equal when they point at the same allocator instance.
#[derive(Clone, Copy)]
pub struct AllocRef(&'static dyn Allocator);

impl AllocRef {
    /// Wrap a concrete allocator.
    pub const fn new(alloc: &'static dyn Allocator) -> Self {
        Self(alloc)
    }

    /// The process-wide default allocator.
    pub fn system() -> Self {
        Self(&SYSTEM)
    }

    /// Whether this handle refers to the process-wide default allocator.
    pub fn is_system(self) -> bool {
        self == Self::system()
    }

    /// See [`Allocator::allocate`].
    pub fn allocate(self, size: usize, align: usize, flags: AllocFlags) -> Option<NonNull<u8>> {
        self.0.allocate(size, align, flags)
    }

    /// See [`Allocator::reallocate`].
    ///
    /// # Safety
    ///
    /// As for [`Allocator::reallocate`].
    pub unsafe fn reallocate(
        self,
        ptr: NonNull<u8>,
        old_size: usize,
        new_size: usize,
        align: usize,
        flags: AllocFlags,
    ) -> Option<NonNull<u8>> {
        // SAFETY: forwarded caller contract.
        unsafe { self.0.reallocate(ptr, old_size, new_size, align, flags) }
    }

    /// See [`Allocator::deallocate`].
    ///
    /// # Safety
    ///
    /// As for [`Allocator::deallocate`].
    pub unsafe fn deallocate(self, ptr: NonNull<u8>, size: usize, align: usize) {
        // SAFETY: forwarded caller contract.
        unsafe { self.0.deallocate(ptr, size, align) }
    }

    /// See [`Allocator::release_all`].
    pub fn release_all(self) -> bool {
        self.0.release_all()
    }
}

impl Default for AllocRef {
    fn default() -> Self {
        Self::system()
    }
}

impl PartialEq for AllocRef {
    fn eq(&self, other: &Self) -> bool {
        let a = self.0 as *const dyn Allocator as *const ();
        let b = other.0 as *const dyn Allocator as *const ();
        a == b
    }
}

impl Eq for AllocRef {}

impl fmt::Debug for AllocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_system() {
            f.write_str("AllocRef(system)")
        } else {
            write!(f, "AllocRef({:p})", self.0 as *const dyn Allocator as *const ())
        }
    }
}
