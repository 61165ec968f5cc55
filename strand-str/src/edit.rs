//! In-place editing: append, prepend, splice, excise and replace.

use core::ptr;

use strand_types::{Error, Result};

use crate::bytestr::{ByteStr, Repr};
use crate::search::find_sub;

impl ByteStr {
    /// Concatenate `parts` into a fresh value, with `sep` between
    /// consecutive parts.
    pub fn join(sep: &[u8], parts: &[&[u8]]) -> Result<ByteStr> {
        let total: usize = parts.iter().map(|p| p.len()).sum::<usize>()
            + sep.len() * parts.len().saturating_sub(1);
        let mut out = ByteStr::with_capacity(total, crate::AllocRef::system())?;
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                out.append(sep)?;
            }
            out.append(part)?;
        }
        Ok(out)
    }

    /// Append `bytes` at the end.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.reserve(bytes.len())?;
        let len = self.len();
        // SAFETY: capacity covers len + bytes.len(); `bytes` cannot borrow
        // from `self` while `self` is mutably borrowed.
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.mut_ptr().add(len), bytes.len());
        }
        self.set_len(len + bytes.len());
        Ok(())
    }

    /// Append a single byte.
    pub fn append_byte(&mut self, c: u8) -> Result<()> {
        self.append(&[c])
    }

    /// Append another value's bytes.
    pub fn append_str(&mut self, other: &ByteStr) -> Result<()> {
        self.append(other.as_slice())
    }

    /// Prepend `bytes` at the front.
    pub fn prepend(&mut self, bytes: &[u8]) -> Result<()> {
        self.insert(0, bytes)
    }

    /// Prepend a single byte.
    pub fn prepend_byte(&mut self, c: u8) -> Result<()> {
        self.insert(0, &[c])
    }

    /// Prepend another value's bytes.
    pub fn prepend_str(&mut self, other: &ByteStr) -> Result<()> {
        self.insert(0, other.as_slice())
    }

    /// Splice `bytes` in at byte index `at`, shifting the tail right.
    pub fn insert(&mut self, at: usize, bytes: &[u8]) -> Result<()> {
        let len = self.len();
        if at > len {
            return Err(Error::OutOfRange);
        }
        if bytes.is_empty() {
            return Ok(());
        }
        self.reserve(bytes.len())?;
        // SAFETY: capacity covers len + bytes.len(); source and spliced
        // ranges may overlap only within self, handled by `copy`.
        unsafe {
            let base = self.mut_ptr();
            ptr::copy(base.add(at), base.add(at + bytes.len()), len - at);
            ptr::copy_nonoverlapping(bytes.as_ptr(), base.add(at), bytes.len());
        }
        self.set_len(len + bytes.len());
        Ok(())
    }

    /// Splice a single byte in at `at`.
    pub fn insert_byte(&mut self, at: usize, c: u8) -> Result<()> {
        self.insert(at, &[c])
    }

    /// Excise `[from, to)` and shift the tail left; bounds are clamped.
    /// Rejected on slices, whose bytes cannot shift; use
    /// [`cut`](Self::cut) to reposition a slice instead.
    pub fn remove_range(&mut self, from: usize, to: usize) -> Result<()> {
        if self.is_slice() {
            return Err(Error::InvalidArgument);
        }
        let len = self.len();
        let to = to.min(len);
        let from = from.min(to);
        if from == to {
            return Ok(());
        }
        // SAFETY: to <= len, ranges lie inside the live bytes.
        unsafe {
            let base = self.mut_ptr();
            ptr::copy(base.add(to), base.add(from), len - to);
        }
        self.set_len(len - (to - from));
        Ok(())
    }

    /// Keep only `[from, to)`; bounds are clamped. A slice is repositioned
    /// over its backing buffer, an inline or owned value shifts its bytes.
    pub fn cut(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.len();
        let to = to.min(len);
        let from = from.min(to);
        if let Repr::Slice(s) = &mut self.repr {
            // SAFETY: from <= to <= len keeps the pointer inside (or one
            // past) the backing buffer.
            s.ptr = unsafe { core::ptr::NonNull::new_unchecked(s.ptr.as_ptr().add(from)) };
            s.len = to - from;
            return Ok(());
        }
        if from > 0 {
            // SAFETY: the range lies inside the live bytes.
            unsafe {
                let base = self.mut_ptr();
                ptr::copy(base.add(from), base, to - from);
            }
        }
        self.set_len(to - from);
        Ok(())
    }

    /// Replace occurrences of `needle` with `with`, scanning forward once so
    /// replacements are never re-matched. `limit == 0` replaces every
    /// occurrence. Returns the replacement count.
    ///
    /// The empty needle is rejected: it would match everywhere and the
    /// operation has no useful meaning.
    pub fn replace(&mut self, needle: &[u8], with: &[u8], limit: usize) -> Result<usize> {
        if needle.is_empty() {
            return Err(Error::InvalidArgument);
        }
        if self.is_slice() {
            return Err(Error::InvalidArgument);
        }
        if find_sub(self.as_slice(), needle).is_none() {
            return Ok(0);
        }
        let mut out = ByteStr::with_capacity(self.len(), self.derived_alloc())?;
        let mut count = 0;
        {
            let hay = self.as_slice();
            let mut pos = 0;
            while pos < hay.len() {
                if limit != 0 && count == limit {
                    break;
                }
                let Some(rel) = find_sub(&hay[pos..], needle) else {
                    break;
                };
                out.append(&hay[pos..pos + rel])?;
                out.append(with)?;
                pos += rel + needle.len();
                count += 1;
            }
            out.append(&hay[pos..])?;
        }
        *self = out;
        Ok(count)
    }
}
