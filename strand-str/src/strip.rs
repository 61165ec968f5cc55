//! Strip, dedent and indent.

use core::ptr;

use strand_types::{Error, Result};

use crate::bytestr::{ByteStr, Repr};

/// Default strip class: space, tab, carriage return, newline, vertical tab
/// and form feed.
pub const WHITESPACE: &[u8] = b" \t\r\n\x0b\x0c";

impl ByteStr {
    /// Remove leading bytes that are members of `set`. A slice is
    /// repositioned; inline and owned values shift their bytes.
    pub fn trim_start_set(&mut self, set: &[u8]) {
        let k = self.span_byteset(set);
        if k == 0 {
            return;
        }
        let len = self.len();
        if let Repr::Slice(s) = &mut self.repr {
            // SAFETY: k <= len keeps the pointer inside (or one past) the
            // backing buffer.
            s.ptr = unsafe { core::ptr::NonNull::new_unchecked(s.ptr.as_ptr().add(k)) };
            s.len = len - k;
            return;
        }
        // SAFETY: the shifted range lies inside the live bytes.
        unsafe {
            let base = self.mut_ptr();
            ptr::copy(base.add(k), base, len - k);
        }
        self.set_len(len - k);
    }

    /// Remove trailing bytes that are members of `set`.
    pub fn trim_end_set(&mut self, set: &[u8]) {
        let k = self.rspan_byteset(set);
        let len = self.len();
        self.truncate(len - k);
    }

    /// Remove leading and trailing bytes that are members of `set`.
    pub fn trim_set(&mut self, set: &[u8]) {
        self.trim_end_set(set);
        self.trim_start_set(set);
    }

    /// [`trim_start_set`](Self::trim_start_set) with [`WHITESPACE`].
    pub fn trim_start(&mut self) {
        self.trim_start_set(WHITESPACE);
    }

    /// [`trim_end_set`](Self::trim_end_set) with [`WHITESPACE`].
    pub fn trim_end(&mut self) {
        self.trim_end_set(WHITESPACE);
    }

    /// [`trim_set`](Self::trim_set) with [`WHITESPACE`].
    pub fn trim(&mut self) {
        self.trim_set(WHITESPACE);
    }

    /// Remove up to `cols` columns of leading indentation from every line.
    /// A space costs one column; a tab costs `tab` columns and is only
    /// removed when it fits the remaining budget whole. Carriage returns,
    /// vertical tabs and form feeds inside the indentation are dropped
    /// silently without costing columns. Rejected on slices.
    pub fn dedent(&mut self, cols: usize, tab: usize) -> Result<()> {
        if self.is_slice() {
            return Err(Error::InvalidArgument);
        }
        let mut out = ByteStr::with_capacity(self.len(), self.derived_alloc())?;
        {
            let bytes = self.as_slice();
            let mut i = 0;
            while i < bytes.len() {
                // Consume the indentation budget at the line start.
                let mut used = 0;
                while i < bytes.len() {
                    match bytes[i] {
                        b' ' if used + 1 <= cols => used += 1,
                        b'\t' if used + tab <= cols => used += tab,
                        b'\r' | b'\x0b' | b'\x0c' => {}
                        _ => break,
                    }
                    i += 1;
                }
                // Copy the rest of the line, newline included.
                let end = crate::search::find_byte_in(&bytes[i..], b'\n')
                    .map_or(bytes.len(), |p| i + p + 1);
                out.append(&bytes[i..end])?;
                i = end;
            }
        }
        *self = out;
        Ok(())
    }

    /// Prepend `cols` spaces to every non-empty line. Rejected on slices.
    pub fn indent(&mut self, cols: usize) -> Result<()> {
        if self.is_slice() {
            return Err(Error::InvalidArgument);
        }
        if cols == 0 {
            return Ok(());
        }
        let pad = vec![b' '; cols];
        let mut out = ByteStr::with_capacity(self.len(), self.derived_alloc())?;
        {
            let bytes = self.as_slice();
            let mut i = 0;
            while i < bytes.len() {
                let end = crate::search::find_byte_in(&bytes[i..], b'\n')
                    .map_or(bytes.len(), |p| i + p + 1);
                if bytes[i] != b'\n' {
                    out.append(&pad)?;
                }
                out.append(&bytes[i..end])?;
                i = end;
            }
        }
        *self = out;
        Ok(())
    }

    /// The smallest count of leading space bytes over all lines that hold
    /// more than a line break; `0` for an empty value.
    pub fn min_indent(&self) -> usize {
        let bytes = self.as_slice();
        let mut min: Option<usize> = None;
        let mut i = 0;
        while i < bytes.len() {
            let end = crate::search::find_byte_in(&bytes[i..], b'\n').map_or(bytes.len(), |p| i + p);
            let line = &bytes[i..end];
            if !line.is_empty() {
                let lead = line.iter().take_while(|&&b| b == b' ').count();
                min = Some(min.map_or(lead, |m| m.min(lead)));
            }
            i = end + 1;
        }
        min.unwrap_or(0)
    }
}
