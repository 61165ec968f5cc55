use core::fmt;

use crate::bytestr::ByteStr;

/// Truncate `data` to a hex preview of at most `N` source bytes.
fn fmt_truncated_hex<const N: usize>(data: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if data.len() > N {
        write!(f, "{}...", hex::encode(&data[..N]))
    } else {
        f.write_str(&hex::encode(data))
    }
}

impl fmt::Debug for ByteStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteStr({:?}, len={}, ", self.storage(), self.len())?;
        fmt_truncated_hex::<16>(self.as_slice(), f)?;
        f.write_str(")")
    }
}

impl fmt::Display for ByteStr {
    /// Lossy UTF-8 rendering of the bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_slice()))
    }
}
