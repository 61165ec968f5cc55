use std::io::SeekFrom;

use strand_str::ByteStr;
use strand_types::{Error, Result};

use crate::stream::Stream;

/// Stream over an external string value and a byte cursor.
///
/// Writing past the end extends the string; seeking past the end reserves
/// capacity without touching the length, which only subsequent writes
/// advance. [`close`](Stream::close) is a no-op.
pub struct StrStream<'a> {
    buf: &'a mut ByteStr,
    pos: usize,
}

impl<'a> StrStream<'a> {
    /// Stream over `buf`, cursor at the start.
    pub fn new(buf: &'a mut ByteStr) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current cursor as a byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Stream for StrStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let bytes = self.buf.as_slice();
        let avail = bytes.len().saturating_sub(self.pos);
        let n = avail.min(buf.len());
        buf[..n].copy_from_slice(&bytes[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let n = self.buf.write_at(self.pos, buf)?;
        self.pos += n;
        Ok(n)
    }

    fn tell(&mut self) -> Result<u64> {
        Ok(self.pos as u64)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let len = self.buf.len() as i64;
        let target = match pos {
            SeekFrom::Start(off) => i64::try_from(off).map_err(|_| Error::OutOfRange)?,
            SeekFrom::Current(off) => self.pos as i64 + off,
            SeekFrom::End(off) => len + off,
        };
        if target < 0 {
            return Err(Error::InvalidArgument);
        }
        let target = target as usize;
        if target > self.buf.len() {
            // Capacity only; the length moves when something is written.
            self.buf.reserve(target - self.buf.len())?;
        }
        self.pos = target;
        Ok(self.pos as u64)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{SerialKind, SerialValue};

    #[test]
    fn writes_append_and_extend() {
        let mut s = ByteStr::from_bytes(b"head-").unwrap();
        {
            let mut stream = StrStream::new(&mut s);
            stream.seek(SeekFrom::End(0)).unwrap();
            stream.write(b"tail").unwrap();
            assert_eq!(stream.tell().unwrap(), 9);
        }
        assert_eq!(s.as_slice(), b"head-tail");
    }

    #[test]
    fn overwrite_in_the_middle() {
        let mut s = ByteStr::from_bytes(b"0123456789").unwrap();
        {
            let mut stream = StrStream::new(&mut s);
            stream.seek(SeekFrom::Start(4)).unwrap();
            stream.write(b"xy").unwrap();
        }
        assert_eq!(s.as_slice(), b"0123xy6789");
    }

    #[test]
    fn seek_past_end_reserves_without_lengthening() {
        let mut s = ByteStr::from_bytes(b"ab").unwrap();
        {
            let mut stream = StrStream::new(&mut s);
            stream.seek(SeekFrom::Start(10)).unwrap();
            assert_eq!(stream.buf.len(), 2);
            assert!(stream.buf.capacity() >= 10);
            stream.write(b"z").unwrap();
        }
        // The gap up to the cursor is zero-filled once written past.
        assert_eq!(s.as_slice(), b"ab\0\0\0\0\0\0\0\0z");
    }

    #[test]
    fn read_walks_the_bytes() {
        let mut s = ByteStr::from_bytes(b"abcdef").unwrap();
        let mut stream = StrStream::new(&mut s);
        let mut buf = [0u8; 4];
        assert_eq!(stream.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(stream.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn negative_seek_is_rejected() {
        let mut s = ByteStr::new();
        let mut stream = StrStream::new(&mut s);
        assert_eq!(stream.seek(SeekFrom::Current(-1)), Err(Error::InvalidArgument));
    }

    #[test]
    fn serialization_concatenates_text() {
        let mut s = ByteStr::new();
        {
            let mut stream = StrStream::new(&mut s);
            stream.serialize(SerialValue::U16(9000)).unwrap();
            stream.serialize(SerialValue::Bytes(b" over ")).unwrap();
            stream.serialize(SerialValue::F64(0.5)).unwrap();
            assert_eq!(stream.deserialize(SerialKind::Float), Err(Error::NotImplemented));
        }
        assert_eq!(s.as_slice(), b"9000 over 0.5");
    }
}
