use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use strand_types::{Error, Result};

use crate::stream::Stream;

/// Stream over a platform file handle.
///
/// Operations after [`close`](Stream::close) fail with
/// [`Error::InvalidArgument`].
#[derive(Debug)]
pub struct FileStream {
    inner: Option<File>,
}

impl FileStream {
    /// Open an existing file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            tracing::debug!(path = %path.display(), %err, "file stream open failed");
            Error::from(err)
        })?;
        Ok(Self { inner: Some(file) })
    }

    /// Create (or truncate) a file for writing.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|err| {
            tracing::debug!(path = %path.display(), %err, "file stream create failed");
            Error::from(err)
        })?;
        Ok(Self { inner: Some(file) })
    }

    /// Wrap an already-open handle.
    pub fn from_file(file: File) -> Self {
        Self { inner: Some(file) }
    }

    fn file(&mut self) -> Result<&mut File> {
        self.inner.as_mut().ok_or(Error::InvalidArgument)
    }
}

impl Stream for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.file()?.read(buf)?)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        Ok(self.file()?.write(buf)?)
    }

    fn tell(&mut self) -> Result<u64> {
        Ok(self.file()?.stream_position()?)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        Ok(self.file()?.seek(pos)?)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.file()?.flush()?)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut file) = self.inner.take() {
            file.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{SerialKind, SerialValue};

    #[test]
    fn write_seek_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.bin");

        let mut out = FileStream::create(&path).unwrap();
        assert_eq!(out.write(b"hello stream").unwrap(), 12);
        assert_eq!(out.tell().unwrap(), 12);
        out.close().unwrap();

        let mut inp = FileStream::open(&path).unwrap();
        inp.seek(SeekFrom::Start(6)).unwrap();
        let mut buf = [0u8; 16];
        let n = inp.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"stream");

        inp.seek(SeekFrom::End(-6)).unwrap();
        let n = inp.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"stream");
    }

    #[test]
    fn closed_stream_rejects_operations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("closed.bin");
        let mut s = FileStream::create(&path).unwrap();
        s.close().unwrap();
        // Closing twice is a no-op.
        s.close().unwrap();
        assert_eq!(s.write(b"x"), Err(Error::InvalidArgument));
        assert_eq!(s.tell(), Err(Error::InvalidArgument));
    }

    #[test]
    fn missing_file_maps_to_not_found() {
        assert_eq!(
            FileStream::open("/no/such/strand/file").unwrap_err(),
            Error::NotFound
        );
    }

    #[test]
    fn default_serialization_is_text_and_deserialize_is_unimplemented() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ser.txt");
        let mut s = FileStream::create(&path).unwrap();
        s.serialize(SerialValue::I32(-7)).unwrap();
        s.serialize(SerialValue::Bytes(b"|")).unwrap();
        s.serialize(SerialValue::U64(42)).unwrap();
        assert_eq!(s.deserialize(SerialKind::Signed), Err(Error::NotImplemented));
        s.close().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"-7|42");
    }
}
