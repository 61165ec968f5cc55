//! Whole-file convenience helpers.

use std::path::Path;

use strand_str::ByteStr;
use strand_types::Result;

/// Read a whole file into a fresh string value.
pub fn read_to_bytestr(path: impl AsRef<Path>) -> Result<ByteStr> {
    let data = std::fs::read(path)?;
    ByteStr::from_bytes(&data)
}

/// Write a string value's bytes as a whole file, replacing any previous
/// contents.
pub fn write_bytestr(path: impl AsRef<Path>, value: &ByteStr) -> Result<()> {
    std::fs::write(path, value.as_slice())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        let value = ByteStr::from_bytes(b"on disk \x00\xff").unwrap();
        write_bytestr(&path, &value).unwrap();
        let back = read_to_bytestr(&path).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn missing_file_reports_not_found() {
        assert_eq!(
            read_to_bytestr("/no/such/strand/file").unwrap_err(),
            strand_types::Error::NotFound
        );
    }
}
