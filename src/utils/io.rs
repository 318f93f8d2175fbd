// I/O utilities for tag files

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Result, TagError};

/// Open a regular file for read-only access.
pub fn open_ro(path: &Path) -> Result<File> {
    ensure_regular_file(path)?;
    File::open(path).map_err(|e| not_found_or_io(path, e))
}

/// Open a regular file for read/write access.
pub fn open_rw(path: &Path) -> Result<File> {
    ensure_regular_file(path)?;
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| not_found_or_io(path, e))
}

fn ensure_regular_file(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(TagError::NotFound(path.to_path_buf())),
        Err(e) => Err(not_found_or_io(path, e)),
    }
}

fn not_found_or_io(path: &Path, e: io::Error) -> TagError {
    if e.kind() == io::ErrorKind::NotFound {
        TagError::NotFound(path.to_path_buf())
    } else {
        TagError::Io(e)
    }
}

/// Total length of a seekable stream. Leaves the cursor at the end.
pub fn stream_len<S: Seek>(stream: &mut S) -> io::Result<u64> {
    stream.seek(SeekFrom::End(0))
}

/// Read exactly `len` bytes starting at `offset`.
pub fn read_at<R: Read + Seek>(reader: &mut R, offset: u64, len: usize) -> io::Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

/// Big-endian u32 at `offset`, if the slice is long enough.
pub fn be_u32_at(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn be_u32_bounds() {
        let data = [0x00, 0x00, 0x01, 0x02, 0xFF];
        assert_eq!(be_u32_at(&data, 0), Some(0x0102));
        assert_eq!(be_u32_at(&data, 1), Some(0x0001_02FF));
        assert_eq!(be_u32_at(&data, 2), None);
        assert_eq!(be_u32_at(&data, usize::MAX), None);
    }

    #[test]
    fn read_at_reads_window() {
        let mut cursor = Cursor::new(b"0123456789".to_vec());
        assert_eq!(read_at(&mut cursor, 3, 4).unwrap(), b"3456");
        assert_eq!(stream_len(&mut cursor).unwrap(), 10);
        assert!(read_at(&mut cursor, 8, 4).is_err());
    }

    #[test]
    fn missing_path_is_not_found() {
        let err = open_ro(Path::new("/definitely/not/here.mp3")).unwrap_err();
        assert!(matches!(err, TagError::NotFound(_)));
    }

    #[test]
    fn directory_is_not_found() {
        let dir = std::env::temp_dir();
        assert!(matches!(open_rw(&dir), Err(TagError::NotFound(_))));
    }
}
