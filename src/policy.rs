// Write placement policies for tag regions
//
// Each writer states where its bytes land. The fixed trailer chooses between
// overwriting its own 128-byte tail and appending; the atom writer always
// overwrites from offset 0.
//
// OverwriteFromStart destroys whatever the file held in that range. It is
// only safe for files that consist of the atom tag region alone. Pointed at a
// real MP4 file it corrupts the media payload. Whether the atom layout was
// meant as a private in-house format or this is a latent bug is unresolved,
// so the behavior is kept as is and made explicit here.

use std::io::{Seek, SeekFrom, Write};

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, TagError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum WritePolicy {
    /// Replace exactly `length` bytes at `offset`.
    OverwriteRegion { offset: u64, length: u64 },
    /// Write from offset 0, overwriting existing bytes.
    OverwriteFromStart,
    /// Extend the file with the new bytes.
    AppendAtEnd,
}

impl WritePolicy {
    /// Write `bytes` to `writer` according to the policy.
    ///
    /// `OverwriteRegion` requires `bytes` to fill the region exactly, so the
    /// bytes around it are never touched.
    pub fn apply<W: Write + Seek>(&self, writer: &mut W, bytes: &[u8]) -> Result<()> {
        match *self {
            WritePolicy::OverwriteRegion { offset, length } => {
                if bytes.len() as u64 != length {
                    return Err(TagError::InvalidFormat(format!(
                        "region is {} bytes but {} bytes were supplied",
                        length,
                        bytes.len()
                    )));
                }
                writer.seek(SeekFrom::Start(offset))?;
            }
            WritePolicy::OverwriteFromStart => {
                writer.seek(SeekFrom::Start(0))?;
            }
            WritePolicy::AppendAtEnd => {
                writer.seek(SeekFrom::End(0))?;
            }
        }
        debug!(policy = ?self, len = bytes.len(), "writing tag region");
        writer.write_all(bytes)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn overwrite_region_in_place() {
        let mut cursor = Cursor::new(b"aaaabbbbcccc".to_vec());
        WritePolicy::OverwriteRegion { offset: 4, length: 4 }
            .apply(&mut cursor, b"XXXX")
            .unwrap();
        assert_eq!(cursor.into_inner(), b"aaaaXXXXcccc");
    }

    #[test]
    fn overwrite_region_rejects_size_mismatch() {
        let mut cursor = Cursor::new(b"aaaabbbb".to_vec());
        let err = WritePolicy::OverwriteRegion { offset: 0, length: 4 }
            .apply(&mut cursor, b"XXX")
            .unwrap_err();
        assert!(matches!(err, TagError::InvalidFormat(_)));
        assert_eq!(cursor.into_inner(), b"aaaabbbb");
    }

    #[test]
    fn overwrite_from_start_keeps_tail_beyond_write() {
        let mut cursor = Cursor::new(b"aaaabbbb".to_vec());
        cursor.set_position(6);
        WritePolicy::OverwriteFromStart.apply(&mut cursor, b"XY").unwrap();
        assert_eq!(cursor.into_inner(), b"XYaabbbb");
    }

    #[test]
    fn append_extends() {
        let mut cursor = Cursor::new(b"abc".to_vec());
        WritePolicy::AppendAtEnd.apply(&mut cursor, b"def").unwrap();
        assert_eq!(cursor.into_inner(), b"abcdef");
    }
}
