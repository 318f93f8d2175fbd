// Tag format detection by magic-byte sniffing
//
// Header-anchored formats are probed before footer-anchored ones: a file can
// carry both (an MP3 with an ID3v2 header and an ID3v1 trailer) and the
// header tag is the primary one.

use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::format::TagFormat;

pub const ID3V2_SIGNATURE: &[u8; 3] = b"ID3";
pub const FLAC_SIGNATURE: &[u8; 4] = b"fLaC";
pub const OGG_SIGNATURE: &[u8; 4] = b"OggS";
pub const RIFF_SIGNATURE: &[u8; 4] = b"RIFF";
pub const WAVE_SIGNATURE: &[u8; 4] = b"WAVE";
pub const FORM_SIGNATURE: &[u8; 4] = b"FORM";
pub const AIFF_SIGNATURE: &[u8; 4] = b"AIFF";
pub const FTYP_SIGNATURE: &[u8; 4] = b"ftyp";
pub const ID3V1_SIGNATURE: &[u8; 3] = b"TAG";
pub const APE_SIGNATURE: &[u8; 8] = b"APETAGEX";

/// Files shorter than this are never classified.
pub const MIN_PROBE_SIZE: u64 = 32;
const HEAD_LEN: usize = 12;
const ID3V1_TRAILER_LEN: u64 = 128;
const APE_FOOTER_LEN: u64 = 32;

/// Bytes the probes look at: the first 12 bytes and up to the last 128.
struct Probe<'a> {
    size: u64,
    head: &'a [u8],
    /// The final `min(size, 128)` bytes.
    tail: &'a [u8],
}

impl Probe<'_> {
    fn tail_at(&self, back: u64, len: usize) -> Option<&[u8]> {
        let tail_len = self.tail.len() as u64;
        if back > tail_len {
            return None;
        }
        let start = (tail_len - back) as usize;
        self.tail.get(start..start + len)
    }

    fn classify(&self) -> TagFormat {
        if self.size < MIN_PROBE_SIZE {
            return TagFormat::Unknown;
        }

        let head = self.head;
        if head.starts_with(ID3V2_SIGNATURE) {
            return TagFormat::Id3v2;
        }
        if head.starts_with(FLAC_SIGNATURE) || head.starts_with(OGG_SIGNATURE) {
            return TagFormat::VorbisComment;
        }
        if head.starts_with(RIFF_SIGNATURE) && head.get(8..12) == Some(&WAVE_SIGNATURE[..]) {
            return TagFormat::WavInfo;
        }
        if head.starts_with(FORM_SIGNATURE) && head.get(8..12) == Some(&AIFF_SIGNATURE[..]) {
            return TagFormat::AiffInfo;
        }
        if self.size >= 8 && head.get(4..8) == Some(&FTYP_SIGNATURE[..]) {
            return TagFormat::Mp4Tag;
        }
        if self.size >= ID3V1_TRAILER_LEN
            && self.tail_at(ID3V1_TRAILER_LEN, 3) == Some(&ID3V1_SIGNATURE[..])
        {
            return TagFormat::Id3v1;
        }
        if self.tail_at(APE_FOOTER_LEN, 8) == Some(&APE_SIGNATURE[..]) {
            return TagFormat::ApeTag;
        }
        TagFormat::Unknown
    }
}

/// Classify an in-memory file image.
pub fn detect_bytes(data: &[u8]) -> TagFormat {
    let tail_len = data.len().min(ID3V1_TRAILER_LEN as usize);
    Probe {
        size: data.len() as u64,
        head: &data[..data.len().min(HEAD_LEN)],
        tail: &data[data.len() - tail_len..],
    }
    .classify()
}

/// Classify a seekable stream by reading its head and tail.
///
/// I/O failures are returned, never mapped to `Unknown`.
pub fn detect_reader<R: Read + Seek>(reader: &mut R) -> Result<TagFormat> {
    let size = reader.seek(SeekFrom::End(0))?;
    if size < MIN_PROBE_SIZE {
        return Ok(TagFormat::Unknown);
    }

    let mut head = [0u8; HEAD_LEN];
    reader.seek(SeekFrom::Start(0))?;
    reader.read_exact(&mut head)?;

    let tail_len = size.min(ID3V1_TRAILER_LEN);
    let mut tail = vec![0u8; tail_len as usize];
    reader.seek(SeekFrom::Start(size - tail_len))?;
    reader.read_exact(&mut tail)?;

    Ok(Probe {
        size,
        head: &head,
        tail: &tail,
    }
    .classify())
}

/// Classify the file at `path`.
///
/// A path that does not exist, is not a regular file, or is shorter than
/// 32 bytes is `Unknown` without being opened.
pub fn detect(path: &Path) -> Result<TagFormat> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta,
        _ => {
            debug!(path = %path.display(), "not a regular file, skipping detection");
            return Ok(TagFormat::Unknown);
        }
    };
    if meta.len() < MIN_PROBE_SIZE {
        return Ok(TagFormat::Unknown);
    }

    let mut file = std::fs::File::open(path)?;
    let format = detect_reader(&mut file)?;
    debug!(path = %path.display(), %format, "detected tag format");
    Ok(format)
}
