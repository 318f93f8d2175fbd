// Atom-style tag region at the start of a file
//
// The region opens with a `ftyp` atom whose size covers the whole tag region.
// Reading checks for that marker and hands the declared payload to the codec.
// Writing always overwrites from offset 0 (see `WritePolicy::OverwriteFromStart`):
// on a real MP4 file this would destroy the media payload.

pub mod atom;

use std::io::{Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::error::{Result, TagError};
use crate::policy::WritePolicy;
use crate::tag_map::TagMap;
use crate::utils::io::stream_len;

pub use atom::{parse, parse_with_unparsed, serialize, RawAtom};

/// Read the tag region, returning `None` when the stream does not open with
/// a `ftyp` marker.
pub fn read_mp4_tag<R: Read + Seek>(reader: &mut R) -> Result<Option<TagMap>> {
    Ok(read_mp4_tag_with_unparsed(reader)?.map(|(map, _)| map))
}

/// Like [`read_mp4_tag`], keeping unrecognized atoms.
pub fn read_mp4_tag_with_unparsed<R: Read + Seek>(
    reader: &mut R,
) -> Result<Option<(TagMap, Vec<RawAtom>)>> {
    let Some(payload) = read_region(reader)? else {
        return Ok(None);
    };
    parse_with_unparsed(&payload).map(Some)
}

fn read_region<R: Read + Seek>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let len = stream_len(reader)?;
    if len < atom::HEADER_SIZE as u64 {
        return Ok(None);
    }

    let mut header = [0u8; atom::HEADER_SIZE];
    reader.seek(SeekFrom::Start(0))?;
    reader.read_exact(&mut header)?;
    if &header[4..8] != atom::FTYP {
        return Ok(None);
    }

    let declared = u64::from(u32::from_be_bytes([header[0], header[1], header[2], header[3]]));
    if declared < atom::HEADER_SIZE as u64 || declared > len {
        return Err(TagError::InvalidFormat(format!(
            "tag region declares {} bytes in a {}-byte file",
            declared, len
        )));
    }

    let mut payload = vec![0u8; (declared - atom::HEADER_SIZE as u64) as usize];
    reader.read_exact(&mut payload)?;
    debug!(declared, "read atom tag region");
    Ok(Some(payload))
}

/// Write `map` as a tag region starting at offset 0.
///
/// Bytes beyond the new region are left as they were; the file is not
/// truncated.
pub fn write_mp4_tag<W: Write + Seek>(writer: &mut W, map: &TagMap) -> Result<WritePolicy> {
    let bytes = serialize(map)?;
    let policy = WritePolicy::OverwriteFromStart;
    policy.apply(writer, &bytes)?;
    Ok(policy)
}
