// Flat atom codec
//
// A tag region is a run of atoms, each [u32 BE size][4-byte type][payload],
// where size counts the 8-byte header. serialize() frames the field atoms
// between a leading `ftyp` marker (whose size covers the whole region) and an
// empty trailing `mdat` marker. This is not an ISO box writer: there is no
// container hierarchy and it only round-trips against parse().

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{Result, TagError};
use crate::field_mapping::AtomField;
use crate::tag_map::TagMap;
use crate::utils::io::be_u32_at;

pub const HEADER_SIZE: usize = 8;
pub const FTYP: &[u8; 4] = b"ftyp";
pub const MDAT: &[u8; 4] = b"mdat";

/// An atom whose type code is not one of the recognized fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawAtom {
    #[serde(serialize_with = "fourcc_str")]
    pub kind: [u8; 4],
    #[serde(serialize_with = "base64_bytes")]
    pub payload: Vec<u8>,
}

impl RawAtom {
    pub fn kind_str(&self) -> String {
        String::from_utf8_lossy(&self.kind).to_string()
    }
}

fn fourcc_str<S: Serializer>(kind: &[u8; 4], s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&String::from_utf8_lossy(kind))
}

fn base64_bytes<S: Serializer>(data: &[u8], s: S) -> std::result::Result<S::Ok, S::Error> {
    use base64::Engine;
    s.serialize_str(&base64::engine::general_purpose::STANDARD.encode(data))
}

fn is_marker(kind: &[u8; 4]) -> bool {
    kind == FTYP || kind == MDAT
}

/// Parse a tag region into a field map, dropping unrecognized atoms.
pub fn parse(buffer: &[u8]) -> Result<TagMap> {
    parse_with_unparsed(buffer).map(|(map, _)| map)
}

/// Parse a tag region, also returning unrecognized atoms in file order.
///
/// If the buffer opens with a `ftyp` marker, only the region that marker
/// declares is walked; otherwise the whole buffer is. Marker atoms are
/// skipped and never reported as unparsed.
pub fn parse_with_unparsed(buffer: &[u8]) -> Result<(TagMap, Vec<RawAtom>)> {
    let region = match buffer.get(4..8) {
        Some(kind) if kind == FTYP => {
            let declared = declared_size(buffer, 0)?;
            if declared > buffer.len() {
                return Err(TagError::InvalidFormat(format!(
                    "tag region declares {} bytes but only {} are available",
                    declared,
                    buffer.len()
                )));
            }
            &buffer[HEADER_SIZE..declared]
        }
        _ => buffer,
    };

    let mut map = TagMap::new();
    let mut unparsed = Vec::new();
    let mut offset = 0usize;

    while offset < region.len() {
        if region.len() - offset < HEADER_SIZE {
            return Err(TagError::InvalidFormat(format!(
                "truncated atom header at offset {}",
                offset
            )));
        }
        let size = declared_size(region, offset)?;
        let end = offset
            .checked_add(size)
            .filter(|&end| end <= region.len())
            .ok_or_else(|| {
                TagError::InvalidFormat(format!(
                    "atom at offset {} overruns the tag region ({} bytes)",
                    offset, size
                ))
            })?;

        let kind = [
            region[offset + 4],
            region[offset + 5],
            region[offset + 6],
            region[offset + 7],
        ];
        let payload = &region[offset + HEADER_SIZE..end];

        match AtomField::from_fourcc(&kind) {
            Some(field) => {
                map.insert(field.as_str(), String::from_utf8_lossy(payload));
            }
            None if is_marker(&kind) => {}
            None => {
                debug!(kind = %String::from_utf8_lossy(&kind), size, "dropping unrecognized atom");
                unparsed.push(RawAtom {
                    kind,
                    payload: payload.to_vec(),
                });
            }
        }

        offset = end;
    }

    Ok((map, unparsed))
}

fn declared_size(data: &[u8], offset: usize) -> Result<usize> {
    let size = be_u32_at(data, offset)
        .ok_or_else(|| TagError::InvalidFormat(format!("truncated atom header at offset {}", offset)))?
        as usize;
    if size < HEADER_SIZE {
        return Err(TagError::InvalidFormat(format!(
            "atom at offset {} declares size {} (minimum is {})",
            offset, size, HEADER_SIZE
        )));
    }
    Ok(size)
}

/// Build a tag region from the recognized entries of `map`, in map order.
/// Entries with unrecognized keys are skipped.
pub fn serialize(map: &TagMap) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    for (key, value) in map.iter() {
        let Some(field) = AtomField::from_name(key) else {
            debug!(key, "skipping field with no atom type");
            continue;
        };
        write_atom(&mut body, field.fourcc(), value.as_bytes())?;
    }
    write_atom(&mut body, MDAT, &[])?;

    let total = atom_size(HEADER_SIZE + body.len())?;
    let mut out = Vec::with_capacity(HEADER_SIZE + body.len());
    out.extend_from_slice(&total.to_be_bytes());
    out.extend_from_slice(FTYP);
    out.extend_from_slice(&body);
    Ok(out)
}

fn write_atom(out: &mut Vec<u8>, kind: &[u8; 4], payload: &[u8]) -> Result<()> {
    let size = atom_size(HEADER_SIZE + payload.len())?;
    out.extend_from_slice(&size.to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(payload);
    Ok(())
}

fn atom_size(len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| TagError::InvalidFormat(format!("atom of {} bytes exceeds the 32-bit size field", len)))
}
