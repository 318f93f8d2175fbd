// ID3v1.1 tag implementation
//
// Layout (128 bytes):
//   0..3     "TAG"
//   3..33    title
//   33..63   artist
//   63..93   album
//   93..97   year
//   97..125  comment
//   125      zero (v1.1 marker)
//   126      track number
//   127      genre code

use std::io::{Read, Seek, Write};

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, TagError};
use crate::field_mapping::{id3v1_keys, ValueConverter};
use crate::policy::WritePolicy;
use crate::tag_map::TagMap;
use crate::utils::encoding::{fixed_width, trim_field};
use crate::utils::io::{read_at, stream_len};

pub const TAG_SIZE: usize = 128;
pub const TAG_ID: &[u8; 3] = b"TAG";

pub const TITLE_LEN: usize = 30;
pub const ARTIST_LEN: usize = 30;
pub const ALBUM_LEN: usize = 30;
pub const YEAR_LEN: usize = 4;
pub const COMMENT_LEN: usize = 28;

/// Genre written when the caller supplies none.
pub const DEFAULT_GENRE: u8 = 31;

/// ID3v1.1 tag structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Id3v1Tag {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub comment: String,
    pub track: u8,
    pub genre: u8,
}

/// Fields applied by [`Id3v1Tag::apply_update`].
#[derive(Debug, Clone, Default)]
pub struct Id3v1Update {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub track: u8,
}

impl Id3v1Tag {
    /// Serialize to the fixed 128-byte layout.
    ///
    /// String fields are truncated to their width and space-padded.
    pub fn encode(&self) -> [u8; TAG_SIZE] {
        let mut bytes = [0u8; TAG_SIZE];
        bytes[0..3].copy_from_slice(TAG_ID);
        bytes[3..33].copy_from_slice(&fixed_width(&self.title, TITLE_LEN));
        bytes[33..63].copy_from_slice(&fixed_width(&self.artist, ARTIST_LEN));
        bytes[63..93].copy_from_slice(&fixed_width(&self.album, ALBUM_LEN));
        bytes[93..97].copy_from_slice(&fixed_width(&self.year, YEAR_LEN));
        bytes[97..125].copy_from_slice(&fixed_width(&self.comment, COMMENT_LEN));
        bytes[125] = 0;
        bytes[126] = self.track;
        bytes[127] = self.genre;
        bytes
    }

    /// Parse a 128-byte record.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != TAG_SIZE {
            return Err(TagError::InvalidFormat(format!(
                "ID3v1 tag must be {} bytes, got {}",
                TAG_SIZE,
                bytes.len()
            )));
        }
        if &bytes[0..3] != TAG_ID {
            return Err(TagError::InvalidFormat("missing ID3v1 \"TAG\" identifier".into()));
        }

        Ok(Id3v1Tag {
            title: trim_field(&bytes[3..33]),
            artist: trim_field(&bytes[33..63]),
            album: trim_field(&bytes[63..93]),
            year: trim_field(&bytes[93..97]),
            comment: trim_field(&bytes[97..125]),
            track: bytes[126],
            genre: bytes[127],
        })
    }

    /// Overwrite title/artist/album/year/track, clear the comment and reset
    /// the genre to `genre`.
    pub fn apply_update(&mut self, update: Id3v1Update, genre: u8) {
        self.title = update.title;
        self.artist = update.artist;
        self.album = update.album;
        self.year = update.year;
        self.track = update.track;
        self.comment.clear();
        self.genre = genre;
    }

    /// Flatten into a generic field map.
    ///
    /// Empty strings are left out; track and genre are always present.
    pub fn to_fields(&self) -> TagMap {
        let mut fields = TagMap::new();
        for (key, value) in [
            (id3v1_keys::TITLE, &self.title),
            (id3v1_keys::ARTIST, &self.artist),
            (id3v1_keys::ALBUM, &self.album),
            (id3v1_keys::YEAR, &self.year),
            (id3v1_keys::COMMENT, &self.comment),
        ] {
            if !value.is_empty() {
                fields.insert(key, value.as_str());
            }
        }
        fields.insert(id3v1_keys::TRACK, self.track.to_string());
        fields.insert(id3v1_keys::GENRE, ValueConverter::genre_name(self.genre));
        fields
    }

    /// Build a tag from a generic field map. Missing or unparsable genre
    /// falls back to `default_genre`; a track outside 0..=255 becomes 0.
    pub fn from_fields(fields: &TagMap, default_genre: u8) -> Self {
        let text = |key: &str| fields.get(key).unwrap_or_default().to_string();
        Id3v1Tag {
            title: text(id3v1_keys::TITLE),
            artist: text(id3v1_keys::ARTIST),
            album: text(id3v1_keys::ALBUM),
            year: text(id3v1_keys::YEAR),
            comment: text(id3v1_keys::COMMENT),
            track: fields
                .get(id3v1_keys::TRACK)
                .and_then(ValueConverter::parse_track)
                .and_then(|t| u8::try_from(t).ok())
                .unwrap_or(0),
            genre: fields
                .get(id3v1_keys::GENRE)
                .and_then(ValueConverter::parse_genre)
                .unwrap_or(default_genre),
        }
    }
}

/// Read the trailing tag. A stream shorter than 128 bytes, or whose last 128
/// bytes do not open with "TAG", has no tag.
pub fn read_tag<R: Read + Seek>(reader: &mut R) -> Result<Option<Id3v1Tag>> {
    match read_trailer(reader)? {
        Some(bytes) => Ok(Some(Id3v1Tag::decode(&bytes)?)),
        None => Ok(None),
    }
}

fn read_trailer<R: Read + Seek>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let len = stream_len(reader)?;
    if len < TAG_SIZE as u64 {
        return Ok(None);
    }
    let bytes = read_at(reader, len - TAG_SIZE as u64, TAG_SIZE)?;
    if &bytes[0..3] != TAG_ID {
        return Ok(None);
    }
    Ok(Some(bytes))
}

/// Decide where a new tag goes: over the existing trailer, or appended.
pub fn write_policy<R: Read + Seek>(reader: &mut R) -> Result<WritePolicy> {
    let len = stream_len(reader)?;
    match read_trailer(reader)? {
        Some(_) => Ok(WritePolicy::OverwriteRegion {
            offset: len - TAG_SIZE as u64,
            length: TAG_SIZE as u64,
        }),
        None => Ok(WritePolicy::AppendAtEnd),
    }
}

/// Write the tag, touching only the existing 128-byte trailer or extending
/// the stream by exactly 128 bytes. Returns the policy that was applied.
pub fn write_tag<F: Read + Write + Seek>(file: &mut F, tag: &Id3v1Tag) -> Result<WritePolicy> {
    let policy = write_policy(file)?;
    debug!(?policy, title = %tag.title, "writing ID3v1 tag");
    policy.apply(file, &tag.encode())?;
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn padded(s: &str, width: usize) -> Vec<u8> {
        let mut v = s.as_bytes().to_vec();
        v.resize(width, b' ');
        v
    }

    fn sample_record() -> Vec<u8> {
        let mut bytes = b"TAG".to_vec();
        bytes.extend(padded("Show Name", 30));
        bytes.extend(padded("DJ", 30));
        bytes.extend(padded("Album", 30));
        bytes.extend(b"2024");
        bytes.extend([0u8; 28]);
        bytes.extend([0u8, 5, 31]);
        bytes
    }

    #[test]
    fn decodes_reference_record() {
        let tag = Id3v1Tag::decode(&sample_record()).unwrap();
        assert_eq!(tag.title, "Show Name");
        assert_eq!(tag.artist, "DJ");
        assert_eq!(tag.album, "Album");
        assert_eq!(tag.year, "2024");
        assert_eq!(tag.comment, "");
        assert_eq!(tag.track, 5);
        assert_eq!(tag.genre, 31);
    }

    #[test]
    fn encode_layout() {
        let tag = Id3v1Tag {
            title: "Show Name".into(),
            artist: "DJ".into(),
            album: "Album".into(),
            year: "2024".into(),
            comment: "".into(),
            track: 5,
            genre: 31,
        };
        let bytes = tag.encode();
        assert_eq!(&bytes[0..3], b"TAG");
        assert_eq!(&bytes[3..33], padded("Show Name", 30).as_slice());
        assert_eq!(&bytes[97..125], [b' '; 28].as_slice());
        assert_eq!(bytes[125], 0);
        assert_eq!(bytes[126], 5);
        assert_eq!(bytes[127], 31);
    }

    #[test]
    fn long_title_is_truncated() {
        let title = "0123456789".repeat(4);
        let tag = Id3v1Tag {
            title: title.clone(),
            ..Default::default()
        };
        let bytes = tag.encode();
        assert_eq!(&bytes[3..33], title[..30].as_bytes());
        assert_eq!(&bytes[33..36], b"   ");
    }

    #[test]
    fn round_trip_within_limits() {
        let tags = [
            Id3v1Tag::default(),
            Id3v1Tag {
                title: "Episode 12 - Live at the Club".into(),
                artist: "Résumé Sessions".into(),
                album: "A".into(),
                year: "1999".into(),
                comment: "twenty-eight characters ok!!".into(),
                track: 255,
                genre: 0,
            },
            Id3v1Tag {
                title: "  leading spaces kept".into(),
                artist: "x".repeat(30),
                album: "y".repeat(30),
                year: "24".into(),
                comment: "c".into(),
                track: 1,
                genre: 255,
            },
        ];
        for tag in tags {
            assert_eq!(Id3v1Tag::decode(&tag.encode()).unwrap(), tag);
        }
    }

    #[test]
    fn decode_rejects_bad_input() {
        assert!(matches!(
            Id3v1Tag::decode(&[0u8; 127]),
            Err(TagError::InvalidFormat(_))
        ));
        let mut bytes = sample_record();
        bytes[0] = b'X';
        assert!(matches!(Id3v1Tag::decode(&bytes), Err(TagError::InvalidFormat(_))));
    }

    #[test]
    fn read_reports_absent_tag() {
        assert_eq!(read_tag(&mut Cursor::new(vec![0u8; 50])).unwrap(), None);
        assert_eq!(read_tag(&mut Cursor::new(vec![0u8; 400])).unwrap(), None);

        let mut data = vec![0xAAu8; 400];
        data.extend(sample_record());
        let tag = read_tag(&mut Cursor::new(data)).unwrap().unwrap();
        assert_eq!(tag.title, "Show Name");
    }

    #[test]
    fn write_appends_when_missing() {
        let mut cursor = Cursor::new(vec![0xAAu8; 50]);
        let tag = Id3v1Tag {
            title: "New".into(),
            ..Default::default()
        };
        assert_eq!(write_tag(&mut cursor, &tag).unwrap(), WritePolicy::AppendAtEnd);
        let data = cursor.into_inner();
        assert_eq!(data.len(), 50 + 128);
        assert!(data[..50].iter().all(|&b| b == 0xAA));
        assert_eq!(&data[50..], tag.encode().as_slice());
    }

    #[test]
    fn write_overwrites_existing_trailer() {
        let mut data = vec![0xAAu8; 300];
        data.extend(sample_record());
        let mut cursor = Cursor::new(data);
        let tag = Id3v1Tag {
            title: "Replaced".into(),
            track: 9,
            ..Default::default()
        };
        assert_eq!(
            write_tag(&mut cursor, &tag).unwrap(),
            WritePolicy::OverwriteRegion { offset: 300, length: 128 }
        );
        let data = cursor.into_inner();
        assert_eq!(data.len(), 428);
        assert!(data[..300].iter().all(|&b| b == 0xAA));
        assert_eq!(Id3v1Tag::decode(&data[300..]).unwrap(), tag);
    }

    #[test]
    fn update_resets_comment_and_genre() {
        let mut tag = Id3v1Tag::decode(&sample_record()).unwrap();
        tag.comment = "old".into();
        tag.genre = 3;
        tag.apply_update(
            Id3v1Update {
                title: "T".into(),
                artist: "A".into(),
                album: "B".into(),
                year: "2025".into(),
                track: 2,
            },
            DEFAULT_GENRE,
        );
        assert_eq!(tag.comment, "");
        assert_eq!(tag.genre, 31);
        assert_eq!(tag.track, 2);
        assert_eq!(tag.year, "2025");
    }

    #[test]
    fn field_map_conversion() {
        let tag = Id3v1Tag::decode(&sample_record()).unwrap();
        let fields = tag.to_fields();
        assert_eq!(
            fields.iter().collect::<Vec<_>>(),
            vec![
                ("title", "Show Name"),
                ("artist", "DJ"),
                ("album", "Album"),
                ("year", "2024"),
                ("track", "5"),
                ("genre", "Trance"),
            ]
        );
        assert_eq!(Id3v1Tag::from_fields(&fields, 0), tag);

        let sparse: TagMap = [("title", "Only"), ("track", "300")].into_iter().collect();
        let built = Id3v1Tag::from_fields(&sparse, 12);
        assert_eq!(built.track, 0);
        assert_eq!(built.genre, 12);
    }
}
