// Euphory - tag subsystem for long-form DJ-mix recordings
//
// Detects which binary tag format a file carries and reads/writes the two
// layouts that have codecs: the ID3v1.1 trailer and a flat atom region at
// the head of the file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

pub mod detect;
pub mod error;
pub mod field_mapping;
pub mod format;
pub mod id3;
pub mod mp4;
pub mod policy;
pub mod service;
pub mod tag_map;
pub mod utils;
pub mod view;

pub use error::{Result, TagError};
pub use format::TagFormat;
pub use id3::{Id3v1Tag, Id3v1Update};
pub use policy::WritePolicy;
pub use service::TagService;
pub use tag_map::TagMap;
pub use view::{MixView, TrackView};

use utils::io::{open_ro, open_rw};

/// A decoded tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", content = "tag", rename_all = "snake_case")]
pub enum Tag {
    Id3v1(Id3v1Tag),
    Mp4(TagMap),
}

impl Tag {
    pub fn format(&self) -> TagFormat {
        match self {
            Tag::Id3v1(_) => TagFormat::Id3v1,
            Tag::Mp4(_) => TagFormat::Mp4Tag,
        }
    }

    /// Generic field view of the tag.
    pub fn fields(&self) -> TagMap {
        match self {
            Tag::Id3v1(tag) => tag.to_fields(),
            Tag::Mp4(map) => map.clone(),
        }
    }
}

/// Per-file tag session.
///
/// Detection runs once, when the session is opened. Each operation opens its
/// own file handle and releases it before returning.
#[derive(Debug, Clone)]
pub struct AudioFile {
    path: PathBuf,
    format: TagFormat,
}

impl AudioFile {
    /// Open a session on an existing regular file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(TagError::NotFound(path.to_path_buf())),
        }
        let format = detect::detect(path)?;
        debug!(path = %path.display(), %format, "opened audio file");
        Ok(AudioFile {
            path: path.to_path_buf(),
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format detected when the session was opened.
    pub fn format(&self) -> TagFormat {
        self.format
    }

    /// Re-run detection, e.g. after a write changed the file.
    pub fn redetect(&mut self) -> Result<TagFormat> {
        self.format = detect::detect(&self.path)?;
        Ok(self.format)
    }

    /// Decode the tag of the detected format.
    ///
    /// Formats without a decoder, and files whose tag region is missing,
    /// yield `None`.
    pub fn read_tag(&self) -> Result<Option<Tag>> {
        match self.format {
            TagFormat::Id3v1 => {
                let mut file = open_ro(&self.path)?;
                Ok(id3::v1::read_tag(&mut file)?.map(Tag::Id3v1))
            }
            TagFormat::Mp4Tag => {
                let mut file = open_ro(&self.path)?;
                Ok(mp4::read_mp4_tag(&mut file)?.map(Tag::Mp4))
            }
            TagFormat::Id3v2
            | TagFormat::VorbisComment
            | TagFormat::ApeTag
            | TagFormat::WavInfo
            | TagFormat::AiffInfo
            | TagFormat::Unknown => {
                debug!(format = %self.format, "no decoder for format");
                Ok(None)
            }
        }
    }

    /// Atoms the atom codec could not map to a field. Empty for other formats.
    pub fn unparsed_atoms(&self) -> Result<Vec<mp4::RawAtom>> {
        if self.format != TagFormat::Mp4Tag {
            return Ok(Vec::new());
        }
        let mut file = open_ro(&self.path)?;
        Ok(mp4::read_mp4_tag_with_unparsed(&mut file)?
            .map(|(_, unparsed)| unparsed)
            .unwrap_or_default())
    }

    /// Field map of the decoded tag.
    pub fn fields(&self) -> Result<Option<TagMap>> {
        Ok(self.read_tag()?.map(|tag| tag.fields()))
    }

    /// Write `fields` as a tag of `format`, using that format's write policy.
    ///
    /// ID3v1 fills missing genre with `default_genre`. Formats without a
    /// writer fail with [`TagError::Unsupported`].
    pub fn write_fields(
        &mut self,
        format: TagFormat,
        fields: &TagMap,
        default_genre: u8,
    ) -> Result<WritePolicy> {
        let policy = match format {
            TagFormat::Id3v1 => {
                let tag = Id3v1Tag::from_fields(fields, default_genre);
                return self.write_id3v1(&tag);
            }
            TagFormat::Mp4Tag => {
                let mut file = open_rw(&self.path)?;
                mp4::write_mp4_tag(&mut file, fields)?
            }
            TagFormat::Id3v2
            | TagFormat::VorbisComment
            | TagFormat::ApeTag
            | TagFormat::WavInfo
            | TagFormat::AiffInfo
            | TagFormat::Unknown => return Err(TagError::Unsupported(format)),
        };
        self.redetect()?;
        Ok(policy)
    }

    /// Write an ID3v1.1 trailer, overwriting an existing one or appending.
    pub fn write_id3v1(&mut self, tag: &Id3v1Tag) -> Result<WritePolicy> {
        let policy = {
            let mut file = open_rw(&self.path)?;
            id3::v1::write_tag(&mut file, tag)?
        };
        self.redetect()?;
        Ok(policy)
    }

    /// Apply `update` to the existing trailer (or a blank tag), clear the
    /// comment, set the genre to `genre`, and write it back.
    pub fn update_id3v1(&mut self, update: Id3v1Update, genre: u8) -> Result<Id3v1Tag> {
        let mut tag = {
            let mut file = open_ro(&self.path)?;
            id3::v1::read_tag(&mut file)?.unwrap_or_default()
        };
        tag.apply_update(update, genre);
        self.write_id3v1(&tag)?;
        Ok(tag)
    }
}
