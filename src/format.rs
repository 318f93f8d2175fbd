// Tag format variants recognized by the detector

use std::fmt;

use serde::Serialize;

/// Binary tag formats the detector can classify a file into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagFormat {
    /// 128-byte trailer at the end of an MP3 file.
    Id3v1,
    /// Header tag at the start of an MP3 file.
    Id3v2,
    /// FLAC and Ogg containers.
    VorbisComment,
    /// APEv2 footer.
    ApeTag,
    /// Flat atom region opening with a `ftyp` atom.
    Mp4Tag,
    /// RIFF/WAVE header.
    WavInfo,
    /// FORM/AIFF header.
    AiffInfo,
    Unknown,
}

impl TagFormat {
    pub const ALL: [TagFormat; 8] = [
        TagFormat::Id3v1,
        TagFormat::Id3v2,
        TagFormat::VorbisComment,
        TagFormat::ApeTag,
        TagFormat::Mp4Tag,
        TagFormat::WavInfo,
        TagFormat::AiffInfo,
        TagFormat::Unknown,
    ];

    /// Whether the format is fully supported (read and write with a standard layout).
    pub fn is_supported(&self) -> bool {
        match self {
            TagFormat::Id3v1 => true,
            TagFormat::Id3v2
            | TagFormat::VorbisComment
            | TagFormat::ApeTag
            | TagFormat::Mp4Tag
            | TagFormat::WavInfo
            | TagFormat::AiffInfo
            | TagFormat::Unknown => false,
        }
    }

    /// Whether a writer exists for the format.
    ///
    /// The atom-style writer counts here even though the format is not
    /// "supported": it only round-trips against its own reader.
    pub fn has_writer(&self) -> bool {
        match self {
            TagFormat::Id3v1 | TagFormat::Mp4Tag => true,
            TagFormat::Id3v2
            | TagFormat::VorbisComment
            | TagFormat::ApeTag
            | TagFormat::WavInfo
            | TagFormat::AiffInfo
            | TagFormat::Unknown => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagFormat::Id3v1 => "id3v1",
            TagFormat::Id3v2 => "id3v2",
            TagFormat::VorbisComment => "vorbis_comment",
            TagFormat::ApeTag => "ape_tag",
            TagFormat::Mp4Tag => "mp4_tag",
            TagFormat::WavInfo => "wav_info",
            TagFormat::AiffInfo => "aiff_info",
            TagFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TagFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_id3v1_is_supported() {
        let supported: Vec<_> = TagFormat::ALL.iter().filter(|f| f.is_supported()).collect();
        assert_eq!(supported, vec![&TagFormat::Id3v1]);
    }

    #[test]
    fn writers_exist_for_id3v1_and_atoms() {
        let writable: Vec<_> = TagFormat::ALL.iter().filter(|f| f.has_writer()).collect();
        assert_eq!(writable, vec![&TagFormat::Id3v1, &TagFormat::Mp4Tag]);
    }

    #[test]
    fn display_names() {
        assert_eq!(TagFormat::VorbisComment.to_string(), "vorbis_comment");
        assert_eq!(TagFormat::Unknown.to_string(), "unknown");
    }
}
