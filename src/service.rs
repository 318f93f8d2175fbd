// Tag orchestration for display
//
// Turns decoded tags into view records. This is the only layer that swallows
// errors: every failure is logged and reported as "no data" so a bad file
// renders as an empty view instead of aborting the caller.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::field_mapping::ValueConverter;
use crate::format::TagFormat;
use crate::mp4;
use crate::tag_map::TagMap;
use crate::utils::io::open_ro;
use crate::view::{MixView, TrackView};
use crate::AudioFile;

const TITLE: &str = "title";
const ARTIST: &str = "artist";
const TRACK: &str = "track";
const YEAR: &str = "year";

/// Stateless facade over [`AudioFile`] sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagService;

impl TagService {
    pub fn new() -> Self {
        TagService
    }

    /// Album view of the file at `path`, or `None` if it has no readable tag.
    pub fn load_album_view(&self, path: impl AsRef<Path>) -> Option<MixView> {
        let path = path.as_ref();
        absorb(path, "album view", read_fields(path).map(|f| f.map(mix_from_fields)))
    }

    /// Track view of the file at `path`, or `None` if it has no readable tag.
    pub fn load_track_view(&self, path: impl AsRef<Path>) -> Option<TrackView> {
        let path = path.as_ref();
        absorb(path, "track view", read_fields(path).map(|f| f.map(track_from_fields)))
    }
}

/// Fields of the detected tag. A region too short to classify can still
/// carry an atom tag, so `Unknown` falls back to the atom reader.
fn read_fields(path: &Path) -> Result<Option<TagMap>> {
    let audio = AudioFile::open(path)?;
    match audio.format() {
        TagFormat::Unknown => {
            let mut file = open_ro(path)?;
            mp4::read_mp4_tag(&mut file)
        }
        _ => audio.fields(),
    }
}

fn absorb<T>(path: &Path, what: &str, result: Result<Option<T>>) -> Option<T> {
    match result {
        Ok(Some(view)) => Some(view),
        Ok(None) => {
            debug!(path = %path.display(), "no tag to build {} from", what);
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load {}", what);
            None
        }
    }
}

/// title -> name, artist -> author, track -> episode, year -> date.
pub fn mix_from_fields(mut fields: TagMap) -> MixView {
    MixView {
        name: fields.remove(TITLE).unwrap_or_default(),
        author: fields.remove(ARTIST).unwrap_or_default(),
        episode: fields.remove(TRACK).unwrap_or_default(),
        date: fields.remove(YEAR).unwrap_or_default(),
        additional_tags: fields,
        ..Default::default()
    }
}

/// title, artist and track map to fields; start time is not stored in tags.
pub fn track_from_fields(mut fields: TagMap) -> TrackView {
    let track_number = fields
        .remove(TRACK)
        .and_then(|t| ValueConverter::parse_track(&t))
        .unwrap_or(0);
    TrackView {
        title: fields.remove(TITLE).unwrap_or_default(),
        artist: fields.remove(ARTIST).unwrap_or_default(),
        track_number,
        start_time: 0,
        additional_tags: fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> TagMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn mix_mapping_moves_rest_to_additional() {
        let view = mix_from_fields(fields(&[
            ("title", "Episode 12"),
            ("genre", "Trance"),
            ("artist", "DJ"),
            ("track", "12"),
            ("album", "Sessions"),
            ("year", "2024"),
        ]));
        assert_eq!(view.name, "Episode 12");
        assert_eq!(view.author, "DJ");
        assert_eq!(view.episode, "12");
        assert_eq!(view.date, "2024");
        assert_eq!(
            view.additional_tags.iter().collect::<Vec<_>>(),
            vec![("genre", "Trance"), ("album", "Sessions")]
        );
    }

    #[test]
    fn track_mapping_parses_number() {
        let view = track_from_fields(fields(&[("track", "3/12"), ("title", "Opener"), ("comment", "c")]));
        assert_eq!(view.track_number, 3);
        assert_eq!(view.title, "Opener");
        assert_eq!(view.artist, "");
        assert_eq!(view.start_time, 0);
        assert_eq!(view.additional_tags.iter().collect::<Vec<_>>(), vec![("comment", "c")]);

        assert_eq!(track_from_fields(fields(&[("track", "x")])).track_number, 0);
    }

    #[test]
    fn missing_file_is_absent() {
        let service = TagService::new();
        assert_eq!(service.load_album_view("/no/such/mix.m4a"), None);
        assert_eq!(service.load_track_view("/no/such/mix.m4a"), None);
    }
}
