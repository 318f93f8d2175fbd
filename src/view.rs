// Display records filled from decoded tags

use std::fmt;

use serde::Serialize;

use crate::tag_map::TagMap;

/// Album-level view of a mix recording.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MixView {
    pub name: String,
    pub author: String,
    pub episode: String,
    pub date: String,
    pub tracks: Vec<TrackView>,
    /// Tags with no dedicated field, in tag order.
    pub additional_tags: TagMap,
}

impl MixView {
    pub fn add_track(&mut self, track: TrackView) {
        self.tracks.push(track);
    }
}

/// One track inside a mix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackView {
    pub title: String,
    pub artist: String,
    pub track_number: u32,
    /// Offset into the mix, in seconds.
    pub start_time: u32,
    pub additional_tags: TagMap,
}

impl TrackView {
    pub fn new(artist: &str, title: &str, track_number: u32, start_time: u32) -> Self {
        TrackView {
            title: title.to_string(),
            artist: artist.to_string(),
            track_number,
            start_time,
            additional_tags: TagMap::new(),
        }
    }

    /// Start time as `HH:MM:SS`.
    pub fn display_start_time(&self) -> String {
        let hours = self.start_time / 3600;
        let minutes = (self.start_time % 3600) / 60;
        let seconds = self.start_time % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl fmt::Display for MixView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Author: {}", self.author)?;
        writeln!(f, "Episode: {}", self.episode)?;
        writeln!(f, "Date: {}", self.date)?;
        for track in &self.tracks {
            writeln!(
                f,
                "  {:>3}. [{}] {} - {}",
                track.track_number,
                track.display_start_time(),
                track.artist,
                track.title
            )?;
        }
        writeln!(f, "Additional Tags:")?;
        for (key, value) in self.additional_tags.iter() {
            writeln!(f, "  {}: {}", key, value)?;
        }
        Ok(())
    }
}

impl fmt::Display for TrackView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Artist: {}", self.artist)?;
        writeln!(f, "Track: {}", self.track_number)?;
        writeln!(f, "Time: {}", self.display_start_time())?;
        writeln!(f, "Additional Tags:")?;
        for (key, value) in self.additional_tags.iter() {
            writeln!(f, "  {}: {}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_time_formatting() {
        assert_eq!(TrackView::new("A", "B", 1, 0).display_start_time(), "00:00:00");
        assert_eq!(TrackView::new("A", "B", 1, 3725).display_start_time(), "01:02:05");
        assert_eq!(TrackView::new("A", "B", 1, 360_000).display_start_time(), "100:00:00");
    }

    #[test]
    fn mix_lists_tracks() {
        let mut mix = MixView {
            name: "Episode 12".into(),
            ..Default::default()
        };
        mix.add_track(TrackView::new("DJ", "Opener", 1, 0));
        mix.add_track(TrackView::new("DJ", "Closer", 2, 4000));
        assert_eq!(mix.tracks.len(), 2);
        let text = mix.to_string();
        assert!(text.contains("Name: Episode 12"));
        assert!(text.contains("[01:06:40] DJ - Closer"));
        assert!(!text.contains("Duration"));
    }
}
