// Field mapping between tag layouts and the generic field map
//
// The atom codec recognizes six fields, each bound to a FourCC type code.
// The ID3v1 trailer stores genre as a numeric code; the table below maps
// codes to display names (standard list plus the Winamp extensions).

/// Fields recognized by the atom codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomField {
    Title,
    Artist,
    Album,
    Genre,
    Year,
    Track,
}

impl AtomField {
    pub const ALL: [AtomField; 6] = [
        AtomField::Title,
        AtomField::Artist,
        AtomField::Album,
        AtomField::Genre,
        AtomField::Year,
        AtomField::Track,
    ];

    /// Field name used as key in a [`TagMap`](crate::tag_map::TagMap).
    pub fn as_str(&self) -> &'static str {
        match self {
            AtomField::Title => "title",
            AtomField::Artist => "artist",
            AtomField::Album => "album",
            AtomField::Genre => "genre",
            AtomField::Year => "year",
            AtomField::Track => "track",
        }
    }

    pub fn fourcc(&self) -> &'static [u8; 4] {
        match self {
            AtomField::Title => b"tidl",
            AtomField::Artist => b"arts",
            AtomField::Album => b"albt",
            AtomField::Genre => b"genr",
            AtomField::Year => b"year",
            AtomField::Track => b"trak",
        }
    }

    /// Exact, case-sensitive name lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    pub fn from_fourcc(code: &[u8; 4]) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.fourcc() == code)
    }
}

/// Generic field names produced when an ID3v1 tag is flattened.
pub mod id3v1_keys {
    pub const TITLE: &str = "title";
    pub const ARTIST: &str = "artist";
    pub const ALBUM: &str = "album";
    pub const YEAR: &str = "year";
    pub const COMMENT: &str = "comment";
    pub const TRACK: &str = "track";
    pub const GENRE: &str = "genre";
}

pub const GENRES: &[&str] = &[
    "Blues", "Classic Rock", "Country", "Dance", "Disco", "Funk", "Grunge",
    "Hip-Hop", "Jazz", "Metal", "New Age", "Oldies", "Other", "Pop", "R&B",
    "Rap", "Reggae", "Rock", "Techno", "Industrial", "Alternative", "Ska",
    "Death Metal", "Pranks", "Soundtrack", "Euro-Techno", "Ambient",
    "Trip-Hop", "Vocal", "Jazz+Funk", "Fusion", "Trance", "Classical",
    "Instrumental", "Acid", "House", "Game", "Sound Clip", "Gospel", "Noise",
    "AlternRock", "Bass", "Soul", "Punk", "Space", "Meditative",
    "Instrumental Pop", "Instrumental Rock", "Ethnic", "Gothic", "Darkwave",
    "Techno-Industrial", "Electronic", "Pop-Folk", "Eurodance", "Dream",
    "Southern Rock", "Comedy", "Cult", "Gangsta", "Top 40", "Christian Rap",
    "Pop/Funk", "Jungle", "Native American", "Cabaret", "New Wave",
    "Psychedelic", "Rave", "Showtunes", "Trailer", "Lo-Fi", "Tribal",
    "Acid Punk", "Acid Jazz", "Polka", "Retro", "Musical", "Rock & Roll",
    "Hard Rock", "Folk", "Folk-Rock", "National Folk", "Swing", "Fast Fusion",
    "Bebop", "Latin", "Revival", "Celtic", "Bluegrass", "Avantgarde",
    "Gothic Rock", "Progressive Rock", "Psychedelic Rock", "Symphonic Rock",
    "Slow Rock", "Big Band", "Chorus", "Easy Listening", "Acoustic", "Humour",
    "Speech", "Chanson", "Opera", "Chamber Music", "Sonata", "Symphony",
    "Booty Bass", "Primus", "Porn Groove", "Satire", "Slow Jam", "Club",
    "Tango", "Samba", "Folklore", "Ballad", "Power Ballad", "Rhythmic Soul",
    "Freestyle", "Duet", "Punk Rock", "Drum Solo", "A capella", "Euro-House",
    "Dance Hall", "Goa", "Drum & Bass", "Club-House", "Hardcore Techno",
    "Terror", "Indie", "BritPop", "Negerpunk", "Polsk Punk", "Beat",
    "Christian Gangsta Rap", "Heavy Metal", "Black Metal", "Crossover",
    "Contemporary Christian", "Christian Rock", "Merengue", "Salsa",
    "Thrash Metal", "Anime", "Jpop", "Synthpop", "Abstract", "Art Rock",
    "Baroque", "Bhangra", "Big Beat", "Breakbeat", "Chillout", "Downtempo",
    "Dub", "EBM", "Eclectic", "Electro", "Electroclash", "Emo", "Experimental",
    "Garage", "Global", "IDM", "Illbient", "Industro-Goth", "Jam Band",
    "Krautrock", "Leftfield", "Lounge", "Math Rock", "New Romantic",
    "Nu-Breakz", "Post-Punk", "Post-Rock", "Psytrance", "Shoegaze",
    "Space Rock", "Trop Rock", "World Music", "Neoclassical", "Audiobook",
    "Audio Theatre", "Neue Deutsche Welle", "Podcast", "Indie Rock",
    "G-Funk", "Dubstep", "Garage Rock", "Psybient",
];

/// Value conversions between the generic map and fixed-layout fields.
pub struct ValueConverter;

impl ValueConverter {
    /// Display name for an ID3v1 genre code.
    pub fn genre_name(code: u8) -> String {
        GENRES
            .get(code as usize)
            .map(|g| g.to_string())
            .unwrap_or_else(|| format!("Unknown({})", code))
    }

    /// Genre code from either a number ("31") or a name ("Trance", any case).
    pub fn parse_genre(value: &str) -> Option<u8> {
        let value = value.trim();
        if let Ok(code) = value.parse::<u8>() {
            return Some(code);
        }
        GENRES
            .iter()
            .position(|g| g.eq_ignore_ascii_case(value))
            .and_then(|i| u8::try_from(i).ok())
    }

    /// Track number from "5" or "5/12" forms.
    pub fn parse_track(value: &str) -> Option<u32> {
        value.split('/').next()?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourcc_and_name_are_bijective() {
        for field in AtomField::ALL {
            assert_eq!(AtomField::from_fourcc(field.fourcc()), Some(field));
            assert_eq!(AtomField::from_name(field.as_str()), Some(field));
        }
        assert_eq!(AtomField::from_name("Title"), None);
        assert_eq!(AtomField::from_fourcc(b"mdat"), None);
    }

    #[test]
    fn fourcc_matches_wire_values() {
        assert_eq!(u32::from_be_bytes(*AtomField::Title.fourcc()), 0x7469646c);
        assert_eq!(u32::from_be_bytes(*AtomField::Track.fourcc()), 0x7472616b);
    }

    #[test]
    fn genre_lookup() {
        assert_eq!(ValueConverter::genre_name(31), "Trance");
        assert_eq!(ValueConverter::genre_name(255), "Unknown(255)");
        assert_eq!(ValueConverter::parse_genre("trance"), Some(31));
        assert_eq!(ValueConverter::parse_genre(" 17 "), Some(17));
        assert_eq!(ValueConverter::parse_genre("Not A Genre"), None);
    }

    #[test]
    fn track_normalization() {
        assert_eq!(ValueConverter::parse_track("3/12"), Some(3));
        assert_eq!(ValueConverter::parse_track("7"), Some(7));
        assert_eq!(ValueConverter::parse_track("seven"), None);
    }
}
