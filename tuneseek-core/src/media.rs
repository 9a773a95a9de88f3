//! Media-type filter vocabulary used by the search endpoint.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The `entity` filter sent with a search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MediaType {
    #[default]
    #[serde(rename = "song")]
    Song,
    #[serde(rename = "album")]
    Album,
    #[serde(rename = "musicArtist")]
    MusicArtist,
}

impl MediaType {
    /// All filters in the order they are offered to the user.
    pub const ALL: [Self; 3] = [Self::Song, Self::Album, Self::MusicArtist];

    /// Wire value for the `entity` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Song => "song",
            Self::Album => "album",
            Self::MusicArtist => "musicArtist",
        }
    }

    /// Button label for the filter bar.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Song => "Tracks",
            Self::Album => "Albums",
            Self::MusicArtist => "Artists",
        }
    }

    /// Plural noun used in "nothing found" notices.
    #[must_use]
    pub const fn plural_noun(&self) -> &'static str {
        match self {
            Self::Song => "songs",
            Self::Album => "albums",
            Self::MusicArtist => "artists",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|media| media.as_str() == s)
            .ok_or_else(|| format!("unknown media type: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_wire_values() {
        assert_eq!(MediaType::Song.as_str(), "song");
        assert_eq!(MediaType::Album.as_str(), "album");
        assert_eq!(MediaType::MusicArtist.as_str(), "musicArtist");
    }

    #[test]
    fn test_media_type_from_str() {
        assert_eq!("musicArtist".parse::<MediaType>(), Ok(MediaType::MusicArtist));
        assert!("musicartist".parse::<MediaType>().is_err());
        assert!("".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_media_type_serde_matches_wire_value() {
        #[derive(Deserialize)]
        struct Holder {
            media: MediaType,
        }

        let holder: Holder = toml::from_str(r#"media = "album""#).unwrap();
        assert_eq!(holder.media, MediaType::Album);
    }
}
