//! Raw catalog records and their classification into displayable items.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Shown for cards whose record carries no artwork
pub const NO_IMAGE_CARD_URL: &str = "https://via.placeholder.com/400?text=No+Image";
/// Artist records never carry artwork in search results
pub const ARTIST_CARD_URL: &str = "https://via.placeholder.com/400?text=Artist";
pub const NO_IMAGE_PANEL_URL: &str = "https://via.placeholder.com/600?text=No+Image";
pub const ARTIST_PANEL_URL: &str = "https://via.placeholder.com/600?text=Artist";

const SOURCE_ARTWORK_SIZE: &str = "100x100bb";
const CARD_ARTWORK_SIZE: &str = "400x400bb";
const PANEL_ARTWORK_SIZE: &str = "600x600bb";

/// One entry of a search or lookup response, as sent by the catalog.
///
/// Every field is optional; the catalog omits whatever does not apply to the
/// record's kind and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub wrapper_type: Option<String>,
    pub kind: Option<String>,
    pub collection_type: Option<String>,
    pub artist_type: Option<String>,
    pub track_id: Option<u64>,
    pub collection_id: Option<u64>,
    pub artist_id: Option<u64>,
    pub track_name: Option<String>,
    pub collection_name: Option<String>,
    pub artist_name: Option<String>,
    pub artwork_url100: Option<String>,
    pub preview_url: Option<String>,
    pub track_count: Option<u32>,
    pub primary_genre_name: Option<String>,
    pub release_date: Option<String>,
}

impl CatalogRecord {
    /// True if the record's wrapper marks it as a track of any kind
    #[must_use]
    pub fn is_track_wrapper(&self) -> bool {
        self.wrapper_type.as_deref() == Some("track")
    }
}

/// A record classified into one of the supported card variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultItem {
    Track(Track),
    Album(Album),
    Artist(Artist),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: Option<u64>,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork_url: Option<String>,
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: Option<u64>,
    pub title: String,
    pub artist: String,
    pub track_count: Option<u32>,
    pub artwork_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: Option<u64>,
    pub name: String,
    pub genre: Option<String>,
    pub artist_type: Option<String>,
}

/// Kind of a classified item, also used to route card clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Track,
    Album,
    Artist,
}

impl ItemKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Album => "album",
            Self::Artist => "artist",
        }
    }
}

impl ResultItem {
    /// Classify a raw record by its wrapper, kind and collection-type markers.
    ///
    /// Returns `None` for anything that is not a song track, an album
    /// collection or an artist.
    #[must_use]
    pub fn classify(record: &CatalogRecord) -> Option<Self> {
        let wrapper = record.wrapper_type.as_deref();
        match wrapper {
            Some("track") if record.kind.as_deref() == Some("song") => {
                Some(Self::Track(Track {
                    id: record.track_id,
                    title: or_unknown(record.track_name.as_deref(), "Unknown Track"),
                    artist: or_unknown(record.artist_name.as_deref(), "Unknown"),
                    album: or_unknown(record.collection_name.as_deref(), "Unknown"),
                    artwork_url: present(record.artwork_url100.as_deref()),
                    preview_url: present(record.preview_url.as_deref()),
                }))
            }
            Some("collection") if record.collection_type.as_deref() == Some("Album") => {
                Some(Self::Album(Album {
                    id: record.collection_id,
                    title: or_unknown(record.collection_name.as_deref(), "Unknown Album"),
                    artist: or_unknown(record.artist_name.as_deref(), "Unknown"),
                    track_count: record.track_count,
                    artwork_url: present(record.artwork_url100.as_deref()),
                }))
            }
            Some("artist") => Some(Self::Artist(Artist {
                id: record.artist_id,
                name: or_unknown(record.artist_name.as_deref(), "Unknown Artist"),
                genre: present(record.primary_genre_name.as_deref()),
                artist_type: present(record.artist_type.as_deref()),
            })),
            _ => {
                debug!(
                    "Skipping unsupported record (wrapperType: {:?}, kind: {:?}, collectionType: {:?})",
                    record.wrapper_type, record.kind, record.collection_type
                );
                None
            }
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Track(_) => ItemKind::Track,
            Self::Album(_) => ItemKind::Album,
            Self::Artist(_) => ItemKind::Artist,
        }
    }

    /// Catalog id used for a details lookup
    #[must_use]
    pub const fn id(&self) -> Option<u64> {
        match self {
            Self::Track(track) => track.id,
            Self::Album(album) => album.id,
            Self::Artist(artist) => artist.id,
        }
    }
}

/// Classify a page of records, dropping the unsupported ones and keeping order.
#[must_use]
pub fn classify_all(records: &[CatalogRecord]) -> Vec<ResultItem> {
    records.iter().filter_map(ResultItem::classify).collect()
}

/// Card-sized artwork for a record's 100x100 artwork URL
#[must_use]
pub fn card_artwork(artwork_url100: Option<&str>) -> String {
    artwork_url100.map_or_else(
        || NO_IMAGE_CARD_URL.to_string(),
        |url| url.replace(SOURCE_ARTWORK_SIZE, CARD_ARTWORK_SIZE),
    )
}

/// Panel-sized artwork for a record's 100x100 artwork URL
#[must_use]
pub fn panel_artwork(artwork_url100: Option<&str>) -> String {
    artwork_url100.map_or_else(
        || NO_IMAGE_PANEL_URL.to_string(),
        |url| url.replace(SOURCE_ARTWORK_SIZE, PANEL_ARTWORK_SIZE),
    )
}

/// Format a catalog release date (RFC 3339) for display, e.g. "January 1, 2010".
#[must_use]
pub fn format_release_date(release_date: Option<&str>) -> String {
    release_date
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map_or_else(
            || "N/A".to_string(),
            |date| date.with_timezone(&Utc).format("%B %-d, %Y").to_string(),
        )
}

/// Trimmed value, treating blank strings as missing
pub(crate) fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

pub(crate) fn or_unknown(value: Option<&str>, fallback: &str) -> String {
    present(value).unwrap_or_else(|| fallback.to_string())
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_classify_song() {
        let item = ResultItem::classify(&song(1, "Something", Some("https://a/p.m4a"))).unwrap();
        let ResultItem::Track(track) = item else {
            panic!("expected track");
        };
        assert_eq!(track.id, Some(1));
        assert_eq!(track.title, "Something");
        assert_eq!(track.artist, "The Beatles");
        assert_eq!(track.album, "Abbey Road");
        assert_eq!(track.preview_url.as_deref(), Some("https://a/p.m4a"));
    }

    #[test]
    fn test_classify_album_and_artist() {
        assert_eq!(
            ResultItem::classify(&album(2, "Abbey Road")).map(|i| i.kind()),
            Some(ItemKind::Album)
        );
        assert_eq!(
            ResultItem::classify(&artist(3, "The Beatles")).map(|i| i.kind()),
            Some(ItemKind::Artist)
        );
    }

    #[test]
    fn test_classify_drops_unsupported() {
        assert!(ResultItem::classify(&music_video(4)).is_none());
        assert!(ResultItem::classify(&CatalogRecord::default()).is_none());

        let compilation = CatalogRecord {
            collection_type: Some("Compilation".into()),
            ..album(5, "Hits")
        };
        assert!(ResultItem::classify(&compilation).is_none());
    }

    #[test]
    fn test_classify_all_keeps_order() {
        let records = vec![song(1, "A", None), music_video(2), album(3, "B"), artist(4, "C")];
        let ids: Vec<_> = classify_all(&records).iter().map(ResultItem::id).collect();
        assert_eq!(ids, vec![Some(1), Some(3), Some(4)]);
    }

    #[test]
    fn test_missing_names_fall_back_to_unknown() {
        let bare_song = CatalogRecord {
            wrapper_type: Some("track".into()),
            kind: Some("song".into()),
            track_name: Some("   ".into()),
            ..CatalogRecord::default()
        };
        let ResultItem::Track(track) = ResultItem::classify(&bare_song).unwrap() else {
            panic!("expected track");
        };
        assert_eq!(track.title, "Unknown Track");
        assert_eq!(track.artist, "Unknown");
        assert!(track.preview_url.is_none());

        let bare_artist = CatalogRecord {
            wrapper_type: Some("artist".into()),
            ..CatalogRecord::default()
        };
        let ResultItem::Artist(artist) = ResultItem::classify(&bare_artist).unwrap() else {
            panic!("expected artist");
        };
        assert_eq!(artist.name, "Unknown Artist");
    }

    #[test]
    fn test_artwork_upscaling() {
        let url = "https://is1.example/x/100x100bb.jpg";
        assert_eq!(card_artwork(Some(url)), "https://is1.example/x/400x400bb.jpg");
        assert_eq!(panel_artwork(Some(url)), "https://is1.example/x/600x600bb.jpg");
        assert_eq!(card_artwork(None), NO_IMAGE_CARD_URL);
        assert_eq!(panel_artwork(None), NO_IMAGE_PANEL_URL);
    }

    #[test]
    fn test_format_release_date() {
        assert_eq!(format_release_date(Some("1969-09-26T07:00:00Z")), "September 26, 1969");
        assert_eq!(format_release_date(Some("not a date")), "N/A");
        assert_eq!(format_release_date(None), "N/A");
    }

    #[test]
    fn test_record_deserializes_camel_case() {
        let json = r#"{
            "wrapperType": "track",
            "kind": "song",
            "trackId": 1441164426,
            "artistName": "The Beatles",
            "trackName": "Here Comes the Sun",
            "artworkUrl100": "https://is1.example/100x100bb.jpg",
            "previewUrl": "https://audio.example/p.m4a",
            "trackPrice": 1.29
        }"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.track_id, Some(1_441_164_426));
        assert_eq!(record.artwork_url100.as_deref(), Some("https://is1.example/100x100bb.jpg"));
        assert!(record.is_track_wrapper());
    }
}
