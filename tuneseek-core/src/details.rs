//! Album and artist details overlay.

use crate::error::CoreError;
use crate::item::{
    format_release_date, or_unknown, panel_artwork, present, CatalogRecord, ItemKind,
    ARTIST_PANEL_URL,
};
use crate::provider::{CatalogProvider, LookupRequest};
use std::str::FromStr;
use tracing::{info, warn};

pub const DETAILS_UNAVAILABLE: &str = "Details not available.";
pub const NO_DETAILS: &str = "No details available.";

/// What a details panel describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailSubject {
    Album,
    Artist,
}

impl DetailSubject {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Artist => "artist",
        }
    }
}

impl FromStr for DetailSubject {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "album" => Ok(Self::Album),
            "artist" => Ok(Self::Artist),
            other => Err(CoreError::UnsupportedDetailType {
                kind: other.to_string(),
            }),
        }
    }
}

impl TryFrom<ItemKind> for DetailSubject {
    type Error = CoreError;

    fn try_from(kind: ItemKind) -> Result<Self, Self::Error> {
        kind.as_str().parse()
    }
}

/// One row of a panel's track list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub title: String,
    pub preview_url: Option<String>,
}

/// A fully rendered details panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    /// Distinguishes panels so their track controls never collide
    pub panel: u64,
    pub subject_id: u64,
    pub subject: DetailSubject,
    pub artwork_url: String,
    pub title: String,
    /// Labelled descriptive fields, in display order
    pub facts: Vec<(&'static str, String)>,
    pub tracks_heading: &'static str,
    pub empty_tracks_message: &'static str,
    pub tracks: Vec<TrackRow>,
}

impl DetailPanel {
    fn build(panel: u64, subject_id: u64, subject: DetailSubject, records: &[CatalogRecord]) -> Option<Self> {
        let (main, related) = records.split_first()?;
        let built = match subject {
            DetailSubject::Album => Self {
                panel,
                subject_id,
                subject,
                artwork_url: panel_artwork(main.artwork_url100.as_deref()),
                title: or_unknown(main.collection_name.as_deref(), "Unknown Album"),
                facts: vec![
                    ("Artist", or_unknown(main.artist_name.as_deref(), "Unknown Artist")),
                    ("Genre", or_unknown(main.primary_genre_name.as_deref(), "N/A")),
                    ("Release Date", format_release_date(main.release_date.as_deref())),
                    (
                        "Total Tracks",
                        main.track_count
                            .map_or_else(|| "N/A".to_string(), |count| count.to_string()),
                    ),
                ],
                tracks_heading: "Tracks:",
                empty_tracks_message: "No tracks found for this album.",
                tracks: related.iter().map(TrackRow::from_record).collect(),
            },
            DetailSubject::Artist => Self {
                panel,
                subject_id,
                subject,
                artwork_url: ARTIST_PANEL_URL.to_string(),
                title: or_unknown(main.artist_name.as_deref(), "Unknown Artist"),
                facts: vec![("Genre", or_unknown(main.primary_genre_name.as_deref(), "N/A"))],
                tracks_heading: "Top Tracks:",
                empty_tracks_message: "No top tracks found for this artist.",
                tracks: records
                    .iter()
                    .filter(|record| record.is_track_wrapper())
                    .map(TrackRow::from_record)
                    .collect(),
            },
        };
        Some(built)
    }
}

impl TrackRow {
    fn from_record(record: &CatalogRecord) -> Self {
        Self {
            title: or_unknown(record.track_name.as_deref(), "Unknown Track"),
            preview_url: present(record.preview_url.as_deref()),
        }
    }
}

/// Overlay lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Loading {
        subject_id: u64,
        subject: DetailSubject,
    },
    Ready(DetailPanel),
    /// Inline message in place of a panel
    Message(String),
}

impl PanelState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// A lookup waiting to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    generation: u64,
    pub subject: DetailSubject,
    pub request: LookupRequest,
}

impl PendingLookup {
    /// Send the lookup
    ///
    /// # Errors
    ///
    /// Returns the provider's error on transport failure or non-success status.
    pub async fn execute(&self, provider: &dyn CatalogProvider) -> Result<Vec<CatalogRecord>, CoreError> {
        info!(
            "Fetching {} details from {}: id={} limit={:?}",
            self.subject.as_str(),
            provider.name(),
            self.request.id,
            self.request.limit
        );
        provider.lookup(&self.request).await
    }
}

#[derive(Debug)]
pub struct DetailsController {
    state: PanelState,
    generation: u64,
    artist_track_limit: u32,
}

impl DetailsController {
    #[must_use]
    pub fn new(artist_track_limit: u32) -> Self {
        Self {
            state: PanelState::Closed,
            generation: 0,
            artist_track_limit,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &PanelState {
        &self.state
    }

    /// Open the overlay for `id` of kind `subject`.
    ///
    /// Unsupported kinds show an inline "not available" message and return `None`.
    pub fn open(&mut self, id: u64, subject: &str) -> Option<PendingLookup> {
        // Any earlier lookup is now stale
        self.generation += 1;
        let subject = match subject.parse::<DetailSubject>() {
            Ok(subject) => subject,
            Err(error) => {
                warn!("{}", error);
                self.state = PanelState::Message(DETAILS_UNAVAILABLE.to_string());
                return None;
            }
        };

        let request = match subject {
            DetailSubject::Album => LookupRequest::album_tracks(id),
            DetailSubject::Artist => LookupRequest::artist_tracks(id, self.artist_track_limit),
        };
        self.state = PanelState::Loading {
            subject_id: id,
            subject,
        };
        Some(PendingLookup {
            generation: self.generation,
            subject,
            request,
        })
    }

    /// Apply a lookup response. Returns `false` if it was stale and dropped.
    pub fn complete(
        &mut self,
        pending: &PendingLookup,
        result: Result<Vec<CatalogRecord>, CoreError>,
    ) -> bool {
        if pending.generation != self.generation || !self.state.is_open() {
            warn!("Discarding stale details response for id {}", pending.request.id);
            return false;
        }

        self.state = match result {
            Ok(records) => {
                match DetailPanel::build(self.generation, pending.request.id, pending.subject, &records) {
                    Some(panel) => {
                        info!(
                            "Details loaded for {} {}: {} tracks",
                            pending.subject.as_str(),
                            pending.request.id,
                            panel.tracks.len()
                        );
                        PanelState::Ready(panel)
                    }
                    None => PanelState::Message(NO_DETAILS.to_string()),
                }
            }
            Err(error) => {
                warn!("Error fetching {} details: {}", pending.subject.as_str(), error);
                PanelState::Message(format!("Failed to load details: {error}"))
            }
        };
        true
    }

    /// Close the overlay, invalidating any lookup in flight
    pub fn close(&mut self) {
        self.generation += 1;
        self.state = PanelState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::fixtures::{album, artist, song};
    use crate::provider::stub::StubProvider;

    #[test]
    fn test_album_request_has_no_limit() {
        let mut details = DetailsController::new(10);
        let pending = details.open(42, "album").unwrap();
        assert_eq!(pending.request, LookupRequest::album_tracks(42));
        assert_eq!(pending.request.entity, "song");
        assert!(matches!(details.state(), PanelState::Loading { subject_id: 42, .. }));
    }

    #[test]
    fn test_artist_request_is_capped() {
        let mut details = DetailsController::new(10);
        let pending = details.open(7, "artist").unwrap();
        assert_eq!(pending.request.limit, Some(10));
    }

    #[test]
    fn test_unsupported_type_shows_message() {
        let mut details = DetailsController::new(10);
        assert!(details.open(1, "track").is_none());
        assert_eq!(
            details.state(),
            &PanelState::Message(DETAILS_UNAVAILABLE.to_string())
        );
    }

    #[test]
    fn test_album_panel_lists_tracks_in_order() {
        let mut details = DetailsController::new(10);
        let pending = details.open(42, "album").unwrap();
        let records = vec![
            album(42, "Abbey Road"),
            song(1, "Come Together", Some("https://audio/1.m4a")),
            song(2, "Something", None),
            song(3, "Maxwell's Silver Hammer", Some("https://audio/3.m4a")),
        ];
        assert!(details.complete(&pending, Ok(records)));

        let PanelState::Ready(panel) = details.state() else {
            panic!("expected ready panel");
        };
        assert_eq!(panel.title, "Abbey Road");
        assert_eq!(panel.subject, DetailSubject::Album);
        let titles: Vec<_> = panel.tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Come Together", "Something", "Maxwell's Silver Hammer"]);
        let previews: Vec<_> = panel.tracks.iter().map(|t| t.preview_url.is_some()).collect();
        assert_eq!(previews, vec![true, false, true]);
        assert_eq!(panel.facts[0], ("Artist", "The Beatles".to_string()));
        assert_eq!(panel.facts[2], ("Release Date", "September 26, 1969".to_string()));
        assert_eq!(panel.facts[3], ("Total Tracks", "17".to_string()));
        assert!(panel.artwork_url.ends_with("600x600bb.jpg"));
    }

    #[test]
    fn test_artist_panel_excludes_artist_record() {
        let mut details = DetailsController::new(10);
        let pending = details.open(3, "artist").unwrap();
        let records = vec![artist(3, "The Beatles"), song(1, "Help!", None), song(2, "Yesterday", None)];
        details.complete(&pending, Ok(records));

        let PanelState::Ready(panel) = details.state() else {
            panic!("expected ready panel");
        };
        assert_eq!(panel.title, "The Beatles");
        assert_eq!(panel.tracks.len(), 2);
        assert_eq!(panel.tracks_heading, "Top Tracks:");
        assert_eq!(panel.artwork_url, ARTIST_PANEL_URL);
    }

    #[test]
    fn test_empty_lookup_shows_no_details() {
        let mut details = DetailsController::new(10);
        let pending = details.open(9, "album").unwrap();
        details.complete(&pending, Ok(Vec::new()));
        assert_eq!(details.state(), &PanelState::Message(NO_DETAILS.to_string()));
    }

    #[test]
    fn test_failure_shows_message() {
        let mut details = DetailsController::new(10);
        let pending = details.open(9, "album").unwrap();
        details.complete(&pending, Err(CoreError::FetchFailed { status: 500 }));
        assert_eq!(
            details.state(),
            &PanelState::Message("Failed to load details: HTTP error! status: 500".to_string())
        );
    }

    #[test]
    fn test_newer_request_replaces_older() {
        let mut details = DetailsController::new(10);
        let first = details.open(1, "album").unwrap();
        let second = details.open(2, "album").unwrap();

        assert!(!details.complete(&first, Ok(vec![album(1, "Old")])));
        assert!(details.complete(&second, Ok(vec![album(2, "New")])));
        let PanelState::Ready(panel) = details.state() else {
            panic!("expected ready panel");
        };
        assert_eq!(panel.subject_id, 2);
        assert!(panel.tracks.is_empty());
    }

    #[test]
    fn test_close_discards_late_response() {
        let mut details = DetailsController::new(10);
        let pending = details.open(1, "album").unwrap();
        details.close();
        assert!(!details.complete(&pending, Ok(vec![album(1, "Late")])));
        assert_eq!(details.state(), &PanelState::Closed);
    }

    #[tokio::test]
    async fn test_execute_uses_lookup() {
        let provider = StubProvider::default();
        provider.push_lookup(Ok(vec![album(42, "Abbey Road")]));
        let mut details = DetailsController::new(10);
        let pending = details.open(42, "album").unwrap();

        let records = pending.execute(&provider).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(provider.lookups.lock().unwrap()[0], LookupRequest::album_tracks(42));
    }
}
