//! Results grid state: classified items become display cards.
//!
//! The renderer owns what the results area shows (a placeholder message or an
//! ordered list of cards plus pending skeletons) and the lazy-load observer
//! for card artwork. Binding to an actual widget tree happens elsewhere.

use crate::item::{card_artwork, ItemKind, ResultItem, ARTIST_CARD_URL};
use crate::lazy_load::{ElementBounds, LazyLoadObserver, Viewport};
use std::collections::HashMap;
use tracing::debug;

/// Inline image shown until a card's artwork is loaded
pub const LOADING_ARTWORK: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 400 400'%3E%3Crect width='400' height='400' fill='%23f0f0f0'/%3E%3Ctext x='50%25' y='50%25' font-family='Arial, sans-serif' font-size='30' fill='%23ccc' text-anchor='middle' dominant-baseline='middle'%3ELoading...%3C/text%3E%3C/svg%3E";

/// Identity of one rendered card, unique for the lifetime of the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u64);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card-{}", self.0)
    }
}

/// One display card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub kind: ItemKind,
    /// Catalog id of the underlying record
    pub item_id: Option<u64>,
    pub title: String,
    pub subtitles: [String; 2],
    /// Artwork assigned once the card nears the viewport
    pub artwork_url: String,
    /// Present only for tracks with a preview; drives the play control
    pub preview_url: Option<String>,
}

impl Card {
    /// Build the display record for a classified item
    #[must_use]
    pub fn from_item(id: CardId, item: &ResultItem) -> Self {
        let kind = item.kind();
        let item_id = item.id();
        match item {
            ResultItem::Track(track) => Self {
                id,
                kind,
                item_id,
                title: track.title.clone(),
                subtitles: [
                    format!("Artist: {}", track.artist),
                    format!("Album: {}", track.album),
                ],
                artwork_url: card_artwork(track.artwork_url.as_deref()),
                preview_url: track.preview_url.clone(),
            },
            ResultItem::Album(album) => Self {
                id,
                kind,
                item_id,
                title: album.title.clone(),
                subtitles: [
                    format!("Artist: {}", album.artist),
                    format!(
                        "Tracks: {}",
                        album
                            .track_count
                            .map_or_else(|| "N/A".to_string(), |count| count.to_string())
                    ),
                ],
                artwork_url: card_artwork(album.artwork_url.as_deref()),
                preview_url: None,
            },
            ResultItem::Artist(artist) => Self {
                id,
                kind,
                item_id,
                title: artist.name.clone(),
                subtitles: [
                    format!("Genre: {}", artist.genre.as_deref().unwrap_or("N/A")),
                    format!("Type: {}", artist.artist_type.as_deref().unwrap_or("N/A")),
                ],
                artwork_url: ARTIST_CARD_URL.to_string(),
                preview_url: None,
            },
        }
    }

    /// Whether the card shows a play control
    #[must_use]
    pub const fn has_play_control(&self) -> bool {
        matches!(self.kind, ItemKind::Track) && self.preview_url.is_some()
    }
}

/// Message-only states of the results area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Initial,
    NothingFound,
    LoadFailed,
}

impl Placeholder {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Initial => "Start by searching for your favorite music!",
            Self::NothingFound => "No music found for your search. Try a different query or filter!",
            Self::LoadFailed => "Failed to load results. Please check your internet connection.",
        }
    }
}

/// What the results area currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsContent {
    Placeholder(Placeholder),
    Cards {
        cards: Vec<Card>,
        /// Skeleton cards shown after the real ones while a fetch is in flight
        pending: usize,
    },
}

#[derive(Debug)]
pub struct ResultsRenderer {
    content: ResultsContent,
    observer: LazyLoadObserver<CardId>,
    /// Artwork sources assigned by the observer
    loaded: HashMap<CardId, String>,
    next_card: u64,
}

impl ResultsRenderer {
    #[must_use]
    pub fn new(lazy_load_margin: f64) -> Self {
        Self {
            content: ResultsContent::Placeholder(Placeholder::Initial),
            observer: LazyLoadObserver::new(lazy_load_margin),
            loaded: HashMap::new(),
            next_card: 0,
        }
    }

    #[must_use]
    pub const fn content(&self) -> &ResultsContent {
        &self.content
    }

    /// Rendered cards, empty while a placeholder is shown
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match &self.content {
            ResultsContent::Cards { cards, .. } => cards,
            ResultsContent::Placeholder(_) => &[],
        }
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards().iter().find(|card| card.id == id)
    }

    #[must_use]
    pub const fn pending(&self) -> usize {
        match &self.content {
            ResultsContent::Cards { pending, .. } => *pending,
            ResultsContent::Placeholder(_) => 0,
        }
    }

    #[must_use]
    pub const fn observer(&self) -> &LazyLoadObserver<CardId> {
        &self.observer
    }

    /// Show skeletons for an in-flight fetch.
    ///
    /// A fresh load replaces everything with `count` skeletons; otherwise the
    /// skeletons are appended after the existing cards.
    pub fn begin_loading(&mut self, fresh: bool, count: usize) {
        if fresh {
            self.reset_cards();
            self.content = ResultsContent::Cards {
                cards: Vec::new(),
                pending: count,
            };
            return;
        }
        match &mut self.content {
            ResultsContent::Cards { pending, .. } => *pending += count,
            ResultsContent::Placeholder(_) => {
                self.content = ResultsContent::Cards {
                    cards: Vec::new(),
                    pending: count,
                };
            }
        }
    }

    /// Remove skeletons, leaving rendered cards untouched
    pub fn drop_pending(&mut self) {
        if let ResultsContent::Cards { pending, .. } = &mut self.content {
            *pending = 0;
        }
    }

    /// Replace the whole area with a message
    pub fn show_placeholder(&mut self, placeholder: Placeholder) {
        self.reset_cards();
        self.content = ResultsContent::Placeholder(placeholder);
    }

    /// Clear the display and render `items`.
    ///
    /// An empty list leaves an empty grid; choosing a placeholder for that is
    /// up to the caller.
    pub fn render_replace(&mut self, items: &[ResultItem]) -> &[Card] {
        self.reset_cards();
        self.content = ResultsContent::Cards {
            cards: Vec::new(),
            pending: 0,
        };
        self.render_append(items)
    }

    /// Append `items` after the existing cards, returning the newly added ones.
    ///
    /// Pending skeletons are removed first. Appending nothing to an area
    /// that already shows cards changes nothing else.
    pub fn render_append(&mut self, items: &[ResultItem]) -> &[Card] {
        let new_cards: Vec<Card> = items
            .iter()
            .map(|item| {
                let card = Card::from_item(CardId(self.next_card), item);
                self.next_card += 1;
                card
            })
            .collect();
        for card in &new_cards {
            self.observer.watch(card.id, card.artwork_url.clone());
        }
        debug!("Rendering {} cards", new_cards.len());

        if let ResultsContent::Placeholder(_) = self.content {
            self.content = ResultsContent::Cards {
                cards: Vec::new(),
                pending: 0,
            };
        }
        match &mut self.content {
            ResultsContent::Cards { cards, pending } => {
                *pending = 0;
                let start = cards.len();
                cards.extend(new_cards);
                &cards[start..]
            }
            ResultsContent::Placeholder(_) => &[],
        }
    }

    /// Feed element geometry to the lazy-load observer, returning how many images were assigned
    pub fn apply_visibility<I>(&mut self, viewport: Viewport, entries: I) -> usize
    where
        I: IntoIterator<Item = (CardId, ElementBounds)>,
    {
        let loads = self.observer.dispatch(viewport, entries);
        let count = loads.len();
        for load in loads {
            self.loaded.insert(load.handle, load.url);
        }
        count
    }

    /// Current image source for a card: its artwork once loaded, a placeholder before
    #[must_use]
    pub fn artwork_src(&self, id: CardId) -> &str {
        self.loaded.get(&id).map_or(LOADING_ARTWORK, String::as_str)
    }

    fn reset_cards(&mut self) {
        self.observer.clear();
        self.loaded.clear();
    }
}
