//! Application state for one browsing session.
//!
//! [`Browser`] owns one controller per concern and translates their outcomes
//! into what the user sees: results content, status notices, the details
//! overlay and play-control states. Every network step is split into a
//! synchronous `begin` that returns a pending request and a `finish` that
//! applies the response, so a UI can release the state while awaiting I/O.

use crate::audio::{AudioSession, ControlState, PreviewControl, SessionId};
use crate::config::TuneseekConfig;
use crate::details::{DetailsController, PanelState, PendingLookup};
use crate::error::CoreError;
use crate::item::{CatalogRecord, ItemKind};
use crate::lazy_load::{ElementBounds, Viewport};
use crate::media::MediaType;
use crate::notice::{Notice, NoticeId, StatusLine};
use crate::provider::{CatalogProvider, SearchPage};
use crate::render::{CardId, Placeholder, ResultsRenderer};
use crate::search::{FetchMode, PendingSearch, SearchController, SearchOutcome, SearchTicket};
use tracing::{info, warn};

const SEARCHING: &str = "Searching for music...";
const EMPTY_QUERY: &str = "Please enter a search query.";
const NO_PREVIEW: &str = "No audio preview available for this item.";
const PLAYBACK_FAILED: &str =
    "Failed to play audio. The preview might not be available or there was a network error.";
const TRACK_CARD_HINT: &str = "Click play for preview. No additional details for tracks yet.";

#[derive(Debug)]
pub struct Browser {
    search: SearchController,
    results: ResultsRenderer,
    details: DetailsController,
    audio: AudioSession,
    status: StatusLine,
    initial_skeletons: usize,
    load_more_skeletons: usize,
}

impl Browser {
    #[must_use]
    pub fn new(config: &TuneseekConfig) -> Self {
        Self {
            search: SearchController::new(config.catalog.default_media_type, config.catalog.page_size),
            results: ResultsRenderer::new(config.ui.lazy_load_margin_px),
            details: DetailsController::new(config.catalog.artist_track_limit),
            audio: AudioSession::new(),
            status: StatusLine::new(),
            initial_skeletons: config.ui.initial_skeletons,
            load_more_skeletons: config.ui.load_more_skeletons,
        }
    }

    #[must_use]
    pub const fn search_controller(&self) -> &SearchController {
        &self.search
    }

    #[must_use]
    pub const fn results(&self) -> &ResultsRenderer {
        &self.results
    }

    #[must_use]
    pub const fn details(&self) -> &PanelState {
        self.details.state()
    }

    #[must_use]
    pub const fn audio(&self) -> &AudioSession {
        &self.audio
    }

    #[must_use]
    pub const fn status(&self) -> &StatusLine {
        &self.status
    }

    #[must_use]
    pub const fn media_type(&self) -> MediaType {
        self.search.media_type()
    }

    /// Search input, filters and pagination are disabled while a search is in flight
    #[must_use]
    pub const fn controls_enabled(&self) -> bool {
        !self.search.is_loading()
    }

    #[must_use]
    pub const fn load_more_visible(&self) -> bool {
        self.search.more_available()
    }

    #[must_use]
    pub fn control_state(&self, control: PreviewControl) -> ControlState {
        self.audio.control_state(control)
    }

    /// Start a new search for `query`.
    ///
    /// A blank query shows a notice and the initial placeholder and issues nothing.
    pub fn search(&mut self, query: &str) -> Option<PendingSearch> {
        match self.search.begin_search(query) {
            Ok(pending) => {
                self.audio.stop();
                self.results.begin_loading(true, self.initial_skeletons);
                self.status.show(Notice::loading(SEARCHING));
                Some(pending)
            }
            Err(error) => {
                info!("Search not started: {}", error);
                self.status.show(Notice::error(EMPTY_QUERY, 5000));
                self.results.show_placeholder(Placeholder::Initial);
                None
            }
        }
    }

    /// Request the next page of the current query
    pub fn load_more(&mut self) -> Option<PendingSearch> {
        match self.search.begin_load_more() {
            Ok(pending) => {
                self.audio.stop();
                self.results.begin_loading(false, self.load_more_skeletons);
                self.status.show(Notice::loading(SEARCHING));
                Some(pending)
            }
            Err(error) => {
                warn!("Load more ignored: {}", error);
                None
            }
        }
    }

    /// Switch the filter and search again with `query`
    pub fn select_media_type(&mut self, media_type: MediaType, query: &str) -> Option<PendingSearch> {
        self.search.set_media_type(media_type);
        self.search(query)
    }

    /// Apply a search response. Stale responses change nothing.
    pub fn finish_search(&mut self, ticket: SearchTicket, result: Result<SearchPage, CoreError>) {
        let Some(outcome) = self.search.complete(ticket, result) else {
            return;
        };

        match outcome {
            SearchOutcome::Loaded {
                mode: FetchMode::Replace,
                query,
                media_type,
                items,
                result_count,
                ..
            } => {
                self.results.render_replace(&items);
                if result_count == 0 && items.is_empty() {
                    self.results.show_placeholder(Placeholder::NothingFound);
                    self.status.show(Notice::info(
                        format!(
                            "No {} found for \"{query}\". Try a different query or filter!",
                            media_type.plural_noun()
                        ),
                        5000,
                    ));
                } else {
                    self.status.show(Notice::info(
                        format!("Found {result_count} results for \"{query}\"."),
                        4000,
                    ));
                }
            }
            SearchOutcome::Loaded {
                mode: FetchMode::Append,
                items,
                ..
            } => {
                self.results.render_append(&items);
                self.status.hide();
            }
            SearchOutcome::Failed { mode, error } => {
                match mode {
                    FetchMode::Replace => self.results.show_placeholder(Placeholder::LoadFailed),
                    FetchMode::Append => self.results.drop_pending(),
                }
                self.status.show(Notice::error(
                    format!("Error fetching music data: {error}. Please try again."),
                    8000,
                ));
            }
        }
    }

    /// Reset to the initial state, discarding any search in flight
    pub fn clear(&mut self) {
        self.search.reset();
        self.results.show_placeholder(Placeholder::Initial);
        self.status.hide();
        self.audio.stop();
    }

    /// Handle a click on a card body.
    ///
    /// Album and artist cards open the details overlay; track cards show a hint.
    pub fn card_clicked(&mut self, card: CardId) -> Option<PendingLookup> {
        let (kind, item_id) = {
            let card = self.results.card(card)?;
            (card.kind, card.item_id)
        };
        match (kind, item_id) {
            (ItemKind::Track, _) => {
                self.status.show(Notice::info(TRACK_CARD_HINT, 3000));
                None
            }
            (kind, Some(id)) => self.open_details(id, kind.as_str()),
            (kind, None) => {
                warn!("{} card {} has no catalog id", kind.as_str(), card);
                None
            }
        }
    }

    /// Open the details overlay, stopping any preview first
    pub fn open_details(&mut self, id: u64, subject: &str) -> Option<PendingLookup> {
        self.audio.stop();
        self.details.open(id, subject)
    }

    pub fn finish_details(&mut self, pending: &PendingLookup, result: Result<Vec<CatalogRecord>, CoreError>) {
        self.details.complete(pending, result);
    }

    pub fn close_details(&mut self) {
        self.details.close();
        self.audio.stop();
    }

    /// Toggle the preview behind `control`
    pub fn toggle_preview(&mut self, url: Option<&str>, control: PreviewControl) {
        if let Err(error) = self.audio.toggle(url.unwrap_or_default(), control) {
            info!("{}", error);
            self.status.show(Notice::info(NO_PREVIEW, 3000));
        }
    }

    /// Play button on a results card
    pub fn play_card(&mut self, card: CardId) {
        let url = self.results.card(card).and_then(|c| c.preview_url.clone());
        self.toggle_preview(url.as_deref(), PreviewControl::Card(card));
    }

    /// Play button on a track row of the open details panel
    pub fn play_detail_row(&mut self, row: usize) {
        let target = match self.details.state() {
            PanelState::Ready(panel) => panel
                .tracks
                .get(row)
                .map(|track| (panel.panel, track.preview_url.clone())),
            _ => None,
        };
        if let Some((panel, url)) = target {
            self.toggle_preview(url.as_deref(), PreviewControl::DetailRow { panel, row });
        }
    }

    pub fn audio_started(&mut self, session: SessionId) {
        self.audio.on_started(session);
    }

    pub fn audio_ended(&mut self, session: SessionId) {
        self.audio.on_ended(session);
    }

    pub fn audio_failed(&mut self, session: SessionId, reason: &str) {
        if self.audio.on_failed(session, reason).is_some() {
            self.status.show(Notice::error(PLAYBACK_FAILED, 5000));
        }
    }

    /// The start deadline for `session` passed; a preview that never began counts as failed
    pub fn audio_start_deadline(&mut self, session: SessionId) {
        if self.audio.on_start_timeout(session).is_some() {
            self.status.show(Notice::error(PLAYBACK_FAILED, 5000));
        }
    }

    /// Hide the notice `id` once its duration has elapsed. Returns `false` if it was already replaced.
    pub fn dismiss_notice(&mut self, id: NoticeId) -> bool {
        self.status.dismiss(id)
    }

    /// Report card geometry to the lazy-load observer
    pub fn apply_visibility<I>(&mut self, viewport: Viewport, entries: I) -> usize
    where
        I: IntoIterator<Item = (CardId, ElementBounds)>,
    {
        self.results.apply_visibility(viewport, entries)
    }

    /// Run a new search to completion
    pub async fn search_with(&mut self, provider: &dyn CatalogProvider, query: &str) {
        if let Some(pending) = self.search(query) {
            let result = pending.execute(provider).await;
            self.finish_search(pending.ticket, result);
        }
    }

    /// Load the next page to completion
    pub async fn load_more_with(&mut self, provider: &dyn CatalogProvider) {
        if let Some(pending) = self.load_more() {
            let result = pending.execute(provider).await;
            self.finish_search(pending.ticket, result);
        }
    }

    /// Open a details panel and load it to completion
    pub async fn open_details_with(&mut self, provider: &dyn CatalogProvider, id: u64, subject: &str) {
        if let Some(pending) = self.open_details(id, subject) {
            let result = pending.execute(provider).await;
            self.finish_details(&pending, result);
        }
    }
}
