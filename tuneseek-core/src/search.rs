//! Search query state, pagination and request bookkeeping.
//!
//! A fetch is split in three steps so that no state is held across the
//! network round trip: `begin_*` updates the query state and issues a
//! [`PendingSearch`], the caller awaits [`PendingSearch::execute`], and
//! [`SearchController::complete`] applies the response only if it belongs to
//! the most recently issued request.

use crate::error::CoreError;
use crate::item::{classify_all, ResultItem};
use crate::media::MediaType;
use crate::provider::{CatalogProvider, SearchPage, SearchRequest};
use tracing::{info, warn};

/// Whether a response replaces the results or extends them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Replace,
    Append,
}

/// Current query, filter and pagination position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub media_type: MediaType,
    pub offset: u32,
    pub page_size: u32,
}

/// Proof of issue for one request; stale tickets are rejected on completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    pub mode: FetchMode,
}

/// A search request waiting to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub ticket: SearchTicket,
    pub request: SearchRequest,
}

impl PendingSearch {
    /// Send the request
    ///
    /// # Errors
    ///
    /// Returns the provider's error on transport failure or non-success status.
    pub async fn execute(&self, provider: &dyn CatalogProvider) -> Result<SearchPage, CoreError> {
        info!(
            "Fetching {} page from {}: term={:?} entity={} limit={} offset={}",
            match self.ticket.mode {
                FetchMode::Replace => "first",
                FetchMode::Append => "next",
            },
            provider.name(),
            self.request.term,
            self.request.media_type,
            self.request.limit,
            self.request.offset
        );
        provider.search(&self.request).await
    }
}

/// A response applied to the current query
#[derive(Debug)]
pub enum SearchOutcome {
    Loaded {
        mode: FetchMode,
        query: String,
        media_type: MediaType,
        /// Classified items in response order, unsupported records dropped
        items: Vec<ResultItem>,
        result_count: u32,
        /// Page was full, so another page may exist
        more_available: bool,
    },
    Failed {
        mode: FetchMode,
        error: CoreError,
    },
}

impl SearchOutcome {
    #[must_use]
    pub const fn mode(&self) -> FetchMode {
        match self {
            Self::Loaded { mode, .. } | Self::Failed { mode, .. } => *mode,
        }
    }
}

#[derive(Debug)]
pub struct SearchController {
    state: SearchState,
    generation: u64,
    in_flight: Option<SearchTicket>,
    more_available: bool,
}

impl SearchController {
    #[must_use]
    pub fn new(media_type: MediaType, page_size: u32) -> Self {
        Self {
            state: SearchState {
                query: String::new(),
                media_type,
                offset: 0,
                page_size,
            },
            generation: 0,
            in_flight: None,
            more_available: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    #[must_use]
    pub const fn media_type(&self) -> MediaType {
        self.state.media_type
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the last page was full (the "load more" heuristic)
    #[must_use]
    pub const fn more_available(&self) -> bool {
        self.more_available
    }

    /// Change the active filter. The next search uses it.
    pub fn set_media_type(&mut self, media_type: MediaType) {
        info!("Filter set to: {}", media_type);
        self.state.media_type = media_type;
    }

    /// Start a new search for `query`, resetting the offset.
    ///
    /// # Errors
    ///
    /// Returns `EmptyQuery` if `query` is blank; nothing is issued and the
    /// previous query is forgotten so it cannot be paged further.
    pub fn begin_search(&mut self, query: &str) -> Result<PendingSearch, CoreError> {
        let query = query.trim();
        if query.is_empty() {
            self.state.query.clear();
            self.state.offset = 0;
            self.more_available = false;
            return Err(CoreError::EmptyQuery);
        }
        self.state.query = query.to_string();
        self.state.offset = 0;
        self.more_available = false;
        Ok(self.issue(FetchMode::Replace))
    }

    /// Request the page after the last loaded one.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveQuery` if no search has been made since the last reset.
    pub fn begin_load_more(&mut self) -> Result<PendingSearch, CoreError> {
        if self.state.query.is_empty() {
            return Err(CoreError::NoActiveQuery);
        }
        Ok(self.issue(FetchMode::Append))
    }

    /// Apply a response.
    ///
    /// Returns `None` if `ticket` is not the latest issued request; the
    /// response is then discarded without touching any state.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        result: Result<SearchPage, CoreError>,
    ) -> Option<SearchOutcome> {
        if self.in_flight != Some(ticket) {
            warn!("Discarding stale search response (generation {})", ticket.generation);
            return None;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                let page_len = page.records.len();
                let full = u32::try_from(page_len).is_ok_and(|len| len == self.state.page_size);
                if full {
                    self.state.offset += self.state.page_size;
                }
                self.more_available = full;
                let items = classify_all(&page.records);
                info!(
                    "Search returned {} records ({} displayable, result_count {}), offset now {}",
                    page_len,
                    items.len(),
                    page.result_count,
                    self.state.offset
                );
                Some(SearchOutcome::Loaded {
                    mode: ticket.mode,
                    query: self.state.query.clone(),
                    media_type: self.state.media_type,
                    items,
                    result_count: page.result_count,
                    more_available: full,
                })
            }
            Err(error) => {
                warn!("Error fetching music data: {}", error);
                self.more_available = false;
                Some(SearchOutcome::Failed {
                    mode: ticket.mode,
                    error,
                })
            }
        }
    }

    /// Forget the query and invalidate any request in flight
    pub fn reset(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.state.query.clear();
        self.state.offset = 0;
        self.more_available = false;
    }

    fn issue(&mut self, mode: FetchMode) -> PendingSearch {
        self.generation += 1;
        let ticket = SearchTicket {
            generation: self.generation,
            mode,
        };
        self.in_flight = Some(ticket);
        PendingSearch {
            ticket,
            request: SearchRequest {
                term: self.state.query.clone(),
                media_type: self.state.media_type,
                limit: self.state.page_size,
                offset: self.state.offset,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::fixtures::{music_video, song};
    use crate::provider::stub::StubProvider;

    fn full_page(size: u64) -> SearchPage {
        let records: Vec<_> = (0..size).map(|i| song(i, "Song", None)).collect();
        SearchPage {
            result_count: u32::try_from(size).unwrap(),
            records,
        }
    }

    #[test]
    fn test_begin_search_resets_offset_and_builds_request() {
        let mut search = SearchController::new(MediaType::Song, 20);
        let pending = search.begin_search("  Beatles ").unwrap();
        assert_eq!(
            pending.request,
            SearchRequest {
                term: "Beatles".into(),
                media_type: MediaType::Song,
                limit: 20,
                offset: 0,
            }
        );
        assert_eq!(pending.ticket.mode, FetchMode::Replace);
        assert!(search.is_loading());
    }

    #[test]
    fn test_empty_query_issues_nothing() {
        let mut search = SearchController::new(MediaType::Song, 20);
        assert!(matches!(search.begin_search("   "), Err(CoreError::EmptyQuery)));
        assert!(!search.is_loading());
    }

    #[test]
    fn test_empty_query_forgets_previous_pages() {
        let mut search = SearchController::new(MediaType::Song, 20);
        let pending = search.begin_search("Beatles").unwrap();
        search.complete(pending.ticket, Ok(full_page(20)));
        assert!(search.more_available());

        assert!(matches!(search.begin_search(""), Err(CoreError::EmptyQuery)));
        assert!(!search.more_available());
        assert_eq!(search.state().offset, 0);
        assert!(matches!(search.begin_load_more(), Err(CoreError::NoActiveQuery)));
    }

    #[test]
    fn test_load_more_without_query_fails() {
        let mut search = SearchController::new(MediaType::Song, 20);
        assert!(matches!(search.begin_load_more(), Err(CoreError::NoActiveQuery)));
    }

    #[test]
    fn test_full_page_advances_offset() {
        let mut search = SearchController::new(MediaType::Song, 20);
        let pending = search.begin_search("Beatles").unwrap();
        let outcome = search.complete(pending.ticket, Ok(full_page(20))).unwrap();

        let SearchOutcome::Loaded { items, more_available, .. } = outcome else {
            panic!("expected loaded");
        };
        assert_eq!(items.len(), 20);
        assert!(more_available);
        assert_eq!(search.state().offset, 20);
        assert!(!search.is_loading());

        let next = search.begin_load_more().unwrap();
        assert_eq!(next.request.offset, 20);
        assert_eq!(next.ticket.mode, FetchMode::Append);
    }

    #[test]
    fn test_short_page_keeps_offset() {
        let mut search = SearchController::new(MediaType::Song, 20);
        let pending = search.begin_search("Beatles").unwrap();
        search.complete(pending.ticket, Ok(full_page(20)));

        let more = search.begin_load_more().unwrap();
        let outcome = search.complete(more.ticket, Ok(full_page(7))).unwrap();
        assert!(matches!(outcome, SearchOutcome::Loaded { more_available: false, .. }));
        assert_eq!(search.state().offset, 20);
        assert!(!search.more_available());
    }

    #[test]
    fn test_full_page_counts_raw_records_not_classified() {
        let mut search = SearchController::new(MediaType::Song, 2);
        let pending = search.begin_search("x").unwrap();
        let page = SearchPage {
            result_count: 2,
            records: vec![song(1, "A", None), music_video(2)],
        };
        let SearchOutcome::Loaded { items, more_available, .. } =
            search.complete(pending.ticket, Ok(page)).unwrap()
        else {
            panic!("expected loaded");
        };
        assert_eq!(items.len(), 1);
        assert!(more_available);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut search = SearchController::new(MediaType::Song, 20);
        let first = search.begin_search("first").unwrap();
        let second = search.begin_search("second").unwrap();

        assert!(search.complete(first.ticket, Ok(full_page(20))).is_none());
        assert_eq!(search.state().offset, 0);
        assert!(search.is_loading());

        let outcome = search.complete(second.ticket, Ok(full_page(3))).unwrap();
        assert!(matches!(outcome, SearchOutcome::Loaded { ref query, .. } if query == "second"));
    }

    #[test]
    fn test_reset_discards_in_flight() {
        let mut search = SearchController::new(MediaType::Song, 20);
        let pending = search.begin_search("Beatles").unwrap();
        search.reset();
        assert!(search.complete(pending.ticket, Ok(full_page(20))).is_none());
        assert!(search.state().query.is_empty());
        assert!(matches!(search.begin_load_more(), Err(CoreError::NoActiveQuery)));
    }

    #[test]
    fn test_failure_hides_more() {
        let mut search = SearchController::new(MediaType::Song, 20);
        let pending = search.begin_search("x").unwrap();
        search.complete(pending.ticket, Ok(full_page(20)));
        let more = search.begin_load_more().unwrap();
        let outcome = search
            .complete(more.ticket, Err(CoreError::FetchFailed { status: 503 }))
            .unwrap();
        assert!(matches!(outcome, SearchOutcome::Failed { mode: FetchMode::Append, .. }));
        assert!(!search.more_available());
        assert_eq!(search.state().offset, 20);
    }

    #[test]
    fn test_media_type_applies_to_next_search() {
        let mut search = SearchController::new(MediaType::Song, 20);
        search.set_media_type(MediaType::Album);
        let pending = search.begin_search("Abbey Road").unwrap();
        assert_eq!(pending.request.media_type, MediaType::Album);
    }

    #[tokio::test]
    async fn test_execute_sends_request_to_provider() {
        let provider = StubProvider::default();
        provider.push_page(vec![song(1, "A", None)]);

        let mut search = SearchController::new(MediaType::Song, 20);
        let pending = search.begin_search("Beatles").unwrap();
        let page = pending.execute(&provider).await.unwrap();

        assert_eq!(page.records.len(), 1);
        assert_eq!(provider.searches.lock().unwrap()[0], pending.request);
    }
}
