use crate::error::CoreError;
use crate::item::CatalogRecord;
use crate::media::MediaType;
use async_trait::async_trait;

/// Parameters of one search page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Search term, already trimmed
    pub term: String,
    pub media_type: MediaType,
    pub limit: u32,
    pub offset: u32,
}

/// Parameters of a details lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Collection id for albums, artist id for artists
    pub id: u64,
    /// Related entity to include; the panels always ask for songs
    pub entity: &'static str,
    /// Cap on related records (None returns the full collection)
    pub limit: Option<u32>,
}

impl LookupRequest {
    /// Look up every song of a collection
    #[must_use]
    pub const fn album_tracks(collection_id: u64) -> Self {
        Self {
            id: collection_id,
            entity: "song",
            limit: None,
        }
    }

    /// Look up up to `limit` songs by an artist
    #[must_use]
    pub const fn artist_tracks(artist_id: u64, limit: u32) -> Self {
        Self {
            id: artist_id,
            entity: "song",
            limit: Some(limit),
        }
    }
}

/// One decoded search response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    /// Count reported by the catalog (the length of this page, not a total)
    pub result_count: u32,
    pub records: Vec<CatalogRecord>,
}

/// Trait for remote music catalogs
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &'static str;

    /// Fetch one page of search results
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, CoreError>;

    /// Fetch a subject record followed by its related records
    async fn lookup(&self, request: &LookupRequest) -> Result<Vec<CatalogRecord>, CoreError>;
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider answering from queued responses and recording every request
    #[derive(Default)]
    pub struct StubProvider {
        pub searches: Mutex<Vec<SearchRequest>>,
        pub lookups: Mutex<Vec<LookupRequest>>,
        search_responses: Mutex<VecDeque<Result<SearchPage, CoreError>>>,
        lookup_responses: Mutex<VecDeque<Result<Vec<CatalogRecord>, CoreError>>>,
    }

    impl StubProvider {
        pub fn push_page(&self, records: Vec<CatalogRecord>) {
            let result_count = u32::try_from(records.len()).unwrap();
            self.search_responses
                .lock()
                .unwrap()
                .push_back(Ok(SearchPage { result_count, records }));
        }

        pub fn push_search_error(&self, error: CoreError) {
            self.search_responses.lock().unwrap().push_back(Err(error));
        }

        pub fn push_lookup(&self, result: Result<Vec<CatalogRecord>, CoreError>) {
            self.lookup_responses.lock().unwrap().push_back(result);
        }

        pub fn search_count(&self) -> usize {
            self.searches.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CatalogProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn search(&self, request: &SearchRequest) -> Result<SearchPage, CoreError> {
            self.searches.lock().unwrap().push(request.clone());
            self.search_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(SearchPage::default()))
        }

        async fn lookup(&self, request: &LookupRequest) -> Result<Vec<CatalogRecord>, CoreError> {
            self.lookups.lock().unwrap().push(request.clone());
            self.lookup_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}
