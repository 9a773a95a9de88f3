use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;
use std::fmt::Write;
use std::time::Duration;
use tracing::{debug, info, warn};
use tuneseek_core::{
    CatalogConfig, CatalogProvider, CatalogRecord, CoreError, LookupRequest, SearchPage,
    SearchRequest,
};

/// iTunes Search API catalog provider
pub struct ItunesProvider {
    client: ClientWithMiddleware,
    search_url: String,
    lookup_url: String,
}

impl ItunesProvider {
    /// Create a provider using the endpoints, timeout and retry count from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &CatalogConfig) -> Result<Self, CoreError> {
        let base_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("Tuneseek/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Retries cover connection errors and 5xx/429 responses
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(base_client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            lookup_url: config.lookup_url.clone(),
        })
    }

    async fn get(&self, url: &str) -> Result<ItunesResponse, CoreError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!("iTunes response status: {}", status);

        if !status.is_success() {
            warn!("iTunes returned status: {}", status);
            return Err(CoreError::FetchFailed {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(parse_response(&body)?)
    }
}

/// Build `<base>?term=..&entity=..&limit=..&offset=..`
#[must_use]
pub fn build_search_url(base: &str, request: &SearchRequest) -> String {
    format!(
        "{}?term={}&entity={}&limit={}&offset={}",
        base,
        urlencoding::encode(&request.term),
        request.media_type.as_str(),
        request.limit,
        request.offset
    )
}

/// Build `<base>?id=..&entity=..[&limit=..]`
#[must_use]
pub fn build_lookup_url(base: &str, request: &LookupRequest) -> String {
    let mut url = format!("{}?id={}&entity={}", base, request.id, request.entity);
    if let Some(limit) = request.limit {
        let _ = write!(url, "&limit={limit}");
    }
    url
}

/// Response body shared by the search and lookup endpoints.
/// Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItunesResponse {
    #[serde(default)]
    result_count: u32,
    #[serde(default)]
    results: Vec<CatalogRecord>,
}

fn parse_response(body: &str) -> Result<ItunesResponse, serde_json::Error> {
    serde_json::from_str(body)
}

#[async_trait]
impl CatalogProvider for ItunesProvider {
    fn name(&self) -> &'static str {
        "itunes"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, CoreError> {
        let url = build_search_url(&self.search_url, request);
        info!("iTunes GET (search): {}", url);

        let response = self.get(&url).await?;
        info!(
            "iTunes search returned {} of {} results",
            response.results.len(),
            response.result_count
        );
        Ok(SearchPage {
            result_count: response.result_count,
            records: response.results,
        })
    }

    async fn lookup(&self, request: &LookupRequest) -> Result<Vec<CatalogRecord>, CoreError> {
        let url = build_lookup_url(&self.lookup_url, request);
        info!("iTunes GET (lookup): {}", url);

        let response = self.get(&url).await?;
        debug!("iTunes lookup returned {} records", response.results.len());
        Ok(response.results)
    }
}
