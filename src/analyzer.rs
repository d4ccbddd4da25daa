use std::time::Duration;

use log::{debug, info};

use crate::clients::{
    CatalogClient, CatalogService, DiscogsApi,
    discogs::{DEFAULT_BASE_URL, DEFAULT_PER_PAGE},
    entities::{LookupRequest, TrackReport},
    errors::{Error, Result},
};

pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_RETRIES: u32 = 3;

// Configuration for the BatchAnalyzer struct
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub rate_limit: Duration,
    pub max_retries: u32,
    pub base_url: String,
    pub per_page: u32,
}

#[derive(Default)]
pub struct ConfigBuilder {
    token: Option<String>,
    rate_limit: Option<Duration>,
    max_retries: Option<u32>,
    base_url: Option<String>,
    per_page: Option<u32>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn rate_limit(mut self, rate_limit: Duration) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    // Falls back to DISCOGS_TOKEN when no token was given
    pub fn build(self) -> Result<Config> {
        let token = match self.token {
            Some(t) => t,
            None => std::env::var("DISCOGS_TOKEN")?,
        };
        if token.trim().is_empty() {
            return Err(Error::ConfigurationError(
                "Discogs token is empty. Pass --token or set DISCOGS_TOKEN.".into(),
            ));
        }
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if per_page == 0 {
            return Err(Error::ConfigurationError(
                "per_page must be at least 1".into(),
            ));
        }
        Ok(Config {
            token,
            rate_limit: self.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            per_page,
        })
    }
}

/// Drives one [`CatalogClient`] over a batch of lookup requests.
pub struct BatchAnalyzer<S> {
    client: CatalogClient<S>,
}

impl BatchAnalyzer<DiscogsApi> {
    pub fn from_config(config: Config) -> Result<Self> {
        let api = DiscogsApi::new(config.token, config.base_url, config.per_page)?;
        Ok(BatchAnalyzer::new(CatalogClient::new(
            api,
            config.rate_limit,
            config.max_retries,
        )))
    }
}

impl<S: CatalogService> BatchAnalyzer<S> {
    pub fn new(client: CatalogClient<S>) -> Self {
        BatchAnalyzer { client }
    }

    pub fn client(&self) -> &CatalogClient<S> {
        &self.client
    }

    /// Process requests one after another, producing one report per request in
    /// input order.
    ///
    /// Search failures only turn into "no results" reports. A failure while
    /// building a report aborts the whole batch and no reports are returned.
    pub async fn analyze(&self, requests: &[LookupRequest]) -> Result<Vec<TrackReport>> {
        info!("Analyzing {} track(s) ...", requests.len());
        let mut reports = Vec::with_capacity(requests.len());
        for (i, request) in requests.iter().enumerate() {
            debug!(
                "[{}/{}] Looking up {} - {}",
                i + 1,
                requests.len(),
                request.track,
                request.artist
            );
            reports.push(self.client.process_track(request).await?);
        }
        let matched = reports.iter().filter(|r| !r.versions.is_empty()).count();
        info!(
            "Analysis completed. {matched} of {} track(s) matched on Discogs",
            reports.len()
        );
        Ok(reports)
    }
}

/// Look up a batch of tracks on Discogs with a single shared session.
pub async fn analyze(
    requests: &[LookupRequest],
    credential: &str,
    rate_limit: Duration,
    max_retries: u32,
) -> Result<Vec<TrackReport>> {
    let config = ConfigBuilder::new()
        .token(credential)
        .rate_limit(rate_limit)
        .max_retries(max_retries)
        .build()?;
    BatchAnalyzer::from_config(config)?.analyze(requests).await
}
