use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, warn};

use crate::clients::{
    entities::{LookupRequest, SearchResult, TrackInfo, TrackReport, VersionInfo, VideoInfo},
    errors::Result,
};

/// Remote catalog the client talks to.
///
/// `search` runs one catalog query. `hydrate` completes a search summary with
/// the full release record and is called once per result while building a
/// report. Both are retried by [`CatalogClient`] when the error is transient.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn search(&self, track: &str, artist: &str) -> Result<Vec<SearchResult>>;

    async fn hydrate(&self, result: SearchResult) -> Result<SearchResult> {
        Ok(result)
    }
}

/// Client for the remote catalog: searches with a fixed-interval retry and
/// shapes the results into reports.
pub struct CatalogClient<S> {
    service: S,
    rate_limit: Duration,
    max_retries: u32,
}

impl<S: CatalogService> CatalogClient<S> {
    pub fn new(service: S, rate_limit: Duration, max_retries: u32) -> Self {
        CatalogClient {
            service,
            rate_limit,
            max_retries,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Search with a fixed pause between attempts. Transient failures are retried
    /// up to `max_retries` attempts in total, anything else gives up immediately.
    /// All failures end up as an empty result set.
    pub async fn search_tracks(&self, track: &str, artist: &str) -> Vec<SearchResult> {
        let mut attempts = 0;
        while attempts < self.max_retries {
            match self.service.search(track, artist).await {
                Ok(results) => {
                    debug!(
                        "Search for {track} - {artist} returned {} result(s)",
                        results.len()
                    );
                    return results;
                }
                Err(e) if e.is_transient() => {
                    error!("Request error: {e}");
                    attempts += 1;
                    if attempts < self.max_retries {
                        tokio::time::sleep(self.rate_limit).await;
                    }
                }
                Err(e) => {
                    error!("Error searching tracks: {e}");
                    return Vec::new();
                }
            }
        }
        warn!("Giving up on {track} - {artist} after {attempts} attempt(s)");
        Vec::new()
    }

    // Fetch the full release behind a search summary. Transient failures get the
    // same fixed-interval retry as searches and, once exhausted, leave the
    // summary in place. Any other failure is returned.
    async fn hydrate_with_retries(&self, result: SearchResult) -> Result<SearchResult> {
        let mut attempts = 0;
        while attempts < self.max_retries {
            match self.service.hydrate(result.clone()).await {
                Ok(release) => return Ok(release),
                Err(e) if e.is_transient() => {
                    error!("Request error while fetching {}: {e}", result.title);
                    attempts += 1;
                    if attempts < self.max_retries {
                        tokio::time::sleep(self.rate_limit).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
        warn!(
            "Keeping search summary for {} after {attempts} failed attempt(s)",
            result.title
        );
        Ok(result)
    }

    pub fn extract_video_info(result: &SearchResult) -> Vec<VideoInfo> {
        result
            .videos
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(VideoInfo::from)
            .collect()
    }

    pub fn extract_related_tracks_and_videos(results: &[SearchResult]) -> Vec<TrackInfo> {
        results
            .iter()
            .map(|result| TrackInfo {
                title: result.title.clone(),
                duration: result.duration.clone(),
                format: result.primary_format(),
                videos: Self::extract_video_info(result),
            })
            .collect()
    }

    /// Build the report for one request: one version per search result, in
    /// the order the catalog returned them.
    ///
    /// Search failures are absorbed into a "no results" report. Transient
    /// failures while fetching a release are retried; any other failure to
    /// fetch a release is returned to the caller.
    pub async fn process_track(&self, request: &LookupRequest) -> Result<TrackReport> {
        let results = self.search_tracks(&request.track, &request.artist).await;
        if results.is_empty() {
            return Ok(TrackReport::not_found(request));
        }

        let mut versions = Vec::with_capacity(results.len());
        for result in results {
            let release = self.hydrate_with_retries(result).await?;
            versions.push(VersionInfo {
                title: release.title.clone(),
                release: release.year,
                format: release.primary_format(),
                videos: Self::extract_video_info(&release),
                related_tracks: Self::extract_related_tracks_and_videos(&release.tracklist),
            });
        }
        Ok(TrackReport::found(request, versions))
    }
}
