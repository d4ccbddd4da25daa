use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::clients::{
    catalog::CatalogService,
    entities::{Format, SearchResult, Video},
    errors::{Error, Result},
};

pub const DEFAULT_BASE_URL: &str = "https://api.discogs.com";
pub const DEFAULT_PER_PAGE: u32 = 50;
const USER_AGENT: &str = concat!("grabbit/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize, Debug)]
struct SearchResponse {
    results: Vec<SearchHit>,
}

#[derive(Deserialize, Debug)]
struct SearchHit {
    id: u64,
    title: String,
    year: Option<String>,
    #[serde(default)]
    format: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct ReleaseResponse {
    id: u64,
    title: String,
    year: Option<u32>,
    formats: Option<Vec<FormatResponse>>,
    tracklist: Option<Vec<TrackResponse>>,
    videos: Option<Vec<VideoResponse>>,
}

#[derive(Deserialize, Debug)]
struct FormatResponse {
    name: String,
}

#[derive(Deserialize, Debug)]
struct TrackResponse {
    // "track", "heading" or "index"
    #[serde(rename = "type_")]
    kind: Option<String>,
    title: String,
    duration: Option<String>,
}

impl TrackResponse {
    fn is_track(&self) -> bool {
        self.kind.as_deref().is_none_or(|k| k == "track")
    }
}

#[derive(Deserialize, Debug)]
struct VideoResponse {
    title: String,
    uri: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    duration: u32,
}

impl From<SearchHit> for SearchResult {
    fn from(hit: SearchHit) -> SearchResult {
        SearchResult {
            id: Some(hit.id),
            title: hit.title,
            // search hits carry the year as a string, sometimes empty
            year: hit.year.and_then(|y| y.parse().ok()),
            formats: hit.format.into_iter().map(|name| Format { name }).collect(),
            ..Default::default()
        }
    }
}

impl From<TrackResponse> for SearchResult {
    fn from(t: TrackResponse) -> SearchResult {
        SearchResult {
            title: t.title,
            duration: t.duration,
            ..Default::default()
        }
    }
}

impl From<VideoResponse> for Video {
    fn from(v: VideoResponse) -> Video {
        Video {
            title: v.title,
            uri: v.uri,
            description: v.description,
            duration: v.duration,
        }
    }
}

impl From<ReleaseResponse> for SearchResult {
    fn from(release: ReleaseResponse) -> SearchResult {
        SearchResult {
            id: Some(release.id),
            title: release.title,
            // Discogs reports an unknown year as 0
            year: release.year.filter(|y| *y != 0),
            duration: None,
            formats: release
                .formats
                .unwrap_or_default()
                .into_iter()
                .map(|f| Format { name: f.name })
                .collect(),
            tracklist: release
                .tracklist
                .unwrap_or_default()
                .into_iter()
                .filter(TrackResponse::is_track)
                .map(SearchResult::from)
                .collect(),
            videos: release
                .videos
                .map(|videos| videos.into_iter().map(Video::from).collect()),
        }
    }
}

pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.results.into_iter().map(SearchResult::from).collect())
}

pub fn parse_release_response(body: &str) -> Result<SearchResult> {
    let release: ReleaseResponse = serde_json::from_str(body)?;
    Ok(SearchResult::from(release))
}

/// Discogs database API over HTTP, authenticated with a personal access token.
pub struct DiscogsApi {
    client: Client,
    token: String,
    base_url: String,
    per_page: u32,
}

impl DiscogsApi {
    pub fn new(token: String, base_url: String, per_page: u32) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(DiscogsApi {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            per_page,
        })
    }

    // Create a DiscogsApi from environment variables or raise a configuration error
    pub fn try_default() -> Result<Self> {
        let token = std::env::var("DISCOGS_TOKEN")?;
        DiscogsApi::new(token, DEFAULT_BASE_URL.to_string(), DEFAULT_PER_PAGE)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url} with params: {query:?}");
        let response = self
            .client
            .get(&url)
            .query(query)
            .header("Authorization", format!("Discogs token={}", self.token))
            .send()
            .await?;
        let response = check_status(path, response).await?;
        Ok(response.text().await?)
    }
}

async fn check_status(path: &str, response: Response) -> Result<Response> {
    let status = response.status();
    debug!("Response status: {status}");
    if status.is_success() {
        return Ok(response);
    }
    warn!("Discogs API error on {path}: {status}");
    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited),
        StatusCode::UNAUTHORIZED => Err(Error::InvalidToken),
        StatusCode::NOT_FOUND => Err(Error::NotFound(path.to_string())),
        s if s.is_server_error() => Err(Error::ServerError(s.as_u16())),
        s => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(Error::UnexpectedResponse {
                status: s.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl CatalogService for DiscogsApi {
    async fn search(&self, track: &str, artist: &str) -> Result<Vec<SearchResult>> {
        let per_page = self.per_page.to_string();
        let body = self
            .get(
                "/database/search",
                &[
                    ("track", track),
                    ("artist", artist),
                    ("type", "release"),
                    ("per_page", per_page.as_str()),
                ],
            )
            .await?;
        let results = parse_search_response(&body)?;
        info!(
            "Discogs search for {track} - {artist} returned {} release(s)",
            results.len()
        );
        Ok(results)
    }

    async fn hydrate(&self, result: SearchResult) -> Result<SearchResult> {
        let Some(id) = result.id else {
            return Ok(result);
        };
        let body = self.get(&format!("/releases/{id}"), &[]).await?;
        parse_release_response(&body)
    }
}
