use serde::{Deserialize, Serialize};

/// Message attached to a report when the catalog has nothing for a request.
pub const NO_RESULTS_MESSAGE: &str = "No results found on Discogs.";

/// One (track, artist) pair to resolve against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub track: String,
    pub artist: String,
}

impl LookupRequest {
    pub fn new(track: impl Into<String>, artist: impl Into<String>) -> Self {
        LookupRequest {
            track: track.into(),
            artist: artist.into(),
        }
    }
}

/// Physical or digital format entry of a release, e.g. "Vinyl".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    pub name: String,
}

/// Video embedded in a release page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Video {
    pub title: String,
    pub uri: String,
    pub description: String,
    pub duration: u32,
}

/// A release (or an entry of a release's track list) as seen through the
/// catalog service.
///
/// `videos` is `None` when the record has no video attribute at all, which is
/// distinct from an empty list only for the catalog; both project to zero videos.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub id: Option<u64>,
    pub title: String,
    pub year: Option<u32>,
    pub duration: Option<String>,
    pub formats: Vec<Format>,
    pub tracklist: Vec<SearchResult>,
    pub videos: Option<Vec<Video>>,
}

impl SearchResult {
    // Name of the first format entry, or empty when the record has none
    pub fn primary_format(&self) -> String {
        self.formats
            .first()
            .map(|f| f.name.clone())
            .unwrap_or_default()
    }
}

/// Video entry as it appears in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoInfo {
    pub title: String,
    pub uri: String,
    pub description: String,
    pub duration: u32,
}

impl From<&Video> for VideoInfo {
    fn from(v: &Video) -> VideoInfo {
        VideoInfo {
            title: v.title.clone(),
            uri: v.uri.clone(),
            description: v.description.clone(),
            duration: v.duration,
        }
    }
}

/// Projection of a related track taken from a release's track list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackInfo {
    pub title: String,
    pub duration: Option<String>,
    pub format: String,
    pub videos: Vec<VideoInfo>,
}

/// One matched release for a lookup request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub title: String,
    pub release: Option<u32>,
    pub format: String,
    pub videos: Vec<VideoInfo>,
    pub related_tracks: Vec<TrackInfo>,
}

/// Lookup outcome for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackReport {
    pub track: String,
    pub artist: String,
    pub versions: Vec<VersionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TrackReport {
    pub fn found(request: &LookupRequest, versions: Vec<VersionInfo>) -> Self {
        TrackReport {
            track: request.track.clone(),
            artist: request.artist.clone(),
            versions,
            message: None,
        }
    }

    pub fn not_found(request: &LookupRequest) -> Self {
        TrackReport {
            track: request.track.clone(),
            artist: request.artist.clone(),
            versions: Vec::new(),
            message: Some(NO_RESULTS_MESSAGE.to_string()),
        }
    }
}
