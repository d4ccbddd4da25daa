use thiserror::Error;

/// Errors raised while talking to Discogs or preparing a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Discogs request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Discogs rate limit exceeded")]
    RateLimited,

    #[error("Discogs server error, status: {0}")]
    ServerError(u16),

    #[error("Discogs rejected the API token")]
    InvalidToken,

    #[error("Discogs resource not found: {0}")]
    NotFound(String),

    #[error("Discogs API unexpected response, status {status}: {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("Discogs Deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Input error: {0}")]
    InputError(#[from] std::io::Error),
}

impl Error {
    /// Whether retrying the same request after a pause may succeed.
    ///
    /// Connection failures, timeouts, bodies cut off mid-transfer, rate
    /// limiting and 5xx responses are transient. Bodies are parsed with
    /// `serde_json`, so any reqwest error reading one is a transport fault.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::RequestError(e) => {
                e.is_connect()
                    || e.is_timeout()
                    || e.is_request()
                    || e.is_body()
                    || e.is_decode()
            }
            Error::RateLimited | Error::ServerError(_) => true,
            _ => false,
        }
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
