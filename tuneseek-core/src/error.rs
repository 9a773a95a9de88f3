use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Search errors
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("No active query to load more results for")]
    NoActiveQuery,

    #[error("HTTP error! status: {status}")]
    FetchFailed { status: u16 },

    // Details errors
    #[error("Unsupported detail type: {kind}")]
    UnsupportedDetailType { kind: String },

    // Audio errors
    #[error("No audio preview available")]
    AudioUnavailable,

    #[error("Audio playback failed: {reason}")]
    AudioPlaybackFailed { reason: String },

    // Network errors
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Network request failed: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
