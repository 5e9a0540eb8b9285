use thiserror::Error;

#[derive(Error, Debug)]
pub enum TubelensError {
    #[error("Not a recognized YouTube video URL: {url}")]
    InvalidUrl { url: String },

    #[error("Video not found: {video_id}")]
    VideoNotFound { video_id: String },

    #[error("YouTube API request failed: {reason}")]
    YouTubeApi { reason: String },

    #[error("No caption track available for {video_id}")]
    NoCaptions { video_id: String },

    #[error("Malformed caption timestamp: {token:?}")]
    MalformedTimestamp { token: String },

    #[error("Comment insights failed: {reason}")]
    InsightsFailed { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },
}

pub type Result<T> = std::result::Result<T, TubelensError>;
