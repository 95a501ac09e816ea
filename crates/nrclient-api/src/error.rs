#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API key is required")]
    MissingApiKey,

    #[error("API request failed (status {status})")]
    Status { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
