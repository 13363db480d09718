use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid proxy address: {0}")]
    InvalidProxy(String),

    #[error("fetch of {url} returned {status}")]
    BadStatus { url: String, status: String },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model request to {endpoint} returned {status}")]
    BadStatus { endpoint: String, status: String },

    #[error("model response had no message content")]
    EmptyResponse,
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
