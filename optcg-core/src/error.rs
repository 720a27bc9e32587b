/// Errors raised while building domain entities from scraped strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid title format: {0:?}")]
    InvalidTitleFormat(String),

    #[error("Unknown rarity: {0:?}")]
    UnknownRarity(String),

    #[error("Unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("Unknown color: {0:?}")]
    UnknownColor(String),
}

/// Errors reported by a [`Fetcher`](crate::Fetcher) or [`ImageStore`](crate::ImageStore).
///
/// Transport-specific errors are flattened to strings so the core does not
/// depend on any particular HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache error: {0}")]
    Cache(String),
}

impl FetchError {
    pub fn request(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Request {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }
}
