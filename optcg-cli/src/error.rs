use thiserror::Error;

use optcg_scraper::ScrapeError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Anything the scraper reports
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Process exit code: 2 for a rejected request, 1 for everything else.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::Scrape(e) if e.is_request_fatal() => 2,
            _ => 1,
        }
    }
}

impl From<optcg_core::FetchError> for CliError {
    fn from(e: optcg_core::FetchError) -> Self {
        Self::Scrape(e.into())
    }
}
