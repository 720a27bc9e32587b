use optcg_core::{FetchError, ModelError};
use optcg_export::ExportError;

/// Errors that can occur while walking the catalog.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("No series id provided, aborting")]
    MissingSeries,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl ScrapeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Errors raised before anything is fetched: a bad format selector or a
    /// missing series id. Callers usually report these as bad requests.
    pub fn is_request_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingSeries | Self::Export(ExportError::InvalidFormat { .. })
        )
    }
}

/// Reasons a single pack option or card fragment could not be extracted.
///
/// These never escape a batch: the extractor logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Incomplete card record {id:?}: {reason}")]
    IncompleteCardRecord { id: String, reason: String },
}

impl ExtractError {
    pub fn incomplete(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::IncompleteCardRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
