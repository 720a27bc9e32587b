//! Entry point for callers that describe a run as data (a web handler, a
//! job queue) instead of calling the walker directly.

use optcg_core::{Fetcher, ImageStore};
use optcg_export::OutputFormat;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::walker::CatalogWalker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Packs,
    Cards,
}

/// Optional modifier on a command. `All` walks every pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    All,
}

impl std::str::FromStr for Command {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "packs" => Ok(Self::Packs),
            "cards" => Ok(Self::Cards),
            other => Err(ScrapeError::other(format!("Unknown command: '{other}'"))),
        }
    }
}

impl std::str::FromStr for Action {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            other => Err(ScrapeError::other(format!("Unknown action: '{other}'"))),
        }
    }
}

/// One scraper invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub command: Command,
    pub action: Option<Action>,
    /// Required for [`Command::Cards`] unless `action` is `All`.
    pub series_id: Option<String>,
    /// Format selector, validated against the entity being rendered.
    pub format: String,
    /// Verbosity is a logging concern; the core only carries it through.
    pub verbose: bool,
    /// Dump fetched pages for this call.
    pub debug: bool,
}

impl ScrapeRequest {
    pub fn packs(format: impl Into<String>) -> Self {
        Self {
            command: Command::Packs,
            action: None,
            series_id: None,
            format: format.into(),
            verbose: false,
            debug: false,
        }
    }

    pub fn cards(series_id: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            command: Command::Cards,
            series_id: Some(series_id.into()),
            ..Self::packs(format)
        }
    }

    /// Walk every pack instead of a single listing.
    pub fn all(mut self) -> Self {
        self.action = Some(Action::All);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn is_fetch_all(&self) -> bool {
        self.action == Some(Action::All)
    }
}

/// What a request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// Rendered packs or cards.
    Formatted(String),
    /// Completion message from a side-effecting run (fetch-all).
    Completed(String),
}

impl ScrapeOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Formatted(s) | Self::Completed(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Formatted(s) | Self::Completed(s) => s,
        }
    }
}

/// Run a request against a fresh walker.
///
/// `debug` on the request is applied on top of `config` for this call only.
pub fn execute(
    request: &ScrapeRequest,
    fetcher: &dyn Fetcher,
    images: &dyn ImageStore,
    config: &ScraperConfig,
) -> Result<ScrapeOutcome, ScrapeError> {
    let config = config.clone().with_debug(config.debug || request.debug);
    CatalogWalker::new(fetcher, images, config).handle(request)
}

impl CatalogWalker<'_> {
    /// Dispatch a request to the matching walker mode.
    pub fn handle(&self, request: &ScrapeRequest) -> Result<ScrapeOutcome, ScrapeError> {
        if request.is_fetch_all() {
            return self.fetch_all(&request.format).map(ScrapeOutcome::Completed);
        }

        match request.command {
            Command::Packs => self.packs(&request.format).map(ScrapeOutcome::Formatted),
            Command::Cards => {
                let series = request.series_id.as_deref().unwrap_or_default();
                let output = self.cards(series, &request.format)?;
                if matches!(request.format.parse::<OutputFormat>(), Ok(OutputFormat::Img)) {
                    Ok(ScrapeOutcome::Completed(output))
                } else {
                    Ok(ScrapeOutcome::Formatted(output))
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/request_tests.rs"]
mod tests;
