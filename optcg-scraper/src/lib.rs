//! Catalog scraping for the One Piece Card Game card list.
//!
//! [`CatalogWalker`] drives everything: it fetches pages through a
//! [`Fetcher`](optcg_core::Fetcher), extracts packs and cards with
//! [`extract`], and hands them to `optcg_export`.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod media;
pub mod report;
pub mod request;
pub mod walker;

pub use cache::{CacheEntry, CachedFetcher, ResponseCache, default_cache_dir};
pub use client::{HttpFetcher, http_client};
pub use config::{
    ConfigSource, ConfigSources, ScraperConfig, config_path, config_sources, save_to_file,
};
pub use error::{ExtractError, ScrapeError};
pub use media::HttpImageStore;
pub use report::{PackEntry, WalkReport, WalkSummary};
pub use request::{Action, Command, ScrapeOutcome, ScrapeRequest, execute};
pub use walker::{CatalogWalker, WalkEvent};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
