use std::path::Path;

pub mod card;
pub mod error;
pub mod pack;

pub use card::{Attribute, AttributeKind, Card, CardColor, Category, Color, Rarity};
pub use error::{FetchError, ModelError};
pub use pack::{NONE_SENTINEL, Pack, strip_markup};

/// Query parameters passed alongside a fetch URL.
pub type QueryParams<'a> = &'a [(&'a str, &'a str)];

/// Source of raw catalog documents.
///
/// Implementations own transport concerns (HTTP client, caching, retries).
/// A cached response and a live one must be indistinguishable to callers.
pub trait Fetcher {
    /// Fetch the document at `url` with the given query parameters and return
    /// its body.
    fn fetch(&self, url: &str, params: QueryParams<'_>) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str, params: QueryParams<'_>) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url, params)
    }
}

/// What an [`ImageStore`] did for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The file was downloaded and written.
    Stored,
    /// The destination already existed; nothing was fetched.
    Skipped,
}

/// Persists remote images to local paths.
///
/// Must be idempotent: if `dest` already exists, return
/// [`StoreOutcome::Skipped`] without fetching.
pub trait ImageStore {
    fn store(&self, url: &str, dest: &Path) -> Result<StoreOutcome, FetchError>;
}

impl<S: ImageStore + ?Sized> ImageStore for &S {
    fn store(&self, url: &str, dest: &Path) -> Result<StoreOutcome, FetchError> {
        (**self).store(url, dest)
    }
}
