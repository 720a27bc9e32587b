use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use optcg_core::{FetchError, Fetcher, QueryParams};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Cache format version. Bump this when the on-disk layout changes to
/// invalidate stale entries automatically.
const CACHE_VERSION: u32 = 1;

/// Metadata about one cached response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    pub url: String,
    pub params: Vec<(String, String)>,
    /// RFC 3339 fetch time.
    pub fetched: String,
    pub file_size: u64,
}

/// Metadata file tracking all cached responses, keyed by cache key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheMeta {
    #[serde(default)]
    pub version: u32,
    pub responses: HashMap<String, CachedResponse>,
}

/// Information about a cached response for display purposes.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub file_size: u64,
    pub fetched: String,
    pub expired: bool,
}

/// Get the default cache directory for fetched pages.
pub fn default_cache_dir() -> Result<PathBuf, FetchError> {
    let base =
        dirs::cache_dir().ok_or_else(|| FetchError::cache("Could not determine cache directory"))?;
    Ok(base.join("optcg-scrape").join("http"))
}

/// On-disk response store with a fixed expiry.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    ttl_secs: u64,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        Self {
            dir: dir.into(),
            ttl_secs,
        }
    }

    pub fn in_default_dir(ttl_secs: u64) -> Result<Self, FetchError> {
        Ok(Self::new(default_cache_dir()?, ttl_secs))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stable key for a URL and its query parameters. Parameter order does
    /// not matter.
    pub fn key(url: &str, params: QueryParams<'_>) -> String {
        let mut sorted: Vec<(&str, &str)> = params.to_vec();
        sorted.sort_unstable();

        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        for (k, v) in sorted {
            hasher.update(b"\0");
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    /// Cached body for `key`, if present and younger than the TTL.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>, FetchError> {
        let meta = self.load_meta()?;
        let Some(entry) = meta.responses.get(key) else {
            return Ok(None);
        };
        if self.is_expired(entry) {
            log::debug!("Cache entry for {} expired", entry.url);
            return Ok(None);
        }

        match fs::read(self.body_path(key)) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store a response body and record it in the metadata file.
    pub fn put(
        &self,
        key: &str,
        url: &str,
        params: QueryParams<'_>,
        body: &[u8],
    ) -> Result<(), FetchError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.body_path(key), body)?;

        let mut meta = self.load_meta()?;
        meta.version = CACHE_VERSION;
        meta.responses.insert(
            key.to_string(),
            CachedResponse {
                url: url.to_string(),
                params: params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                fetched: Utc::now().to_rfc3339(),
                file_size: body.len() as u64,
            },
        );
        self.save_meta(&meta)
    }

    /// List all cached responses.
    pub fn list(&self) -> Result<Vec<CacheEntry>, FetchError> {
        let meta = self.load_meta()?;
        let mut entries: Vec<CacheEntry> = meta
            .responses
            .iter()
            .map(|(key, cached)| CacheEntry {
                key: key.clone(),
                url: cached.url.clone(),
                params: cached.params.clone(),
                file_size: cached.file_size,
                fetched: cached.fetched.clone(),
                expired: self.is_expired(cached),
            })
            .collect();

        entries.sort_by(|a, b| a.url.cmp(&b.url).then_with(|| a.params.cmp(&b.params)));
        Ok(entries)
    }

    /// Clear all cached responses. Returns the number of bytes removed.
    pub fn clear(&self) -> Result<u64, FetchError> {
        let mut total_size = 0u64;

        if self.dir.exists() {
            for entry in fs::read_dir(&self.dir)?.flatten() {
                let path = entry.path();
                if path.is_file() {
                    if let Ok(meta) = fs::metadata(&path) {
                        total_size += meta.len();
                    }
                    fs::remove_file(&path)?;
                }
            }
        }

        Ok(total_size)
    }

    /// Get the total size of cached response bodies.
    pub fn total_cache_size(&self) -> Result<u64, FetchError> {
        let meta = self.load_meta()?;
        Ok(meta.responses.values().map(|c| c.file_size).sum())
    }

    fn is_expired(&self, cached: &CachedResponse) -> bool {
        let Ok(fetched) = DateTime::parse_from_rfc3339(&cached.fetched) else {
            return true;
        };
        let age = Utc::now()
            .signed_duration_since(fetched.with_timezone(&Utc))
            .num_seconds();
        age < 0 || age as u64 >= self.ttl_secs
    }

    fn body_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.body"))
    }

    fn meta_path(&self) -> PathBuf {
        self.dir.join("meta.json")
    }

    /// Load cache metadata. If the cache version doesn't match, clears stale data.
    fn load_meta(&self) -> Result<CacheMeta, FetchError> {
        let path = self.meta_path();
        if !path.exists() {
            return Ok(CacheMeta {
                version: CACHE_VERSION,
                ..Default::default()
            });
        }
        let contents = fs::read_to_string(&path)?;
        let meta: CacheMeta = serde_json::from_str(&contents)
            .map_err(|e| FetchError::cache(format!("Corrupt cache index: {e}")))?;
        if meta.version != CACHE_VERSION {
            log::info!("Discarding response cache from an older format");
            self.clear()?;
            return Ok(CacheMeta {
                version: CACHE_VERSION,
                ..Default::default()
            });
        }
        Ok(meta)
    }

    fn save_meta(&self, meta: &CacheMeta) -> Result<(), FetchError> {
        fs::create_dir_all(&self.dir)?;
        let contents = serde_json::to_string_pretty(meta)
            .map_err(|e| FetchError::cache(format!("Failed to write cache index: {e}")))?;
        fs::write(self.meta_path(), contents)?;
        Ok(())
    }
}

/// [`Fetcher`] that answers from a [`ResponseCache`] when it can and
/// delegates to `inner` otherwise.
///
/// Failing to write the cache is logged; the live body is still returned.
#[derive(Debug, Clone)]
pub struct CachedFetcher<F> {
    inner: F,
    cache: ResponseCache,
}

impl<F: Fetcher> CachedFetcher<F> {
    pub fn new(inner: F, cache: ResponseCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}

impl<F: Fetcher> Fetcher for CachedFetcher<F> {
    fn fetch(&self, url: &str, params: QueryParams<'_>) -> Result<Vec<u8>, FetchError> {
        let key = ResponseCache::key(url, params);
        match self.cache.get(&key) {
            Ok(Some(body)) => {
                log::debug!("Cache hit for {url} {params:?}");
                return Ok(body);
            }
            Ok(None) => {}
            Err(e) => log::warn!("Ignoring unreadable response cache: {e}"),
        }

        let body = self.inner.fetch(url, params)?;
        if let Err(e) = self.cache.put(&key, url, params, &body) {
            log::warn!("Failed to cache response for {url}: {e}");
        }
        Ok(body)
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
