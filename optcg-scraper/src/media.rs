use std::path::Path;

use optcg_core::{FetchError, ImageStore, StoreOutcome};
use reqwest::blocking::Client;

use crate::client::http_client;

/// Downloads images over HTTP, leaving existing files alone.
#[derive(Debug, Clone)]
pub struct HttpImageStore {
    http: Client,
}

impl HttpImageStore {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self::with_client(http_client()?))
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

impl ImageStore for HttpImageStore {
    fn store(&self, url: &str, dest: &Path) -> Result<StoreOutcome, FetchError> {
        // Skip if file already exists
        if dest.exists() {
            return Ok(StoreOutcome::Skipped);
        }

        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| FetchError::request(url, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = resp.bytes().map_err(|e| FetchError::request(url, e))?;

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, &bytes)?;
        Ok(StoreOutcome::Stored)
    }
}
