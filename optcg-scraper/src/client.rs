use std::time::Duration;

use optcg_core::{FetchError, Fetcher, QueryParams};
use reqwest::blocking::Client;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("optcg-scrape/", env!("CARGO_PKG_VERSION"));

/// Build the blocking HTTP client shared by page fetches and image downloads.
pub fn http_client() -> Result<Client, FetchError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| FetchError::request("<client>", e))
}

/// Live [`Fetcher`] over HTTP. Non-2xx responses are errors.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self::with_client(http_client()?))
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, params: QueryParams<'_>) -> Result<Vec<u8>, FetchError> {
        log::debug!("GET {url} {params:?}");
        let resp = self
            .http
            .get(url)
            .query(params)
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
        Ok(bytes.to_vec())
    }
}
