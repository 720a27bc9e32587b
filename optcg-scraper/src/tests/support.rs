//! Fakes shared by the walker and request tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use optcg_core::{FetchError, Fetcher, ImageStore, QueryParams, StoreOutcome};

use crate::config::ScraperConfig;

pub const BASE: &str = "https://example.test";
pub const CARDS_HTML: &str = include_str!("fixtures/cards.html");
pub const EMPTY_CARDS_HTML: &str = include_str!("fixtures/empty_cards.html");

pub const PACK_LIST_HTML: &str = r#"<!DOCTYPE html>
<html><body><div id="cardlist">
<select name="series" id="series">
<option value="">ALL</option>
<option value="556101">BOOSTER PACK -ROMANCE DAWN- [OP-01]</option>
<option value="556104">STARTER DECK -Straw Hat Crew- [ST-01]</option>
<option value="556102">BOOSTER PACK -PARAMOUNT WAR- [OP-02]</option>
<option value="556901">Promotion card</option>
</select>
</div></body></html>"#;

/// In-memory site keyed by URL and `series` parameter.
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<(String, Option<String>), String>,
    failing: HashSet<String>,
    pub calls: RefCell<Vec<(String, Option<String>)>>,
}

impl FakeSite {
    /// The usual catalog: OP-01 has cards, ST-01 is empty, OP-02 fails.
    pub fn catalog() -> Self {
        Self::default()
            .with_pack_list(PACK_LIST_HTML)
            .with_cards("556101", CARDS_HTML)
            .with_cards("556104", EMPTY_CARDS_HTML)
            .failing("556102")
    }

    pub fn with_pack_list(mut self, html: &str) -> Self {
        self.pages
            .insert((format!("{BASE}/cardlist"), None), html.to_string());
        self
    }

    pub fn with_cards(mut self, series: &str, html: &str) -> Self {
        self.pages.insert(
            (format!("{BASE}/cardlist/"), Some(series.to_string())),
            html.to_string(),
        );
        self
    }

    pub fn failing(mut self, series: &str) -> Self {
        self.failing.insert(series.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn requested_series(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|(_, series)| series.clone())
            .collect()
    }
}

impl Fetcher for FakeSite {
    fn fetch(&self, url: &str, params: QueryParams<'_>) -> Result<Vec<u8>, FetchError> {
        let series = params
            .iter()
            .find(|(k, _)| *k == "series")
            .map(|(_, v)| v.to_string());
        self.calls
            .borrow_mut()
            .push((url.to_string(), series.clone()));

        if series.as_ref().is_some_and(|s| self.failing.contains(s)) {
            return Err(FetchError::Status {
                status: 500,
                url: url.to_string(),
            });
        }
        self.pages
            .get(&(url.to_string(), series))
            .map(|body| body.clone().into_bytes())
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}

/// Writes a placeholder file for every image and records the destinations.
#[derive(Default)]
pub struct FakeImages {
    pub stored: RefCell<Vec<PathBuf>>,
}

impl ImageStore for FakeImages {
    fn store(&self, _url: &str, dest: &Path) -> Result<StoreOutcome, FetchError> {
        if dest.exists() {
            return Ok(StoreOutcome::Skipped);
        }
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, b"image")?;
        self.stored.borrow_mut().push(dest.to_path_buf());
        Ok(StoreOutcome::Stored)
    }
}

/// Config pointing every directory inside `root`.
pub fn test_config(root: &Path) -> ScraperConfig {
    ScraperConfig {
        base_url: format!("{BASE}/"),
        output_dir: root.join("packs"),
        image_dir: root.join("images"),
        debug_dir: root.join("debug"),
        ..ScraperConfig::default()
    }
}
