use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use optcg_core::{Card, Fetcher, ImageStore, Pack, QueryParams};
use optcg_export::{OutputFormat, export_cards, images, render, sanitize_file_stem};
use scraper::Html;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::extract::{extract_cards, extract_packs};
use crate::report::{PackEntry, WalkReport};

/// Path of the pack list page, relative to the site root.
pub const PACK_LIST_PATH: &str = "/cardlist";
/// Path of the card listing page; the pack is chosen with `?series=`.
pub const CARD_LIST_PATH: &str = "/cardlist/";

/// Progress events emitted while walking the catalog.
#[derive(Debug, Clone)]
pub enum WalkEvent {
    /// Fetching the pack list.
    FetchingPacks,
    /// Pack list extracted.
    PacksFound { total: usize },
    /// Fetching cards for one pack.
    PackStarted { index: usize, code: String },
    /// Pack done; `cards` cards exported.
    PackCompleted {
        index: usize,
        code: String,
        cards: usize,
    },
    /// Pack left out (warning, not an error).
    PackSkipped {
        index: usize,
        code: String,
        reason: String,
    },
    /// Pack could not be processed.
    PackFailed {
        index: usize,
        code: String,
        error: String,
    },
    /// Every pack has been attempted.
    Done,
}

/// Walks the catalog through a [`Fetcher`], extracting and exporting packs
/// and cards.
pub struct CatalogWalker<'a> {
    fetcher: &'a dyn Fetcher,
    images: &'a dyn ImageStore,
    config: ScraperConfig,
    events: Option<mpsc::Sender<WalkEvent>>,
}

impl<'a> CatalogWalker<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, images: &'a dyn ImageStore, config: ScraperConfig) -> Self {
        Self {
            fetcher,
            images,
            config,
            events: None,
        }
    }

    /// Send progress events to `events`. A closed receiver is ignored.
    pub fn with_events(mut self, events: mpsc::Sender<WalkEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Fetch the pack list page and extract every pack.
    pub fn list_packs(&self) -> Result<Vec<Pack>, ScrapeError> {
        log::info!("Fetching packs from website...");
        let document = self.fetch_document(PACK_LIST_PATH, &[], "packs_data.html")?;
        Ok(extract_packs(&document))
    }

    /// Fetch one pack's card listing and extract every card.
    pub fn list_cards(&self, series: &str) -> Result<Vec<Card>, ScrapeError> {
        let series = series.trim();
        if series.is_empty() {
            log::error!("No series id provided, aborting.");
            return Err(ScrapeError::MissingSeries);
        }

        log::info!("Fetching cards for series {series} from website...");
        let dump_name = format!("cards_{}.html", sanitize_file_stem(series));
        let document = self.fetch_document(CARD_LIST_PATH, &[("series", series)], &dump_name)?;
        Ok(extract_cards(&document))
    }

    /// List mode: every pack, rendered in `format`.
    pub fn packs(&self, format: &str) -> Result<String, ScrapeError> {
        let format = OutputFormat::parse_for::<Pack>(format)?;
        let packs = self.list_packs()?;
        Ok(render(&packs, format)?)
    }

    /// Cards mode: one pack's cards rendered in `format`, or their images
    /// downloaded for [`OutputFormat::Img`].
    pub fn cards(&self, series: &str, format: &str) -> Result<String, ScrapeError> {
        let format = OutputFormat::parse_for::<Card>(format)?;
        let cards = self.list_cards(series)?;
        Ok(export_cards(
            &cards,
            format,
            self.images,
            &self.config.image_dir,
        )?)
    }

    /// Fetch-all mode. Returns the completion message.
    pub fn fetch_all(&self, format: &str) -> Result<String, ScrapeError> {
        Ok(self.fetch_all_report(format)?.message())
    }

    /// Fetch-all mode: export every usable pack's cards.
    ///
    /// Only an invalid format or a failure to fetch the pack list aborts the
    /// run. Everything that goes wrong with a single pack is logged, recorded
    /// in the report, and the walk moves on.
    pub fn fetch_all_report(&self, format: &str) -> Result<WalkReport, ScrapeError> {
        let format = OutputFormat::parse_for::<Card>(format)?;
        let location = match format {
            OutputFormat::Img => self.config.image_dir.clone(),
            OutputFormat::Text | OutputFormat::Json | OutputFormat::Csv => {
                self.config.output_dir.clone()
            }
        };

        self.emit(WalkEvent::FetchingPacks);
        let packs = self.list_packs()?;
        self.emit(WalkEvent::PacksFound { total: packs.len() });

        let mut report = WalkReport::new(format, location);
        for (index, pack) in packs.iter().enumerate() {
            let entry = self.process_pack(index, pack, format);
            match &entry {
                PackEntry::Exported { cards, .. } | PackEntry::Images { cards, .. } => {
                    self.emit(WalkEvent::PackCompleted {
                        index,
                        code: pack.code.clone(),
                        cards: *cards,
                    })
                }
                PackEntry::Skipped { reason, .. } => self.emit(WalkEvent::PackSkipped {
                    index,
                    code: pack.code.clone(),
                    reason: reason.clone(),
                }),
                PackEntry::Failed { message, .. } => self.emit(WalkEvent::PackFailed {
                    index,
                    code: pack.code.clone(),
                    error: message.clone(),
                }),
            }
            report.add(entry);
        }

        let summary = report.summary();
        log::info!(
            "Fetch-all finished: {} exported ({} cards), {} skipped, {} failed",
            summary.exported,
            summary.cards,
            summary.skipped,
            summary.failed
        );
        self.emit(WalkEvent::Done);
        Ok(report)
    }

    fn process_pack(&self, index: usize, pack: &Pack, format: OutputFormat) -> PackEntry {
        let skipped = |reason: String| {
            log::warn!("Skipping pack '{}' ({}): {}", pack.name, pack.series, reason);
            PackEntry::Skipped {
                code: pack.code.clone(),
                series: pack.series.clone(),
                reason,
            }
        };
        let failed = |message: String| {
            log::error!("Pack {} ({}) failed: {}", pack.code, pack.series, message);
            PackEntry::Failed {
                code: pack.code.clone(),
                series: pack.series.clone(),
                message,
            }
        };

        if !pack.is_usable() {
            return skipped("no usable series id or code".to_string());
        }

        self.emit(WalkEvent::PackStarted {
            index,
            code: pack.code.clone(),
        });

        let cards = match self.list_cards(&pack.series) {
            Ok(cards) => cards,
            Err(e) => return failed(e.to_string()),
        };
        if cards.is_empty() {
            return skipped("no cards found".to_string());
        }

        match format {
            OutputFormat::Img => {
                match images::download_all(&cards, self.images, &self.config.image_dir) {
                    Ok(summary) => PackEntry::Images {
                        code: pack.code.clone(),
                        series: pack.series.clone(),
                        cards: cards.len(),
                        images: summary,
                    },
                    Err(e) => failed(e.to_string()),
                }
            }
            OutputFormat::Text | OutputFormat::Json | OutputFormat::Csv => {
                let body = match render(&cards, format) {
                    Ok(body) => body,
                    Err(e) => return failed(e.to_string()),
                };
                let path = self.pack_file_path(pack, format);
                match write_file(&path, &body) {
                    Ok(()) => {
                        log::info!("Wrote {} cards to {}", cards.len(), path.display());
                        PackEntry::Exported {
                            code: pack.code.clone(),
                            series: pack.series.clone(),
                            cards: cards.len(),
                            path,
                        }
                    }
                    Err(e) => failed(format!("writing {}: {}", path.display(), e)),
                }
            }
        }
    }

    /// `<output_dir>/<code>.<format>` for a pack.
    pub fn pack_file_path(&self, pack: &Pack, format: OutputFormat) -> PathBuf {
        self.config.output_dir.join(format!(
            "{}.{}",
            sanitize_file_stem(&pack.code),
            format.name()
        ))
    }

    fn fetch_document(
        &self,
        path: &str,
        params: QueryParams<'_>,
        dump_name: &str,
    ) -> Result<Html, ScrapeError> {
        let url = format!("{}{}", self.config.site_root(), path);
        let body = self.fetcher.fetch(&url, params)?;
        let markup = String::from_utf8_lossy(&body);

        if self.config.debug {
            self.dump_page(dump_name, &markup);
        }
        Ok(Html::parse_document(&markup))
    }

    /// Write a fetched page into the debug directory. Failures are logged.
    fn dump_page(&self, name: &str, markup: &str) {
        let path = self.config.debug_dir.join(name);
        match write_file(&path, markup) {
            Ok(()) => log::info!("Page content dumped to {}", path.display()),
            Err(e) => log::warn!("Failed to dump page to {}: {}", path.display(), e),
        }
    }

    fn emit(&self, event: WalkEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

#[cfg(test)]
#[path = "tests/walker_tests.rs"]
mod tests;
