use std::fs;
use std::path::{Path, PathBuf};

use optcg_core::{Card, ImageStore, StoreOutcome};

use crate::error::ExportError;
use crate::paths::sanitize_file_stem;

/// Returned by [`export_images`] when there are no cards at all.
pub const NOTHING_TO_DO: &str = "Nothing to do: no cards to download images for.";

/// Counts from a single image export run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImageExportSummary {
    pub stored: usize,
    pub skipped: usize,
    pub missing_url: usize,
    pub failed: usize,
}

/// Destination path for a card's image inside `dir`.
///
/// The id is sanitized, so the result always stays directly inside `dir`.
pub fn image_path(dir: &Path, card: &Card) -> PathBuf {
    dir.join(format!("{}.jpg", sanitize_file_stem(&card.id)))
}

/// Download every card image into `dir` as `<id>.jpg`.
///
/// Existing files are left alone by the store. Failures for individual cards
/// are logged and do not stop the run. Returns a completion message, or
/// [`NOTHING_TO_DO`] for an empty slice.
pub fn export_images(
    cards: &[Card],
    store: &dyn ImageStore,
    dir: &Path,
) -> Result<String, ExportError> {
    log::info!("Downloading card images...");
    if cards.is_empty() {
        return Ok(NOTHING_TO_DO.to_string());
    }

    let summary = download_all(cards, store, dir)?;
    log::info!(
        "Images: {} downloaded, {} already present, {} without URL, {} failed",
        summary.stored,
        summary.skipped,
        summary.missing_url,
        summary.failed,
    );
    Ok(format!("DONE downloading images to {}", dir.display()))
}

/// Store each image and tally the outcomes.
pub fn download_all(
    cards: &[Card],
    store: &dyn ImageStore,
    dir: &Path,
) -> Result<ImageExportSummary, ExportError> {
    fs::create_dir_all(dir)?;

    let mut summary = ImageExportSummary::default();
    for card in cards {
        if card.image_url.is_empty() {
            log::warn!("Card {} has no image URL.", card.id);
            summary.missing_url += 1;
            continue;
        }

        let dest = image_path(dir, card);
        match store.store(&card.image_url, &dest) {
            Ok(StoreOutcome::Stored) => {
                log::info!("{} downloaded to {}", card.id, dest.display());
                summary.stored += 1;
            }
            Ok(StoreOutcome::Skipped) => {
                log::info!("{} already exists, skipping download", dest.display());
                summary.skipped += 1;
            }
            Err(e) => {
                log::error!("Failed to download image for card {}: {}", card.id, e);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}
