//! Renderers for scraped packs and cards.
//!
//! Every textual format goes through [`render`]; the card-only image export
//! goes through [`export_cards`], which also accepts the textual formats.

pub mod error;
pub mod format;
pub mod images;
pub mod json;
pub mod paths;
pub mod record;
pub mod table;
pub mod text;

pub use error::ExportError;
pub use format::OutputFormat;
pub use images::{ImageExportSummary, NOTHING_TO_DO, export_images, image_path};
pub use paths::sanitize_file_stem;
pub use record::Record;

use std::path::Path;

use optcg_core::{Card, ImageStore};

/// Render `items` in a textual format.
///
/// [`OutputFormat::Img`] is rejected here because it is a side effect, not a
/// rendering; use [`export_cards`] for it.
pub fn render<R: Record>(items: &[R], format: OutputFormat) -> Result<String, ExportError> {
    match format {
        OutputFormat::Text => Ok(text::to_text(items)),
        OutputFormat::Json => json::to_json(items),
        OutputFormat::Csv => table::to_csv(items),
        OutputFormat::Img => {
            let textual: Vec<OutputFormat> = R::FORMATS
                .iter()
                .copied()
                .filter(OutputFormat::is_textual)
                .collect();
            Err(ExportError::invalid_format(format.name(), &textual))
        }
    }
}

/// Render cards, or download their images into `image_dir` for
/// [`OutputFormat::Img`].
pub fn export_cards(
    cards: &[Card],
    format: OutputFormat,
    store: &dyn ImageStore,
    image_dir: &Path,
) -> Result<String, ExportError> {
    match format {
        OutputFormat::Img => export_images(cards, store, image_dir),
        OutputFormat::Text | OutputFormat::Json | OutputFormat::Csv => render(cards, format),
    }
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
