use std::sync::LazyLock;

use optcg_core::Pack;
use scraper::{ElementRef, Html, Selector};

use super::markup::selector;
use crate::error::ExtractError;

static SERIES_OPTION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"#series[name="series"] option"#));

/// Every pack listed in the series selector, in document order.
///
/// Options without a value are placeholders and skipped silently; options
/// whose title cannot be parsed are logged and skipped.
pub fn extract_packs(document: &Html) -> Vec<Pack> {
    let mut packs = Vec::new();
    for option in document.select(&SERIES_OPTION) {
        let Some(series) = option
            .value()
            .attr("value")
            .map(str::trim)
            .filter(|v| !v.is_empty())
        else {
            continue;
        };

        match extract_pack(option, series) {
            Ok(pack) => packs.push(pack),
            Err(e) => log::warn!("Skipping pack option {series}: {e}"),
        }
    }
    log::debug!("Extracted {} packs", packs.len());
    packs
}

fn extract_pack(option: ElementRef<'_>, series: &str) -> Result<Pack, ExtractError> {
    let title: String = option.text().collect();
    Ok(Pack::from_title(&title, series)?)
}
