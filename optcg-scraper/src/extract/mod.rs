//! Turns catalog pages into typed packs and cards.

pub mod card;
pub mod markup;
pub mod pack;

pub use card::{extract_card, extract_cards, image_base};
pub use pack::extract_packs;

use optcg_core::{Card, Pack};
use scraper::Html;

/// Parse a pack list page and extract its packs.
pub fn packs_from_markup(markup: &str) -> Vec<Pack> {
    extract_packs(&Html::parse_document(markup))
}

/// Parse a card listing page and extract its cards.
pub fn cards_from_markup(markup: &str) -> Vec<Card> {
    extract_cards(&Html::parse_document(markup))
}

#[cfg(test)]
#[path = "../tests/extract_tests.rs"]
mod tests;
