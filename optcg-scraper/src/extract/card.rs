use std::sync::LazyLock;

use optcg_core::{Attribute, Card, CardColor, Category, Rarity};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::markup::{markup_after_heading, own_text, resolve_image_url, selector, text_after_anchor};
use crate::error::ExtractError;

static OG_IMAGE: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[property="og:image"]"#));
static CARD_FRAGMENT: LazyLock<Selector> =
    LazyLock::new(|| selector("#cardlist .resultCol dl.modalCol"));

static INFO_SPAN: LazyLock<Selector> = LazyLock::new(|| selector("div.infoCol span"));
static CARD_NAME: LazyLock<Selector> = LazyLock::new(|| selector("div.cardName"));
static ATTRIBUTE: LazyLock<Selector> = LazyLock::new(|| selector("div.attribute i"));
static COST: LazyLock<Selector> = LazyLock::new(|| selector("div.cost > h3"));
static POWER: LazyLock<Selector> = LazyLock::new(|| selector("div.power > h3"));
static COUNTER: LazyLock<Selector> = LazyLock::new(|| selector("div.counter > h3"));
static COLOR: LazyLock<Selector> = LazyLock::new(|| selector("div.color > h3"));
static BLOCK: LazyLock<Selector> = LazyLock::new(|| selector("div.block > h3"));
static FEATURE: LazyLock<Selector> = LazyLock::new(|| selector("div.feature > h3"));
static IMAGE: LazyLock<Selector> = LazyLock::new(|| selector("img.lazy[data-src]"));
static EFFECT: LazyLock<Selector> = LazyLock::new(|| selector("div.text"));
static TRIGGER: LazyLock<Selector> = LazyLock::new(|| selector("div.trigger"));

static INFO_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[|/]\s*").expect("static pattern"));

/// Every card fragment in a card listing page, in document order.
///
/// A fragment that cannot be turned into a [`Card`] is logged and skipped;
/// its siblings are unaffected.
pub fn extract_cards(document: &Html) -> Vec<Card> {
    let base = image_base(document);
    if base.is_none() {
        log::debug!("No og:image base URL; image URLs stay relative");
    }

    let mut cards = Vec::new();
    for fragment in document.select(&CARD_FRAGMENT) {
        match extract_card(fragment, base.as_ref()) {
            Ok(card) => {
                log::info!(
                    "Adding card: {}, {}, {}, {}",
                    card.code,
                    card.rarity,
                    card.category,
                    card.name
                );
                cards.push(card);
            }
            Err(e) => {
                log::warn!("Skipping card: {e}");
                log::debug!("Card markup: {}", fragment.html());
            }
        }
    }
    cards
}

/// Base URL that relative card image paths resolve against.
pub fn image_base(document: &Html) -> Option<Url> {
    document
        .select(&OG_IMAGE)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .and_then(|content| Url::parse(content.trim()).ok())
}

/// Build one card from its `dl.modalCol` fragment.
pub fn extract_card(fragment: ElementRef<'_>, base: Option<&Url>) -> Result<Card, ExtractError> {
    let id = fragment
        .value()
        .id()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ExtractError::incomplete("", "fragment has no id"))?;

    let (code, rarity, category) = parse_info(fragment, id)?;
    let mut card = Card::new(id, code, rarity, category);

    card.name = fragment
        .select(&CARD_NAME)
        .next()
        .and_then(own_text)
        .unwrap_or_default();

    card.attributes = parse_attributes(fragment, id);
    card.cost = text_after_anchor(fragment, &COST, " ");
    card.power = text_after_anchor(fragment, &POWER, " ").filter(|v| v != "-");
    card.counter = text_after_anchor(fragment, &COUNTER, " ").filter(|v| v != "-");
    card.color = parse_colors(fragment, id);
    card.block = text_after_anchor(fragment, &BLOCK, " ");
    card.types = text_after_anchor(fragment, &FEATURE, "\n");

    card.image_url = fragment
        .select(&IMAGE)
        .next()
        .and_then(|img| img.value().attr("data-src"))
        .map(|raw| resolve_image_url(base, raw))
        .unwrap_or_default();

    card.effect = fragment
        .select(&EFFECT)
        .next()
        .and_then(markup_after_heading);
    card.trigger = fragment
        .select(&TRIGGER)
        .next()
        .and_then(markup_after_heading);

    Ok(card)
}

/// Code, rarity and category from the info line.
///
/// The site usually renders three spans; older pages put everything in one
/// string separated by `|` or `/`.
fn parse_info(fragment: ElementRef<'_>, id: &str) -> Result<(String, Rarity, Category), ExtractError> {
    let mut parts: Vec<String> = fragment
        .select(&INFO_SPAN)
        .map(|span| span.text().collect::<String>().trim().to_string())
        .filter(|part| !part.is_empty())
        .collect();

    if parts.len() < 3 {
        let composite = parts.join("|");
        parts = INFO_SPLIT
            .split(composite.trim())
            .map(str::to_string)
            .filter(|part| !part.is_empty())
            .collect();
    }

    let [code, rarity, category, ..] = parts.as_slice() else {
        return Err(ExtractError::incomplete(
            id,
            format!("info line has {} parts, expected 3", parts.len()),
        ));
    };

    let rarity: Rarity = rarity
        .parse()
        .map_err(|e: optcg_core::ModelError| ExtractError::incomplete(id, e.to_string()))?;
    let category: Category = category
        .parse()
        .map_err(|e: optcg_core::ModelError| ExtractError::incomplete(id, e.to_string()))?;

    Ok((code.clone(), rarity, category))
}

fn parse_attributes(fragment: ElementRef<'_>, id: &str) -> Vec<Attribute> {
    let Some(raw) = fragment.select(&ATTRIBUTE).next() else {
        return Vec::new();
    };
    let raw: String = raw.text().collect();

    raw.split('/')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let attribute = Attribute::parse(token);
            if !attribute.is_known() {
                log::warn!("Unknown attribute found on {id}: '{token}'");
            }
            attribute
        })
        .collect()
}

fn parse_colors(fragment: ElementRef<'_>, id: &str) -> Vec<CardColor> {
    let Some(raw) = text_after_anchor(fragment, &COLOR, " ") else {
        return Vec::new();
    };

    raw.split('/')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let color = CardColor::parse(token);
            if !color.is_known() {
                log::warn!("Unknown color on {id}, keeping raw: {token:?}");
            }
            color
        })
        .collect()
}
