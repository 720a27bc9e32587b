use serde::{Serialize, Serializer};

use crate::error::ModelError;

/// Printed rarity of a card. Closed set: anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rarity {
    #[serde(rename = "C")]
    Common,
    #[serde(rename = "UC")]
    Uncommon,
    #[serde(rename = "R")]
    Rare,
    #[serde(rename = "SR")]
    SuperRare,
    #[serde(rename = "SEC")]
    SecretRare,
    #[serde(rename = "L")]
    Leader,
    #[serde(rename = "SP CARD")]
    Special,
    #[serde(rename = "TR")]
    TreasureRare,
    #[serde(rename = "P")]
    Promo,
}

const ALL_RARITIES: &[Rarity] = &[
    Rarity::Common,
    Rarity::Uncommon,
    Rarity::Rare,
    Rarity::SuperRare,
    Rarity::SecretRare,
    Rarity::Leader,
    Rarity::Special,
    Rarity::TreasureRare,
    Rarity::Promo,
];

impl Rarity {
    /// Code printed on the card and shown by the catalog.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Common => "C",
            Self::Uncommon => "UC",
            Self::Rare => "R",
            Self::SuperRare => "SR",
            Self::SecretRare => "SEC",
            Self::Leader => "L",
            Self::Special => "SP CARD",
            Self::TreasureRare => "TR",
            Self::Promo => "P",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Rarity {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ALL_RARITIES
            .iter()
            .copied()
            .find(|r| r.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownRarity(s.to_string()))
    }
}

/// Card type as printed in the info line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Leader,
    Character,
    Event,
    Stage,
    Don,
}

const ALL_CATEGORIES: &[Category] = &[
    Category::Leader,
    Category::Character,
    Category::Event,
    Category::Stage,
    Category::Don,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leader => "LEADER",
            Self::Character => "CHARACTER",
            Self::Event => "EVENT",
            Self::Stage => "STAGE",
            Self::Don => "DON",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}

/// Card color. A card can carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Purple,
    Black,
    Yellow,
}

const ALL_COLORS: &[Color] = &[
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Purple,
    Color::Black,
    Color::Yellow,
];

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::Black => "Black",
            Self::Yellow => "Yellow",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Color {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ALL_COLORS
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownColor(s.to_string()))
    }
}

/// A color as found on a card. Tokens outside [`Color`] are kept verbatim, so
/// a color the site adds later still reaches the output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardColor {
    Known(Color),
    Raw(String),
}

impl CardColor {
    /// Map a single token. Never fails.
    pub fn parse(token: &str) -> Self {
        let trimmed = token.trim();
        trimmed
            .parse::<Color>()
            .map(Self::Known)
            .unwrap_or_else(|_| Self::Raw(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(color) => color.as_str(),
            Self::Raw(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<Color> for CardColor {
    fn from(color: Color) -> Self {
        Self::Known(color)
    }
}

impl std::fmt::Display for CardColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CardColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Recognized combat attributes. `Unknown` is the site's explicit `?` marker,
/// not a catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Slash,
    Strike,
    Ranged,
    Special,
    Wisdom,
    Unknown,
}

const ALL_ATTRIBUTE_KINDS: &[AttributeKind] = &[
    AttributeKind::Slash,
    AttributeKind::Strike,
    AttributeKind::Ranged,
    AttributeKind::Special,
    AttributeKind::Wisdom,
    AttributeKind::Unknown,
];

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slash => "Slash",
            Self::Strike => "Strike",
            Self::Ranged => "Ranged",
            Self::Special => "Special",
            Self::Wisdom => "Wisdom",
            Self::Unknown => "?",
        }
    }
}

/// A card attribute as found in the source. Tokens outside the known set are
/// preserved verbatim rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    Known(AttributeKind),
    Raw(String),
}

impl Attribute {
    /// Map a single token. Never fails.
    pub fn parse(token: &str) -> Self {
        let trimmed = token.trim();
        ALL_ATTRIBUTE_KINDS
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(trimmed))
            .map(Self::Known)
            .unwrap_or_else(|| Self::Raw(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(kind) => kind.as_str(),
            Self::Raw(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single catalog card.
///
/// Field order is significant: exporters use it for CSV headers and JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Site-assigned unique identifier (differs between alternate arts).
    pub id: String,
    /// Printed card code, e.g. "OP01-001".
    pub code: String,
    pub rarity: Rarity,
    pub category: Category,
    pub name: String,
    /// Absolute image URL without query string; empty when the page had none.
    pub image_url: String,
    pub attributes: Vec<Attribute>,
    pub block: Option<String>,
    pub color: Vec<CardColor>,
    /// Rules text; may contain inline markup.
    pub effect: Option<String>,
    pub cost: Option<String>,
    pub power: Option<String>,
    pub counter: Option<String>,
    /// Newline-separated type tags.
    pub types: Option<String>,
    pub trigger: Option<String>,
}

impl Card {
    /// Minimal card with only the identity fields set.
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        rarity: Rarity,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            rarity,
            category,
            name: String::new(),
            image_url: String::new(),
            attributes: Vec::new(),
            block: None,
            color: Vec::new(),
            effect: None,
            cost: None,
            power: None,
            counter: None,
            types: None,
            trigger: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }
}

#[cfg(test)]
#[path = "tests/card_tests.rs"]
mod tests;
