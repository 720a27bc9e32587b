use optcg_core::{Card, Pack};
use serde::Serialize;

use crate::OutputFormat;

/// An entity that can be rendered by the exporters.
pub trait Record: Serialize {
    /// Human-readable entity name, used in log lines.
    const KIND: &'static str;

    /// Field names in declaration order. Used as the CSV header.
    const FIELDS: &'static [&'static str];

    /// Formats accepted for this entity.
    const FORMATS: &'static [OutputFormat];

    /// One string per entry in [`FIELDS`](Record::FIELDS): lists joined with
    /// `,`, enums as their string value, absent values empty.
    fn cells(&self) -> Vec<String>;

    /// Single-line human summary.
    fn text_line(&self) -> String;
}

impl Record for Pack {
    const KIND: &'static str = "pack";
    const FIELDS: &'static [&'static str] = &["series", "prefix", "name", "code"];
    const FORMATS: &'static [OutputFormat] =
        &[OutputFormat::Text, OutputFormat::Json, OutputFormat::Csv];

    fn cells(&self) -> Vec<String> {
        vec![
            self.series.clone(),
            self.prefix.clone(),
            self.name.clone(),
            self.code.clone(),
        ]
    }

    fn text_line(&self) -> String {
        format!("  {}, {}, {}, {}", self.code, self.series, self.name, self.prefix)
    }
}

impl Record for Card {
    const KIND: &'static str = "card";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "code",
        "rarity",
        "category",
        "name",
        "image_url",
        "attributes",
        "block",
        "color",
        "effect",
        "cost",
        "power",
        "counter",
        "types",
        "trigger",
    ];
    const FORMATS: &'static [OutputFormat] = &[
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Csv,
        OutputFormat::Img,
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.code.clone(),
            self.rarity.to_string(),
            self.category.to_string(),
            self.name.clone(),
            self.image_url.clone(),
            join_list(&self.attributes),
            optional(&self.block),
            join_list(&self.color),
            optional(&self.effect),
            optional(&self.cost),
            optional(&self.power),
            optional(&self.counter),
            optional(&self.types),
            optional(&self.trigger),
        ]
    }

    fn text_line(&self) -> String {
        format!(
            "  {}, {}, {}, {}, {}",
            self.code, self.rarity, self.name, self.category, self.id
        )
    }
}

fn join_list<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
