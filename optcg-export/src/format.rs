use crate::error::ExportError;
use crate::record::Record;

/// Output format selector.
///
/// `Img` is not a text rendering: it downloads card images as a side effect
/// and is only valid for cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Img,
}

const ALL_FORMATS: &[OutputFormat] = &[
    OutputFormat::Text,
    OutputFormat::Json,
    OutputFormat::Csv,
    OutputFormat::Img,
];

impl OutputFormat {
    /// Selector string, also used as the file extension in batch exports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Img => "img",
        }
    }

    /// Whether this format produces formatted text rather than a side effect.
    pub fn is_textual(&self) -> bool {
        !matches!(self, Self::Img)
    }

    /// Parse a selector, accepting only the formats valid for `R`.
    pub fn parse_for<R: Record>(s: &str) -> Result<Self, ExportError> {
        let requested = s.trim();
        R::FORMATS
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(requested))
            .ok_or_else(|| ExportError::invalid_format(s, R::FORMATS))
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let requested = s.trim();
        ALL_FORMATS
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(requested))
            .ok_or_else(|| ExportError::invalid_format(s, ALL_FORMATS))
    }
}
