use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ModelError;

/// Literal stored in `prefix` and `code` when a title carries no bracketed code.
pub const NONE_SENTINEL: &str = "None";

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static pattern"));

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s*-\s*(.*?)\s*-\s*(\[.*\])$").expect("static pattern")
});

/// A released product (booster, starter deck, promo set) listed in the
/// catalog's series selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pack {
    /// Site-assigned identifier, sent back as the `series` query parameter.
    pub series: String,
    /// Release family, e.g. "Starter Deck".
    pub prefix: String,
    pub name: String,
    /// Short release code, e.g. "ST01".
    pub code: String,
}

impl Pack {
    /// Build a pack from a display title of the form `<prefix> - <name> - [<code>]`.
    ///
    /// Titles without the bracketed code are accepted as-is: the whole title
    /// becomes the name and `prefix`/`code` are set to [`NONE_SENTINEL`].
    pub fn from_title(title: &str, series: impl Into<String>) -> Result<Self, ModelError> {
        let sanitized = strip_markup(title);
        let sanitized = sanitized.trim();
        if sanitized.is_empty() {
            return Err(ModelError::InvalidTitleFormat(title.to_string()));
        }

        let series = series.into();
        let pack = match TITLE_RE.captures(sanitized) {
            Some(caps) => {
                let code = caps[3].trim().trim_start_matches('[').trim_end_matches(']');
                Self {
                    series,
                    prefix: caps[1].trim().to_string(),
                    name: caps[2].trim().to_string(),
                    code: code.trim().to_string(),
                }
            }
            None => Self {
                series,
                prefix: NONE_SENTINEL.to_string(),
                name: sanitized.to_string(),
                code: NONE_SENTINEL.to_string(),
            },
        };

        if pack.name.is_empty() && pack.code.is_empty() {
            return Err(ModelError::InvalidTitleFormat(title.to_string()));
        }
        Ok(pack)
    }

    /// Whether this pack can be used to look up its card list.
    pub fn is_usable(&self) -> bool {
        !self.series.trim().is_empty() && !self.code.is_empty() && self.code != NONE_SENTINEL
    }
}

/// Remove `<...>` tags from a string.
pub fn strip_markup(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

#[cfg(test)]
#[path = "tests/pack_tests.rs"]
mod tests;
