use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use optcg_scraper::{ResponseCache, ScraperConfig};

use crate::error::CliError;

/// List cached responses.
pub(crate) fn run_cache_list(config: &ScraperConfig) -> Result<(), CliError> {
    let cache = ResponseCache::in_default_dir(config.cache_ttl_secs)?;
    let entries = cache.list()?;

    if entries.is_empty() {
        println!(
            "{}",
            "No cached responses.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    println!(
        "{} {}",
        "Cached responses in".if_supports_color(Stdout, |t| t.bold()),
        cache.dir().display().if_supports_color(Stdout, |t| t.cyan()),
    );
    println!();

    for entry in &entries {
        let query = entry
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let target = if query.is_empty() {
            entry.url.clone()
        } else {
            format!("{}?{}", entry.url, query)
        };
        println!("  {}", target.if_supports_color(Stdout, |t| t.bold()));
        let state = if entry.expired { "expired" } else { "fresh" };
        println!(
            "    Size: {}, Fetched: {}, {}",
            format_bytes(entry.file_size),
            entry.fetched,
            state.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    println!();
    println!(
        "Total: {} responses, {}",
        entries.len(),
        format_bytes(cache.total_cache_size()?),
    );
    Ok(())
}

/// Remove every cached response.
pub(crate) fn run_cache_clear(config: &ScraperConfig) -> Result<(), CliError> {
    let cache = ResponseCache::in_default_dir(config.cache_ttl_secs)?;
    let freed = cache.clear()?;
    println!(
        "{} Cache cleared ({} freed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        format_bytes(freed),
    );
    Ok(())
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::format_bytes;

    #[test]
    fn bytes_are_scaled() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
