use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use optcg_scraper::{ConfigSource, ScraperConfig};

use crate::error::CliError;

/// Show current settings and their sources.
pub(crate) fn run_config_show(config: &ScraperConfig) {
    let path = optcg_scraper::config_path();
    let sources = optcg_scraper::config_sources();

    println!(
        "{}",
        "Scraper Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    match &path {
        Some(p) if p.exists() => println!(
            "  Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => println!(
            "  Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => println!(
            "  Config file: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
    println!();

    let fields: [(&str, String, &ConfigSource); 6] = [
        ("base_url", config.base_url.clone(), &sources.base_url),
        (
            "output_dir",
            config.output_dir.display().to_string(),
            &sources.output_dir,
        ),
        (
            "image_dir",
            config.image_dir.display().to_string(),
            &sources.image_dir,
        ),
        (
            "cache_ttl_secs",
            config.cache_ttl_secs.to_string(),
            &sources.cache_ttl_secs,
        ),
        ("use_cache", config.use_cache.to_string(), &sources.use_cache),
        (
            "debug_dir",
            config.debug_dir.display().to_string(),
            &sources.debug_dir,
        ),
    ];

    for (name, value, source) in fields {
        println!(
            "  {} {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value,
            format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = optcg_scraper::config_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    println!("{}", path.display());
    Ok(())
}

/// Write the effective settings to the config file.
pub(crate) fn run_config_init(config: &ScraperConfig, force: bool) -> Result<(), CliError> {
    if let Some(path) = optcg_scraper::config_path().filter(|p| p.exists()) {
        if !force {
            return Err(CliError::other(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
    }

    let path = optcg_scraper::save_to_file(config)?;
    println!(
        "{} Config saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
