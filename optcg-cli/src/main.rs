//! optcg-scrape CLI
//!
//! Command-line interface for scraping packs and cards from the One Piece
//! Card Game card list.

mod cli_types;
mod commands;
mod error;
mod progress;

use clap::Parser;
use log::LevelFilter;

use optcg_scraper::{ScrapeRequest, ScraperConfig};

use cli_types::{CacheAction, Cli, Commands, ConfigAction, ConfigOverrides};
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

/// Logs go to stderr so stdout only carries command output. `RUST_LOG`
/// overrides the level picked from the flags.
fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        LevelFilter::Debug
    } else if cli.verbose {
        LevelFilter::Info
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format_target(false);
    if cli.debug || cli.verbose {
        builder.format_timestamp_secs();
    } else {
        builder.format_timestamp(None);
    }
    builder.parse_env("RUST_LOG");
    builder.init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli.overrides)?;

    match cli.command {
        Commands::Packs { action, output } => {
            let mut request = ScrapeRequest::packs(output.format.clone())
                .with_debug(cli.debug)
                .with_verbose(cli.verbose);
            request.action = action;
            commands::scrape::run(config, request, &output, cli.quiet)
        }
        Commands::Cards {
            series_id,
            all,
            output,
        } => {
            let mut request = ScrapeRequest::cards(
                series_id.unwrap_or_default(),
                output.format.clone(),
            )
            .with_debug(cli.debug)
            .with_verbose(cli.verbose);
            if all {
                request = request.all();
            }
            commands::scrape::run(config, request, &output, cli.quiet)
        }
        Commands::Cache { action } => match action {
            CacheAction::List => commands::cache::run_cache_list(&config),
            CacheAction::Clear => commands::cache::run_cache_clear(&config),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&config);
                Ok(())
            }
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Init { force } => commands::config::run_config_init(&config, force),
        },
    }
}

/// Load the configuration and apply command-line overrides.
fn load_config(overrides: &ConfigOverrides) -> Result<ScraperConfig, CliError> {
    let mut config = ScraperConfig::load()?;
    apply_overrides(&mut config, overrides);
    Ok(config)
}

fn apply_overrides(config: &mut ScraperConfig, overrides: &ConfigOverrides) {
    if let Some(url) = &overrides.base_url {
        config.base_url = url.clone();
    }
    if let Some(dir) = &overrides.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(dir) = &overrides.image_dir {
        config.image_dir = dir.clone();
    }
    if overrides.no_cache {
        config.use_cache = false;
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn overrides_replace_loaded_values() {
        let mut config = ScraperConfig::default();
        let overrides = ConfigOverrides {
            base_url: Some("https://en.onepiece-cardgame.com".into()),
            output_dir: Some(PathBuf::from("out")),
            image_dir: None,
            no_cache: true,
        };
        apply_overrides(&mut config, &overrides);

        assert_eq!(config.base_url, "https://en.onepiece-cardgame.com");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.image_dir, ScraperConfig::default().image_dir);
        assert!(!config.use_cache);
    }

    #[test]
    fn no_overrides_keep_the_config() {
        let mut config = ScraperConfig::default();
        apply_overrides(&mut config, &ConfigOverrides::default());
        assert_eq!(config, ScraperConfig::default());
    }

    #[test]
    fn request_fatal_errors_exit_with_two() {
        use optcg_scraper::ScrapeError;

        assert_eq!(CliError::from(ScrapeError::MissingSeries).exit_code(), 2);
        assert_eq!(CliError::from(ScrapeError::other("boom")).exit_code(), 1);
        assert_eq!(CliError::config("bad").exit_code(), 1);
    }
}
