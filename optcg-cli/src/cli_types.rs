//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use optcg_scraper::{Action, ScrapeError};

#[derive(Parser)]
#[command(name = "optcg-scrape")]
#[command(about = "Scrape packs and cards from the One Piece Card Game card list", long_about = None)]
pub(crate) struct Cli {
    /// Only show errors (suppress warnings and progress)
    #[arg(long, global = true, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    /// Show informational log messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Debug logging, and dump every fetched page to the debug directory
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Per-run overrides applied on top of the loaded configuration.
#[derive(Args, Clone, Default)]
pub(crate) struct ConfigOverrides {
    /// Card list site root (e.g., https://asia-en.onepiece-cardgame.com)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory for fetch-all output files
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Directory for downloaded card images
    #[arg(long, global = true)]
    pub image_dir: Option<PathBuf>,

    /// Always fetch live pages, bypassing the response cache
    #[arg(long, global = true)]
    pub no_cache: bool,
}

/// Arguments shared by the scraping commands.
#[derive(Args, Clone)]
pub(crate) struct OutputArgs {
    /// Output format: text, json, csv (cards also accept img)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Write a per-pack report here after a fetch-all run
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List every pack, or with `all` export every pack's cards
    Packs {
        /// `all` to walk the whole catalog
        #[arg(value_parser = parse_action)]
        action: Option<Action>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the cards of one pack
    Cards {
        /// Pack series id (the value from the pack list)
        series_id: Option<String>,

        /// Walk the whole catalog instead of a single pack
        #[arg(short, long)]
        all: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage the HTTP response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Show or write the scraper configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// List cached responses
    List,

    /// Remove every cached response
    Clear,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the config file path
    Path,

    /// Write the effective settings (including command-line overrides) to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn parse_action(s: &str) -> Result<Action, String> {
    s.parse().map_err(|e: ScrapeError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_all_parses_the_action() {
        let cli = Cli::try_parse_from(["optcg-scrape", "packs", "all", "-f", "json"]).unwrap();
        match cli.command {
            Commands::Packs { action, output } => {
                assert_eq!(action, Some(Action::All));
                assert_eq!(output.format, "json");
            }
            _ => panic!("expected packs"),
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(Cli::try_parse_from(["optcg-scrape", "packs", "some"]).is_err());
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "optcg-scrape",
            "cards",
            "556101",
            "--debug",
            "--no-cache",
            "--output-dir",
            "out",
        ])
        .unwrap();
        assert!(cli.debug);
        assert!(cli.overrides.no_cache);
        assert_eq!(cli.overrides.output_dir, Some(PathBuf::from("out")));
        match cli.command {
            Commands::Cards {
                series_id,
                all,
                output,
            } => {
                assert_eq!(series_id.as_deref(), Some("556101"));
                assert!(!all);
                assert_eq!(output.format, "text");
            }
            _ => panic!("expected cards"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["optcg-scrape", "--quiet", "-v", "packs"]).is_err());
    }
}
