use std::path::Path;
use std::sync::mpsc;
use std::thread;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use optcg_core::Fetcher;
use optcg_scraper::{
    CachedFetcher, CatalogWalker, HttpFetcher, HttpImageStore, ResponseCache, ScrapeOutcome,
    ScrapeRequest, ScraperConfig, WalkReport,
};

use crate::cli_types::OutputArgs;
use crate::error::CliError;
use crate::progress;

/// Everything a scraping command needs: a fetcher, an image store and the
/// resolved configuration.
pub(crate) struct Session {
    fetcher: Box<dyn Fetcher>,
    images: HttpImageStore,
    config: ScraperConfig,
}

impl Session {
    /// Build the HTTP stack, wrapping the fetcher in the response cache
    /// unless caching is turned off.
    pub(crate) fn open(config: ScraperConfig) -> Result<Self, CliError> {
        let http = optcg_scraper::http_client()?;
        let live = HttpFetcher::with_client(http.clone());
        let fetcher: Box<dyn Fetcher> = if config.use_cache {
            let cached =
                CachedFetcher::new(live, ResponseCache::in_default_dir(config.cache_ttl_secs)?);
            log::debug!("Using response cache at {}", cached.cache().dir().display());
            Box::new(cached)
        } else {
            log::debug!("Response cache disabled");
            Box::new(live)
        };

        Ok(Self {
            fetcher,
            images: HttpImageStore::with_client(http),
            config,
        })
    }
}

/// `packs` and `cards` without `all`: print the rendered listing, or the
/// completion message for an image download.
pub(crate) fn run_listing(
    session: &Session,
    request: &ScrapeRequest,
) -> Result<(), CliError> {
    let outcome = optcg_scraper::execute(
        request,
        session.fetcher.as_ref(),
        &session.images,
        &session.config,
    )?;
    match outcome {
        ScrapeOutcome::Formatted(body) => {
            if !body.is_empty() {
                println!("{}", body);
            }
        }
        ScrapeOutcome::Completed(message) => print_done(&message),
    }
    Ok(())
}

/// Fetch-all: walk every pack with a progress display, then print the
/// completion message and an optional report.
pub(crate) fn run_fetch_all(
    session: &Session,
    request: &ScrapeRequest,
    output: &OutputArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let config = session
        .config
        .clone()
        .with_debug(session.config.debug || request.debug);

    let (tx, rx) = mpsc::channel();
    let report = thread::scope(|s| {
        s.spawn(move || progress::drive(rx, quiet));
        CatalogWalker::new(session.fetcher.as_ref(), &session.images, config)
            .with_events(tx)
            .fetch_all_report(&request.format)
    })?;

    print_done(&report.message());
    print_summary(&report);

    if let Some(path) = &output.report {
        write_report(&report, path)?;
    }
    Ok(())
}

fn print_done(message: &str) {
    println!(
        "{} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        message,
    );
}

fn print_summary(report: &WalkReport) {
    let summary = report.summary();
    log::info!(
        "  {} packs exported ({} cards), {} skipped, {} failed",
        summary.exported,
        summary.cards,
        summary.skipped,
        summary.failed,
    );
    if summary.images_downloaded > 0 || summary.images_failed > 0 {
        log::info!(
            "  {} images downloaded, {} failed",
            summary.images_downloaded,
            summary.images_failed,
        );
    }
    if summary.failed > 0 {
        log::warn!(
            "{} {} of {} packs failed",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            summary.failed,
            report.entries().len(),
        );
    }
}

fn write_report(report: &WalkReport, path: &Path) -> Result<(), CliError> {
    report.write_to_file(path)?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

/// Route a parsed command to listing or fetch-all mode.
pub(crate) fn run(
    config: ScraperConfig,
    request: ScrapeRequest,
    output: &OutputArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let session = Session::open(config)?;
    if request.is_fetch_all() {
        run_fetch_all(&session, &request, output, quiet)
    } else {
        if output.report.is_some() {
            log::warn!("--report only applies to fetch-all runs; ignoring");
        }
        run_listing(&session, &request)
    }
}
