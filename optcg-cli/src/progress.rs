//! Progress display for a fetch-all walk.
//!
//! Starts as a spinner while the pack list loads, then turns into a bar
//! counting packs once the total is known.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use optcg_scraper::WalkEvent;

pub(crate) struct WalkProgress {
    bar: ProgressBar,
    total: usize,
}

impl WalkProgress {
    /// When `quiet` is true nothing is drawn.
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                    .expect("static pattern")
                    .tick_chars("/-\\|"),
            );
            pb
        };
        Self { bar, total: 0 }
    }

    pub(crate) fn handle(&mut self, event: &WalkEvent) {
        match event {
            WalkEvent::FetchingPacks => {
                self.bar.set_message("Fetching pack list...");
                self.bar.enable_steady_tick(Duration::from_millis(100));
            }
            WalkEvent::PacksFound { total } => {
                self.total = *total;
                self.bar.set_length(*total as u64);
                self.bar.set_position(0);
                self.bar.set_style(
                    ProgressStyle::with_template(
                        "  {spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .expect("static pattern")
                    .tick_chars("/-\\|")
                    .progress_chars("=> "),
                );
            }
            WalkEvent::PackStarted { index, code } => {
                self.bar
                    .set_message(format!("[{}/{}] {}", index + 1, self.total, code));
            }
            WalkEvent::PackCompleted { index, code, cards } => {
                self.bar.set_message(format!(
                    "[{}/{}] {} -> {} cards",
                    index + 1,
                    self.total,
                    code,
                    cards
                ));
                self.bar.inc(1);
            }
            WalkEvent::PackSkipped {
                index,
                code,
                reason,
            } => {
                self.bar.set_message(format!(
                    "[{}/{}] Skipped {}: {}",
                    index + 1,
                    self.total,
                    code,
                    reason
                ));
                self.bar.inc(1);
            }
            WalkEvent::PackFailed { index, code, error } => {
                self.bar.set_message(format!(
                    "[{}/{}] {} failed: {}",
                    index + 1,
                    self.total,
                    code,
                    error
                ));
                self.bar.inc(1);
            }
            WalkEvent::Done => self.finish(),
        }
    }

    pub(crate) fn finish(&self) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
    }
}

/// Render events until the sending walker is dropped.
pub(crate) fn drive(events: Receiver<WalkEvent>, quiet: bool) {
    let mut progress = WalkProgress::new(quiet);
    for event in events {
        progress.handle(&event);
    }
    progress.finish();
}
