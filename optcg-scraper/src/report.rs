use std::path::{Path, PathBuf};

use optcg_export::{ImageExportSummary, OutputFormat};

/// Outcome for a single pack in a fetch-all run.
#[derive(Debug, Clone)]
pub enum PackEntry {
    /// Cards rendered and written to `path`.
    Exported {
        code: String,
        series: String,
        cards: usize,
        path: PathBuf,
    },
    /// Card images downloaded into the image directory.
    Images {
        code: String,
        series: String,
        cards: usize,
        images: ImageExportSummary,
    },
    /// Pack left out on purpose (unusable identity, no cards).
    Skipped {
        code: String,
        series: String,
        reason: String,
    },
    /// Pack attempted but its cards could not be fetched or written.
    Failed {
        code: String,
        series: String,
        message: String,
    },
}

impl PackEntry {
    pub fn code(&self) -> &str {
        match self {
            Self::Exported { code, .. }
            | Self::Images { code, .. }
            | Self::Skipped { code, .. }
            | Self::Failed { code, .. } => code,
        }
    }
}

/// Collects per-pack results of a fetch-all run.
#[derive(Debug)]
pub struct WalkReport {
    format: OutputFormat,
    location: PathBuf,
    entries: Vec<PackEntry>,
}

impl WalkReport {
    pub fn new(format: OutputFormat, location: impl Into<PathBuf>) -> Self {
        Self {
            format,
            location: location.into(),
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: PackEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[PackEntry] {
        &self.entries
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Directory the run wrote into.
    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn summary(&self) -> WalkSummary {
        let mut summary = WalkSummary::default();
        for entry in &self.entries {
            match entry {
                PackEntry::Exported { cards, .. } => {
                    summary.exported += 1;
                    summary.cards += cards;
                }
                PackEntry::Images { cards, images, .. } => {
                    summary.exported += 1;
                    summary.cards += cards;
                    summary.images_downloaded += images.stored;
                    summary.images_failed += images.failed;
                }
                PackEntry::Skipped { .. } => summary.skipped += 1,
                PackEntry::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }

    /// Completion message naming the output location.
    ///
    /// Skipped and failed packs are only visible through the log and
    /// [`entries`](Self::entries).
    pub fn message(&self) -> String {
        match self.format {
            OutputFormat::Img => {
                format!("DONE downloading images to {}", self.location.display())
            }
            OutputFormat::Text | OutputFormat::Json | OutputFormat::Csv => format!(
                "DONE writing {} files to {}",
                self.format,
                self.location.display()
            ),
        }
    }

    /// Write the report to a file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Fetch-all Report ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file, "Format: {}", self.format)?;
        writeln!(file, "Output: {}", self.location.display())?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(file, "Packs exported: {} ({} cards)", summary.exported, summary.cards)?;
        writeln!(file, "Skipped: {}", summary.skipped)?;
        writeln!(file, "Failed: {}", summary.failed)?;
        if self.format == OutputFormat::Img {
            writeln!(
                file,
                "Images downloaded: {} ({} failed)",
                summary.images_downloaded, summary.images_failed
            )?;
        }
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                PackEntry::Exported {
                    code,
                    series,
                    cards,
                    path,
                } => {
                    writeln!(
                        file,
                        "[OK] {} ({}) -> {} cards in {}",
                        code,
                        series,
                        cards,
                        path.display()
                    )?;
                }
                PackEntry::Images {
                    code,
                    series,
                    cards,
                    images,
                } => {
                    writeln!(
                        file,
                        "[IMAGES] {} ({}) -> {} cards, {} downloaded, {} already present",
                        code, series, cards, images.stored, images.skipped
                    )?;
                    if images.failed > 0 || images.missing_url > 0 {
                        writeln!(
                            file,
                            "     {} failed, {} without URL",
                            images.failed, images.missing_url
                        )?;
                    }
                }
                PackEntry::Skipped {
                    code,
                    series,
                    reason,
                } => {
                    writeln!(file, "[SKIPPED] {} ({}): {}", code, series, reason)?;
                }
                PackEntry::Failed {
                    code,
                    series,
                    message,
                } => {
                    writeln!(file, "[ERROR] {} ({}): {}", code, series, message)?;
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    pub exported: usize,
    pub skipped: usize,
    pub failed: usize,
    pub cards: usize,
    pub images_downloaded: usize,
    pub images_failed: usize,
}
