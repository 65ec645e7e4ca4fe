//! End-to-end extraction workflow.
//!
//! Obtains the feed (download or local file), parses it, writes the selected
//! artifacts and computes the summary. The summary is read back from the TSV
//! artifact once it is fully written; without a TSV it is computed from the
//! parsed records.

use crate::config::Config;
use crate::emit::{ArtifactReport, ArtifactWriter, to_json};
use crate::error::{NavError, Result};
use crate::feed::parse_file;
use crate::fetch::fetch_feed;
use crate::models::{ParseStats, Record, SummaryStats};
use crate::summary::{summarize, summarize_tsv};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Which artifacts a run produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputSelection {
    #[default]
    Both,
    TsvOnly,
    JsonOnly,
}

impl OutputSelection {
    pub fn writes_tsv(self) -> bool {
        matches!(self, OutputSelection::Both | OutputSelection::TsvOnly)
    }

    pub fn writes_json(self) -> bool {
        matches!(self, OutputSelection::Both | OutputSelection::JsonOnly)
    }
}

/// Where the raw feed comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// Download from the configured feed URL
    Remote,
    /// Read an existing local file
    Local(PathBuf),
}

/// Outcome of one extraction run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub source: String,
    pub downloaded_bytes: Option<u64>,
    pub parse_stats: ParseStats,
    pub summary: SummaryStats,
    pub tsv: Option<ArtifactReport>,
    pub json: Option<ArtifactReport>,
    /// JSON failure that did not stop the run
    pub json_error: Option<String>,
    /// Leading records in feed order
    pub preview: Vec<Record>,
    pub elapsed: Duration,
}

/// Extraction pipeline bound to one configuration
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    selection: OutputSelection,
    show_progress: bool,
}

impl Pipeline {
    pub fn new(config: Config, selection: OutputSelection) -> Self {
        Self {
            config,
            selection,
            show_progress: false,
        }
    }

    /// Show a download progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full workflow for the given source
    ///
    /// A downloaded feed goes to the configured raw file only when it is
    /// kept; otherwise it lands in a temporary directory that is removed
    /// after extraction, so an existing raw file is never touched.
    pub async fn run(&self, source: &FeedSource) -> Result<RunReport> {
        match source {
            FeedSource::Local(path) => self.extract(path),
            FeedSource::Remote => {
                fs::create_dir_all(&self.config.output_dir).map_err(|e| {
                    NavError::output_write(&self.config.output_dir, e.to_string())
                })?;

                let download_dir = if self.config.keep_raw {
                    None
                } else {
                    Some(
                        tempfile::Builder::new()
                            .prefix(".nav-download")
                            .tempdir_in(&self.config.output_dir)
                            .map_err(|e| {
                                NavError::output_write(&self.config.output_dir, e.to_string())
                            })?,
                    )
                };
                let raw_path = match &download_dir {
                    Some(dir) => dir.path().join(&self.config.raw_file_name),
                    None => self.config.raw_path(),
                };

                info!("Downloading {}", self.config.feed_url);
                let bytes = fetch_feed(
                    &self.config.fetch,
                    &self.config.feed_url,
                    &raw_path,
                    self.show_progress,
                )
                .await?;

                let result = self.extract(&raw_path);

                if let Some(dir) = download_dir {
                    if let Err(e) = dir.close() {
                        warn!("Could not remove downloaded feed {}: {}", raw_path.display(), e);
                    }
                }

                let mut report = result?;
                report.source = self.config.feed_url.clone();
                report.downloaded_bytes = Some(bytes);
                Ok(report)
            }
        }
    }

    /// Parse a local feed file and write the selected artifacts
    pub fn extract(&self, feed_path: &Path) -> Result<RunReport> {
        self.extract_with(feed_path, to_json)
    }

    fn extract_with<F>(&self, feed_path: &Path, render_json: F) -> Result<RunReport>
    where
        F: Fn(&[Record]) -> Result<String>,
    {
        let started_at = Local::now();
        let start = Instant::now();

        let feed = parse_file(feed_path)?;
        info!(
            "Extracted {} records from {} lines",
            feed.records.len(),
            feed.stats.lines_read
        );

        let writer = ArtifactWriter::new(&self.config.output_dir)?;

        let tsv = if self.selection.writes_tsv() {
            let report = writer.write_tsv(&self.config.tsv_file_name, &feed.records)?;
            info!("TSV: {} records -> {}", report.records, report.path.display());
            Some(report)
        } else {
            None
        };

        let mut json_error = None;
        let json = if self.selection.writes_json() {
            let rendered = render_json(&feed.records);
            match writer.write_rendered_json(
                &self.config.json_file_name,
                feed.records.len(),
                rendered,
            ) {
                Ok(report) => {
                    info!("JSON: {} records -> {}", report.records, report.path.display());
                    Some(report)
                }
                Err(e) if e.is_recoverable() => {
                    warn!("Skipping JSON output: {}", e);
                    json_error = Some(e.to_string());
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let summary = match &tsv {
            Some(report) => summarize_tsv(&report.path)?,
            None => summarize(&feed.records),
        };
        debug!("Summary: {:?}", summary);

        let preview = feed
            .records
            .iter()
            .take(self.config.preview_records)
            .cloned()
            .collect();

        Ok(RunReport {
            started_at,
            source: feed_path.display().to_string(),
            downloaded_bytes: None,
            parse_stats: feed.stats,
            summary,
            tsv,
            json,
            json_error,
            preview,
            elapsed: start.elapsed(),
        })
    }
}
