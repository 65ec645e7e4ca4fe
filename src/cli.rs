//! Command-line interface components.

use crate::config::Config;
use crate::pipeline::{FeedSource, OutputSelection, Pipeline, RunReport};
use crate::report::print_summary;
use anyhow::{Context, Result};
use clap::Parser;
use std::future::Future;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Download the AMFI NAV feed and convert it to TSV and JSON
#[derive(Parser, Debug, Clone)]
#[command(name = "nav-extractor")]
#[command(about = "Extract scheme names and NAVs from the AMFI feed into TSV and JSON")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Read the feed from a local file instead of downloading it
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory for the TSV and JSON outputs
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Feed URL to download from
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only write the TSV output
    #[arg(long, conflicts_with = "json_only")]
    pub tsv_only: bool,

    /// Only write the JSON output
    #[arg(long)]
    pub json_only: bool,

    /// Keep the downloaded feed next to the outputs
    #[arg(long)]
    pub keep_raw: bool,

    /// Number of leading records to show in the summary
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub preview: Option<usize>,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Which artifacts to produce
    pub fn output_selection(&self) -> OutputSelection {
        if self.tsv_only {
            OutputSelection::TsvOnly
        } else if self.json_only {
            OutputSelection::JsonOnly
        } else {
            OutputSelection::Both
        }
    }

    /// Where to read the feed from
    pub fn feed_source(&self) -> FeedSource {
        match &self.input {
            Some(path) => FeedSource::Local(path.clone()),
            None => FeedSource::Remote,
        }
    }

    /// Log level for the tracing filter
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Progress bars are shown unless quiet
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(url) = &self.url {
            config = config.with_feed_url(url.clone());
        }
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir.clone());
        }
        if self.keep_raw {
            config = config.with_keep_raw();
        }
        if let Some(count) = self.preview {
            config = config.with_preview_records(count);
        }
        config
    }

    /// Load layered configuration and apply these arguments
    pub fn resolve_config(&self) -> crate::Result<Config> {
        let config = self.apply_overrides(Config::load_layered(self.config.as_deref())?);
        config.validate()?;
        Ok(config)
    }
}

/// Run the extractor for parsed command-line arguments
pub async fn run(args: Args) -> Result<RunReport> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    let config = args
        .resolve_config()
        .context("Failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);

    let selection = args.output_selection();
    info!("Writing {:?} to {}", selection, config.output_dir.display());

    let pipeline = Pipeline::new(config, selection).with_progress(args.show_progress());
    let report = pipeline
        .run(&args.feed_source())
        .await
        .context("NAV extraction failed")?;

    if !args.quiet {
        print_summary(&report, args.verbose > 0);
    }

    Ok(report)
}

/// Resolve once the given interrupt signal fires
///
/// If the handler cannot be installed the run continues without Ctrl-C
/// support: the returned future never resolves.
pub async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nav_extractor={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // A subscriber may already be installed when embedded or under test
    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}
