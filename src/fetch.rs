//! Feed retrieval over HTTP.
//!
//! Downloads the NAV feed to a local file with a timeout and a fixed number
//! of retries. The body is streamed into a temporary file beside the
//! destination and only moved into place once the transfer completes.

use crate::config::FetchConfig;
use crate::error::{NavError, Result};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Download `url` into `dest`, returning the number of bytes written
pub async fn fetch_feed(
    config: &FetchConfig,
    url: &str,
    dest: &Path,
    show_progress: bool,
) -> Result<u64> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .build()?;

    let attempts = config.retries + 1;
    let mut last_error = None;

    for attempt in 1..=attempts {
        debug!("Fetching {} (attempt {}/{})", url, attempt, attempts);

        match download(&client, url, dest, show_progress).await {
            Ok(bytes) => {
                info!("Downloaded {} bytes from {}", bytes, url);
                return Ok(bytes);
            }
            Err(e) => {
                warn!("Attempt {}/{} failed: {}", attempt, attempts, e);
                last_error = Some(e);
                if attempt < attempts {
                    tokio::time::sleep(config.retry_delay()).await;
                }
            }
        }
    }

    let reason = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no attempts made".to_string());
    Err(NavError::fetch(
        url,
        format!("giving up after {} attempts: {}", attempts, reason),
    ))
}

async fn download(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    show_progress: bool,
) -> Result<u64> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(NavError::fetch(url, format!("server returned {}", status)));
    }

    let progress = show_progress.then(|| progress_bar(response.content_length()));

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        temp.write_all(&chunk)?;
        written += chunk.len() as u64;
        if let Some(pb) = &progress {
            pb.set_position(written);
        }
    }

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    if written == 0 {
        return Err(NavError::fetch(url, "empty response body"));
    }

    temp.as_file().sync_all()?;
    temp.persist(dest)
        .map_err(|e| NavError::output_write(dest, e.error.to_string()))?;

    Ok(written)
}

fn progress_bar(content_length: Option<u64>) -> ProgressBar {
    match content_length {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb.set_message("Downloading NAV feed");
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Downloading NAV feed");
            pb
        }
    }
}
