//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then environment variables, then command-line flags.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_FEED_URL, DEFAULT_FETCH_RETRIES,
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_JSON_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_PREVIEW_RECORDS,
    DEFAULT_RAW_FILE, DEFAULT_RETRY_DELAY_MS, DEFAULT_TSV_FILE, DEFAULT_USER_AGENT, ENV_FEED_URL,
    ENV_OUTPUT_DIR,
};
use crate::error::{NavError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// HTTP settings for retrieving the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Additional attempts after the first failure
    pub retries: u32,

    /// Pause between attempts in milliseconds
    pub retry_delay_ms: u64,

    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            retries: DEFAULT_FETCH_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Global configuration for NAV extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the semicolon-delimited NAV feed
    pub feed_url: String,

    /// Directory receiving the TSV, JSON and raw feed files
    pub output_dir: PathBuf,

    pub tsv_file_name: String,
    pub json_file_name: String,

    /// File name used for the downloaded feed
    pub raw_file_name: String,

    /// Keep the downloaded feed after extraction
    pub keep_raw: bool,

    /// Number of leading records shown in the summary
    pub preview_records: usize,

    pub fetch: FetchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            tsv_file_name: DEFAULT_TSV_FILE.to_string(),
            json_file_name: DEFAULT_JSON_FILE.to_string(),
            raw_file_name: DEFAULT_RAW_FILE.to_string(),
            keep_raw: false,
            preview_records: DEFAULT_PREVIEW_RECORDS,
            fetch: FetchConfig::default(),
        }
    }
}

impl Config {
    /// Default config file location under the platform config directory
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| NavError::configuration("Could not determine user config directory"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            NavError::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
            .map_err(|e| NavError::configuration(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text; missing keys take defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| NavError::configuration(format!("invalid TOML: {}", e)))
    }

    /// Load defaults, then the config file (if any), then the environment
    ///
    /// An explicit `config_file` must exist; otherwise the default location
    /// is used only when present.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => {
                    debug!("Using config file: {}", path.display());
                    Self::from_file(&path)?
                }
                _ => Self::default(),
            },
        };

        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Apply environment overrides using the given lookup
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_FEED_URL).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides feed URL", ENV_FEED_URL);
            self.feed_url = url.trim().to_string();
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides output directory", ENV_OUTPUT_DIR);
            self.output_dir = PathBuf::from(dir.trim());
        }
        self
    }

    /// Set the feed URL
    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = url.into();
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Keep the downloaded feed next to the outputs
    pub fn with_keep_raw(mut self) -> Self {
        self.keep_raw = true;
        self
    }

    /// Set the number of preview records
    pub fn with_preview_records(mut self, count: usize) -> Self {
        self.preview_records = count;
        self
    }

    pub fn tsv_path(&self) -> PathBuf {
        self.output_dir.join(&self.tsv_file_name)
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(&self.json_file_name)
    }

    pub fn raw_path(&self) -> PathBuf {
        self.output_dir.join(&self.raw_file_name)
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.feed_url.starts_with("http://") || self.feed_url.starts_with("https://")) {
            return Err(NavError::configuration(format!(
                "Feed URL must use http or https: {}",
                self.feed_url
            )));
        }

        for (label, name) in [
            ("TSV", &self.tsv_file_name),
            ("JSON", &self.json_file_name),
            ("raw feed", &self.raw_file_name),
        ] {
            if name.trim().is_empty() {
                return Err(NavError::configuration(format!(
                    "{} file name cannot be empty",
                    label
                )));
            }
            if name.contains(['/', '\\']) {
                return Err(NavError::configuration(format!(
                    "{} file name must not contain a path separator: {}",
                    label, name
                )));
            }
        }

        if self.tsv_file_name == self.json_file_name
            || self.tsv_file_name == self.raw_file_name
            || self.json_file_name == self.raw_file_name
        {
            return Err(NavError::configuration(
                "TSV, JSON and raw feed file names must differ",
            ));
        }

        if self.fetch.timeout_secs == 0 {
            return Err(NavError::configuration(
                "Fetch timeout must be greater than 0 seconds",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.tsv_path(), PathBuf::from("./nav_data.tsv"));
        assert_eq!(config.json_path(), PathBuf::from("./nav_data.json"));
        assert_eq!(config.preview_records, 5);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            output_dir = "/tmp/nav"
            keep_raw = true

            [fetch]
            retries = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/nav"));
        assert!(config.keep_raw);
        assert_eq!(config.fetch.retries, 5);
        assert_eq!(config.fetch.timeout_secs, DEFAULT_FETCH_TIMEOUT_SECS);
        assert_eq!(config.tsv_file_name, DEFAULT_TSV_FILE);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let err = Config::from_toml("output_dir = [").unwrap_err();
        assert!(matches!(err, NavError::Configuration { .. }));
    }

    #[test]
    fn test_from_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let original = Config::default()
            .with_feed_url("https://example.org/NAVAll.txt")
            .with_preview_records(10);
        fs::write(&path, toml::to_string(&original).unwrap()).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), original);
    }

    #[test]
    fn test_explicit_missing_config_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_layered(Some(temp_dir.path().join("absent.toml").as_path()));
        assert!(matches!(result, Err(NavError::Configuration { .. })));
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::default().with_env(|key| match key {
            ENV_FEED_URL => Some(" https://mirror.example/NAVAll.txt ".to_string()),
            ENV_OUTPUT_DIR => Some("/data/nav".to_string()),
            _ => None,
        });

        assert_eq!(config.feed_url, "https://mirror.example/NAVAll.txt");
        assert_eq!(config.output_dir, PathBuf::from("/data/nav"));
    }

    #[test]
    fn test_blank_environment_values_ignored() {
        let config = Config::default().with_env(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let bad_url = Config::default().with_feed_url("ftp://example.org/feed");
        assert!(bad_url.validate().is_err());

        let same_names = Config {
            json_file_name: DEFAULT_TSV_FILE.to_string(),
            ..Config::default()
        };
        assert!(same_names.validate().is_err());

        let empty_name = Config {
            tsv_file_name: " ".to_string(),
            ..Config::default()
        };
        assert!(empty_name.validate().is_err());

        let nested_name = Config {
            json_file_name: "out/nav.json".to_string(),
            ..Config::default()
        };
        assert!(nested_name.validate().is_err());

        let mut zero_timeout = Config::default();
        zero_timeout.fetch.timeout_secs = 0;
        assert!(zero_timeout.validate().is_err());
    }
}
