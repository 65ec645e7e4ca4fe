//! Application constants for the NAV extractor
//!
//! Feed markers, output headers, default file names and fetch settings
//! used throughout the extractor.

// =============================================================================
// Feed Format
// =============================================================================

/// Default location of the AMFI NAV feed
pub const DEFAULT_FEED_URL: &str = "https://www.amfiindia.com/spages/NAVAll.txt";

/// Field separator used by the feed
pub const FIELD_DELIMITER: char = ';';

/// Prefix of the column header line repeated throughout the feed
pub const COLUMN_HEADER_PREFIX: &str = "Scheme Code";

/// Prefixes of the section title lines grouping schemes by category
pub const SECTION_TITLE_PREFIXES: &[&str] = &[
    "Open Ended Schemes",
    "Close Ended Schemes",
    "Interval Fund Schemes",
];

/// Minimum number of fields for a line to carry a scheme record
pub const MIN_DATA_FIELDS: usize = 5;

/// Zero-based index of the scheme name field
pub const SCHEME_NAME_FIELD: usize = 3;

/// Zero-based index of the net asset value field
pub const NAV_FIELD: usize = 4;

/// Sentinel published when no NAV is available for a scheme
pub const NOT_AVAILABLE: &str = "N.A.";

// =============================================================================
// Output Format
// =============================================================================

/// Header line of the TSV artifact
pub const TSV_HEADER: &str = "Scheme_Name\tNet_Asset_Value";

/// JSON key holding the scheme name
pub const JSON_NAME_KEY: &str = "scheme_name";

/// JSON key holding the net asset value
pub const JSON_NAV_KEY: &str = "nav";

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_TSV_FILE: &str = "nav_data.tsv";
pub const DEFAULT_JSON_FILE: &str = "nav_data.json";
pub const DEFAULT_RAW_FILE: &str = "NAVAll.txt";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Number of leading records shown in the summary
pub const DEFAULT_PREVIEW_RECORDS: usize = 5;

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_FETCH_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2_000;
pub const DEFAULT_USER_AGENT: &str = concat!("nav-extractor/", env!("CARGO_PKG_VERSION"));

/// Configuration directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "nav-extractor";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment overrides
pub const ENV_FEED_URL: &str = "NAV_EXTRACTOR_URL";
pub const ENV_OUTPUT_DIR: &str = "NAV_EXTRACTOR_OUTPUT_DIR";
