//! AMFI NAV feed parsing.
//!
//! The feed is a semicolon-delimited text file interleaving scheme records
//! with repeated column headers, section titles (scheme categories) and
//! fund house names. Parsing is split into:
//! - [`classifier`] - decides whether a raw line carries a record
//! - [`normalizer`] - cleans the scheme name and NAV fields into a [`Record`]
//! - [`parser`] - drives both over a whole feed, collecting [`ParseStats`]
//!
//! [`Record`]: crate::models::Record
//! [`ParseStats`]: crate::models::ParseStats

pub mod classifier;
pub mod normalizer;
pub mod parser;

#[cfg(test)]
pub(crate) mod tests;

pub use classifier::classify_line;
pub use normalizer::normalize;
pub use parser::{parse_file, parse_reader, parse_str};
