//! Output serialization for extracted NAV records
//!
//! - [`tsv`] - tab-separated rendering and re-reading
//! - [`json`] - JSON array rendering with escaping and validation
//! - [`writer`] - writes validated artifacts to disk

pub mod json;
pub mod tsv;
pub mod writer;

pub use json::to_json;
pub use tsv::{read_tsv, to_tsv};
pub use writer::{ArtifactReport, ArtifactWriter};
