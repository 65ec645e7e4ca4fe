//! Artifact writing for TSV and JSON outputs
//!
//! Outputs are written to a temporary file in the destination directory and
//! persisted only once complete, so a failed run never leaves a truncated or
//! invalid artifact behind under the final name.

use super::json::to_json;
use super::tsv::to_tsv;
use crate::error::{NavError, Result};
use crate::models::Record;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Result of writing one output artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    pub path: PathBuf,
    pub records: usize,
    pub bytes: u64,
}

/// Writes record sets into an output directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    /// Create a writer for the given directory, creating it if needed
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| {
            NavError::output_write(&output_dir, format!("cannot create directory: {}", e))
        })?;
        Ok(Self { output_dir })
    }

    /// Directory artifacts are written into
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the TSV artifact
    pub fn write_tsv(&self, file_name: &str, records: &[Record]) -> Result<ArtifactReport> {
        let path = self.output_dir.join(file_name);
        let contents = to_tsv(records);
        self.persist(&path, contents.as_bytes())?;

        debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(ArtifactReport {
            path,
            records: records.len(),
            bytes: contents.len() as u64,
        })
    }

    /// Write the JSON artifact
    ///
    /// If the document fails validation nothing is written, and any file
    /// left at the destination by an earlier run is removed.
    pub fn write_json(&self, file_name: &str, records: &[Record]) -> Result<ArtifactReport> {
        self.write_rendered_json(file_name, records.len(), to_json(records))
    }

    /// Persist an already rendered JSON document, or clear the destination
    /// when rendering failed
    pub(crate) fn write_rendered_json(
        &self,
        file_name: &str,
        records: usize,
        rendered: Result<String>,
    ) -> Result<ArtifactReport> {
        let path = self.output_dir.join(file_name);

        let contents = match rendered {
            Ok(contents) => contents,
            Err(e) => {
                remove_stale(&path);
                return Err(e);
            }
        };
        self.persist(&path, contents.as_bytes())?;

        debug!("Wrote {} records to {}", records, path.display());
        Ok(ArtifactReport {
            path,
            records,
            bytes: contents.len() as u64,
        })
    }

    fn persist(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let write_err = |e: std::io::Error| NavError::output_write(path, e.to_string());

        let mut temp = NamedTempFile::new_in(&self.output_dir).map_err(write_err)?;
        temp.write_all(contents).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(path)
            .map_err(|e| NavError::output_write(path, e.error.to_string()))?;
        Ok(())
    }
}

fn remove_stale(path: &Path) {
    if path.exists() {
        match fs::remove_file(path) {
            Ok(()) => warn!("Removed stale output {}", path.display()),
            Err(e) => warn!("Could not remove stale output {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::read_tsv;
    use crate::summary::{summarize, summarize_tsv};
    use tempfile::TempDir;

    fn records() -> Vec<Record> {
        vec![
            Record::new("Aditya Birla Sun Life Equity Fund - Growth", "150.2345").unwrap(),
            Record::new("Axis Liquid Direct Fund", "N.A.").unwrap(),
        ]
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("out").join("nav");

        let writer = ArtifactWriter::new(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(writer.output_dir(), nested.as_path());
    }

    #[test]
    fn test_write_tsv_reports_records_and_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(temp_dir.path()).unwrap();

        let report = writer.write_tsv("nav_data.tsv", &records()).unwrap();

        let written = fs::read_to_string(&report.path).unwrap();
        assert_eq!(report.records, 2);
        assert_eq!(report.bytes, written.len() as u64);
        assert_eq!(read_tsv(&written), records());
    }

    #[test]
    fn test_written_tsv_summary_matches_report() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(temp_dir.path()).unwrap();
        let records = vec![
            Record::new("\"Quoted\"\tFund ", " 10.5").unwrap(),
            Record::new("Fund\rTwo", "N.A.").unwrap(),
            Record::new("Fund Three", "-5").unwrap(),
        ];

        let report = writer.write_tsv("nav_data.tsv", &records).unwrap();
        let stats = summarize_tsv(&report.path).unwrap();

        assert_eq!(stats.total, report.records);
        assert_eq!(stats, summarize(&records));
        assert_eq!((stats.valid_numeric, stats.not_available), (1, 1));
    }

    #[test]
    fn test_write_json_is_valid_and_decodes() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(temp_dir.path()).unwrap();

        let report = writer.write_json("nav_data.json", &records()).unwrap();

        let written = fs::read_to_string(&report.path).unwrap();
        let decoded: Vec<Record> = serde_json::from_str(&written).unwrap();
        assert_eq!(decoded, records());
        assert_eq!(report.records, 2);
    }

    #[test]
    fn test_overwrites_existing_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("nav_data.tsv"), "old contents").unwrap();

        let report = writer.write_tsv("nav_data.tsv", &records()[..1]).unwrap();

        let written = fs::read_to_string(&report.path).unwrap();
        assert!(written.starts_with("Scheme_Name\tNet_Asset_Value\n"));
        assert!(!written.contains("old contents"));
    }

    #[test]
    fn test_no_temporary_files_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(temp_dir.path()).unwrap();

        writer.write_tsv("nav_data.tsv", &records()).unwrap();
        writer.write_json("nav_data.json", &records()).unwrap();

        let mut names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["nav_data.json", "nav_data.tsv"]);
    }

    #[test]
    fn test_failed_json_render_leaves_nothing_behind() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(temp_dir.path()).unwrap();
        let path = temp_dir.path().join("nav_data.json");
        fs::write(&path, "[{\"scheme_name\": \"from an earlier run\"").unwrap();

        let result = writer.write_rendered_json(
            "nav_data.json",
            2,
            Err(NavError::serialization("generated JSON does not parse")),
        );

        let err = result.unwrap_err();
        assert!(matches!(err, NavError::Serialization { .. }));
        assert!(err.is_recoverable());
        assert!(!path.exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_json_render_without_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(temp_dir.path()).unwrap();

        let result = writer.write_rendered_json(
            "nav_data.json",
            0,
            Err(NavError::serialization("broken")),
        );

        assert!(result.is_err());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_remove_stale_deletes_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nav_data.json");
        fs::write(&path, "[{broken").unwrap();

        remove_stale(&path);

        assert!(!path.exists());
    }
}
