//! Human-readable run summary for the console.

use crate::pipeline::RunReport;
use colored::*;

/// Print the colored run summary to stdout
pub fn print_summary(report: &RunReport, verbose: bool) {
    for line in summary_lines(report, verbose) {
        println!("{}", line);
    }
}

/// Build the summary as display lines
pub fn summary_lines(report: &RunReport, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("\n{}", "NAV Extraction Summary".bright_green().bold()));
    lines.push(format!(
        "  {} {}",
        "Source:".bright_cyan(),
        report.source.bright_white()
    ));
    if let Some(bytes) = report.downloaded_bytes {
        lines.push(format!(
            "  {} {}",
            "Downloaded:".bright_cyan(),
            format_size(bytes).bright_white()
        ));
    }
    lines.push(format!(
        "  {} {}",
        "Processed at:".bright_cyan(),
        report.started_at.format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(format!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        report.elapsed.as_millis().to_string().bright_white()
    ));

    lines.push(format!("\n{}", "Outputs".bright_yellow()));
    for (label, artifact) in [("TSV:", &report.tsv), ("JSON:", &report.json)] {
        if let Some(artifact) = artifact {
            lines.push(format!(
                "  {} {} ({} records, {})",
                label.bright_cyan(),
                artifact.path.display(),
                artifact.records.to_string().bright_white().bold(),
                format_size(artifact.bytes)
            ));
        }
    }
    if let Some(error) = &report.json_error {
        lines.push(format!("  {} {}", "JSON failed:".bright_red(), error.bright_red()));
    }

    let summary = &report.summary;
    lines.push(format!("\n{}", "Statistics".bright_yellow()));
    lines.push(format!(
        "  {} {}",
        "Total schemes:".bright_cyan(),
        summary.total.to_string().bright_white().bold()
    ));
    lines.push(format!(
        "  {} {}",
        "Valid NAV:".bright_cyan(),
        summary.valid_numeric.to_string().bright_white().bold()
    ));
    lines.push(format!(
        "  {} {}",
        "N.A. values:".bright_cyan(),
        summary.not_available.to_string().bright_white().bold()
    ));
    if summary.invalid() > 0 {
        lines.push(format!(
            "  {} {}",
            "Unrecognized NAV:".bright_red(),
            summary.invalid().to_string().bright_red().bold()
        ));
    }

    if verbose {
        let stats = &report.parse_stats;
        lines.push(format!("\n{}", "Parsing".bright_yellow()));
        lines.push(format!("  {} {}", "Lines read:".bright_cyan(), stats.lines_read));
        lines.push(format!("  {} {}", "Data lines:".bright_cyan(), stats.data_lines));
        lines.push(format!(
            "  {} {} blank, {} headers, {} section titles, {} short",
            "Skipped:".bright_cyan(),
            stats.blank,
            stats.column_headers,
            stats.section_titles,
            stats.too_few_fields
        ));
        lines.push(format!(
            "  {} {}",
            "Empty name/NAV:".bright_cyan(),
            stats.empty_fields
        ));
        for section in &stats.sections {
            lines.push(format!("    {}", section.bright_black()));
        }
    }

    if !report.preview.is_empty() {
        lines.push(format!(
            "\n{}",
            format!("First {} records", report.preview.len()).bright_yellow()
        ));
        for (i, record) in report.preview.iter().enumerate() {
            lines.push(format!(
                "  {}. {} {}",
                (i + 1).to_string().bright_yellow().bold(),
                record.name().bright_cyan(),
                record.value().bright_white()
            ));
        }
    }

    lines
}

/// Format a byte count in human-readable units
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::ArtifactReport;
    use crate::models::{ParseStats, Record, SummaryStats};
    use chrono::Local;
    use std::path::PathBuf;
    use std::time::Duration;

    fn report() -> RunReport {
        RunReport {
            started_at: Local::now(),
            source: "NAVAll.txt".to_string(),
            downloaded_bytes: Some(2048),
            parse_stats: ParseStats {
                lines_read: 10,
                sections: vec!["Open Ended Schemes(Income)".to_string()],
                ..ParseStats::default()
            },
            summary: SummaryStats {
                total: 3,
                valid_numeric: 1,
                not_available: 1,
            },
            tsv: Some(ArtifactReport {
                path: PathBuf::from("nav_data.tsv"),
                records: 3,
                bytes: 120,
            }),
            json: None,
            json_error: Some("JSON serialization failed: broken".to_string()),
            preview: vec![Record::new("Equity Fund", "150.2345").unwrap()],
            elapsed: Duration::from_millis(42),
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_summary_lines_content() {
        colored::control::set_override(false);
        let text = summary_lines(&report(), false).join("\n");

        assert!(text.contains("Source: NAVAll.txt"));
        assert!(text.contains("Downloaded: 2.00 KB"));
        assert!(text.contains("TSV: nav_data.tsv (3 records, 120 B)"));
        assert!(text.contains("JSON failed: JSON serialization failed: broken"));
        assert!(text.contains("Total schemes: 3"));
        assert!(text.contains("Valid NAV: 1"));
        assert!(text.contains("N.A. values: 1"));
        assert!(text.contains("Unrecognized NAV: 1"));
        assert!(text.contains("1. Equity Fund 150.2345"));
        assert!(!text.contains("Lines read"));
    }

    #[test]
    fn test_verbose_adds_parse_statistics() {
        colored::control::set_override(false);
        let text = summary_lines(&report(), true).join("\n");

        assert!(text.contains("Lines read: 10"));
        assert!(text.contains("Open Ended Schemes(Income)"));
    }
}
