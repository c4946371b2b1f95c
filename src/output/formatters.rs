//! Run summary formatting
//!
//! This module renders the end-of-run summary as terminal text or JSON.

use crate::error::{CartographerError, Result};
use crate::output::summary::RunSummary;
use crate::output::update::ReportChange;
use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;

/// Format the run summary as text
pub fn format_summary_text(summary: &RunSummary, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    let title = format!("Cartographer: {}", summary.root);
    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint(title)));
    } else {
        output.push_str(&format!("{}\n\n", title));
    }

    output.push_str(&format!(
        "Files: {} ({} lines, {} languages)\n",
        summary.files, summary.lines, summary.languages
    ));
    output.push_str(&format!(
        "Imports: {} internal, {} external packages\n",
        summary.internal_imports, summary.external_packages
    ));

    let cycles = format!("Circular dependencies: {}", summary.cycles);
    if use_colors && summary.cycles > 0 {
        output.push_str(&format!("{}\n", Yellow.paint(cycles)));
    } else {
        output.push_str(&format!("{}\n", cycles));
    }

    let security = format!(
        "Security findings: {} critical, {} warning, {} info",
        summary.critical_findings, summary.warning_findings, summary.info_findings
    );
    if use_colors && summary.critical_findings > 0 {
        output.push_str(&format!("{}\n", Red.bold().paint(security)));
    } else if use_colors && summary.warning_findings > 0 {
        output.push_str(&format!("{}\n", Yellow.paint(security)));
    } else {
        output.push_str(&format!("{}\n", security));
    }

    output.push_str(&format!("Markers: {}\n", summary.markers));
    if summary.skipped_files > 0 {
        output.push_str(&format!("Skipped files: {}\n", summary.skipped_files));
    }
    output.push_str(&format!("Duration: {}\n", format_duration(summary.duration_ms)));

    output.push('\n');
    if summary.written {
        output.push_str(&format!("Reports written to {}\n", summary.output_dir));
    } else {
        output.push_str(&format!("Reports in {} are up to date\n", summary.output_dir));
    }

    if verbose || summary.reports.iter().any(|r| r.change != ReportChange::Unchanged) {
        for report in &summary.reports {
            let status = match report.change {
                ReportChange::Updated { added, removed } => format!("updated (+{} -{})", added, removed),
                other => other.label().to_string(),
            };
            let status = if use_colors {
                match report.change {
                    ReportChange::Created => Green.paint(status).to_string(),
                    ReportChange::Updated { .. } => Yellow.paint(status).to_string(),
                    ReportChange::Unchanged => Style::new().dimmed().paint(status).to_string(),
                }
            } else {
                status
            };
            output.push_str(&format!("  {:<20} {}\n", report.kind.file_name(), status));
        }
    }

    output
}

/// Single-line summary for quiet mode
pub fn format_summary_quiet(summary: &RunSummary) -> String {
    format!(
        "{} files, {} critical findings, {} reports changed\n",
        summary.files,
        summary.critical_findings,
        summary.changed()
    )
}

/// Format the run summary as JSON
pub fn format_summary_json(summary: &RunSummary, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(summary)
    } else {
        serde_json::to_string(summary)
    };
    json.map(|mut s| {
        s.push('\n');
        s
    })
    .map_err(|source| CartographerError::JsonSerialize { source })
}

/// `850ms`, `2.35s`, `1m 05s`
pub fn format_duration(millis: u64) -> String {
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.2}s", millis as f64 / 1000.0)
    } else {
        format!("{}m {:02}s", millis / 60_000, (millis % 60_000) / 1000)
    }
}
