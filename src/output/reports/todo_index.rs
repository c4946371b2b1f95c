//! TODO_INDEX.md

use super::markdown::{code, table, NO_FILES_FOUND};
use super::{ReportKind, ReportRenderer};
use crate::models::analysis::Analysis;
use crate::models::finding::{Finding, FindingKind, Priority};
use std::collections::BTreeMap;

/// Renderer for comment markers
pub struct TodoIndexReport;

impl ReportRenderer for TodoIndexReport {
    fn kind(&self) -> ReportKind {
        ReportKind::TodoIndex
    }

    fn render(&self, analysis: &Analysis) -> String {
        let mut output = String::from("# TODO Index\n\n");
        if analysis.is_empty() {
            output.push_str(NO_FILES_FOUND);
            return output;
        }

        output.push_str(&summary(analysis));
        output.push('\n');
        output.push_str(&by_priority(analysis));
        output.push('\n');
        output.push_str(&by_file(analysis));
        output
    }
}

fn summary(analysis: &Analysis) -> String {
    let mut rows: Vec<Vec<String>> = FindingKind::MARKERS
        .iter()
        .map(|kind| {
            vec![
                kind.label().to_string(),
                kind.priority().map(|p| p.label()).unwrap_or("-").to_string(),
                analysis.marker_count(*kind).to_string(),
            ]
        })
        .collect();
    rows.push(vec![
        "Total".to_string(),
        String::new(),
        analysis.markers().count().to_string(),
    ]);

    let mut output = String::from("## Summary\n\n");
    output.push_str(&table(&["Marker", "Priority", "Count"], &rows));
    output
}

fn by_priority(analysis: &Analysis) -> String {
    let mut output = String::from("## By Priority\n");
    for priority in Priority::ALL {
        output.push_str(&format!("\n### {} ({})\n\n", priority.label(), priority.markers()));
        let markers = analysis.markers_with(priority);
        if markers.is_empty() {
            output.push_str("None.\n");
            continue;
        }
        let rows: Vec<Vec<String>> = markers
            .iter()
            .map(|finding| {
                vec![
                    code(&finding.file),
                    finding.line.to_string(),
                    finding.category.clone(),
                    finding.text.clone(),
                ]
            })
            .collect();
        output.push_str(&table(&["File", "Line", "Marker", "Text"], &rows));
    }
    output
}

fn by_file(analysis: &Analysis) -> String {
    let mut output = String::from("## By File\n\n");
    let mut files: BTreeMap<&str, Vec<&Finding>> = BTreeMap::new();
    for finding in analysis.markers() {
        files.entry(&finding.file).or_default().push(finding);
    }

    if files.is_empty() {
        output.push_str("No TODO, FIXME, HACK, XXX or BUG markers found.\n");
        return output;
    }

    let count = files.len();
    for (i, (file, markers)) in files.into_iter().enumerate() {
        output.push_str(&format!("### {} ({})\n\n", code(file), markers.len()));
        for finding in markers {
            output.push_str(&format!(
                "- Line {} **{}**: {}\n",
                finding.line, finding.category, finding.text
            ));
        }
        if i + 1 < count {
            output.push('\n');
        }
    }
    output
}
