//! METRICS.md

use super::markdown::{code, format_size, number, skipped_files_section, table, NO_FILES_FOUND};
use super::{ReportKind, ReportRenderer};
use crate::models::analysis::Analysis;
use crate::models::metrics::{format_percentage, MetricsSummary, SizeBucket};

/// Renderer for size and language metrics
pub struct MetricsReport;

impl ReportRenderer for MetricsReport {
    fn kind(&self) -> ReportKind {
        ReportKind::Metrics
    }

    fn render(&self, analysis: &Analysis) -> String {
        let mut output = String::from("# Code Metrics\n\n");
        if analysis.is_empty() {
            output.push_str(NO_FILES_FOUND);
            return output;
        }

        let metrics = &analysis.metrics;
        output.push_str(&summary(metrics));
        output.push('\n');
        output.push_str(&by_language(metrics));
        output.push('\n');
        output.push_str(&by_directory(metrics));
        output.push('\n');
        output.push_str(&complexity(metrics));
        output.push('\n');
        output.push_str(&skipped_files_section(&analysis.skipped()));
        output
    }
}

fn summary(metrics: &MetricsSummary) -> String {
    let total = &metrics.total;
    let rows = vec![
        vec!["Files".to_string(), number(total.files as u64)],
        vec!["Lines".to_string(), number(total.lines as u64)],
        vec!["Size".to_string(), format_size(total.bytes)],
        vec!["Estimated tokens".to_string(), format!("~{}", number(total.tokens))],
        vec!["Languages".to_string(), metrics.by_language.len().to_string()],
        vec!["Binary files".to_string(), metrics.binary_files.to_string()],
    ];

    let mut output = String::from("## Summary\n\n");
    output.push_str(&table(&["Metric", "Value"], &rows));
    output
}

fn by_language(metrics: &MetricsSummary) -> String {
    let rows: Vec<Vec<String>> = metrics
        .languages_by_lines()
        .into_iter()
        .map(|(language, stats)| {
            vec![
                language.to_string(),
                number(stats.files as u64),
                number(stats.lines as u64),
                format_size(stats.bytes),
                format_percentage(metrics.language_share(language)),
            ]
        })
        .collect();

    let mut output = String::from("## By Language\n\n");
    output.push_str(&table(&["Language", "Files", "Lines", "Size", "Share of lines"], &rows));
    output.push_str(
        "\nShares are rounded to one decimal place, so they may not add up to exactly 100.0%.\n",
    );
    output
}

fn by_directory(metrics: &MetricsSummary) -> String {
    let rows: Vec<Vec<String>> = metrics
        .directories_by_lines()
        .into_iter()
        .map(|(dir, stats)| {
            let display = if dir == "." {
                "(root)".to_string()
            } else {
                code(&format!("{}/", dir))
            };
            vec![
                display,
                number(stats.files as u64),
                number(stats.lines as u64),
                format_size(stats.bytes),
            ]
        })
        .collect();

    let mut output = String::from("## By Directory\n\n");
    output.push_str(&table(&["Directory", "Files", "Lines", "Size"], &rows));
    output
}

fn complexity(metrics: &MetricsSummary) -> String {
    let mut output = String::from("## Complexity\n\n### Size Distribution\n\n");
    let rows: Vec<Vec<String>> = SizeBucket::ALL
        .iter()
        .map(|bucket| {
            let count = metrics.size_distribution.get(bucket).copied().unwrap_or(0);
            vec![bucket.label().to_string(), count.to_string()]
        })
        .collect();
    output.push_str(&table(&["File size", "Files"], &rows));
    output.push_str(&format!(
        "\nAverage lines per text file: {:.1}\n",
        metrics.average_lines()
    ));

    output.push_str("\n### Largest Files\n\n");
    if metrics.largest_files.is_empty() {
        output.push_str("No text files.\n");
    } else {
        let rows: Vec<Vec<String>> = metrics
            .largest_files
            .iter()
            .map(|file| {
                vec![
                    code(&file.path),
                    number(file.lines as u64),
                    format_size(file.bytes),
                ]
            })
            .collect();
        output.push_str(&table(&["File", "Lines", "Size"], &rows));
    }
    output
}
