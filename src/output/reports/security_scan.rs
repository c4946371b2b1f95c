//! SECURITY_SCAN.md

use super::markdown::{code, skipped_files_section, table, NO_FILES_FOUND};
use super::{ReportKind, ReportRenderer};
use crate::models::analysis::Analysis;
use crate::models::finding::{Finding, FindingKind, Severity};

const DISCLAIMER: &str = "> All findings come from pattern heuristics. They can include false positives, \
and an empty section does not prove the absence of secrets.";

/// Renderer for secret and insecure-configuration findings
pub struct SecurityScanReport;

impl ReportRenderer for SecurityScanReport {
    fn kind(&self) -> ReportKind {
        ReportKind::SecurityScan
    }

    fn render(&self, analysis: &Analysis) -> String {
        let mut output = String::from("# Security Scan\n\n");
        if analysis.is_empty() {
            output.push_str(NO_FILES_FOUND);
            return output;
        }

        output.push_str(&summary(analysis));
        for severity in Severity::ALL {
            output.push('\n');
            output.push_str(&findings_section(severity, &analysis.security_findings_with(severity)));
        }
        output.push('\n');
        output.push_str(&skipped_files_section(&analysis.skipped()));
        output.push('\n');
        output.push_str(&recommendations(analysis));
        output
    }
}

fn summary(analysis: &Analysis) -> String {
    let mut rows: Vec<Vec<String>> = Severity::ALL
        .iter()
        .map(|severity| {
            vec![
                severity.label().to_string(),
                analysis.security_findings_with(*severity).len().to_string(),
            ]
        })
        .collect();
    rows.push(vec![
        "Total".to_string(),
        analysis.security_findings().count().to_string(),
    ]);

    let scanned = analysis.files.iter().filter(|f| !f.binary).count();
    let mut output = String::from("## Summary\n\n");
    output.push_str(&table(&["Severity", "Findings"], &rows));
    output.push_str(&format!(
        "\nText files scanned: {}. Files skipped: {}.\n\n{}\n",
        scanned,
        analysis.skipped().len(),
        DISCLAIMER
    ));
    output
}

fn findings_section(severity: Severity, findings: &[&Finding]) -> String {
    let mut output = format!("## {} Findings\n\n", severity.label());
    if findings.is_empty() {
        output.push_str(&format!("No {} findings.\n", severity.label().to_lowercase()));
        return output;
    }

    let rows: Vec<Vec<String>> = findings
        .iter()
        .map(|finding| {
            vec![
                code(&finding.file),
                finding.line.to_string(),
                finding.category.clone(),
                code(&finding.text),
            ]
        })
        .collect();
    output.push_str(&table(&["File", "Line", "Category", "Match"], &rows));
    output
}

fn recommendations(analysis: &Analysis) -> String {
    let findings: Vec<&Finding> = analysis.security_findings().collect();
    let has = |kind: FindingKind, severity: Severity| {
        findings.iter().any(|f| f.kind == kind && f.severity == severity)
    };

    let mut items = Vec::new();
    if has(FindingKind::Secret, Severity::Critical) {
        items.push("Rotate every credential listed under Critical Findings; removing it from the file does not remove it from version control history.");
    }
    if has(FindingKind::Secret, Severity::Critical) || has(FindingKind::Secret, Severity::Warning) {
        items.push("Load secrets from environment variables or a secret manager instead of source files.");
    }
    if has(FindingKind::Secret, Severity::Info) {
        items.push("Review Info findings: they match secret-like assignments with short or placeholder values.");
    }
    if findings.iter().any(|f| f.kind == FindingKind::Insecure) {
        items.push("Review insecure configuration flags before deploying to production.");
    }
    if !analysis.skipped().is_empty() {
        items.push("Files under Skipped Files were not scanned; check them manually.");
    }

    let mut output = String::from("## Recommendations\n\n");
    if items.is_empty() {
        output.push_str("No action required.\n");
    } else {
        for item in items {
            output.push_str(&format!("- {}\n", item));
        }
    }
    output
}
