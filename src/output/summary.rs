//! Run summary printed after the reports are written

use crate::models::analysis::Analysis;
use crate::models::finding::Severity;
use crate::output::update::{ReportChange, ReportDiff};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Counts and per-report status for one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Name of the scanned root directory
    pub root: String,
    pub output_dir: String,

    pub files: usize,
    pub lines: usize,
    pub languages: usize,

    pub internal_imports: usize,
    pub external_packages: usize,
    pub cycles: usize,

    pub critical_findings: usize,
    pub warning_findings: usize,
    pub info_findings: usize,
    pub markers: usize,
    pub skipped_files: usize,

    pub reports: Vec<ReportDiff>,

    /// False when update mode found nothing to change
    pub written: bool,

    pub duration_ms: u64,
}

impl RunSummary {
    pub fn new(
        analysis: &Analysis,
        output_dir: &Path,
        reports: Vec<ReportDiff>,
        written: bool,
        duration: Duration,
    ) -> Self {
        Self {
            root: analysis.project.root_name.clone(),
            output_dir: output_dir.display().to_string(),
            files: analysis.metrics.total.files,
            lines: analysis.metrics.total.lines,
            languages: analysis.metrics.by_language.len(),
            internal_imports: analysis.graph.internal_edge_count(),
            external_packages: analysis.graph.external_count(),
            cycles: analysis.graph.cycles.len(),
            critical_findings: analysis.security_findings_with(Severity::Critical).len(),
            warning_findings: analysis.security_findings_with(Severity::Warning).len(),
            info_findings: analysis.security_findings_with(Severity::Info).len(),
            markers: analysis.markers().count(),
            skipped_files: analysis.skipped().len(),
            reports,
            written,
            duration_ms: duration.as_millis() as u64,
        }
    }

    /// Number of reports in a given state
    pub fn count(&self, label: &str) -> usize {
        self.reports
            .iter()
            .filter(|diff| diff.change.label() == label)
            .count()
    }

    pub fn changed(&self) -> usize {
        self.reports
            .iter()
            .filter(|diff| diff.change != ReportChange::Unchanged)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::reports::ReportKind;

    #[test]
    fn test_counts() {
        let reports = vec![
            ReportDiff {
                kind: ReportKind::CodebaseMap,
                change: ReportChange::Created,
            },
            ReportDiff {
                kind: ReportKind::Metrics,
                change: ReportChange::Unchanged,
            },
        ];
        let summary = RunSummary::new(
            &Analysis::default(),
            Path::new("docs"),
            reports,
            true,
            Duration::from_millis(1500),
        );
        assert_eq!(summary.count("created"), 1);
        assert_eq!(summary.changed(), 1);
        assert_eq!(summary.duration_ms, 1500);
        assert_eq!(summary.files, 0);
    }
}
