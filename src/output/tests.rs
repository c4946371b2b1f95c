//! Tests for run summary formatting

#[cfg(test)]
mod tests {
    use crate::models::analysis::Analysis;
    use crate::output::reports::ReportKind;
    use crate::output::update::{ReportChange, ReportDiff};
    use crate::output::{create_formatter, format_duration, Formatter, JsonFormatter, RunSummary, TextFormatter};
    use std::path::Path;
    use std::time::Duration;

    // Helper function to create a test summary
    fn create_test_summary() -> RunSummary {
        let mut summary = RunSummary::new(
            &Analysis::default(),
            Path::new("docs"),
            vec![
                ReportDiff {
                    kind: ReportKind::CodebaseMap,
                    change: ReportChange::Created,
                },
                ReportDiff {
                    kind: ReportKind::Metrics,
                    change: ReportChange::Updated { added: 3, removed: 1 },
                },
                ReportDiff {
                    kind: ReportKind::TodoIndex,
                    change: ReportChange::Unchanged,
                },
            ],
            true,
            Duration::from_millis(2350),
        );
        summary.root = "demo".to_string();
        summary.files = 42;
        summary.critical_findings = 1;
        summary
    }

    #[test]
    fn test_text_formatter() {
        let summary = create_test_summary();

        let normal = TextFormatter::new(false, false, false).format(&summary).unwrap();
        assert!(normal.starts_with("Cartographer: demo\n"));
        assert!(normal.contains("Files: 42"));
        assert!(normal.contains("Security findings: 1 critical, 0 warning, 0 info"));
        assert!(normal.contains("Reports written to docs"));
        assert!(normal.contains("METRICS.md           updated (+3 -1)"));
        assert!(normal.contains("TODO_INDEX.md        unchanged"));
        assert!(normal.contains("Duration: 2.35s"));

        let quiet = TextFormatter::new(false, false, true).format(&summary).unwrap();
        assert_eq!(quiet, "42 files, 1 critical findings, 2 reports changed\n");
    }

    #[test]
    fn test_up_to_date_summary() {
        let mut summary = create_test_summary();
        summary.written = false;
        for report in &mut summary.reports {
            report.change = ReportChange::Unchanged;
        }

        let text = TextFormatter::new(false, false, false).format(&summary).unwrap();
        assert!(text.contains("Reports in docs are up to date"));
        assert!(!text.contains("CODEBASE_MAP.md"));

        let verbose = TextFormatter::new(false, true, false).format(&summary).unwrap();
        assert!(verbose.contains("CODEBASE_MAP.md"));
    }

    #[test]
    fn test_json_formatter() {
        let summary = create_test_summary();
        let json = JsonFormatter::new(false).format(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["files"], 42);
        assert_eq!(value["written"], true);
        assert_eq!(value["reports"][0]["kind"], "CodebaseMap");
        assert_eq!(value["reports"][0]["change"]["status"], "created");
        assert_eq!(value["reports"][1]["change"]["added"], 3);
    }

    #[test]
    fn test_create_formatter() {
        let summary = create_test_summary();
        let json = create_formatter(true, true, false, false).format(&summary).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let text = create_formatter(false, false, false, false).format(&summary).unwrap();
        assert!(text.starts_with("Cartographer"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(850), "850ms");
        assert_eq!(format_duration(2350), "2.35s");
        assert_eq!(format_duration(65_000), "1m 05s");
    }
}
