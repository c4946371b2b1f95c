use cartographer::core::MetricsAggregator;
use cartographer::models::file_record::{FileRecord, Language};
use cartographer::models::metrics::SizeBucket;

fn record(path: &str, language: Language, lines: usize, bytes: u64, binary: bool) -> FileRecord {
    FileRecord {
        path: path.to_string(),
        language,
        lines,
        bytes,
        binary,
    }
}

#[test]
fn test_group_totals_match_overall_totals() {
    let records = vec![
        record("README.md", Language::Markdown, 12, 400, false),
        record("src/lib.rs", Language::Rust, 640, 20_000, false),
        record("src/main.rs", Language::Rust, 40, 1_000, false),
        record("tools/gen.py", Language::Python, 1_500, 48_000, false),
        record("assets/logo.png", Language::Other, 0, 9_000, true),
    ];

    let summary = MetricsAggregator::aggregate(&records);

    assert_eq!(summary.total.files, 5);
    assert_eq!(summary.total.lines, 2_192);

    let language_files: usize = summary.by_language.values().map(|s| s.files).sum();
    let language_lines: usize = summary.by_language.values().map(|s| s.lines).sum();
    let directory_files: usize = summary.by_directory.values().map(|s| s.files).sum();
    let directory_bytes: u64 = summary.by_directory.values().map(|s| s.bytes).sum();
    assert_eq!(language_files, summary.total.files);
    assert_eq!(language_lines, summary.total.lines);
    assert_eq!(directory_files, summary.total.files);
    assert_eq!(directory_bytes, summary.total.bytes);

    let bucketed: usize = summary.size_distribution.values().sum();
    assert_eq!(bucketed + summary.binary_files, summary.total.files);
    assert_eq!(summary.size_distribution[&SizeBucket::ExtraLarge], 1);
    assert_eq!(summary.size_distribution[&SizeBucket::Large], 1);

    assert_eq!(summary.largest_files[0].path, "tools/gen.py");
    assert!(summary.largest_files.iter().all(|f| f.path != "assets/logo.png"));
}

#[test]
fn test_language_shares_cover_all_lines() {
    let records = vec![
        record("a.rs", Language::Rust, 1, 10, false),
        record("b.py", Language::Python, 1, 10, false),
        record("c.go", Language::Go, 1, 10, false),
    ];
    let summary = MetricsAggregator::aggregate(&records);

    let total: f64 = summary
        .by_language
        .keys()
        .map(|language| summary.language_share(language))
        .sum();
    assert!((total - 100.0).abs() < 1e-9);
}
