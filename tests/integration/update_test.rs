use std::fs;

use cartographer::cli::generate;
use cartographer::core::CancellationToken;
use cartographer::output::{ReportChange, ReportKind};
use cartographer::CartographerError;
use tempfile::tempdir;

use super::support::{create_sample_project, read_reports, settings_for, write};

#[test]
fn test_update_mode_skips_unchanged_reports() {
    let temp_dir = tempdir().unwrap();
    create_sample_project(temp_dir.path());
    let mut settings = settings_for(temp_dir.path());

    let first = generate(&settings, CancellationToken::new(), None).unwrap();
    assert!(first.written);
    assert!(first
        .reports
        .iter()
        .all(|diff| diff.change == ReportChange::Created));

    settings.update = true;
    let second = generate(&settings, CancellationToken::new(), None).unwrap();
    assert!(!second.written);
    assert_eq!(second.changed(), 0);
}

#[test]
fn test_update_mode_writes_when_something_changed() {
    let temp_dir = tempdir().unwrap();
    create_sample_project(temp_dir.path());
    let mut settings = settings_for(temp_dir.path());
    generate(&settings, CancellationToken::new(), None).unwrap();

    write(temp_dir.path(), "src/extra.js", "// TODO: brand new marker\n");
    settings.update = true;
    let summary = generate(&settings, CancellationToken::new(), None).unwrap();

    assert!(summary.written);
    let todo = summary
        .reports
        .iter()
        .find(|diff| diff.kind == ReportKind::TodoIndex)
        .unwrap();
    assert!(matches!(todo.change, ReportChange::Updated { added, .. } if added > 0));

    let todos = fs::read_to_string(temp_dir.path().join("docs").join("TODO_INDEX.md")).unwrap();
    assert!(todos.contains("brand new marker"));
}

#[test]
fn test_without_update_mode_reports_are_always_rewritten() {
    let temp_dir = tempdir().unwrap();
    create_sample_project(temp_dir.path());
    let settings = settings_for(temp_dir.path());

    generate(&settings, CancellationToken::new(), None).unwrap();
    let summary = generate(&settings, CancellationToken::new(), None).unwrap();

    assert!(summary.written);
    assert_eq!(summary.changed(), 0);
}

#[test]
fn test_interrupted_run_leaves_reports_untouched() {
    let temp_dir = tempdir().unwrap();
    create_sample_project(temp_dir.path());
    let settings = settings_for(temp_dir.path());
    generate(&settings, CancellationToken::new(), None).unwrap();
    let before = read_reports(&temp_dir.path().join("docs"));

    write(temp_dir.path(), "src/extra.js", "// TODO: never reported\n");
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = generate(&settings, cancel, None);

    assert!(matches!(result, Err(CartographerError::Interrupted)));
    assert_eq!(read_reports(&temp_dir.path().join("docs")), before);
}

#[test]
fn test_interrupted_first_run_creates_nothing() {
    let temp_dir = tempdir().unwrap();
    create_sample_project(temp_dir.path());

    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = generate(&settings_for(temp_dir.path()), cancel, None);

    assert!(result.is_err());
    assert!(!temp_dir.path().join("docs").exists());
}
