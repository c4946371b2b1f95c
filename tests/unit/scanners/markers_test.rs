use cartographer::models::finding::{FindingKind, Priority};
use cartographer::scanners::MarkerScanner;

#[test]
fn test_comment_markers_across_syntaxes() {
    let scanner = MarkerScanner::new();

    let cases = [
        ("// TODO: handle errors", FindingKind::Todo, "handle errors"),
        ("# FIXME: off by one", FindingKind::Fixme, "off by one"),
        ("/* HACK: temporary */", FindingKind::Hack, "temporary"),
        ("-- XXX: revisit index", FindingKind::Xxx, "revisit index"),
        ("<!-- BUG: broken link -->", FindingKind::Bug, "broken link"),
        ("  ; TODO: lisp comment", FindingKind::Todo, "lisp comment"),
        ("% FIXME: latex comment", FindingKind::Fixme, "latex comment"),
    ];

    for (line, kind, text) in cases {
        let finding = scanner.scan_line("file", 1, line).unwrap();
        assert_eq!(finding.kind, kind, "{}", line);
        assert_eq!(finding.text, text, "{}", line);
    }
}

#[test]
fn test_markers_need_a_comment_and_a_colon() {
    let scanner = MarkerScanner::new();

    assert!(scanner.scan_line("file", 1, "let todo = TODO_LIST;").is_none());
    assert!(scanner.scan_line("file", 1, "// todo: lowercase is ignored").is_none());
    assert!(scanner.scan_line("file", 1, "// TODO without colon").is_none());
    assert!(scanner.scan_line("file", 1, "// TODO:").is_none());
}

#[test]
fn test_semicolon_and_percent_only_open_comments_at_line_start() {
    let scanner = MarkerScanner::new();

    assert!(scanner.scan_line("file", 1, r#"printf("%d TODO: x");"#).is_none());
    assert!(scanner.scan_line("file", 1, r#"a = 1; s = "TODO: y""#).is_none());
}

#[test]
fn test_marker_priorities() {
    let scanner = MarkerScanner::new();
    let priority = |line: &str| scanner.scan_line("file", 1, line).unwrap().priority();

    assert_eq!(priority("// FIXME: a"), Some(Priority::High));
    assert_eq!(priority("// BUG: a"), Some(Priority::High));
    assert_eq!(priority("// TODO: a"), Some(Priority::Normal));
    assert_eq!(priority("// HACK: a"), Some(Priority::Low));
}
