use std::path::PathBuf;

use cartographer::cli::{Args, Command};
use cartographer::config::{load_config_with_env_prefix, CliArgs};
use clap::Parser;
use tempfile::tempdir;

use super::support::{create_sample_project, report_paths};

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from(["cartographer"]);
    assert_eq!(args.path, None);
    assert!(args.exclude.is_empty());
    assert_eq!(args.max_depth, None);
    assert!(!args.update);
    assert!(!args.json);

    let args = Args::parse_from([
        "cartographer",
        "--path",
        "/test/path",
        "--exclude",
        "fixtures/",
        "--exclude",
        "*.min.js",
        "--max-depth",
        "5",
        "--max-graph-nodes",
        "12",
        "--output-dir",
        "reports",
        "--update",
        "--json",
        "--no-parallel",
    ]);

    assert_eq!(args.path, Some(PathBuf::from("/test/path")));
    assert_eq!(args.exclude, vec!["fixtures/".to_string(), "*.min.js".to_string()]);
    assert_eq!(args.max_depth, Some(5));
    assert_eq!(args.max_graph_nodes, Some(12));
    assert_eq!(args.output_dir, Some(PathBuf::from("reports")));
    assert!(args.update);
    assert!(args.json);
    assert!(args.no_parallel);
}

#[test]
fn test_cli_config_option() {
    let args = Args::parse_from(["cartographer", "--config", "custom-config.toml"]);
    assert_eq!(args.config, Some(PathBuf::from("custom-config.toml")));

    let args = Args::parse_from(["cartographer", "--init"]);
    assert!(matches!(Command::from_args(args), Command::Init));
}

#[test]
fn test_args_flow_into_settings() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("cartographer.toml");
    std::fs::write(&config_path, "max_graph_nodes = 10\nfollow_links = true\n").unwrap();

    let path = temp_dir.path().display().to_string();
    let config = config_path.display().to_string();
    let args = Args::parse_from([
        "cartographer",
        "--path",
        path.as_str(),
        "--config",
        config.as_str(),
        "--max-graph-nodes",
        "20",
        "--no-colors",
    ]);

    let settings = load_config_with_env_prefix(CliArgs::from(&args), "CARTOGRAPHER_TEST_CLI_FLOW").unwrap();

    assert_eq!(settings.scan_path, temp_dir.path());
    assert_eq!(settings.max_graph_nodes, 20);
    assert!(settings.follow_links);
    assert!(!settings.use_colors);
    assert_eq!(settings.output_dir(), temp_dir.path().join("docs"));
}

#[test]
fn test_run_exit_codes() {
    let temp_dir = tempdir().unwrap();
    create_sample_project(temp_dir.path());
    let path = temp_dir.path().display().to_string();

    let args = Args::parse_from(["cartographer", "--path", path.as_str(), "--quiet", "--no-progress"]);
    assert_eq!(Command::from_args(args).run(), 0);
    for report in report_paths(&temp_dir.path().join("docs")) {
        assert!(report.is_file());
    }

    let missing = temp_dir.path().join("missing").display().to_string();
    let args = Args::parse_from(["cartographer", "--path", missing.as_str(), "--quiet"]);
    assert_eq!(Command::from_args(args).run(), 2);
}
