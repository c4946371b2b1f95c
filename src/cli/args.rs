//! Command-line argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Cartographer - static analysis reports for a source tree
#[derive(Parser, Debug, Default)]
#[command(name = "cartographer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map a codebase into five markdown reports: structure, dependencies, security, TODOs and metrics")]
#[command(long_about = "Cartographer scans a source tree and writes CODEBASE_MAP.md, DEPENDENCY_GRAPH.md, \
SECURITY_SCAN.md, TODO_INDEX.md and METRICS.md into an output directory. All five reports are written \
together or not at all, and re-running over an unchanged tree produces identical files.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Map the current directory into ./docs
    cartographer

    # Map a specific directory
    cartographer --path ./my-project

    # Write the reports somewhere else
    cartographer --output-dir ./reports

Filtering:
    # Extra gitignore-style patterns (can specify multiple)
    cartographer --exclude 'fixtures/' --exclude '*.min.js'

    # Use a different ignore file instead of .gitignore
    cartographer --ignore-file .dockerignore

    # Limit directory traversal depth
    cartographer --max-depth 3

Updating:
    # Only rewrite the reports when something changed
    cartographer --update

Output Options:
    # Machine-readable run summary
    cartographer --json

    # Disable colored output and progress bars (CI)
    cartographer --no-colors --no-progress

Configuration:
    # Use a specific configuration file
    cartographer --config ./cartographer.toml

    # Create a default configuration file
    cartographer --init
")]
pub struct Args {
    /// Root directory to scan
    #[arg(short, long, value_name = "PATH", help = "Directory to scan (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Ignore file with gitignore syntax
    #[arg(long, value_name = "FILE", help = "Ignore file with gitignore syntax (defaults to <root>/.gitignore)")]
    pub ignore_file: Option<PathBuf>,

    /// Directory the reports are written to
    #[arg(short, long, value_name = "DIR", help = "Directory to write the reports to (defaults to <root>/docs)")]
    pub output_dir: Option<PathBuf>,

    /// Diff against existing reports and only write on changes
    #[arg(short, long, help = "Compare with the existing reports and only write when something changed")]
    pub update: bool,

    /// Extra ignore patterns
    #[arg(short, long, value_name = "PATTERN", help = "Extra gitignore-style patterns to exclude (can be specified multiple times)")]
    pub exclude: Vec<String>,

    /// Maximum depth for directory traversal
    #[arg(long, value_name = "DEPTH", help = "Maximum directory depth below the root to descend into")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links during directory traversal
    #[arg(long, help = "Follow symbolic links (directories reached twice through links are skipped)")]
    pub follow_links: bool,

    /// Disable parallel processing
    #[arg(long, help = "Scan files on a single thread")]
    pub no_parallel: bool,

    /// Worker thread count
    #[arg(long, value_name = "N", help = "Number of worker threads (defaults to the number of CPUs)")]
    pub threads: Option<usize>,

    /// Per-file size budget in bytes
    #[arg(long, value_name = "BYTES", help = "Files larger than this are counted but not read (default: 1048576)")]
    pub max_file_size: Option<u64>,

    /// Maximum nodes in the Mermaid graph
    #[arg(long, value_name = "N", help = "Maximum number of files drawn in the Mermaid dependency graph (default: 50)")]
    pub max_graph_nodes: Option<usize>,

    /// Print the run summary as JSON
    #[arg(long, help = "Print the run summary as JSON on stdout")]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, help = "Print only a one-line summary")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show per-report status and debug logging")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable progress bars (useful for CI environments or when redirecting output)")]
    pub no_progress: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to a configuration file (defaults to .cartographer.toml if present)")]
    pub config: Option<PathBuf>,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.cartographer.toml) in the current directory")]
    pub init: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
