//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the directory reports go to when no output directory is configured
pub const DEFAULT_OUTPUT_DIR: &str = "docs";

/// Main configuration settings for Cartographer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory to scan
    pub scan_path: PathBuf,

    /// Gitignore-style file with ignore rules (defaults to `<root>/.gitignore`)
    pub ignore_file: Option<PathBuf>,

    /// Extra gitignore-style patterns, applied after the ignore file
    pub exclude_patterns: Vec<String>,

    /// Directory the reports are written to (defaults to `<root>/docs`)
    pub output_dir: Option<PathBuf>,

    /// Diff against existing reports and only write when something changed
    pub update: bool,

    /// Maximum directory depth to traverse
    pub max_depth: Option<usize>,

    /// Whether to follow symbolic links during directory traversal
    pub follow_links: bool,

    /// Whether to use parallel processing
    pub parallel: bool,

    /// Worker thread count (defaults to the number of CPUs)
    pub threads: Option<usize>,

    /// Files larger than this many bytes are counted but not read
    pub max_file_size: u64,

    /// Per-file time budget for pattern scanning, in milliseconds
    pub scan_timeout_ms: u64,

    /// Number of leading bytes inspected for a null byte
    pub binary_sniff_bytes: usize,

    /// Minimum literal length for a generic secret assignment to be a warning
    pub min_secret_length: usize,

    /// Glob patterns for files that are never secret-scanned
    pub security_skip_files: Vec<String>,

    /// Maximum number of file nodes drawn in the Mermaid diagram
    pub max_graph_nodes: usize,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,

    /// Print the run summary as JSON
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_path: PathBuf::from("."),
            ignore_file: None,
            exclude_patterns: Vec::new(),
            output_dir: None,
            update: false,
            max_depth: None,
            follow_links: false,
            parallel: true,
            threads: None,
            max_file_size: 1024 * 1024,
            scan_timeout_ms: 2000,
            binary_sniff_bytes: 8000,
            min_secret_length: 8,
            security_skip_files: vec![
                ".env.example".to_string(),
                ".env.sample".to_string(),
                ".env.template".to_string(),
                "*.lock".to_string(),
                "package-lock.json".to_string(),
            ],
            max_graph_nodes: 50,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
            json: false,
        }
    }
}

impl Settings {
    /// Resolved output directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.scan_path.join(DEFAULT_OUTPUT_DIR))
    }

    /// Resolved ignore file
    pub fn ignore_file(&self) -> PathBuf {
        self.ignore_file
            .clone()
            .unwrap_or_else(|| self.scan_path.join(".gitignore"))
    }

    /// Worker thread count
    pub fn thread_count(&self) -> usize {
        self.threads.filter(|n| *n > 0).unwrap_or_else(num_cpus::get)
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub scan_path: Option<PathBuf>,
    pub ignore_file: Option<PathBuf>,
    pub exclude_patterns: Option<Vec<String>>,
    pub output_dir: Option<PathBuf>,
    pub update: Option<bool>,
    pub max_depth: Option<usize>,
    pub follow_links: Option<bool>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub max_file_size: Option<u64>,
    pub scan_timeout_ms: Option<u64>,
    pub binary_sniff_bytes: Option<usize>,
    pub min_secret_length: Option<usize>,
    pub security_skip_files: Option<Vec<String>>,
    pub max_graph_nodes: Option<usize>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
    pub json: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.scan_path.is_some() {
            self.scan_path = other.scan_path;
        }
        if other.ignore_file.is_some() {
            self.ignore_file = other.ignore_file;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.update.is_some() {
            self.update = other.update;
        }
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
        if other.follow_links.is_some() {
            self.follow_links = other.follow_links;
        }
        if other.parallel.is_some() {
            self.parallel = other.parallel;
        }
        if other.threads.is_some() {
            self.threads = other.threads;
        }
        if other.max_file_size.is_some() {
            self.max_file_size = other.max_file_size;
        }
        if other.scan_timeout_ms.is_some() {
            self.scan_timeout_ms = other.scan_timeout_ms;
        }
        if other.binary_sniff_bytes.is_some() {
            self.binary_sniff_bytes = other.binary_sniff_bytes;
        }
        if other.min_secret_length.is_some() {
            self.min_secret_length = other.min_secret_length;
        }
        if other.security_skip_files.is_some() {
            self.security_skip_files = other.security_skip_files;
        }
        if other.max_graph_nodes.is_some() {
            self.max_graph_nodes = other.max_graph_nodes;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
        if other.json.is_some() {
            self.json = other.json;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(scan_path) = &self.scan_path {
            settings.scan_path = scan_path.clone();
        }
        if let Some(ignore_file) = &self.ignore_file {
            settings.ignore_file = Some(ignore_file.clone());
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            settings.output_dir = Some(output_dir.clone());
        }
        if let Some(update) = self.update {
            settings.update = update;
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = Some(max_depth);
        }
        if let Some(follow_links) = self.follow_links {
            settings.follow_links = follow_links;
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(threads) = self.threads {
            settings.threads = Some(threads);
        }
        if let Some(max_file_size) = self.max_file_size {
            settings.max_file_size = max_file_size;
        }
        if let Some(scan_timeout_ms) = self.scan_timeout_ms {
            settings.scan_timeout_ms = scan_timeout_ms;
        }
        if let Some(binary_sniff_bytes) = self.binary_sniff_bytes {
            settings.binary_sniff_bytes = binary_sniff_bytes;
        }
        if let Some(min_secret_length) = self.min_secret_length {
            settings.min_secret_length = min_secret_length;
        }
        if let Some(security_skip_files) = &self.security_skip_files {
            settings.security_skip_files = security_skip_files.clone();
        }
        if let Some(max_graph_nodes) = self.max_graph_nodes {
            settings.max_graph_nodes = max_graph_nodes;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }
        if let Some(json) = self.json {
            settings.json = json;
        }

        settings
    }
}
