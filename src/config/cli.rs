//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::Args;
use crate::error::Result;
use crate::models::config::PartialSettings;

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line arguments relevant to settings
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub ignore_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub update: bool,
    pub exclude: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub no_parallel: bool,
    pub threads: Option<usize>,
    pub max_file_size: Option<u64>,
    pub max_graph_nodes: Option<usize>,
    pub json: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30, // Highest priority
        }
    }

    /// Create a CLI configuration source from Args
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Set the priority for this configuration source
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            path: args.path.clone(),
            ignore_file: args.ignore_file.clone(),
            output_dir: args.output_dir.clone(),
            update: args.update,
            exclude: if args.exclude.is_empty() {
                None
            } else {
                Some(args.exclude.clone())
            },
            max_depth: args.max_depth,
            follow_links: args.follow_links,
            no_parallel: args.no_parallel,
            threads: args.threads,
            max_file_size: args.max_file_size,
            max_graph_nodes: args.max_graph_nodes,
            json: args.json,
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;
        let mut settings = PartialSettings {
            scan_path: args.path.clone(),
            ignore_file: args.ignore_file.clone(),
            output_dir: args.output_dir.clone(),
            exclude_patterns: args.exclude.clone(),
            max_depth: args.max_depth,
            threads: args.threads,
            max_file_size: args.max_file_size,
            max_graph_nodes: args.max_graph_nodes,
            ..Default::default()
        };

        // Boolean flags only override when set, so config files can enable them
        if args.update {
            settings.update = Some(true);
        }

        if args.follow_links {
            settings.follow_links = Some(true);
        }

        if args.no_parallel {
            settings.parallel = Some(false);
        }

        if args.json {
            settings.json = Some(true);
        }

        if args.quiet {
            settings.quiet = Some(true);
        }

        if args.verbose {
            settings.verbose = Some(true);
        }

        if args.no_colors {
            settings.use_colors = Some(false);
        }

        if args.no_progress {
            settings.show_progress = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        // CLI args are always available
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
