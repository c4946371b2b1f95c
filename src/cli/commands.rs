//! Command implementations

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::Args;
use crate::config::{self, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::{CancellationToken, Pipeline};
use crate::error::{CartographerError, ErrorSeverity, Result};
use crate::models::config::Settings;
use crate::output::{
    create_formatter, create_progress_callback, has_changes, render_all, PriorReports, ProgressReporter,
    RenderOptions, ReportWriter, RunSummary,
};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Scan a tree and write the five reports
    Generate(Args),
    /// Write a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }

        Command::Generate(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Generate(args) => {
                let settings = config::load_config(CliArgs::from(args))?;
                debug!("Settings: {:?}", settings);

                let cancel = CancellationToken::new();
                cancel.install_signal_handlers()?;

                let reporter = (settings.show_progress && !settings.quiet && !settings.json)
                    .then(|| Arc::new(ProgressReporter::new(false, settings.verbose)));

                let summary = generate(&settings, cancel, reporter)?;

                let formatter = create_formatter(settings.json, settings.use_colors, settings.verbose, settings.quiet);
                let output = formatter.format(&summary)?;

                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(output.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(|source| CartographerError::StdoutWrite { source })?;

                Ok(())
            }
            Command::Init => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

                if config_path.exists() {
                    println!("Configuration file already exists at: {}", config_path.display());
                    println!("To overwrite it, delete the file first and run this command again.");
                    return Ok(());
                }

                config::create_default_config(&config_path)?;

                println!("Created default configuration file at: {}", config_path.display());
                println!("\nEvery setting has a comment; uncomment and edit the ones you need.");
                println!("Command-line flags and CARTOGRAPHER_* environment variables override it.");

                Ok(())
            }
        }
    }

    /// Run the command and map errors to an exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("Error: {}", err.user_message());
                exit_code(&err)
            }
        }
    }
}

/// Exit code for a fatal error
pub fn exit_code(err: &CartographerError) -> i32 {
    match err.severity() {
        ErrorSeverity::Critical => 2,
        ErrorSeverity::Error | ErrorSeverity::Warning => 1,
    }
}

/// Analyze, render and commit the reports for one run
///
/// In update mode the reports are only written when at least one differs
/// from what is already in the output directory.
pub fn generate(
    settings: &Settings,
    cancel: CancellationToken,
    reporter: Option<Arc<ProgressReporter>>,
) -> Result<RunSummary> {
    let start = Instant::now();

    let pipeline = Pipeline::new(settings.clone(), cancel.clone())?;
    let output_dir = pipeline.walker().output_dir().to_path_buf();

    let analysis = match &reporter {
        Some(reporter) => {
            reporter.start(0, &format!("Scanning {}", settings.scan_path.display()));
            let result = pipeline.run(create_progress_callback(Arc::clone(reporter)));
            reporter.finish("scan");
            result?
        }
        None => pipeline.run(|_| {})?,
    };

    let spinner = reporter
        .as_ref()
        .and_then(|reporter| reporter.create_spinner("Writing reports"));

    let reports = render_all(
        &analysis,
        RenderOptions {
            max_graph_nodes: settings.max_graph_nodes,
        },
    );

    let diffs = PriorReports::load(&output_dir).diff(&reports);

    let written = if settings.update && !has_changes(&diffs) {
        info!("Reports in {} are up to date", output_dir.display());
        Ok(false)
    } else {
        ReportWriter::new(output_dir.clone(), cancel)
            .commit(&reports)
            .map(|()| {
                info!("Wrote {} reports to {}", reports.len(), output_dir.display());
                true
            })
    };

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let written = written?;

    Ok(RunSummary::new(
        &analysis,
        &settings.output_dir(),
        diffs,
        written,
        start.elapsed(),
    ))
}
