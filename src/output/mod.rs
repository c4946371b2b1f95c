//! Report rendering, writing and terminal output

mod formatters;
mod progress;
pub mod reports;
pub mod summary;
#[cfg(test)]
mod tests;
pub mod update;
mod writers;

pub use self::formatters::format_duration;
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::reports::{render_all, RenderOptions, RenderedReport, ReportKind, ReportRenderer};
pub use self::summary::RunSummary;
pub use self::update::{has_changes, PriorReports, ReportChange, ReportDiff};
pub use self::writers::ReportWriter;

use crate::error::Result;

/// Trait for run summary formatters
pub trait Formatter {
    /// Format a run summary into a string
    fn format(&self, summary: &RunSummary) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, summary: &RunSummary) -> Result<String> {
        // In quiet mode, only output a single line
        if self.quiet {
            return Ok(formatters::format_summary_quiet(summary));
        }
        Ok(formatters::format_summary_text(summary, self.use_colors, self.verbose))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, summary: &RunSummary) -> Result<String> {
        formatters::format_summary_json(summary, self.pretty)
    }
}

/// Create a formatter for the run summary
pub fn create_formatter(json: bool, use_colors: bool, verbose: bool, quiet: bool) -> Box<dyn Formatter> {
    if json {
        Box::new(JsonFormatter::new(true))
    } else {
        Box::new(TextFormatter::new(use_colors, verbose, quiet))
    }
}
