//! Progress reporting functionality
//!
//! This module provides progress reporting for the per-file scan with
//! support for quiet and verbose modes. Everything is drawn on stderr so a
//! JSON summary on stdout stays machine readable.

use crate::core::parallel::ProgressUpdate;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    multi_progress: Arc<MultiProgress>,
    main_progress_bar: Option<ProgressBar>,
    message_bar: Option<ProgressBar>,
    current_operation: Arc<Mutex<String>>,
}

impl ProgressReporter {
    /// Create a new progress reporter; `quiet` disables all drawing
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let multi_progress = Arc::new(MultiProgress::new());

        // Don't create progress bars in quiet mode
        let (main_progress_bar, message_bar) = if quiet {
            (None, None)
        } else {
            let main_bar = multi_progress.add(ProgressBar::new(0));
            main_bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );

            let msg_bar = multi_progress.add(ProgressBar::new(1));
            msg_bar.set_style(
                ProgressStyle::default_bar()
                    .template("{wide_msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            (Some(main_bar), Some(msg_bar))
        };

        Self {
            quiet,
            verbose,
            multi_progress,
            main_progress_bar,
            message_bar,
            current_operation: Arc::new(Mutex::new(String::new())),
        }
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
        }

        if let Some(msg_bar) = &self.message_bar {
            msg_bar.set_message(operation.to_string());
        }

        *self.current_operation.lock() = operation.to_string();

        if self.verbose {
            self.multi_progress
                .println(format!("Starting: {}", operation))
                .ok();
        }
    }

    /// Update progress
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.set_length(total as u64);
            bar.set_position(current as u64);

            // Only update the message if it differs from the current operation
            if message != *self.current_operation.lock() {
                if let Some(msg_bar) = &self.message_bar {
                    msg_bar.set_message(message.to_string());
                }
            }
        }
    }

    /// Update progress from a ProgressUpdate
    pub fn update_from(&self, progress: ProgressUpdate) {
        self.update(progress.current, progress.total, &progress.message);
    }

    /// Finish the progress operation and clear the bars
    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.finish_and_clear();
        }

        if let Some(msg_bar) = &self.message_bar {
            msg_bar.finish_and_clear();
        }

        if self.verbose {
            self.print_verbose(&format!("Finished: {}", message));
        }
    }

    /// Create a spinner for an operation without a known length
    pub fn create_spinner(&self, message: &str) -> Option<ProgressBar> {
        if self.quiet {
            return None;
        }

        let spinner = self.multi_progress.add(ProgressBar::new_spinner());
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        Some(spinner)
    }

    /// Print a verbose message (only in verbose mode)
    pub fn print_verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("{}", message);
        }
    }
}

/// Create a progress callback function that updates a ProgressReporter
pub fn create_progress_callback(reporter: Arc<ProgressReporter>) -> impl Fn(ProgressUpdate) + Send + Sync {
    move |progress: ProgressUpdate| {
        reporter.update_from(progress);
    }
}
