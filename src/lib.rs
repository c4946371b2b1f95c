//! Cartographer - static analysis reports for a source tree
//!
//! This library walks a directory with gitignore-style rules, extracts imports
//! and declarations, scans for secrets and work markers, and renders five
//! deterministic markdown reports that are committed to disk atomically.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod scanners;
pub mod utils;

// Re-export commonly used types
pub use core::{analyze, CancellationToken, Pipeline};
pub use error::{handle_error, try_with_recovery, CartographerError, ErrorSeverity, Result, ResultExt};
pub use models::{analysis::Analysis, config::Settings};
pub use output::{render_all, RenderOptions, RenderedReport, ReportKind};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
