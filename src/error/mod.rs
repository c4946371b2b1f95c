//! Error handling for Cartographer
//!
//! This module provides the error taxonomy, result alias, and error context
//! utilities used throughout the pipeline.

pub mod context;
pub mod types;

pub use context::{handle_error, try_with_recovery, ResultExt};
pub use types::{CartographerError, ErrorSeverity, Result};
