//! Core functionality for walking, scanning and aggregating a source tree

pub mod cancel;
pub mod metrics;
pub mod parallel;
pub mod pipeline;
pub mod walker;

pub use cancel::CancellationToken;
pub use metrics::MetricsAggregator;
pub use parallel::{process_with_progress, PoolOptions, ProgressUpdate};
pub use pipeline::{analyze, Pipeline};
pub use walker::Walker;
