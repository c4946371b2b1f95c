//! Parallel processing utilities

use crate::core::cancel::CancellationToken;
use crate::error::{CartographerError, Result};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Worker pool settings for one run
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
    pub parallel: bool,
    pub threads: usize,
}

/// Map items on a worker pool with progress reporting and cancellation
///
/// Results keep the input order. Items are not started once `cancel` is set
/// and the whole call then returns `Interrupted`. The only shared state
/// between workers is the completion counter.
pub fn process_with_progress<T, F, R, P>(
    items: &[T],
    options: PoolOptions,
    cancel: &CancellationToken,
    f: F,
    progress_callback: P,
) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let total = items.len();
    let counter = AtomicUsize::new(0);

    let work = |item: &T| -> Option<R> {
        if cancel.is_cancelled() {
            return None;
        }
        let result = f(item);
        let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
        progress_callback(ProgressUpdate::new(
            done,
            total,
            format!("Processing file {}/{}", done, total),
        ));
        Some(result)
    };

    let results: Option<Vec<R>> = if options.parallel && options.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build()
            .map_err(|err| CartographerError::Analysis {
                message: format!("Failed to start worker pool: {}", err),
            })?;
        pool.install(|| items.par_iter().map(work).collect())
    } else {
        items.iter().map(work).collect()
    };

    match results {
        Some(results) if !cancel.is_cancelled() => Ok(results),
        _ => Err(CartographerError::Interrupted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_results_keep_input_order() {
        let items: Vec<usize> = (0..100).collect();
        let options = PoolOptions {
            parallel: true,
            threads: 4,
        };
        let results =
            process_with_progress(&items, options, &CancellationToken::new(), |n| n * 2, |_| {}).unwrap();
        assert_eq!(results, (0..100).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_progress_reaches_total() {
        let items = vec!["a", "b", "c"];
        let seen = Mutex::new(Vec::new());
        let options = PoolOptions {
            parallel: false,
            threads: 1,
        };
        process_with_progress(&items, options, &CancellationToken::new(), |s| s.len(), |update| {
            seen.lock().push(update.current);
        })
        .unwrap();
        assert_eq!(*seen.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn test_cancelled_run_is_interrupted() {
        let token = CancellationToken::new();
        token.cancel();
        let options = PoolOptions {
            parallel: true,
            threads: 2,
        };
        let result = process_with_progress(&[1, 2, 3], options, &token, |n| *n, |_| {});
        assert!(matches!(result, Err(CartographerError::Interrupted)));
    }

    #[test]
    fn test_percentage() {
        assert_eq!(ProgressUpdate::new(1, 4, "").percentage(), 25.0);
        assert_eq!(ProgressUpdate::new(0, 0, "").percentage(), 0.0);
    }
}
