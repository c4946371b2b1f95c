//! Error context utilities for Cartographer
//!
//! This module provides utilities for adding context to errors and handling
//! errors in a consistent way throughout the application.

use crate::error::{CartographerError, ErrorSeverity, Result};
use std::path::Path;

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Add context to an error with a custom message
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;

    /// Add file context to an error
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| CartographerError::Analysis {
            message: format!("{}: {}", context(), err),
        })
    }

    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| {
            let err: &dyn std::error::Error = &err;
            if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
                if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                    return CartographerError::permission_denied(path.as_ref());
                }
            }

            CartographerError::directory_traversal_error(path.as_ref(), err.to_string())
        })
    }
}

/// Handle an error based on its severity
///
/// - Warning: Log the error and return None
/// - Error: Log the error and return None
/// - Critical: Log the error and return Some(error)
pub fn handle_error(err: CartographerError) -> Option<CartographerError> {
    let message = err.user_message();

    match err.severity() {
        ErrorSeverity::Warning => {
            tracing::warn!("{}", message);
            None
        }
        ErrorSeverity::Error => {
            tracing::error!("{}", message);
            None
        }
        ErrorSeverity::Critical => {
            tracing::error!("critical: {}", message);
            Some(err)
        }
    }
}

/// Try to run a function and handle any errors based on their severity
///
/// Returns Ok(Some(T)) if the function succeeds, Ok(None) if it failed with a
/// recoverable error, or Err if a critical error occurs.
pub fn try_with_recovery<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(err) => match handle_error(err) {
            Some(critical_err) => Err(critical_err),
            None => Ok(None),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_with_context() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));

        match result.with_context(|| "Failed to read ignore file") {
            Err(CartographerError::Analysis { message }) => {
                assert!(message.contains("Failed to read ignore file"));
                assert!(message.contains("file not found"));
            }
            other => panic!("Expected Analysis error, got {:?}", other),
        }
    }

    #[test]
    fn test_with_file_context() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));

        match result.with_file_context("src/lib.rs") {
            Err(CartographerError::DirectoryTraversal { path, .. }) => {
                assert_eq!(path.to_string_lossy(), "src/lib.rs");
            }
            other => panic!("Expected DirectoryTraversal error, got {:?}", other),
        }
    }

    #[test]
    fn test_with_file_context_permission_denied() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));

        match result.with_file_context("secret/dir") {
            Err(CartographerError::PermissionDenied { path }) => {
                assert_eq!(path.to_string_lossy(), "secret/dir");
            }
            other => panic!("Expected PermissionDenied error, got {:?}", other),
        }
    }

    #[test]
    fn test_try_with_recovery() {
        let recovered: Result<Option<u32>> = try_with_recovery(|| {
            Err(CartographerError::EncodingError {
                path: "bad.txt".into(),
            })
        });
        assert!(matches!(recovered, Ok(None)));

        let fatal: Result<Option<u32>> =
            try_with_recovery(|| Err(CartographerError::Interrupted));
        assert!(fatal.is_err());

        let ok = try_with_recovery(|| Ok(7));
        assert_eq!(ok.unwrap(), Some(7));
    }
}
