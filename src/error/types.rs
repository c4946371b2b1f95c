//! Error types and definitions for Cartographer
//!
//! Per-file problems are recoverable and end up as skipped-file findings;
//! root-level, configuration and final-write problems abort the run.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - the file is skipped, the run continues
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for Cartographer operations
#[derive(Debug, Error)]
pub enum CartographerError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// The scan root does not exist or is not a directory
    #[error("Root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// A discovered file could not be read
    #[error("Could not read {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A text file is not valid UTF-8
    #[error("{path} is not valid UTF-8")]
    EncodingError { path: PathBuf },

    /// A file is larger than the per-file size budget
    #[error("{path} is {size} bytes, over the {limit} byte limit")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Scanning a file took longer than the per-file time budget
    #[error("Scanning {path} exceeded the {limit_ms} ms budget")]
    ScanBudgetExceeded { path: PathBuf, limit_ms: u64 },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// Generic analysis failure with added context
    #[error("{message}")]
    Analysis { message: String },

    /// Files were discovered but none of them could be read
    #[error("None of the {discovered} files under {path} could be read")]
    NothingScanned { path: PathBuf, discovered: usize },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid gitignore-style pattern
    #[error("Invalid ignore pattern '{pattern}': {message}")]
    IgnorePattern { pattern: String, message: String },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Report write errors
    #[error("Error writing report {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Interrupted operation
    #[error("Operation interrupted")]
    Interrupted,

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },
}

impl CartographerError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Per-file problems: skip the file and keep going
            CartographerError::FileUnreadable { .. } => ErrorSeverity::Warning,
            CartographerError::EncodingError { .. } => ErrorSeverity::Warning,
            CartographerError::FileTooLarge { .. } => ErrorSeverity::Warning,
            CartographerError::ScanBudgetExceeded { .. } => ErrorSeverity::Warning,
            CartographerError::PermissionDenied { .. } => ErrorSeverity::Warning,

            CartographerError::RootNotFound { .. } => ErrorSeverity::Critical,
            CartographerError::NothingScanned { .. } => ErrorSeverity::Critical,
            CartographerError::Config { .. } => ErrorSeverity::Critical,
            CartographerError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            CartographerError::ConfigRead { .. } => ErrorSeverity::Critical,
            CartographerError::ConfigParse { .. } => ErrorSeverity::Critical,
            CartographerError::IgnorePattern { .. } => ErrorSeverity::Critical,
            CartographerError::GlobPattern { .. } => ErrorSeverity::Critical,
            CartographerError::OutputWrite { .. } => ErrorSeverity::Critical,
            CartographerError::StdoutWrite { .. } => ErrorSeverity::Critical,
            CartographerError::Interrupted => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a single-line, actionable message for the user
    pub fn user_message(&self) -> String {
        match self {
            CartographerError::RootNotFound { path } => {
                format!("Root directory '{}' does not exist or is not a directory. Pass an existing directory with --path.", path.display())
            }
            CartographerError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            CartographerError::FileUnreadable { path, source } => {
                format!("Could not read '{}': {}. Skipping file.", path.display(), source)
            }
            CartographerError::EncodingError { path } => {
                format!("'{}' is not valid UTF-8. Counted in metrics, skipped by scanners.", path.display())
            }
            CartographerError::FileTooLarge { path, size, limit } => {
                format!("'{}' is {} bytes (limit {}). Counted in metrics, skipped by scanners. Raise --max-file-size to scan it.", path.display(), size, limit)
            }
            CartographerError::ScanBudgetExceeded { path, limit_ms } => {
                format!("Scanning '{}' took longer than {} ms. Skipping remaining checks for this file.", path.display(), limit_ms)
            }
            CartographerError::NothingScanned { path, discovered } => {
                format!("Found {} files under '{}' but none could be read. Check file permissions.", discovered, path.display())
            }
            CartographerError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Run with --init to create one or drop --config.", path.display())
            }
            CartographerError::IgnorePattern { pattern, message } => {
                format!("Invalid ignore pattern '{}': {}. Fix the pattern in your ignore file or --exclude.", pattern, message)
            }
            CartographerError::OutputWrite { path, source } => {
                format!("Could not write '{}': {}. No reports were changed. Check that the output directory is writable.", path.display(), source)
            }
            CartographerError::Interrupted => {
                "Interrupted. No reports were written.".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        CartographerError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        CartographerError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        CartographerError::PermissionDenied { path: path.into() }
    }

    /// Create a file read error, mapping permission problems to `PermissionDenied`
    pub fn file_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            CartographerError::PermissionDenied { path }
        } else {
            CartographerError::FileUnreadable { path, source }
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CartographerError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a report write error
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CartographerError::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

impl From<std::io::Error> for CartographerError {
    fn from(err: std::io::Error) -> Self {
        CartographerError::io_error(err)
    }
}

impl From<glob::PatternError> for CartographerError {
    fn from(err: glob::PatternError) -> Self {
        CartographerError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for CartographerError {
    fn from(err: serde_json::Error) -> Self {
        CartographerError::JsonSerialize { source: err }
    }
}

/// Result type alias for Cartographer operations
pub type Result<T> = std::result::Result<T, CartographerError>;
