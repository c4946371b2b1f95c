//! Validation of merged settings

use ignore::gitignore::GitignoreBuilder;

use crate::error::{CartographerError, Result};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return the first problem found
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.scan_path.is_dir() {
            return Err(CartographerError::RootNotFound {
                path: settings.scan_path.clone(),
            });
        }

        Self::validate_exclude_patterns(settings)?;

        for pattern in &settings.security_skip_files {
            glob::Pattern::new(pattern).map_err(|source| CartographerError::GlobPattern { source })?;
        }

        if settings.max_file_size == 0 {
            return Err(CartographerError::config_error("max_file_size must be at least 1 byte"));
        }

        if settings.max_graph_nodes == 0 {
            return Err(CartographerError::config_error("max_graph_nodes must be at least 1"));
        }

        if settings.scan_timeout_ms == 0 {
            return Err(CartographerError::config_error("scan_timeout_ms must be at least 1"));
        }

        if settings.binary_sniff_bytes == 0 {
            return Err(CartographerError::config_error("binary_sniff_bytes must be at least 1"));
        }

        if settings.threads == Some(0) {
            return Err(CartographerError::config_error("threads must be at least 1"));
        }

        let output_dir = settings.output_dir();
        if output_dir.is_file() {
            return Err(CartographerError::output_write(
                output_dir,
                std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists and is not a directory"),
            ));
        }

        if settings.quiet && settings.verbose {
            return Err(CartographerError::config_error("quiet and verbose cannot both be set"));
        }

        Ok(())
    }

    fn validate_exclude_patterns(settings: &Settings) -> Result<()> {
        let mut builder = GitignoreBuilder::new(&settings.scan_path);
        for pattern in &settings.exclude_patterns {
            builder
                .add_line(None, pattern)
                .map_err(|err| CartographerError::IgnorePattern {
                    pattern: pattern.clone(),
                    message: err.to_string(),
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn settings_for(path: &std::path::Path) -> Settings {
        Settings {
            scan_path: path.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_defaults() {
        let temp_dir = tempdir().unwrap();
        assert!(SettingsValidator::validate(&settings_for(temp_dir.path())).is_ok());
    }

    #[test]
    fn test_missing_root() {
        let temp_dir = tempdir().unwrap();
        let settings = settings_for(&temp_dir.path().join("missing"));
        let err = SettingsValidator::validate(&settings).unwrap_err();
        assert!(matches!(err, CartographerError::RootNotFound { .. }));
    }

    #[test]
    fn test_root_is_a_file() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("main.rs");
        std::fs::write(&file, "fn main() {}\n").unwrap();
        let err = SettingsValidator::validate(&settings_for(&file)).unwrap_err();
        assert!(matches!(err, CartographerError::RootNotFound { .. }));
    }

    #[test]
    fn test_bad_patterns() {
        let temp_dir = tempdir().unwrap();

        let mut settings = settings_for(temp_dir.path());
        settings.exclude_patterns = vec!["src/[".to_string()];
        let err = SettingsValidator::validate(&settings).unwrap_err();
        assert!(matches!(err, CartographerError::IgnorePattern { .. }));

        let mut settings = settings_for(temp_dir.path());
        settings.security_skip_files = vec!["[".to_string()];
        let err = SettingsValidator::validate(&settings).unwrap_err();
        assert!(matches!(err, CartographerError::GlobPattern { .. }));
    }

    #[test]
    fn test_numeric_limits() {
        let temp_dir = tempdir().unwrap();

        let mut settings = settings_for(temp_dir.path());
        settings.max_graph_nodes = 0;
        assert!(SettingsValidator::validate(&settings).is_err());

        let mut settings = settings_for(temp_dir.path());
        settings.threads = Some(0);
        assert!(SettingsValidator::validate(&settings).is_err());

        let mut settings = settings_for(temp_dir.path());
        settings.max_depth = Some(0);
        assert!(SettingsValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_output_path_is_a_file() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("docs"), "not a directory\n").unwrap();
        let err = SettingsValidator::validate(&settings_for(temp_dir.path())).unwrap_err();
        assert!(matches!(err, CartographerError::OutputWrite { .. }));
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        let temp_dir = tempdir().unwrap();
        let mut settings = settings_for(temp_dir.path());
        settings.quiet = true;
        settings.verbose = true;
        assert!(SettingsValidator::validate(&settings).is_err());
    }
}
