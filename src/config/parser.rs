//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{CartographerError, Result};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CartographerError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| CartographerError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|source| CartographerError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();
    let invalid = |what: &str| {
        CartographerError::config_error(format!("{} in config file: {}", what, path.display()))
    };

    let empty_path = |value: &Option<PathBuf>| value.as_ref().is_some_and(|p| p.as_os_str().is_empty());

    if empty_path(&settings.scan_path) {
        return Err(invalid("Invalid empty scan_path"));
    }

    if empty_path(&settings.output_dir) {
        return Err(invalid("Invalid empty output_dir"));
    }

    if empty_path(&settings.ignore_file) {
        return Err(invalid("Invalid empty ignore_file"));
    }

    if let Some(patterns) = &settings.exclude_patterns {
        if patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid("Empty exclude pattern"));
        }
    }

    if let Some(patterns) = &settings.security_skip_files {
        for pattern in patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                invalid(&format!("Invalid security_skip_files pattern '{}': {}", pattern, e))
            })?;
        }
    }

    if settings.max_graph_nodes == Some(0) {
        return Err(invalid("Invalid max_graph_nodes 0. Must be at least 1"));
    }

    Ok(())
}

/// Candidate configuration file locations, in lookup order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];

    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }

    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("cartographer").join("config.toml"));
    }

    locations
}

/// Find and load configuration from the first default location that exists
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            tracing::debug!("Using configuration file {}", location.display());
            return parse_config_file(location).map(Some);
        }
    }

    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(CartographerError::io_error)?;
        }
    }

    fs::write(path, include_str!("default_config.toml")).map_err(CartographerError::io_error)?;

    Ok(())
}
