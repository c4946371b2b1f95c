//! Directory walking functionality
//!
//! This module provides deterministic directory traversal with gitignore-style
//! exclusion, depth limiting, symlink loop protection and per-file loading
//! under a size budget.

use crate::error::{handle_error, CartographerError, ResultExt, Result};
use crate::models::config::Settings;
use crate::models::file_record::{count_lines, FileRecord, Language};
use crate::models::finding::{Finding, Severity};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Patterns ignored in every scan, before the ignore file
pub const DEFAULT_IGNORES: &[&str] = &[
    ".git/",
    "node_modules/",
    "__pycache__/",
    ".pytest_cache/",
    "venv/",
    ".venv/",
    "dist/",
    "build/",
    "target/",
    "*.pyc",
    "*.pyo",
    ".DS_Store",
    "Thumbs.db",
];

/// Prefix of the staging directories the report writer creates
pub const STAGING_PREFIX: &str = ".cartographer-staging-";

/// A file found during traversal, not yet read
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Path on disk
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated
    pub relative: String,
    /// Size from metadata
    pub size: u64,
}

/// Result of enumerating the scan root
#[derive(Debug, Default)]
pub struct Discovery {
    /// Files in lexicographic order of relative path
    pub files: Vec<DiscoveredFile>,
    /// Entries that could not be traversed
    pub skipped: Vec<Finding>,
}

/// One file after loading
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub record: FileRecord,
    /// Decoded text, present only for readable, non-binary UTF-8 files
    pub text: Option<String>,
    /// Why the file was not fully loaded
    pub skipped: Option<Finding>,
    /// Whether the file's bytes could be read at all
    pub readable: bool,
}

/// Main walker for directory traversal and file loading
pub struct Walker {
    settings: Settings,
    root: PathBuf,
    output_dir: PathBuf,
    ignore: Gitignore,
}

impl Walker {
    /// Create a new walker, validating the root and compiling ignore rules
    pub fn new(settings: Settings) -> Result<Self> {
        let root = fs::canonicalize(&settings.scan_path).map_err(|_| CartographerError::RootNotFound {
            path: settings.scan_path.clone(),
        })?;
        if !root.is_dir() {
            return Err(CartographerError::RootNotFound {
                path: settings.scan_path.clone(),
            });
        }
        fs::read_dir(&root).map_err(|err| CartographerError::file_unreadable(&root, err))?;

        let output_dir = settings.output_dir();
        let output_dir = fs::canonicalize(&output_dir).unwrap_or_else(|_| {
            if output_dir.is_absolute() {
                output_dir
            } else {
                // Not created yet: resolve against the canonical root when it lives inside it
                output_dir
                    .strip_prefix(&settings.scan_path)
                    .map(|rel| root.join(rel))
                    .unwrap_or(output_dir.clone())
            }
        });

        let ignore = build_ignore(&root, &settings.ignore_file(), &settings.exclude_patterns)?;

        Ok(Self {
            settings,
            root,
            output_dir,
            ignore,
        })
    }

    /// Canonical scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolved report directory, always excluded from the walk
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Get the current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Enumerate candidate files in lexicographic order
    pub fn discover(&self) -> Result<Discovery> {
        let mut discovery = Discovery::default();
        let mut visited: HashSet<PathBuf> = HashSet::new();
        visited.insert(self.root.clone());

        let mut walk = WalkDir::new(&self.root)
            .follow_links(self.settings.follow_links)
            .sort_by_file_name()
            .min_depth(1);
        if let Some(max_depth) = self.settings.max_depth {
            // Directories up to `max_depth` below the root are read
            walk = walk.max_depth(max_depth + 1);
        }

        let follow_links = self.settings.follow_links;
        let iter = walk.into_iter().filter_entry(|entry| {
            if self.is_excluded(entry) {
                return false;
            }
            if follow_links && entry.file_type().is_dir() {
                // Symlink cycle protection: each real directory is entered once
                if let Ok(real) = fs::canonicalize(entry.path()) {
                    if !visited.insert(real) {
                        debug!("Skipping already visited directory {}", entry.path().display());
                        return false;
                    }
                }
            }
            true
        });

        for entry in iter {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                    let message = if err.loop_ancestor().is_some() {
                        "symbolic link loop".to_string()
                    } else {
                        err.to_string()
                    };
                    let err = CartographerError::directory_traversal_error(&path, message);
                    discovery.skipped.push(self.skip(&path, err));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let size = match entry.metadata().with_file_context(entry.path()) {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    discovery.skipped.push(self.skip(entry.path(), err));
                    continue;
                }
            };

            discovery.files.push(DiscoveredFile {
                relative: self.relative(entry.path()),
                path: entry.into_path(),
                size,
            });
        }

        discovery.files.sort_by(|a, b| a.relative.cmp(&b.relative));
        debug!(
            "Discovered {} files under {} ({} skipped entries)",
            discovery.files.len(),
            self.root.display(),
            discovery.skipped.len()
        );

        Ok(discovery)
    }

    /// Read one file into a record, recording why it was not fully loaded
    pub fn load(&self, file: &DiscoveredFile) -> LoadedFile {
        let limit = self.settings.max_file_size;
        let unread = |language: Language| FileRecord {
            path: file.relative.clone(),
            language,
            lines: 0,
            bytes: file.size,
            binary: false,
        };

        if file.size > limit {
            let err = CartographerError::FileTooLarge {
                path: PathBuf::from(&file.relative),
                size: file.size,
                limit,
            };
            return LoadedFile {
                record: unread(Language::classify(&file.path, None)),
                text: None,
                skipped: Some(self.skip(&file.path, err)),
                readable: true,
            };
        }

        let bytes = match fs::read(&file.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                let err = CartographerError::file_unreadable(&file.relative, err);
                return LoadedFile {
                    record: unread(Language::classify(&file.path, None)),
                    text: None,
                    skipped: Some(self.skip(&file.path, err)),
                    readable: false,
                };
            }
        };

        let sniff = &bytes[..bytes.len().min(self.settings.binary_sniff_bytes)];
        if sniff.contains(&0) {
            return LoadedFile {
                record: FileRecord {
                    binary: true,
                    bytes: bytes.len() as u64,
                    ..unread(Language::classify(&file.path, None))
                },
                text: None,
                skipped: None,
                readable: true,
            };
        }

        let lines = count_lines(&bytes);
        let size = bytes.len() as u64;
        match String::from_utf8(bytes) {
            Ok(text) => {
                let language = Language::classify(&file.path, text.lines().next());
                LoadedFile {
                    record: FileRecord {
                        path: file.relative.clone(),
                        language,
                        lines,
                        bytes: size,
                        binary: false,
                    },
                    text: Some(text),
                    skipped: None,
                    readable: true,
                }
            }
            Err(_) => {
                let err = CartographerError::EncodingError {
                    path: PathBuf::from(&file.relative),
                };
                LoadedFile {
                    record: FileRecord {
                        lines,
                        bytes: size,
                        ..unread(Language::classify(&file.path, None))
                    },
                    text: None,
                    skipped: Some(self.skip(&file.path, err)),
                    readable: true,
                }
            }
        }
    }

    /// Discover and load every file sequentially, returning records in order
    pub fn walk(&self) -> Result<Vec<FileRecord>> {
        let discovery = self.discover()?;
        Ok(discovery
            .files
            .iter()
            .map(|file| self.load(file).record)
            .collect())
    }

    /// Whether an entry is pruned by ignore rules or is report output
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let path = entry.path();
        let is_dir = entry.file_type().is_dir();

        if is_dir {
            if path == self.output_dir {
                return true;
            }
            if entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(STAGING_PREFIX))
            {
                return true;
            }
        }

        self.ignore.matched(path, is_dir).is_ignore()
    }

    /// `/`-separated path relative to the root
    fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Turn a recoverable error into a skipped-file finding, logging it
    fn skip(&self, path: &Path, err: CartographerError) -> Finding {
        // Reports never carry absolute paths
        let root_prefix = format!("{}{}", self.root.display(), std::path::MAIN_SEPARATOR);
        let reason = err.to_string().replace(&root_prefix, "");
        let finding = Finding::skipped(self.relative(path), reason, Severity::Warning);
        if let Some(err) = handle_error(err) {
            warn!("Unexpected critical error while walking: {}", err);
        }
        finding
    }
}

/// Compile built-in defaults, the ignore file and extra patterns, in that order
pub fn build_ignore(root: &Path, ignore_file: &Path, extra: &[String]) -> Result<Gitignore> {
    let mut builder = GitignoreBuilder::new(root);

    for pattern in DEFAULT_IGNORES {
        add_pattern(&mut builder, pattern)?;
    }

    if ignore_file.is_file() {
        let content = fs::read_to_string(ignore_file)
            .map_err(|source| CartographerError::ConfigRead {
                path: ignore_file.to_path_buf(),
                source,
            })?;
        for line in content.lines() {
            if let Err(err) = builder.add_line(Some(ignore_file.to_path_buf()), line) {
                // Bad lines in a project's own ignore file are not fatal
                warn!("Ignoring invalid pattern in {}: {}", ignore_file.display(), err);
            }
        }
    }

    for pattern in extra {
        add_pattern(&mut builder, pattern)?;
    }

    builder.build().map_err(|err| CartographerError::IgnorePattern {
        pattern: String::new(),
        message: err.to_string(),
    })
}

fn add_pattern(builder: &mut GitignoreBuilder, pattern: &str) -> Result<()> {
    builder
        .add_line(None, pattern)
        .map(|_| ())
        .map_err(|err| CartographerError::IgnorePattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })
}
