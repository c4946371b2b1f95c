//! Module path resolution utilities
//!
//! Import resolution never touches the filesystem: candidates are checked
//! against the set of discovered files, so resolution is deterministic and
//! only ever lands on nodes of the dependency graph.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// TypeScript `compilerOptions.paths` configuration for alias resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsConfig {
    /// `baseUrl`, relative to the scan root and normalised
    pub base_url: Option<String>,
    pub paths: BTreeMap<String, Vec<String>>,
}

impl TsConfig {
    /// Load `tsconfig.json` from the scan root if present and parseable
    pub fn load(root: &Path) -> Option<Self> {
        let content = fs::read_to_string(root.join("tsconfig.json")).ok()?;
        Self::parse(&content)
    }

    /// Parse tsconfig content; full-line `//` comments are tolerated
    pub fn parse(content: &str) -> Option<Self> {
        let stripped: String = content
            .lines()
            .filter(|line| !line.trim_start().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        let json: Value = serde_json::from_str(&stripped).ok()?;
        let compiler_options = json.get("compilerOptions")?;

        let base_url = compiler_options
            .get("baseUrl")
            .and_then(|v| v.as_str())
            .and_then(normalize);

        let paths = compiler_options
            .get("paths")
            .and_then(|v| v.as_object())
            .map(|obj| {
                obj.iter()
                    .filter_map(|(key, value)| {
                        let targets = value
                            .as_array()?
                            .iter()
                            .filter_map(|v| v.as_str().map(String::from))
                            .collect();
                        Some((key.clone(), targets))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Self { base_url, paths })
    }

    /// Candidate root-relative paths for an aliased specifier
    pub fn alias_candidates(&self, specifier: &str) -> Vec<String> {
        let base = self.base_url.as_deref().unwrap_or("");
        let mut candidates = Vec::new();

        for (pattern, replacements) in &self.paths {
            let Some(wildcard) = match_path_pattern(specifier, pattern) else {
                continue;
            };
            for replacement in replacements {
                let replaced = replacement.replace('*', wildcard);
                if let Some(path) = normalize(&join(base, &replaced)) {
                    candidates.push(path);
                }
            }
        }

        if self.base_url.is_some() && !specifier.starts_with('.') {
            if let Some(path) = normalize(&join(base, specifier)) {
                candidates.push(path);
            }
        }

        candidates
    }
}

/// Match a specifier against a tsconfig path pattern, returning the wildcard part
fn match_path_pattern<'a>(specifier: &'a str, pattern: &str) -> Option<&'a str> {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            if specifier.len() >= prefix.len() + suffix.len()
                && specifier.starts_with(prefix)
                && specifier.ends_with(suffix)
            {
                Some(&specifier[prefix.len()..specifier.len() - suffix.len()])
            } else {
                None
            }
        }
        None if specifier == pattern => Some(""),
        None => None,
    }
}

/// Set of discovered files, used to resolve import candidates
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    files: BTreeSet<String>,
    dirs: BTreeSet<String>,
    tsconfig: Option<TsConfig>,
}

impl FileIndex {
    /// Create an index over root-relative `/`-separated paths
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files = BTreeSet::new();
        let mut dirs = BTreeSet::new();

        for path in paths {
            let path = path.into();
            let mut current = parent(&path);
            while !current.is_empty() {
                if !dirs.insert(current.to_string()) {
                    break;
                }
                current = parent(current);
            }
            files.insert(path);
        }

        Self {
            files,
            dirs,
            tsconfig: None,
        }
    }

    /// Attach TypeScript path aliases
    pub fn with_tsconfig(mut self, tsconfig: Option<TsConfig>) -> Self {
        self.tsconfig = tsconfig;
        self
    }

    pub fn tsconfig(&self) -> Option<&TsConfig> {
        self.tsconfig.as_ref()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    pub fn is_dir(&self, path: &str) -> bool {
        path.is_empty() || self.dirs.contains(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files directly inside `dir`, in sorted order
    pub fn files_in_dir<'a>(&'a self, dir: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{}/", dir)
        };
        self.files
            .range(prefix.clone()..)
            .take_while(move |path| path.starts_with(&prefix))
            .filter(move |path| parent(path) == dir)
            .map(String::as_str)
    }

    /// First candidate that is a discovered file
    pub fn first_existing<I, S>(&self, candidates: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates
            .into_iter()
            .find(|candidate| self.contains(candidate.as_ref()))
            .map(|candidate| candidate.as_ref().to_string())
    }

    /// Try `base`, then `base.<ext>` for each extension, then `base/<index>.<ext>`
    pub fn resolve_with_extensions(&self, base: &str, extensions: &[&str], index_names: &[&str]) -> Option<String> {
        if self.contains(base) {
            return Some(base.to_string());
        }
        for ext in extensions {
            let candidate = format!("{}.{}", base, ext);
            if self.contains(&candidate) {
                return Some(candidate);
            }
        }
        if self.is_dir(base) {
            for index in index_names {
                for ext in extensions {
                    let candidate = join(base, &format!("{}.{}", index, ext));
                    if self.contains(&candidate) {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }

    /// Smallest path equal to `suffix` or ending in `/<suffix>`
    pub fn find_suffix(&self, suffix: &str) -> Option<&str> {
        if self.files.contains(suffix) {
            return self.files.get(suffix).map(String::as_str);
        }
        let needle = format!("/{}", suffix);
        self.files
            .iter()
            .find(|path| path.ends_with(&needle))
            .map(String::as_str)
    }

    /// Smallest directory equal to `suffix` or ending in `/<suffix>`
    pub fn find_dir_suffix(&self, suffix: &str) -> Option<&str> {
        if self.dirs.contains(suffix) {
            return self.dirs.get(suffix).map(String::as_str);
        }
        let needle = format!("/{}", suffix);
        self.dirs
            .iter()
            .find(|dir| dir.ends_with(&needle))
            .map(String::as_str)
    }
}

/// Directory part of a relative path, empty at the root
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Join two relative path fragments with `/`
pub fn join(dir: &str, rel: &str) -> String {
    if dir.is_empty() {
        rel.to_string()
    } else if rel.is_empty() {
        dir.to_string()
    } else {
        format!("{}/{}", dir, rel)
    }
}

/// Collapse `.` and `..` segments; `None` if the path escapes the root
pub fn normalize(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}
