//! Analysis result structures

use super::dependency_graph::DependencyGraph;
use super::file_record::FileRecord;
use super::finding::{Finding, FindingKind, Priority, Severity};
use super::metrics::MetricsSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Project name and description shown in the codebase map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Title from the README, falling back to the root directory name
    pub name: String,
    /// First paragraph line after the README title
    pub description: Option<String>,
    /// Name of the scanned root directory (never an absolute path)
    pub root_name: String,
}

impl ProjectInfo {
    /// Build project info from the root directory name and optional README text
    pub fn new(root_name: impl Into<String>, readme: Option<&str>) -> Self {
        let root_name = root_name.into();
        let mut name = root_name.clone();
        let mut description = None;

        if let Some(readme) = readme {
            let mut lines = readme.lines();
            for line in lines.by_ref() {
                if let Some(title) = line.strip_prefix("# ") {
                    let title = title.trim();
                    if !title.is_empty() {
                        name = title.to_string();
                    }
                    break;
                }
            }
            description = lines
                .take(10)
                .map(str::trim)
                .find(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string);
        }

        Self {
            name,
            description,
            root_name,
        }
    }
}

/// Declarations and purpose line extracted from one source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// First line of the module doc comment or docstring
    pub purpose: Option<String>,
    /// Declared classes, structs, traits and similar, in source order
    pub types: Vec<String>,
    /// Declared top-level functions, in source order
    pub functions: Vec<String>,
}

impl Outline {
    pub fn is_empty(&self) -> bool {
        self.purpose.is_none() && self.types.is_empty() && self.functions.is_empty()
    }
}

/// Everything the report renderers consume
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub project: ProjectInfo,

    /// All discovered files, sorted by path
    pub files: Vec<FileRecord>,

    /// Outlines keyed by relative path
    pub outlines: BTreeMap<String, Outline>,

    pub graph: DependencyGraph,

    /// All findings in deterministic order
    pub findings: Vec<Finding>,

    pub metrics: MetricsSummary,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Secret and insecure-configuration findings
    pub fn security_findings(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.findings.iter().filter(|f| f.kind.is_security())
    }

    pub fn security_findings_with(&self, severity: Severity) -> Vec<&Finding> {
        self.security_findings()
            .filter(|f| f.severity == severity)
            .collect()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.findings.iter().filter(|f| f.kind.is_marker())
    }

    pub fn markers_with(&self, priority: Priority) -> Vec<&Finding> {
        self.markers()
            .filter(|f| f.priority() == Some(priority))
            .collect()
    }

    pub fn marker_count(&self, kind: FindingKind) -> usize {
        self.markers().filter(|f| f.kind == kind).count()
    }

    pub fn skipped(&self) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.kind == FindingKind::Skipped)
            .collect()
    }
}
