//! Scanner findings

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a finding is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    /// Hard-coded credential or key material
    Secret,
    /// Insecure configuration such as disabled TLS verification
    Insecure,
    Todo,
    Fixme,
    Hack,
    Xxx,
    Bug,
    /// A file that could not be fully scanned
    Skipped,
}

impl FindingKind {
    /// Marker kind for a marker token, case-sensitive
    pub fn from_marker(token: &str) -> Option<Self> {
        match token {
            "TODO" => Some(FindingKind::Todo),
            "FIXME" => Some(FindingKind::Fixme),
            "HACK" => Some(FindingKind::Hack),
            "XXX" => Some(FindingKind::Xxx),
            "BUG" => Some(FindingKind::Bug),
            _ => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        self.priority().is_some()
    }

    pub fn is_security(&self) -> bool {
        matches!(self, FindingKind::Secret | FindingKind::Insecure)
    }

    /// Static priority table for markers
    pub fn priority(&self) -> Option<Priority> {
        match self {
            FindingKind::Fixme | FindingKind::Bug => Some(Priority::High),
            FindingKind::Todo => Some(Priority::Normal),
            FindingKind::Hack | FindingKind::Xxx => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::Secret => "Secret",
            FindingKind::Insecure => "Insecure",
            FindingKind::Todo => "TODO",
            FindingKind::Fixme => "FIXME",
            FindingKind::Hack => "HACK",
            FindingKind::Xxx => "XXX",
            FindingKind::Bug => "BUG",
            FindingKind::Skipped => "Skipped",
        }
    }

    /// Marker kinds in the order reports list them
    pub const MARKERS: [FindingKind; 5] = [
        FindingKind::Todo,
        FindingKind::Fixme,
        FindingKind::Bug,
        FindingKind::Hack,
        FindingKind::Xxx,
    ];
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Info];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Marker priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Normal, Priority::Low];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Normal => "Normal",
            Priority::Low => "Low",
        }
    }

    /// Markers that map to this priority, for section headings
    pub fn markers(&self) -> &'static str {
        match self {
            Priority::High => "FIXME/BUG",
            Priority::Normal => "TODO",
            Priority::Low => "HACK/XXX",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single scanner result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,

    /// Relative path of the file
    pub file: String,

    /// 1-based line, 0 for whole-file findings
    pub line: usize,

    /// Matched text; secrets are redacted, markers carry their trailing comment
    pub text: String,

    /// Short label such as "AWS Access Key" or "Unreadable file"
    pub category: String,

    pub severity: Severity,
}

impl Finding {
    pub fn new(
        kind: FindingKind,
        file: impl Into<String>,
        line: usize,
        text: impl Into<String>,
        category: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            kind,
            file: file.into(),
            line,
            text: text.into(),
            category: category.into(),
            severity,
        }
    }

    /// Record a file that was discovered but not fully scanned
    pub fn skipped(file: impl Into<String>, reason: impl Into<String>, severity: Severity) -> Self {
        Self::new(FindingKind::Skipped, file, 0, reason, "Skipped file", severity)
    }

    pub fn priority(&self) -> Option<Priority> {
        self.kind.priority()
    }

    /// Deterministic ordering key: file, line, kind, text
    pub fn sort_key(&self) -> (&str, usize, FindingKind, &str) {
        (&self.file, self.line, self.kind, &self.text)
    }
}

/// Sort findings into their deterministic report order
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
