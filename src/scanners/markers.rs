//! TODO / FIXME / HACK / XXX / BUG comment markers

use super::{ScanBudget, Scanner};
use crate::error::Result;
use crate::models::finding::{Finding, FindingKind, Severity};
use regex::Regex;
use std::sync::OnceLock;

/// Maximum marker text length in characters
const TEXT_LIMIT: usize = 200;

/// A marker token after a comment opener, with an optional `(author)` and a colon
///
/// `*`, `;` and `%` only open a comment at the start of a line.
fn marker_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:^\s*[*;%]|//|#|/\*|--|<!--).*?\b(TODO|FIXME|HACK|XXX|BUG)(?:\(([^)]*)\))?:\s*(.*)$",
        )
        .expect("valid regex")
    })
}

/// Scanner for task markers in comments
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerScanner;

impl MarkerScanner {
    pub fn new() -> Self {
        Self
    }

    /// Marker on a single line, if any
    pub fn scan_line(&self, path: &str, line_no: usize, line: &str) -> Option<Finding> {
        let caps = marker_pattern().captures(line)?;
        let kind = FindingKind::from_marker(&caps[1])?;
        let text = clean_text(caps.get(3).map(|m| m.as_str()).unwrap_or(""));
        if text.is_empty() {
            return None;
        }

        let category = match caps.get(2).map(|m| m.as_str().trim()) {
            Some(author) if !author.is_empty() => format!("{} ({})", kind.label(), author),
            _ => kind.label().to_string(),
        };

        Some(Finding::new(kind, path, line_no, text, category, Severity::Info))
    }
}

impl Scanner for MarkerScanner {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn scan(&self, path: &str, text: &str, budget: &ScanBudget) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            budget.check(path, idx)?;
            findings.extend(self.scan_line(path, idx + 1, line));
        }
        Ok(findings)
    }
}

/// Strip comment closers and truncate
fn clean_text(raw: &str) -> String {
    let mut text = raw.trim();
    loop {
        let stripped = text
            .trim_end_matches("*/")
            .trim_end_matches("-->")
            .trim_end();
        if stripped.len() == text.len() {
            break;
        }
        text = stripped;
    }
    text.chars().take(TEXT_LIMIT).collect()
}
