//! Update mode: compare freshly rendered reports with the ones on disk
//!
//! Prior reports are only ever read here. Whatever changes is written by the
//! atomic [`ReportWriter`](crate::output::ReportWriter).

use crate::error::{try_with_recovery, CartographerError};
use crate::output::reports::{RenderedReport, ReportKind};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// What happens to one report file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReportChange {
    Created,
    Updated { added: usize, removed: usize },
    Unchanged,
}

impl ReportChange {
    pub fn label(&self) -> &'static str {
        match self {
            ReportChange::Created => "created",
            ReportChange::Updated { .. } => "updated",
            ReportChange::Unchanged => "unchanged",
        }
    }
}

/// Change status of one report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportDiff {
    pub kind: ReportKind,
    pub change: ReportChange,
}

/// Reports found in the output directory from an earlier run
#[derive(Debug, Clone, Default)]
pub struct PriorReports {
    contents: BTreeMap<ReportKind, String>,
}

impl PriorReports {
    /// Read whichever of the five reports exist; missing or unreadable ones count as absent
    pub fn load(output_dir: &Path) -> Self {
        let mut contents = BTreeMap::new();
        for kind in ReportKind::ALL {
            let path = output_dir.join(kind.file_name());
            // Unreadable reports are logged as warnings by the recovery handler
            let read = try_with_recovery(|| match fs::read_to_string(&path) {
                Ok(content) => Ok(Some(content)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(CartographerError::file_unreadable(&path, err)),
            });
            if let Ok(Some(Some(content))) = read {
                contents.insert(kind, content);
            }
        }
        debug!("Loaded {} prior reports from {}", contents.len(), output_dir.display());
        Self { contents }
    }

    pub fn get(&self, kind: ReportKind) -> Option<&str> {
        self.contents.get(&kind).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Classify each new report against its prior version
    pub fn diff(&self, reports: &[RenderedReport]) -> Vec<ReportDiff> {
        reports
            .iter()
            .map(|report| {
                let change = match self.get(report.kind) {
                    None => ReportChange::Created,
                    Some(previous) if previous == report.content => ReportChange::Unchanged,
                    Some(previous) => {
                        let (added, removed) = line_changes(previous, &report.content);
                        ReportChange::Updated { added, removed }
                    }
                };
                ReportDiff {
                    kind: report.kind,
                    change,
                }
            })
            .collect()
    }
}

/// Whether any report differs from what is on disk
pub fn has_changes(diffs: &[ReportDiff]) -> bool {
    diffs.iter().any(|diff| diff.change != ReportChange::Unchanged)
}

/// Lines only in `new` and lines only in `old`, counting duplicates
fn line_changes(old: &str, new: &str) -> (usize, usize) {
    let mut counts: HashMap<&str, isize> = HashMap::new();
    for line in old.lines() {
        *counts.entry(line).or_insert(0) -= 1;
    }
    for line in new.lines() {
        *counts.entry(line).or_insert(0) += 1;
    }

    counts.values().fold((0, 0), |(added, removed), &count| {
        if count > 0 {
            (added + count as usize, removed)
        } else {
            (added, removed + count.unsigned_abs())
        }
    })
}
