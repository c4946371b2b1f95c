//! Aggregate code metrics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File, line and byte totals for one group of files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStats {
    pub files: usize,
    pub lines: usize,
    pub bytes: u64,
    /// Rough token estimate (bytes / 4 over text files)
    pub tokens: u64,
}

impl GroupStats {
    pub fn add(&mut self, lines: usize, bytes: u64, tokens: u64) {
        self.files += 1;
        self.lines += lines;
        self.bytes += bytes;
        self.tokens += tokens;
    }
}

/// Line-count buckets for the size distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl SizeBucket {
    pub const ALL: [SizeBucket; 4] = [
        SizeBucket::Small,
        SizeBucket::Medium,
        SizeBucket::Large,
        SizeBucket::ExtraLarge,
    ];

    pub fn for_lines(lines: usize) -> Self {
        match lines {
            0..=99 => SizeBucket::Small,
            100..=499 => SizeBucket::Medium,
            500..=999 => SizeBucket::Large,
            _ => SizeBucket::ExtraLarge,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeBucket::Small => "Small (<100 lines)",
            SizeBucket::Medium => "Medium (100-499 lines)",
            SizeBucket::Large => "Large (500-999 lines)",
            SizeBucket::ExtraLarge => "Extra Large (1000+ lines)",
        }
    }
}

/// One entry of the largest-files list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeFile {
    pub path: String,
    pub lines: usize,
    pub bytes: u64,
}

/// Metrics derived from the set of file records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total: GroupStats,

    /// Keyed by language tag
    pub by_language: BTreeMap<String, GroupStats>,

    /// Keyed by top-level directory, `.` for root files
    pub by_directory: BTreeMap<String, GroupStats>,

    /// Text file counts per size bucket
    pub size_distribution: BTreeMap<SizeBucket, usize>,

    /// Largest text files by line count
    pub largest_files: Vec<LargeFile>,

    pub binary_files: usize,
}

impl MetricsSummary {
    pub fn is_empty(&self) -> bool {
        self.total.files == 0
    }

    /// Share of total lines for a language, as a percentage
    pub fn language_share(&self, language: &str) -> f64 {
        match self.by_language.get(language) {
            Some(stats) if self.total.lines > 0 => {
                stats.lines as f64 * 100.0 / self.total.lines as f64
            }
            _ => 0.0,
        }
    }

    /// Languages ordered by line count descending, then name
    pub fn languages_by_lines(&self) -> Vec<(&str, &GroupStats)> {
        let mut entries: Vec<(&str, &GroupStats)> = self
            .by_language
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
            .collect();
        entries.sort_by(|a, b| b.1.lines.cmp(&a.1.lines).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Directories ordered by line count descending, then name
    pub fn directories_by_lines(&self) -> Vec<(&str, &GroupStats)> {
        let mut entries: Vec<(&str, &GroupStats)> = self
            .by_directory
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
            .collect();
        entries.sort_by(|a, b| b.1.lines.cmp(&a.1.lines).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Average lines per text file
    pub fn average_lines(&self) -> f64 {
        let text_files = self.total.files.saturating_sub(self.binary_files);
        if text_files == 0 {
            0.0
        } else {
            self.total.lines as f64 / text_files as f64
        }
    }
}

/// Format a percentage to one decimal place
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}
