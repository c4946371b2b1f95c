//! Aggregate metrics over file records

use crate::models::file_record::FileRecord;
use crate::models::metrics::{GroupStats, LargeFile, MetricsSummary, SizeBucket};

/// Entries kept in the largest-files list
pub const LARGEST_FILES_LIMIT: usize = 10;

/// Rough bytes-per-token ratio for source text
const BYTES_PER_TOKEN: u64 = 4;

/// Single-threaded reduction of file records into a metrics summary
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Group records by language and top-level directory
    ///
    /// Every record lands in exactly one language group and one directory
    /// group, so both sets of groups sum to the totals.
    pub fn aggregate(records: &[FileRecord]) -> MetricsSummary {
        let mut summary = MetricsSummary::default();
        for bucket in SizeBucket::ALL {
            summary.size_distribution.insert(bucket, 0);
        }

        for record in records {
            let tokens = if record.binary {
                0
            } else {
                record.bytes / BYTES_PER_TOKEN
            };

            summary.total.add(record.lines, record.bytes, tokens);
            summary
                .by_language
                .entry(record.language.tag().to_string())
                .or_insert_with(GroupStats::default)
                .add(record.lines, record.bytes, tokens);
            summary
                .by_directory
                .entry(record.top_level_dir().to_string())
                .or_insert_with(GroupStats::default)
                .add(record.lines, record.bytes, tokens);

            if record.binary {
                summary.binary_files += 1;
            } else {
                *summary
                    .size_distribution
                    .entry(SizeBucket::for_lines(record.lines))
                    .or_insert(0) += 1;
            }
        }

        let mut largest: Vec<&FileRecord> = records.iter().filter(|r| !r.binary).collect();
        largest.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.path.cmp(&b.path)));
        summary.largest_files = largest
            .into_iter()
            .take(LARGEST_FILES_LIMIT)
            .map(|record| LargeFile {
                path: record.path.clone(),
                lines: record.lines,
                bytes: record.bytes,
            })
            .collect();

        summary
    }
}
