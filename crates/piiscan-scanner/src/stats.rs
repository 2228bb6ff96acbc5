//! Per-file records and run totals.

use chrono::{DateTime, Utc};
use piiscan_core::types::duration_secs;
use piiscan_core::{match_count, ScanMatches};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of scanning one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanRecord {
    /// Path of the scanned file
    pub path: PathBuf,
    /// Number of matches per category; categories without matches are absent
    pub counts: BTreeMap<String, usize>,
    /// Time spent extracting and scanning
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    /// When the record was created
    pub timestamp: DateTime<Utc>,
}

impl ScanRecord {
    /// Create a record stamped with the current time.
    #[must_use]
    pub fn new(path: &Path, matches: &ScanMatches, duration: Duration) -> Self {
        let counts = matches
            .iter()
            .map(|(category, found)| (category.clone(), found.len()))
            .collect();

        Self {
            path: path.to_path_buf(),
            counts,
            duration,
            timestamp: Utc::now(),
        }
    }

    /// Sum of matches over all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Totals derived from every record so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    /// Files that were scanned successfully
    pub total_files: usize,
    /// Matches across all files and categories
    pub total_matches: usize,
    /// Sum of per-file durations
    #[serde(with = "duration_secs")]
    pub total_duration: Duration,
    /// Mean per-file duration, zero when no files were scanned
    #[serde(with = "duration_secs")]
    pub average_duration: Duration,
    /// Matches per category across all files
    pub per_category: BTreeMap<String, usize>,
}

/// Owns the ordered list of [`ScanRecord`]s for one run.
#[derive(Debug, Default)]
pub struct Aggregator {
    records: Vec<ScanRecord>,
}

impl Aggregator {
    /// Create an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for one scanned file.
    pub fn record(&mut self, path: &Path, matches: &ScanMatches, duration: Duration) -> &ScanRecord {
        tracing::trace!(
            path = %path.display(),
            matches = match_count(matches),
            "recording scan result"
        );
        self.records.push(ScanRecord::new(path, matches, duration));
        &self.records[self.records.len() - 1]
    }

    /// Records in the order they were added.
    #[must_use]
    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    /// Compute totals over every record.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(&self) -> AggregateStats {
        let mut stats = AggregateStats {
            total_files: self.records.len(),
            ..AggregateStats::default()
        };

        for record in &self.records {
            stats.total_duration += record.duration;
            for (category, count) in &record.counts {
                *stats.per_category.entry(category.clone()).or_default() += count;
                stats.total_matches += count;
            }
        }

        if stats.total_files > 0 {
            stats.average_duration = Duration::from_secs_f64(
                stats.total_duration.as_secs_f64() / stats.total_files as f64,
            );
        }

        stats
    }
}
