use super::ResultExporter;
use crate::error::ExportError;
use crate::stats::{AggregateStats, ScanRecord};
use chrono::{DateTime, Utc};
use piiscan_core::ScanMatches;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct FileEntry {
    file: String,
    duration: f64,
    timestamp: DateTime<Utc>,
    matches: ScanMatches,
}

#[derive(Debug, Serialize)]
struct Statistics<'a> {
    total_files: usize,
    total_pii: usize,
    total_duration: f64,
    avg_duration: f64,
    pii_counts: &'a BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    records: &'a [FileEntry],
    statistics: Statistics<'a>,
}

/// Collects per-file results and writes one JSON document on finalize.
///
/// Durations are in seconds. The file is overwritten if it exists.
#[derive(Debug)]
pub struct JsonExporter {
    output: PathBuf,
    run_id: Uuid,
    records: Vec<FileEntry>,
}

impl JsonExporter {
    /// Write the report to `output` when the run finishes.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            run_id: Uuid::new_v4(),
            records: Vec::new(),
        }
    }

    /// Identifier written into the report.
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}

impl ResultExporter for JsonExporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn on_file(&mut self, record: &ScanRecord, matches: &ScanMatches) -> Result<(), ExportError> {
        self.records.push(FileEntry {
            file: record.path.display().to_string(),
            duration: record.duration.as_secs_f64(),
            timestamp: record.timestamp,
            matches: matches.clone(),
        });
        Ok(())
    }

    fn on_finalize(&mut self, stats: &AggregateStats) -> Result<(), ExportError> {
        let report = Report {
            run_id: self.run_id,
            generated_at: Utc::now(),
            records: &self.records,
            statistics: Statistics {
                total_files: stats.total_files,
                total_pii: stats.total_matches,
                total_duration: stats.total_duration.as_secs_f64(),
                avg_duration: stats.average_duration.as_secs_f64(),
                pii_counts: &stats.per_category,
            },
        };

        let mut contents = serde_json::to_string_pretty(&report)?;
        contents.push('\n');

        std::fs::write(&self.output, contents).map_err(|source| ExportError::Io {
            path: self.output.clone(),
            source,
        })?;

        tracing::info!(
            path = %self.output.display(),
            records = self.records.len(),
            run_id = %self.run_id,
            "wrote JSON report"
        );
        Ok(())
    }
}
