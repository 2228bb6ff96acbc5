//! Scan orchestrator for coordinating extraction and matching.
//!
//! This module provides the `ScanOrchestrator` which drives one run:
//! discover files, extract each one, scan the text, then feed the results
//! to the aggregator and every exporter.

use crate::error::Result;
use crate::export::ResultHandler;
use crate::stats::{AggregateStats, Aggregator};
use crate::walker::list_files;
use futures::stream::{self, StreamExt};
use piiscan_core::{match_count, AppConfig, ScanMatches};
use piiscan_detect::{build_strategy, load_patterns, ScanStrategy};
use piiscan_extract::{ExtractError, ReaderRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Lifecycle of a scan run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No run started yet
    Idle,
    /// Files are being processed
    Running,
    /// The last run completed
    Stopped,
    /// The last run was aborted by a worker failure
    Failed,
}

/// A file that could not be extracted.
#[derive(Debug)]
pub struct FileFailure {
    /// Path of the file
    pub path: PathBuf,
    /// Why extraction failed
    pub error: ExtractError,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct ScanSummary {
    /// Totals over every successfully scanned file
    pub stats: AggregateStats,
    /// Files whose extraction failed, in processing order
    pub failures: Vec<FileFailure>,
    /// Files skipped because no extractor handles their extension
    pub skipped: Vec<PathBuf>,
    /// The scan root did not exist
    pub root_missing: bool,
}

struct ProcessedFile {
    path: PathBuf,
    outcome: std::result::Result<ScanMatches, ExtractError>,
    duration: Duration,
}

/// Drives extraction and matching over a file or directory.
pub struct ScanOrchestrator {
    /// Extension to extractor lookup
    registry: Arc<ReaderRegistry>,
    /// Matching strategy shared by all workers
    strategy: Arc<dyn ScanStrategy>,
    /// Maximum files extracted at once
    concurrency: usize,
    state: ScanState,
}

impl ScanOrchestrator {
    /// Create an orchestrator that processes one file at a time.
    #[must_use]
    pub fn new(registry: Arc<ReaderRegistry>, strategy: Arc<dyn ScanStrategy>) -> Self {
        Self {
            registry,
            strategy,
            concurrency: 1,
            state: ScanState::Idle,
        }
    }

    /// Build the registry and strategy described by `config`.
    ///
    /// Pattern loading and regex compilation happen here, so a bad pattern
    /// file or strategy fails before any file is touched.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let patterns = load_patterns(config.scanning.pattern_file.as_deref())?;
        let strategy = build_strategy(config.scanning.strategy, &patterns)?;
        let registry = ReaderRegistry::with_defaults(config.limits);

        Ok(Self::new(Arc::new(registry), Arc::from(strategy))
            .with_concurrency(config.scanning.concurrency))
    }

    /// Set how many files may be extracted and scanned in parallel.
    ///
    /// Results are still delivered in discovery order. Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Scan `root`, which may be a single file or a directory.
    ///
    /// Per-file extraction failures are collected in the summary and do not
    /// stop the run. The aggregator and every exporter are finalized exactly
    /// once, including when no file was found.
    ///
    /// # Errors
    /// Returns an error only if a worker task panics or is cancelled; the
    /// orchestrator is then left in [`ScanState::Failed`].
    pub async fn scan(
        &mut self,
        root: &Path,
        recursive: bool,
        handler: &mut ResultHandler,
    ) -> Result<ScanSummary> {
        self.state = ScanState::Running;
        info!(
            root = %root.display(),
            recursive,
            concurrency = self.concurrency,
            strategy = %self.strategy.kind(),
            "starting scan"
        );

        let mut skipped = Vec::new();
        let mut root_missing = false;

        let files = if root.is_file() {
            if self.registry.is_supported(root) {
                vec![root.to_path_buf()]
            } else {
                warn!(path = %root.display(), "unsupported file format, skipping");
                skipped.push(root.to_path_buf());
                Vec::new()
            }
        } else {
            let registry = Arc::clone(&self.registry);
            let walk_root = root.to_path_buf();
            let outcome = tokio::task::spawn_blocking(move || {
                list_files(&walk_root, recursive, |path| registry.is_supported(path))
            })
            .await;

            match outcome {
                Ok(outcome) => {
                    root_missing = outcome.root_missing;
                    outcome.files
                }
                Err(e) => {
                    self.state = ScanState::Failed;
                    return Err(e.into());
                }
            }
        };

        debug!(count = files.len(), "files queued for scanning");

        let registry = Arc::clone(&self.registry);
        let strategy = Arc::clone(&self.strategy);
        let mut results = stream::iter(files)
            .map(move |path| {
                let registry = Arc::clone(&registry);
                let strategy = Arc::clone(&strategy);
                tokio::task::spawn_blocking(move || process_file(&registry, strategy.as_ref(), path))
            })
            .buffered(self.concurrency);

        let mut aggregator = Aggregator::new();
        let mut failures = Vec::new();

        while let Some(joined) = results.next().await {
            let processed = match joined {
                Ok(processed) => processed,
                Err(e) => {
                    tracing::error!(error = %e, "scan worker failed, aborting run");
                    self.state = ScanState::Failed;
                    return Err(e.into());
                }
            };

            match processed.outcome {
                Ok(matches) => {
                    debug!(
                        path = %processed.path.display(),
                        matches = match_count(&matches),
                        elapsed_ms = processed.duration.as_millis(),
                        "scanned file"
                    );
                    let record = aggregator.record(&processed.path, &matches, processed.duration);
                    handler.handle_file(record, &matches);
                }
                Err(ExtractError::UnsupportedFormat { .. }) => {
                    warn!(path = %processed.path.display(), "unsupported file format, skipping");
                    skipped.push(processed.path);
                }
                Err(error) => {
                    warn!(path = %processed.path.display(), error = %error, "failed to extract file");
                    failures.push(FileFailure {
                        path: processed.path,
                        error,
                    });
                }
            }
        }

        let stats = aggregator.snapshot();
        handler.finalize(&stats);
        self.state = ScanState::Stopped;

        info!(
            files = stats.total_files,
            matches = stats.total_matches,
            failures = failures.len(),
            skipped = skipped.len(),
            "scan finished"
        );

        Ok(ScanSummary {
            stats,
            failures,
            skipped,
            root_missing,
        })
    }
}

fn process_file(registry: &ReaderRegistry, strategy: &dyn ScanStrategy, path: PathBuf) -> ProcessedFile {
    let started = Instant::now();
    let outcome = registry
        .create_reader(&path)
        .and_then(|reader| reader.read_text(&path))
        .map(|text| strategy.scan(&text));

    ProcessedFile {
        path,
        outcome,
        duration: started.elapsed(),
    }
}
