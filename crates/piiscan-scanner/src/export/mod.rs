//! Result sinks.
//!
//! Exporters receive every successfully scanned file in processing order and
//! the run totals once at the end. A [`ResultHandler`] fans results out to
//! all registered exporters and keeps one exporter's failure from affecting
//! the rest.

mod console;
mod json;

pub use console::ConsoleExporter;
pub use json::JsonExporter;

use crate::error::ExportError;
use crate::stats::{AggregateStats, ScanRecord};
use piiscan_core::ScanMatches;
use tracing::warn;

/// A sink for scan results.
pub trait ResultExporter: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Called once per scanned file with its record and the matched values.
    fn on_file(&mut self, record: &ScanRecord, matches: &ScanMatches) -> Result<(), ExportError>;

    /// Called exactly once after the last file.
    fn on_finalize(&mut self, stats: &AggregateStats) -> Result<(), ExportError>;
}

/// Ordered collection of exporters.
#[derive(Default)]
pub struct ResultHandler {
    exporters: Vec<Box<dyn ResultExporter>>,
    failures: usize,
}

impl ResultHandler {
    /// Create a handler with no exporters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an exporter; exporters run in registration order.
    pub fn register(&mut self, exporter: Box<dyn ResultExporter>) {
        self.exporters.push(exporter);
    }

    /// Builder form of [`ResultHandler::register`].
    #[must_use]
    pub fn with(mut self, exporter: Box<dyn ResultExporter>) -> Self {
        self.register(exporter);
        self
    }

    /// Number of registered exporters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exporters.len()
    }

    /// Whether no exporter is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exporters.is_empty()
    }

    /// Exporter calls that returned an error so far.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Forward one file's results to every exporter.
    pub fn handle_file(&mut self, record: &ScanRecord, matches: &ScanMatches) {
        for exporter in &mut self.exporters {
            if let Err(e) = exporter.on_file(record, matches) {
                warn!(
                    exporter = exporter.name(),
                    path = %record.path.display(),
                    error = %e,
                    "exporter failed to record file"
                );
                self.failures += 1;
            }
        }
    }

    /// Forward the run totals to every exporter.
    pub fn finalize(&mut self, stats: &AggregateStats) {
        for exporter in &mut self.exporters {
            if let Err(e) = exporter.on_finalize(stats) {
                warn!(exporter = exporter.name(), error = %e, "exporter failed to finalize");
                self.failures += 1;
            }
        }
    }
}

impl std::fmt::Debug for ResultHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.exporters.iter().map(|e| e.name()).collect();
        f.debug_struct("ResultHandler")
            .field("exporters", &names)
            .field("failures", &self.failures)
            .finish()
    }
}
