//! piiscan Scanner - Scan orchestration, statistics and reporting.
//!
//! This crate ties extraction and detection together: it discovers candidate
//! files, runs extraction and matching on the blocking thread pool, keeps
//! per-file records, and hands results to pluggable exporters.
//!
//! # Features
//!
//! - Single-file or directory scans, optionally recursive
//! - Bounded parallelism with results delivered in discovery order
//! - Per-file failures reported without stopping the run
//! - Console and JSON exporters, isolated from each other's failures
//!
//! # Example
//!
//! ```rust,no_run
//! use piiscan_core::AppConfig;
//! use piiscan_scanner::{ConsoleExporter, ResultHandler, ScanOrchestrator};
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), piiscan_scanner::ScanError> {
//! let mut orchestrator = ScanOrchestrator::from_config(&AppConfig::default())?;
//! let mut handler = ResultHandler::new().with(Box::new(ConsoleExporter::stdout()));
//!
//! let summary = orchestrator.scan(Path::new("./documents"), true, &mut handler).await?;
//! println!("{} files, {} matches", summary.stats.total_files, summary.stats.total_matches);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod export;
pub mod orchestrator;
pub mod stats;
pub mod walker;

pub use error::{ExportError, Result, ScanError};
pub use export::{ConsoleExporter, JsonExporter, ResultExporter, ResultHandler};
pub use orchestrator::{FileFailure, ScanOrchestrator, ScanState, ScanSummary};
pub use stats::{AggregateStats, Aggregator, ScanRecord};
pub use walker::{list_files, WalkOutcome};
