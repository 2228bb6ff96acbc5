use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a scan run.
///
/// Per-file extraction failures are not in here; they are collected in
/// [`crate::ScanSummary::failures`] and the run continues.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan worker failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("detection setup failed: {0}")]
    Detect(#[from] piiscan_detect::DetectError),

    #[error("configuration error: {0}")]
    Config(#[from] piiscan_core::ConfigError),
}

/// Errors raised by a single result exporter.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write report to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write console report: {0}")]
    Console(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
