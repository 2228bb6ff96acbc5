//! Error types for the detection subsystem.
//!
//! All of these are construction-time failures: a strategy that cannot be
//! fully built never scans anything.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a matching strategy.
#[derive(Error, Debug)]
pub enum DetectError {
    /// A regex pattern failed to compile
    #[error("invalid regex pattern '{pattern}' in category '{category}': {source}")]
    InvalidPattern {
        /// Category the pattern belongs to
        category: String,
        /// Pattern source text
        pattern: String,
        /// Compiler error
        #[source]
        source: regex::Error,
    },

    /// No pattern provider is registered under this name
    #[error("unknown pattern provider '{0}'")]
    UnknownProvider(String),

    /// Pattern definition file could not be read
    #[error("failed to read pattern file {}: {source}", .path.display())]
    PatternFile {
        /// Path to the pattern file
        path: PathBuf,
        /// I/O error
        #[source]
        source: std::io::Error,
    },

    /// Pattern definition file is not valid JSON or TOML
    #[error("failed to parse pattern file {}: {reason}", .path.display())]
    PatternFormat {
        /// Path to the pattern file
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Invalid configuration (e.g. unknown strategy name)
    #[error("configuration error: {0}")]
    Config(#[from] piiscan_core::ConfigError),
}

/// Result type for detection operations.
pub type Result<T> = std::result::Result<T, DetectError>;
