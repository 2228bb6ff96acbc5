//! piiscan Core - Foundation crate for the piiscan document PII scanner.
//!
//! This crate provides the shared data model, error handling and
//! configuration management that the extraction, detection and scanning
//! crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Match maps, pattern sets and the strategy selector
//!
//! # Example
//!
//! ```rust
//! use piiscan_core::{AppConfig, StrategyKind};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.scanning.strategy, StrategyKind::Regex);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, OutputConfig, ScanningConfig, SizeLimits, DEFAULT_MAX_BYTES};
pub use error::{ConfigError, ConfigResult};
pub use types::{match_count, PatternSet, ScanMatches, StrategyKind};
