//! piiscan Detect - PII matching strategies.
//!
//! Loads category definitions (built-in or from a pattern file) and turns
//! them into a [`ScanStrategy`] that maps extracted text to per-category
//! matches.
//!
//! # Example
//!
//! ```rust
//! use piiscan_core::StrategyKind;
//! use piiscan_detect::{build_strategy, PatternConfig};
//!
//! let strategy = build_strategy(StrategyKind::Regex, &PatternConfig::builtin()).unwrap();
//! let matches = strategy.scan("mail me: jane@example.org");
//! assert_eq!(matches["email"], vec!["jane@example.org"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod patterns;
pub mod strategy;

// Re-export commonly used types
pub use error::{DetectError, Result};
pub use patterns::{
    load_patterns, DefaultProvider, FileProvider, PatternConfig, PatternProvider, PatternRegistry,
};
pub use strategy::{
    build_strategy, strategy_from_name, KeywordStrategy, RegexStrategy, ScanStrategy,
};
