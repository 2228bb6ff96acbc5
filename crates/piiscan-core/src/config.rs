//! Configuration management for piiscan.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Command-line flags are applied on top by
//! the binary.

use crate::error::{ConfigError, ConfigResult};
use crate::types::StrategyKind;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default per-format size ceiling (200 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 200 * 1024 * 1024;

/// Main application configuration.
///
/// This is loaded from `~/.config/piiscan/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scanning behavior settings
    pub scanning: ScanningConfig,
    /// Per-format input size limits
    pub limits: SizeLimits,
    /// Result output settings
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from the XDG location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path. Unlike [`AppConfig::load`],
    /// a missing file is an error.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration (explicit path or XDG default) with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `PIISCAN_STRATEGY`: Override the scanning strategy (`regex`/`keyword`)
    /// - `PIISCAN_RECURSIVE`: Override recursive directory scanning (true/false)
    /// - `PIISCAN_CONCURRENCY`: Override the number of files processed in parallel
    /// - `PIISCAN_MAX_FILE_MB`: Override every per-format size limit, in MiB
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `PIISCAN_*` overrides read through `lookup`.
    ///
    /// Unparseable numeric or boolean values are ignored; an unknown strategy
    /// name is an error.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("PIISCAN_STRATEGY") {
            self.scanning.strategy = val.parse()?;
            tracing::debug!("Override scanning.strategy from env: {}", val);
        }

        if let Some(val) = lookup("PIISCAN_RECURSIVE") {
            if let Ok(recursive) = val.parse() {
                self.scanning.recursive = recursive;
                tracing::debug!("Override scanning.recursive from env: {}", recursive);
            }
        }

        if let Some(val) = lookup("PIISCAN_CONCURRENCY") {
            if let Ok(concurrency) = val.parse::<usize>() {
                self.scanning.concurrency = concurrency.max(1);
                tracing::debug!("Override scanning.concurrency from env: {}", concurrency);
            }
        }

        if let Some(val) = lookup("PIISCAN_MAX_FILE_MB") {
            if let Ok(mb) = val.parse::<u64>() {
                self.limits = SizeLimits::uniform(mb.saturating_mul(1024 * 1024));
                tracing::debug!("Override all size limits from env: {} MiB", mb);
            }
        }

        Ok(())
    }

    /// Reject values that would make a scan meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scanning.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/piiscan/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("org", "piiscan", "piiscan").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Scanning behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Matching strategy for the run
    pub strategy: StrategyKind,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Files extracted and scanned in parallel (1 = strictly sequential)
    pub concurrency: usize,
    /// Pattern/keyword definition file; built-in defaults when absent
    pub pattern_file: Option<PathBuf>,
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Regex,
            recursive: false,
            concurrency: 1,
            pattern_file: None,
        }
    }
}

/// Maximum input size per format, in bytes.
///
/// Checked against file metadata before any decoding happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeLimits {
    /// Plain text files
    pub text: u64,
    /// PDF documents
    pub pdf: u64,
    /// Word documents
    pub docx: u64,
    /// Slide decks
    pub pptx: u64,
    /// Spreadsheets
    pub xlsx: u64,
    /// Generic XML
    pub xml: u64,
}

impl SizeLimits {
    /// The same ceiling for every format.
    #[must_use]
    pub fn uniform(max_bytes: u64) -> Self {
        Self {
            text: max_bytes,
            pdf: max_bytes,
            docx: max_bytes,
            pptx: max_bytes,
            xlsx: max_bytes,
            xml: max_bytes,
        }
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::uniform(DEFAULT_MAX_BYTES)
    }
}

/// Result output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON statistics artifact; no artifact when absent
    pub json: Option<PathBuf>,
    /// Print the human-readable report to stdout
    pub console: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: None,
            console: true,
        }
    }
}
