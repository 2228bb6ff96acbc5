//! Pattern and keyword sources.
//!
//! A [`PatternRegistry`] maps provider names to factories. Two providers
//! ship with the crate: `default` (built-in categories) and `file` (a JSON
//! or TOML document on disk).

use crate::error::{DetectError, Result};
use piiscan_core::PatternSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the built-in provider.
pub const DEFAULT_PROVIDER: &str = "default";

/// Name of the file-backed provider.
pub const FILE_PROVIDER: &str = "file";

/// Category → regex patterns plus category → literal keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Regex patterns, consumed by the regex strategy
    pub patterns: PatternSet,
    /// Literal keywords, consumed by the keyword strategy
    pub keywords: PatternSet,
}

impl PatternConfig {
    /// The built-in categories.
    ///
    /// The patterns run with Unicode disabled, so `\d`, `\s` and `\b` only
    /// match ASCII. Digits from other scripts are never reported.
    #[must_use]
    pub fn builtin() -> Self {
        let patterns = [
            (
                "email",
                vec![
                    r"(?-u)(?:^|\s)([A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,})(?:$|\s)",
                    r"(?-u)<([A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,})>",
                    r#"(?-u)"([A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,})"#,
                ],
            ),
            (
                "phone",
                vec![
                    r"(?-u)\+(\d{11}|\d \d{3} \d{3}-\d{2}-\d{2}|\d \(\d{3}\)\s*\d{3}-\d{4})\b",
                    r"(?-u)(\+7\s*\(\d{3}\)\s*\d{3}-\d{2}-\d{2})",
                ],
            ),
            (
                "ip",
                vec![
                    r"(?-u)\b((?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3})\b",
                ],
            ),
            (
                "cardNumber",
                vec![
                    r"(?-u)(?:\b|\s|^)((?:\d[ -]?){15,16}\d)(?:\b|\s|$)",
                    r"(?-u)(?:\b|\s|^)(3[47]\d{2}[ -]?\d{6}[ -]?\d{5})(?:\b|\s|$)",
                ],
            ),
            (
                "passport",
                vec![
                    r"(?-u)(?:^|\s)(\d{4}[\s-]?\d{6})(?:$|\s)",
                    r"(?-u)\b\d{2}\s?\d{2}\s?\d{6}\b",
                    r"(?-u)\b[A-Za-z]{2}\s?\d{7}\b",
                ],
            ),
            (
                "url",
                vec![
                    r"(?-u)(?:^|\s)(https?://[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+)(?:$|\s)",
                    r"(?-u)(?:^|\s)(www\.[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+)(?:$|\s)",
                    r"(?-u)(?:^|\s)([A-Za-z0-9\-.]+\.[A-Za-z]{2,}(?:/[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]*)?)(?:$|\s)",
                ],
            ),
        ];

        let keywords = [
            (
                "sensitive",
                vec!["confidential", "password", "token", "financial", "secret", "restricted"],
            ),
            (
                "personal",
                vec!["name", "passport", "personal", "identification", "id", "user"],
            ),
        ];

        Self {
            patterns: to_set(&patterns),
            keywords: to_set(&keywords),
        }
    }

    /// Load a pattern document from disk.
    ///
    /// Files ending in `.toml` are parsed as TOML, everything else as JSON.
    /// Either section may be omitted.
    ///
    /// # Errors
    /// Returns [`DetectError::PatternFile`] if the file cannot be read and
    /// [`DetectError::PatternFormat`] if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| DetectError::PatternFile {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let config: Self = if is_toml {
            toml::from_str(&contents).map_err(|e| DetectError::PatternFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        } else {
            serde_json::from_str(&contents).map_err(|e| DetectError::PatternFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        };

        debug!(
            path = %path.display(),
            patterns = config.patterns.len(),
            keywords = config.keywords.len(),
            "loaded pattern file"
        );

        Ok(config)
    }
}

fn to_set(entries: &[(&str, Vec<&str>)]) -> PatternSet {
    entries
        .iter()
        .map(|(category, items)| {
            (
                (*category).to_string(),
                items.iter().map(|s| (*s).to_string()).collect(),
            )
        })
        .collect()
}

/// A named source of pattern definitions.
pub trait PatternProvider: Send + Sync {
    /// Produce the pattern configuration.
    fn provide(&self) -> Result<PatternConfig>;
}

/// Provider for the built-in categories.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultProvider;

impl PatternProvider for DefaultProvider {
    fn provide(&self) -> Result<PatternConfig> {
        Ok(PatternConfig::builtin())
    }
}

/// Provider that reads a pattern document from disk.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    /// Create a provider for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PatternProvider for FileProvider {
    fn provide(&self) -> Result<PatternConfig> {
        PatternConfig::from_file(&self.path)
    }
}

type ProviderFactory = Box<dyn Fn() -> Box<dyn PatternProvider> + Send + Sync>;

/// Provider lookup table keyed by name.
pub struct PatternRegistry {
    providers: HashMap<String, ProviderFactory>,
}

impl PatternRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Registry with the `default` provider and, when `pattern_file` is set,
    /// a `file` provider reading it.
    #[must_use]
    pub fn with_defaults(pattern_file: Option<&Path>) -> Self {
        let mut registry = Self::new();
        registry.register(DEFAULT_PROVIDER, || Box::new(DefaultProvider));
        if let Some(path) = pattern_file {
            let path = path.to_path_buf();
            registry.register(FILE_PROVIDER, move || Box::new(FileProvider::new(path.clone())));
        }
        registry
    }

    /// Register or replace a provider factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn PatternProvider> + Send + Sync + 'static,
    {
        self.providers.insert(name.into(), Box::new(factory));
    }

    /// Check whether a provider is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Run the named provider.
    ///
    /// # Errors
    /// Returns [`DetectError::UnknownProvider`] if nothing is registered under
    /// `name`, or whatever the provider itself fails with.
    pub fn load(&self, name: &str) -> Result<PatternConfig> {
        let factory = self
            .providers
            .get(name)
            .ok_or_else(|| DetectError::UnknownProvider(name.to_string()))?;
        factory().provide()
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.providers.keys().collect();
        names.sort();
        f.debug_struct("PatternRegistry")
            .field("providers", &names)
            .finish()
    }
}

/// Load patterns from `pattern_file`, or the built-in set when `None`.
///
/// # Errors
/// Propagates the file provider's read and parse errors.
pub fn load_patterns(pattern_file: Option<&Path>) -> Result<PatternConfig> {
    let registry = PatternRegistry::with_defaults(pattern_file);
    let provider = if pattern_file.is_some() {
        FILE_PROVIDER
    } else {
        DEFAULT_PROVIDER
    };

    let config = registry.load(provider)?;
    info!(
        provider,
        pattern_categories = config.patterns.len(),
        keyword_categories = config.keywords.len(),
        "loaded pattern definitions"
    );
    Ok(config)
}
