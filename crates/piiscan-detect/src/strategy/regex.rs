//! Regex matching strategy.

use super::ScanStrategy;
use crate::error::{DetectError, Result};
use piiscan_core::{PatternSet, ScanMatches, StrategyKind};
use regex::Regex;

/// Finds every non-overlapping match of each compiled pattern.
///
/// A pattern with a capture group reports the text of its first group, so
/// context anchors like `(?:^|\s)` stay out of the recorded match. Patterns
/// without groups report the whole match.
#[derive(Debug, Clone)]
pub struct RegexStrategy {
    categories: Vec<(String, Vec<Regex>)>,
}

impl RegexStrategy {
    /// Compile every pattern in `patterns`.
    ///
    /// # Errors
    /// Returns [`DetectError::InvalidPattern`] for the first pattern that
    /// does not compile; no partially built strategy is ever returned.
    pub fn new(patterns: &PatternSet) -> Result<Self> {
        let mut categories = Vec::with_capacity(patterns.len());

        for (category, sources) in patterns {
            let compiled = sources
                .iter()
                .map(|pattern| {
                    Regex::new(pattern).map_err(|source| DetectError::InvalidPattern {
                        category: category.clone(),
                        pattern: pattern.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            categories.push((category.clone(), compiled));
        }

        tracing::debug!(
            categories = categories.len(),
            patterns = categories.iter().map(|(_, p)| p.len()).sum::<usize>(),
            "compiled regex strategy"
        );

        Ok(Self { categories })
    }
}

impl ScanStrategy for RegexStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Regex
    }

    fn scan(&self, text: &str) -> ScanMatches {
        let mut matches = ScanMatches::new();
        if text.is_empty() {
            return matches;
        }

        for (category, regexes) in &self.categories {
            for regex in regexes {
                let has_group = regex.captures_len() > 1;
                for captures in regex.captures_iter(text) {
                    let found = if has_group {
                        captures.get(1).or_else(|| captures.get(0))
                    } else {
                        captures.get(0)
                    };

                    if let Some(found) = found.filter(|m| !m.is_empty()) {
                        matches
                            .entry(category.clone())
                            .or_default()
                            .push(found.as_str().to_string());
                    }
                }
            }
        }

        matches
    }
}
