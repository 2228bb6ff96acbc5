//! Matching strategies.
//!
//! A strategy is built once per run from a [`PatternConfig`] and then shared
//! read-only across scan workers.

mod keyword;
mod regex;

pub use keyword::KeywordStrategy;
pub use regex::RegexStrategy;

use crate::error::Result;
use crate::patterns::PatternConfig;
use piiscan_core::{ScanMatches, StrategyKind};

/// Turns text into per-category matches.
///
/// `scan` is pure: the same text always yields the same result, and
/// categories with no matches are absent from it.
pub trait ScanStrategy: Send + Sync {
    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Find every match in `text`.
    fn scan(&self, text: &str) -> ScanMatches;
}

/// Build the strategy for `kind` from the matching half of `config`.
///
/// # Errors
/// Fails if any regex pattern does not compile.
pub fn build_strategy(kind: StrategyKind, config: &PatternConfig) -> Result<Box<dyn ScanStrategy>> {
    let strategy: Box<dyn ScanStrategy> = match kind {
        StrategyKind::Regex => Box::new(RegexStrategy::new(&config.patterns)?),
        StrategyKind::Keyword => Box::new(KeywordStrategy::new(&config.keywords)),
    };
    tracing::info!(strategy = %kind, "matching strategy ready");
    Ok(strategy)
}

/// Parse a strategy name and build it.
///
/// # Errors
/// Returns [`crate::DetectError::Config`] for an unrecognized name.
pub fn strategy_from_name(name: &str, config: &PatternConfig) -> Result<Box<dyn ScanStrategy>> {
    let kind: StrategyKind = name.parse()?;
    build_strategy(kind, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DetectError;

    #[test]
    fn test_build_by_kind() {
        let config = PatternConfig::builtin();
        assert_eq!(
            build_strategy(StrategyKind::Regex, &config).unwrap().kind(),
            StrategyKind::Regex
        );
        assert_eq!(
            build_strategy(StrategyKind::Keyword, &config).unwrap().kind(),
            StrategyKind::Keyword
        );
    }

    #[test]
    fn test_from_name() {
        let config = PatternConfig::builtin();
        let strategy = strategy_from_name(" Keyword ", &config).unwrap();
        assert_eq!(strategy.kind(), StrategyKind::Keyword);

        assert!(matches!(
            strategy_from_name("fuzzy", &config),
            Err(DetectError::Config(_))
        ));
    }

    #[test]
    fn test_keyword_strategy_ignores_regex_section() {
        let mut config = PatternConfig::default();
        config.patterns.insert("broken".into(), vec!["(".into()]);
        config.keywords.insert("sensitive".into(), vec!["secret".into()]);

        let strategy = build_strategy(StrategyKind::Keyword, &config).unwrap();
        assert_eq!(strategy.scan("top secret")["sensitive"], vec!["secret"]);
        assert!(build_strategy(StrategyKind::Regex, &config).is_err());
    }

    #[test]
    fn test_builtin_regex_examples() {
        let strategy = build_strategy(StrategyKind::Regex, &PatternConfig::builtin()).unwrap();
        let matches = strategy.scan("Write to john.doe@example.com from 192.168.1.20 today");

        assert_eq!(matches["email"], vec!["john.doe@example.com"]);
        assert_eq!(matches["ip"], vec!["192.168.1.20"]);
    }

    #[test]
    fn test_builtin_digits_are_ascii_only() {
        let strategy = build_strategy(StrategyKind::Regex, &PatternConfig::builtin()).unwrap();

        let arabic_indic = strategy.scan("call +٧٩٩٩١٢٣٤٥٦٧ now");
        assert!(arabic_indic.values().all(Vec::is_empty));

        let ascii = strategy.scan("call +79991234567 now");
        assert!(ascii.get("phone").is_some_and(|found| !found.is_empty()));
    }

    #[test]
    fn test_builtin_keyword_examples() {
        let strategy = build_strategy(StrategyKind::Keyword, &PatternConfig::builtin()).unwrap();
        let matches = strategy.scan("CONFIDENTIAL: user password");

        assert_eq!(matches["sensitive"], vec!["CONFIDENTIAL", "password"]);
        assert_eq!(matches["personal"], vec!["user"]);
    }
}
