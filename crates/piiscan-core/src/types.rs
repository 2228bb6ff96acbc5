//! Shared data model: match maps, pattern sets and the strategy selector.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Matches found in one file, keyed by category.
///
/// Within a category, matches keep discovery order. A category with no
/// matches is simply absent.
pub type ScanMatches = BTreeMap<String, Vec<String>>;

/// Pattern definitions keyed by category: regex sources or literal keywords.
pub type PatternSet = BTreeMap<String, Vec<String>>;

/// Total number of matches across all categories.
#[must_use]
pub fn match_count(matches: &ScanMatches) -> usize {
    matches.values().map(Vec::len).sum()
}

/// Which matching strategy a scan run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Compiled regular expressions per category
    #[default]
    Regex,
    /// Case-insensitive whole-word literals per category
    Keyword,
}

impl StrategyKind {
    /// Configuration name of the strategy.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regex => "regex",
            Self::Keyword => "keyword",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regex" => Ok(Self::Regex),
            "keyword" => Ok(Self::Keyword),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serde helpers that write a [`std::time::Duration`] as fractional seconds.
pub mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serialize as `f64` seconds.
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    /// Deserialize from `f64` seconds; negative or non-finite values are rejected.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("regex".parse::<StrategyKind>().unwrap(), StrategyKind::Regex);
        assert_eq!(
            "Keyword".parse::<StrategyKind>().unwrap(),
            StrategyKind::Keyword
        );
        assert!(matches!(
            "combined".parse::<StrategyKind>(),
            Err(ConfigError::UnknownStrategy(name)) if name == "combined"
        ));
    }

    #[test]
    fn test_match_count() {
        let mut matches = ScanMatches::new();
        assert_eq!(match_count(&matches), 0);

        matches.insert("email".into(), vec!["a@b.com".into(), "c@d.org".into()]);
        matches.insert("phone".into(), vec!["+79990001122".into()]);
        assert_eq!(match_count(&matches), 3);
    }

    #[test]
    fn test_duration_secs_roundtrip() {
        #[derive(Serialize, Deserialize)]
        struct Timed {
            #[serde(with = "duration_secs")]
            elapsed: std::time::Duration,
        }

        let json = serde_json::to_string(&Timed {
            elapsed: std::time::Duration::from_millis(1500),
        })
        .unwrap();
        assert_eq!(json, r#"{"elapsed":1.5}"#);

        let parsed: Timed = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.elapsed.as_millis(), 1500);
    }
}
