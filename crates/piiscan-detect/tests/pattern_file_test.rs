//! Integration tests for custom pattern files driving both strategies

use piiscan_core::StrategyKind;
use piiscan_detect::{build_strategy, load_patterns, DetectError};
use tempfile::TempDir;

const PATTERNS: &str = r#"{
    "patterns": {
        "employeeId": ["\\bEMP-(\\d{5})\\b"],
        "iban": ["\\bDE\\d{20}\\b"]
    },
    "keywords": {
        "hr": ["salary", "dismissal"]
    }
}"#;

#[test]
fn test_custom_file_replaces_builtin_categories() {
    let tmp = TempDir::new().expect("create temp dir");
    let path = tmp.path().join("patterns.json");
    std::fs::write(&path, PATTERNS).expect("write patterns");

    let config = load_patterns(Some(&path)).unwrap();
    let strategy = build_strategy(StrategyKind::Regex, &config).unwrap();

    let matches = strategy.scan("EMP-00042 mailed bob@example.com about DE89370400440532013000");
    assert_eq!(matches["employeeId"], vec!["00042"]);
    assert_eq!(matches["iban"], vec!["DE89370400440532013000"]);
    assert!(!matches.contains_key("email"));
}

#[test]
fn test_custom_keywords() {
    let tmp = TempDir::new().expect("create temp dir");
    let path = tmp.path().join("patterns.json");
    std::fs::write(&path, PATTERNS).expect("write patterns");

    let config = load_patterns(Some(&path)).unwrap();
    let strategy = build_strategy(StrategyKind::Keyword, &config).unwrap();

    let matches = strategy.scan("Salary review; salaryband is not a keyword");
    assert_eq!(matches["hr"], vec!["Salary"]);
}

#[test]
fn test_invalid_regex_in_file_is_fatal() {
    let tmp = TempDir::new().expect("create temp dir");
    let path = tmp.path().join("patterns.toml");
    std::fs::write(&path, "[patterns]\nbad = [\"[a-\"]\n").expect("write patterns");

    let config = load_patterns(Some(&path)).unwrap();
    assert!(matches!(
        build_strategy(StrategyKind::Regex, &config),
        Err(DetectError::InvalidPattern { .. })
    ));
}

#[test]
fn test_unreadable_file_is_fatal() {
    let tmp = TempDir::new().expect("create temp dir");
    let path = tmp.path().join("missing.json");

    assert!(matches!(
        load_patterns(Some(&path)),
        Err(DetectError::PatternFile { .. })
    ));
}
