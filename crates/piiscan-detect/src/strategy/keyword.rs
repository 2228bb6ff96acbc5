//! Keyword matching strategy.

use super::ScanStrategy;
use piiscan_core::{PatternSet, ScanMatches, StrategyKind};

/// Case-insensitive whole-word search for literal keywords.
///
/// Case folding and the word-boundary test are ASCII-only: a candidate is
/// accepted when the bytes on either side are not ASCII alphanumerics or
/// `_`. Every start offset is tested, so overlapping occurrences that begin
/// at different offsets are each reported. The recorded match keeps the
/// document's casing.
#[derive(Debug, Clone)]
pub struct KeywordStrategy {
    categories: Vec<(String, Vec<String>)>,
}

impl KeywordStrategy {
    /// Build from per-category keyword lists. Empty keywords are dropped.
    #[must_use]
    pub fn new(keywords: &PatternSet) -> Self {
        let categories = keywords
            .iter()
            .map(|(category, words)| {
                let words = words.iter().filter(|w| !w.is_empty()).cloned().collect();
                (category.clone(), words)
            })
            .collect();
        Self { categories }
    }
}

impl ScanStrategy for KeywordStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Keyword
    }

    fn scan(&self, text: &str) -> ScanMatches {
        let mut matches = ScanMatches::new();
        if text.is_empty() {
            return matches;
        }

        let haystack = text.as_bytes();
        for (category, words) in &self.categories {
            for word in words {
                let needle = word.as_bytes();
                let mut pos = 0;

                while pos + needle.len() <= haystack.len() {
                    let end = pos + needle.len();
                    if haystack[pos..end].eq_ignore_ascii_case(needle)
                        && is_word_boundary(haystack, pos, end)
                    {
                        // needle is valid UTF-8, so a byte-equal span is char-aligned
                        if let Some(found) = text.get(pos..end) {
                            matches
                                .entry(category.clone())
                                .or_default()
                                .push(found.to_string());
                        }
                    }
                    pos += 1;
                }
            }
        }

        matches
    }
}

fn is_word_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn is_word_boundary(haystack: &[u8], start: usize, end: usize) -> bool {
    let before = start == 0 || !is_word_char(haystack[start - 1]);
    let after = end >= haystack.len() || !is_word_char(haystack[end]);
    before && after
}
