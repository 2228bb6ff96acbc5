use super::{check_size, TextExtractor};
use crate::error::{ExtractError, Result};
use std::path::Path;

/// Reads the file verbatim.
///
/// Valid UTF-8 comes back byte-for-byte; invalid sequences are replaced with
/// U+FFFD so the rest of the file is still scanned.
#[derive(Debug, Clone)]
pub struct PlainTextExtractor {
    max_bytes: u64,
}

impl PlainTextExtractor {
    /// Create an extractor rejecting files larger than `max_bytes`.
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl TextExtractor for PlainTextExtractor {
    fn format(&self) -> &'static str {
        "text"
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        check_size(path, self.max_bytes)?;

        let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_verbatim_read() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("notes.txt");
        std::fs::write(&path, "line one\r\n\tline two\n").expect("write file");

        let text = PlainTextExtractor::new(1024).read_text(&path).unwrap();
        assert_eq!(text, "line one\r\n\tline two\n");
    }

    #[test]
    fn test_empty_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("empty.txt");
        std::fs::write(&path, b"").expect("write file");

        assert_eq!(PlainTextExtractor::new(1024).read_text(&path).unwrap(), "");
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("mixed.txt");
        std::fs::write(&path, b"mail a@b.com \xff end").expect("write file");

        let text = PlainTextExtractor::new(1024).read_text(&path).unwrap();
        assert_eq!(text, "mail a@b.com \u{fffd} end");
    }

    #[test]
    fn test_size_limit() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("big.txt");
        std::fs::write(&path, vec![b'a'; 64]).expect("write file");

        let result = PlainTextExtractor::new(63).read_text(&path);
        assert!(matches!(result, Err(ExtractError::SizeLimitExceeded { .. })));
    }
}
