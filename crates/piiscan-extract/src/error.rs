//! Error types for text extraction.
//!
//! Every variant is a per-file failure: the orchestrator reports it and
//! moves on to the next file.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning a document into text.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No extractor is registered for the file's extension
    #[error("unsupported file format: '{extension}'")]
    UnsupportedFormat {
        /// Normalized (lower-case, dot-less) extension; empty when the file has none
        extension: String,
    },

    /// The file is larger than its format allows
    #[error("{} exceeds maximum size ({size} > {limit} bytes)", .path.display())]
    SizeLimitExceeded {
        /// Offending file
        path: PathBuf,
        /// Actual (or declared) size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// The underlying decoder rejected the file
    #[error("{format} processing error in {}: {source}", .path.display())]
    Extraction {
        /// Format name (`pdf`, `docx`, ...)
        format: &'static str,
        /// File being decoded
        path: PathBuf,
        /// Decoder error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The document is locked behind a password
    #[error("encrypted {format} not supported: {}", .path.display())]
    Encrypted {
        /// Format name
        format: &'static str,
        /// Encrypted file
        path: PathBuf,
    },

    /// The container decoded, but the expected content is missing
    #[error("malformed {format} container {}: {reason}", .path.display())]
    Malformed {
        /// Format name
        format: &'static str,
        /// File being decoded
        path: PathBuf,
        /// What was missing or wrong
        reason: String,
    },

    /// The file could not be read at all
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Wrap a decoder error for `path`.
    pub(crate) fn decode<E>(format: &'static str, path: &std::path::Path, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Extraction {
            format,
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn malformed(
        format: &'static str,
        path: &std::path::Path,
        reason: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            format,
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Errors produced while building an XML tree.
#[derive(Error, Debug)]
pub enum XmlError {
    /// Tokenizer error (bad syntax, mismatched tags, unknown entity)
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// End tag without a matching start tag
    #[error("unexpected closing tag </{0}>")]
    UnexpectedEnd(String),

    /// Document ended while elements were still open
    #[error("unclosed element <{0}>")]
    Unclosed(String),
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExtractError::SizeLimitExceeded {
            path: PathBuf::from("/tmp/big.pdf"),
            size: 2048,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "/tmp/big.pdf exceeds maximum size (2048 > 1024 bytes)"
        );

        let err = ExtractError::UnsupportedFormat {
            extension: "bin".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported file format: 'bin'");
    }

    #[test]
    fn test_decode_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad header");
        let err = ExtractError::decode("pdf", std::path::Path::new("a.pdf"), io_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("bad header"));
    }
}
