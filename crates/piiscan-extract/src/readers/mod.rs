//! Per-format text extractors.
//!
//! Every extractor checks the file size against its format limit before
//! decoding anything, and returns either the complete text or an error.

mod ooxml;
mod pdf;
mod spreadsheet;
mod text;
mod xml;

pub use ooxml::{DocxExtractor, PptxExtractor};
pub use pdf::PdfExtractor;
pub use spreadsheet::SpreadsheetExtractor;
pub use text::PlainTextExtractor;
pub use xml::XmlExtractor;

use crate::error::{ExtractError, Result};
use std::path::Path;

/// Turns one document into a single normalized text string.
///
/// Implementations hold only construction-time configuration, so one
/// instance may be reused across files and threads.
pub trait TextExtractor: Send + Sync {
    /// Short format name used in logs and errors.
    fn format(&self) -> &'static str;

    /// Read the whole document at `path` as text.
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Fail with [`ExtractError::SizeLimitExceeded`] when `path` is larger than `limit`.
pub(crate) fn check_size(path: &Path, limit: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.len() > limit {
        return Err(ExtractError::SizeLimitExceeded {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }

    Ok(())
}
