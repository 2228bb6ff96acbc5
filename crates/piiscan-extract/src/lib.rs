//! piiscan Extract - Format-aware text extraction.
//!
//! Turns plain text, PDF, Word, PowerPoint, spreadsheet and generic XML
//! files into a single text string each, reconstructing the word and line
//! boundaries that the container formats fragment across many nodes.
//!
//! # Example
//!
//! ```rust,no_run
//! use piiscan_core::SizeLimits;
//! use piiscan_extract::ReaderRegistry;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ReaderRegistry::with_defaults(SizeLimits::default());
//! let path = Path::new("report.docx");
//! let text = registry.create_reader(path)?.read_text(path)?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod dom;
pub mod error;
pub mod readers;
pub mod registry;

// Re-export commonly used types
pub use error::{ExtractError, Result, XmlError};
pub use readers::{
    DocxExtractor, PdfExtractor, PlainTextExtractor, PptxExtractor, SpreadsheetExtractor,
    TextExtractor, XmlExtractor,
};
pub use registry::{normalize_extension, ReaderFactory, ReaderRegistry};
