//! Extension-keyed lookup table of extractor constructors.

use crate::error::{ExtractError, Result};
use crate::readers::{
    DocxExtractor, PdfExtractor, PlainTextExtractor, PptxExtractor, SpreadsheetExtractor,
    TextExtractor, XmlExtractor,
};
use piiscan_core::SizeLimits;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Constructor stored for one extension.
pub type ReaderFactory = Arc<dyn Fn() -> Box<dyn TextExtractor> + Send + Sync>;

/// Maps file extensions to extractor constructors.
///
/// Extensions are compared case-insensitively and without a leading dot.
/// Registering an extension twice replaces the earlier constructor. The
/// registry holds no file state and can be shared read-only across threads.
#[derive(Clone, Default)]
pub struct ReaderRegistry {
    readers: HashMap<String, ReaderFactory>,
}

impl ReaderRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in format, using `limits` for size checks.
    #[must_use]
    pub fn with_defaults(limits: SizeLimits) -> Self {
        let mut registry = Self::new();

        registry.register_all(&["txt", "csv", "log", "md", "json"], move || {
            Box::new(PlainTextExtractor::new(limits.text))
        });
        registry.register("pdf", move || Box::new(PdfExtractor::new(limits.pdf)));
        registry.register("docx", move || Box::new(DocxExtractor::new(limits.docx)));
        registry.register("pptx", move || Box::new(PptxExtractor::new(limits.pptx)));
        registry.register("xml", move || Box::new(XmlExtractor::new(limits.xml)));
        registry.register_all(&["xlsx", "xlsm", "xls", "ods"], move || {
            Box::new(SpreadsheetExtractor::new(limits.xlsx))
        });

        debug!(count = registry.len(), "registered built-in readers");
        registry
    }

    /// Register `factory` for `extension`, replacing any previous registration.
    pub fn register<F>(&mut self, extension: &str, factory: F)
    where
        F: Fn() -> Box<dyn TextExtractor> + Send + Sync + 'static,
    {
        self.insert(extension, Arc::new(factory));
    }

    /// Register the same `factory` for several extensions.
    pub fn register_all<F>(&mut self, extensions: &[&str], factory: F)
    where
        F: Fn() -> Box<dyn TextExtractor> + Send + Sync + 'static,
    {
        let factory: ReaderFactory = Arc::new(factory);
        for extension in extensions {
            self.insert(extension, Arc::clone(&factory));
        }
    }

    fn insert(&mut self, extension: &str, factory: ReaderFactory) {
        let extension = normalize_extension(extension);
        if self.readers.insert(extension.clone(), factory).is_some() {
            debug!(extension = %extension, "replaced reader registration");
        }
    }

    /// Whether a reader is registered for the extension of `path`.
    #[must_use]
    pub fn is_supported(&self, path: &Path) -> bool {
        self.readers.contains_key(&extension_of(path))
    }

    /// Construct the reader registered for the extension of `path`.
    ///
    /// # Errors
    /// Returns [`ExtractError::UnsupportedFormat`] when nothing is registered.
    pub fn create_reader(&self, path: &Path) -> Result<Box<dyn TextExtractor>> {
        let extension = extension_of(path);
        self.readers
            .get(&extension)
            .map(|factory| factory())
            .ok_or(ExtractError::UnsupportedFormat { extension })
    }

    /// All registered extensions, lower-case and without a dot.
    #[must_use]
    pub fn supported_extensions(&self) -> BTreeSet<String> {
        self.readers.keys().cloned().collect()
    }

    /// Number of registered extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.readers.len()
    }

    /// Whether no extension is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderRegistry")
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}

/// Lower-case `extension` and strip one leading dot.
#[must_use]
pub fn normalize_extension(extension: &str) -> String {
    extension
        .strip_prefix('.')
        .unwrap_or(extension)
        .to_lowercase()
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| normalize_extension(&ext.to_string_lossy()))
        .unwrap_or_default()
}
