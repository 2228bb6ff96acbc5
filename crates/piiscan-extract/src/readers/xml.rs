use super::{check_size, TextExtractor};
use crate::dom::{self, at_whitespace_boundary, XmlElement, XmlNode};
use crate::error::{ExtractError, Result};
use std::path::Path;

const FORMAT: &str = "xml";

/// Flattens an arbitrary XML document, separating element contents with a space.
#[derive(Debug, Clone)]
pub struct XmlExtractor {
    max_bytes: u64,
}

impl XmlExtractor {
    /// Create an extractor rejecting files larger than `max_bytes`.
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl TextExtractor for XmlExtractor {
    fn format(&self) -> &'static str {
        FORMAT
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        check_size(path, self.max_bytes)?;

        let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let xml = String::from_utf8(bytes).map_err(|err| ExtractError::decode(FORMAT, path, err))?;
        let root = dom::parse_document(&xml).map_err(|err| ExtractError::decode(FORMAT, path, err))?;

        let mut text = String::new();
        write_text(&root, &mut text);
        Ok(text)
    }
}

fn write_text(element: &XmlElement, out: &mut String) {
    for child in &element.children {
        match child {
            XmlNode::Text(text) => out.push_str(text),
            XmlNode::Element(child) => {
                if !at_whitespace_boundary(out) {
                    out.push(' ');
                }
                write_text(child, out);
            }
        }
    }
}
