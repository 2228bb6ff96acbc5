//! Word documents and slide decks.
//!
//! Both are ZIP packages of XML parts. Text in these parts is split across
//! many run elements, so the walk below re-inserts the paragraph, tab, line
//! and word boundaries a reader would see.

use super::{check_size, TextExtractor};
use crate::dom::{self, at_whitespace_boundary, XmlElement, XmlNode};
use crate::error::{ExtractError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const DOCX: &str = "docx";
const PPTX: &str = "pptx";

const DOCUMENT_ENTRY: &str = "word/document.xml";

static SLIDE_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ppt/slides/slide(\d+)\.xml$").expect("slide entry regex is hardcoded and valid")
});

/// Extracts the body of `word/document.xml`.
#[derive(Debug, Clone)]
pub struct DocxExtractor {
    max_bytes: u64,
}

impl DocxExtractor {
    /// Create an extractor rejecting packages (or body parts) larger than `max_bytes`.
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl TextExtractor for DocxExtractor {
    fn format(&self) -> &'static str {
        DOCX
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        check_size(path, self.max_bytes)?;

        let mut archive = open_archive(path, DOCX)?;
        let xml = read_entry(&mut archive, DOCUMENT_ENTRY, self.max_bytes, path, DOCX)?;
        let root = dom::parse_document(&xml).map_err(|err| ExtractError::decode(DOCX, path, err))?;

        let body = root
            .child("document")
            .and_then(|document| document.child("body"))
            .ok_or_else(|| ExtractError::malformed(DOCX, path, "missing body element"))?;

        let mut text = String::new();
        for node in &body.children {
            write_run_text(node, &body.name, &mut text);
        }
        Ok(text)
    }
}

/// Extracts every `ppt/slides/slideN.xml` part in ascending slide number.
#[derive(Debug, Clone)]
pub struct PptxExtractor {
    max_bytes: u64,
}

impl PptxExtractor {
    /// Create an extractor rejecting packages (or slide parts) larger than `max_bytes`.
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl TextExtractor for PptxExtractor {
    fn format(&self) -> &'static str {
        PPTX
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        check_size(path, self.max_bytes)?;

        let mut archive = open_archive(path, PPTX)?;
        let slides = slide_entries(archive.file_names());

        let mut text = String::new();
        for entry in &slides {
            let xml = read_entry(&mut archive, entry, self.max_bytes, path, PPTX)?;
            let root =
                dom::parse_document(&xml).map_err(|err| ExtractError::decode(PPTX, path, err))?;
            for node in &root.children {
                write_run_text(node, &root.name, &mut text);
            }
        }

        tracing::debug!(path = %path.display(), slides = slides.len(), "extracted pptx text");
        Ok(text)
    }
}

/// Slide part names sorted by slide number; relationship parts never match.
fn slide_entries<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut slides: Vec<(u32, String)> = names
        .filter_map(|name| {
            let number = SLIDE_ENTRY.captures(name)?.get(1)?.as_str().parse().ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    slides.sort_by_key(|(number, _)| *number);
    slides.into_iter().map(|(_, name)| name).collect()
}

fn open_archive(path: &Path, format: &'static str) -> Result<ZipArchive<File>> {
    let file = File::open(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ZipArchive::new(file).map_err(|err| ExtractError::decode(format, path, err))
}

/// Reject a package whose entries declare an uncompressed size above `limit`,
/// before any of them is inflated.
pub(super) fn check_entry_sizes(path: &Path, limit: u64, format: &'static str) -> Result<()> {
    let mut archive = open_archive(path, format)?;
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|err| ExtractError::decode(format, path, err))?;
        if entry.size() > limit {
            return Err(ExtractError::SizeLimitExceeded {
                path: path.to_path_buf(),
                size: entry.size(),
                limit,
            });
        }
    }
    Ok(())
}

fn read_entry(
    archive: &mut ZipArchive<File>,
    name: &str,
    limit: u64,
    path: &Path,
    format: &'static str,
) -> Result<String> {
    let entry = archive.by_name(name).map_err(|err| match err {
        ZipError::FileNotFound => ExtractError::malformed(format, path, format!("{name} not found")),
        other => ExtractError::decode(format, path, other),
    })?;

    if entry.size() > limit {
        return Err(ExtractError::SizeLimitExceeded {
            path: path.to_path_buf(),
            size: entry.size(),
            limit,
        });
    }

    let mut xml = String::new();
    entry
        .take(limit)
        .read_to_string(&mut xml)
        .map_err(|err| ExtractError::decode(format, path, err))?;
    Ok(xml)
}

/// Depth-first, document-order walk applying the OOXML boundary rules:
///
/// - `p` starts on a new line (never producing an empty line)
/// - `tab` emits `\t`, `br`/`cr` emit `\n`
/// - closing `p` or `r` emits one space unless already at whitespace
/// - whitespace-only text is skipped when the output already ends at a
///   boundary, so a space-only run between runs yields a single space
fn write_run_text(node: &XmlNode, parent: &str, out: &mut String) {
    match node {
        XmlNode::Text(text) => {
            if !(at_whitespace_boundary(out) && text.chars().all(char::is_whitespace)) {
                out.push_str(text);
            }
        }
        XmlNode::Element(element) => write_element(element, parent, out),
    }
}

fn write_element(element: &XmlElement, parent: &str, out: &mut String) {
    match element.name.as_str() {
        "p" => {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
        }
        // tab stop definitions inside paragraph properties are not text
        "tab" if !matches!(parent, "tabs" | "tabLst") => out.push('\t'),
        "br" | "cr" => out.push('\n'),
        _ => {}
    }

    for child in &element.children {
        write_run_text(child, &element.name, out);
    }

    if matches!(element.name.as_str(), "p" | "r") && !at_whitespace_boundary(out) {
        out.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(xml: &str) -> String {
        let root = dom::parse_document(xml).unwrap();
        let mut out = String::new();
        for node in &root.children {
            write_run_text(node, &root.name, &mut out);
        }
        out
    }

    #[test]
    fn test_split_runs_keep_word_boundary() {
        let text = runs(
            r#"<w:p xmlns:w="urn:w"><w:r><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> </w:t></w:r><w:r><w:t>World</w:t></w:r></w:p>"#,
        );
        assert_eq!(text.trim_end(), "Hello World");
    }

    #[test]
    fn test_preserved_space_between_texts_in_one_run() {
        let text = runs(
            r#"<w:p xmlns:w="urn:w"><w:r><w:t>secret</w:t><w:t xml:space="preserve"> </w:t><w:t>token</w:t></w:r></w:p>"#,
        );
        assert_eq!(text, "secret token ");
    }

    #[test]
    fn test_adjacent_runs_without_spaces_are_separated() {
        let text = runs(r"<p><r><t>John</t></r><r><t>Smith</t></r></p>");
        assert_eq!(text, "John Smith ");
    }

    #[test]
    fn test_consecutive_paragraphs_single_newline() {
        let text = runs(r"<body><p><r><t>A</t></r></p><p><r><t>B</t></r></p></body>");
        assert_eq!(text.matches('\n').count(), 1);
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        assert_eq!(lines, vec!["A", "B"]);
    }

    #[test]
    fn test_tab_and_break() {
        let text = runs(r"<p><r><t>Name:</t><tab/><t>Ann</t><br/><t>Line2</t></r></p>");
        assert_eq!(text, "Name:\tAnn\nLine2 ");
    }

    #[test]
    fn test_tab_stops_are_not_text() {
        let text = runs(r"<p><pPr><tabs><tab/></tabs></pPr><r><t>x</t></r></p>");
        assert_eq!(text, "x ");
    }

    #[test]
    fn test_slide_entries_sorted_numerically() {
        let names = [
            "ppt/slides/slide10.xml",
            "ppt/slides/_rels/slide1.xml.rels",
            "ppt/slides/slide2.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slides/slide1.xml",
        ];
        assert_eq!(
            slide_entries(names.into_iter()),
            vec![
                "ppt/slides/slide1.xml",
                "ppt/slides/slide2.xml",
                "ppt/slides/slide10.xml"
            ]
        );
    }
}
