use super::{check_size, TextExtractor};
use crate::error::{ExtractError, Result};
use lopdf::Document;
use std::path::Path;

const FORMAT: &str = "pdf";

/// Concatenates the text of every page in page order.
///
/// Encrypted documents are an error, so "no text" and "could not read" stay
/// distinguishable.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    max_bytes: u64,
}

impl PdfExtractor {
    /// Create an extractor rejecting files larger than `max_bytes`.
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl TextExtractor for PdfExtractor {
    fn format(&self) -> &'static str {
        FORMAT
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        check_size(path, self.max_bytes)?;

        let document =
            Document::load(path).map_err(|err| ExtractError::decode(FORMAT, path, err))?;

        if document.is_encrypted() {
            return Err(ExtractError::Encrypted {
                format: FORMAT,
                path: path.to_path_buf(),
            });
        }

        let pages = document.get_pages();
        let mut text = String::new();

        for page_number in pages.keys() {
            let page_text = document
                .extract_text(&[*page_number])
                .map_err(|err| ExtractError::decode(FORMAT, path, err))?;
            text.push_str(&page_text);
        }

        tracing::debug!(path = %path.display(), pages = pages.len(), "extracted pdf text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use tempfile::TempDir;

    fn write_empty_pdf(path: &Path) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).expect("save pdf");
    }

    fn write_text_pdf(path: &Path, page_texts: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![100.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().expect("encode")));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).expect("save pdf");
    }

    #[test]
    fn test_pages_concatenated_in_order() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("two_pages.pdf");
        write_text_pdf(&path, &["first jane@example.org", "second +79991234567"]);

        let text = PdfExtractor::new(1024 * 1024).read_text(&path).unwrap();
        let first = text.find("first jane@example.org").expect("page one text");
        let second = text.find("second +79991234567").expect("page two text");
        assert!(first < second);
    }

    #[test]
    fn test_encrypted_pdf_is_an_error() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("locked.pdf");

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set(
            "Encrypt",
            dictionary! {
                "Filter" => "Standard",
                "V" => 1,
                "R" => 2,
                "O" => Object::string_literal(vec![0x11u8; 32]),
                "U" => Object::string_literal(vec![0x22u8; 32]),
                "P" => -4,
            },
        );
        let file_id = Object::string_literal(vec![0x33u8; 16]);
        doc.trailer.set("ID", vec![file_id.clone(), file_id]);
        doc.save(&path).expect("save pdf");

        let result = PdfExtractor::new(1024 * 1024).read_text(&path);
        assert!(matches!(
            result,
            Err(ExtractError::Encrypted { format: "pdf", .. })
                | Err(ExtractError::Extraction { format: "pdf", .. })
        ));
    }

    #[test]
    fn test_document_without_pages_is_empty() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("empty.pdf");
        write_empty_pdf(&path);

        let text = PdfExtractor::new(1024 * 1024).read_text(&path).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_error() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").expect("write file");

        let result = PdfExtractor::new(1024).read_text(&path);
        assert!(matches!(
            result,
            Err(ExtractError::Extraction { format: "pdf", .. })
        ));
    }

    #[test]
    fn test_size_checked_before_decoding() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").expect("write file");

        let result = PdfExtractor::new(4).read_text(&path);
        assert!(matches!(result, Err(ExtractError::SizeLimitExceeded { .. })));
    }
}
