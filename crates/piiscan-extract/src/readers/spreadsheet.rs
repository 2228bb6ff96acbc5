use super::ooxml::check_entry_sizes;
use super::{check_size, TextExtractor};
use crate::error::{ExtractError, Result};
use crate::registry::normalize_extension;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

const FORMAT: &str = "spreadsheet";

/// Walks sheets, rows and cells in order.
///
/// Cells in a row are joined by a space, rows by a newline and sheets by a
/// blank line. Empty cells, rows and sheets produce no separators.
///
/// ZIP-based workbooks (`xlsx`, `xlsm`, `ods`) also have every part's
/// declared size checked against the limit before calamine inflates them.
#[derive(Debug, Clone)]
pub struct SpreadsheetExtractor {
    max_bytes: u64,
}

impl SpreadsheetExtractor {
    /// Create an extractor rejecting workbooks larger than `max_bytes`.
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl TextExtractor for SpreadsheetExtractor {
    fn format(&self) -> &'static str {
        FORMAT
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        check_size(path, self.max_bytes)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(normalize_extension)
            .unwrap_or_default();
        if matches!(extension.as_str(), "xlsx" | "xlsm" | "ods") {
            check_entry_sizes(path, self.max_bytes, FORMAT)?;
        }

        let mut workbook =
            open_workbook_auto(path).map_err(|err| ExtractError::decode(FORMAT, path, err))?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|err| ExtractError::decode(FORMAT, path, err))?;
            sheets.push(sheet_text(
                range.rows().map(|row| row.iter().map(cell_text)),
            ));
        }

        Ok(join_sheets(sheets))
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn sheet_text<R, C>(rows: R) -> String
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = String>,
{
    let mut sheet = String::new();
    for row in rows {
        let mut line = String::new();
        for cell in row.into_iter().filter(|cell| !cell.is_empty()) {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&cell);
        }

        if !line.is_empty() {
            if !sheet.is_empty() {
                sheet.push('\n');
            }
            sheet.push_str(&line);
        }
    }
    sheet
}

fn join_sheets(sheets: impl IntoIterator<Item = String>) -> String {
    let mut text = String::new();
    for sheet in sheets.into_iter().filter(|sheet| !sheet.is_empty()) {
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(&sheet);
    }
    text
}
