//! Conversion pipeline: extract, clean, and write tables into a workbook.

use crate::clean::{clean_table, CleanedTable, INFO_COLUMN};
use crate::error::Result;
use std::path::Path;
use tabella_pdf::{ExtractOptions, PdfExtractor, RawTable, Strategy};
use tabella_sheet::{Book, CellValue, Sheet, MAX_SHEET_NAME_LEN};

/// Sheet name used when the document yields no tables
pub const NO_TABLES_SHEET: &str = "NoData";
/// Message written into the [`NO_TABLES_SHEET`] sheet
pub const NO_TABLES_MSG: &str = "No extractable tables found in PDF";
/// Sheet name for the merged layout
pub const MERGED_SHEET: &str = "Tables";

const FALLBACK_MSG: &str = "No data could be written from PDF";

/// How tables map onto worksheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetLayout {
    /// One worksheet per table, named `Page<p>_T<t>`
    #[default]
    PerTable,
    /// All tables stacked into a single worksheet, separated by blank rows
    Merged,
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub strategy: Strategy,
    pub layout: SheetLayout,
}

/// What a conversion produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub tables_found: usize,
    pub sheets_written: usize,
}

/// Convert a PDF file into an xlsx workbook at `output`.
pub fn convert_file(input: &Path, output: &Path, options: &ConvertOptions) -> Result<ConvertSummary> {
    let (book, summary) = convert_to_book(input, options)?;
    book.save_as_xlsx(output)?;
    tracing::info!(
        output = %output.display(),
        sheets = summary.sheets_written,
        "workbook written"
    );
    Ok(summary)
}

/// Convert a PDF file into in-memory xlsx bytes.
pub fn convert_to_buffer(input: &Path, options: &ConvertOptions) -> Result<(Vec<u8>, ConvertSummary)> {
    let (book, summary) = convert_to_book(input, options)?;
    let bytes = book.save_to_buffer()?;
    Ok((bytes, summary))
}

fn convert_to_book(input: &Path, options: &ConvertOptions) -> Result<(Book, ConvertSummary)> {
    let extractor = PdfExtractor::new(ExtractOptions {
        strategy: options.strategy,
        ..ExtractOptions::default()
    });
    let tables = extractor.extract(input)?;
    let book = build_book(&tables, options.layout)?;
    let summary = ConvertSummary {
        tables_found: tables.len(),
        sheets_written: book.sheet_count(),
    };
    Ok((book, summary))
}

/// Assemble a workbook from raw tables.
///
/// Every input produces a non-empty book: zero tables yields a single
/// diagnostic sheet instead of an empty workbook, which xlsx forbids.
pub fn build_book(tables: &[RawTable], layout: SheetLayout) -> Result<Book> {
    let mut book = Book::new();

    if tables.is_empty() {
        book.add_sheet(NO_TABLES_SHEET, message_sheet(NO_TABLES_MSG)?)?;
        return Ok(book);
    }

    let cleaned: Vec<CleanedTable> = tables.iter().map(clean_table).collect();

    match layout {
        SheetLayout::PerTable => {
            for (ordinal, table) in cleaned.iter().enumerate() {
                let name = unique_sheet_name(&book, table.page, table.index, ordinal + 1);
                let mut sheet = Sheet::new();
                sheet.set_columns(table.columns.clone())?;
                for row in &table.rows {
                    sheet.push_row(row.clone());
                }
                book.add_sheet(&name, sheet)?;
            }
        }
        SheetLayout::Merged => {
            let mut sheet = Sheet::new();
            for (i, table) in cleaned.iter().enumerate() {
                if i > 0 {
                    sheet.push_row(Vec::new());
                }
                sheet.push_row(
                    table
                        .columns
                        .iter()
                        .map(|c| CellValue::Text(c.clone()))
                        .collect(),
                );
                for row in &table.rows {
                    sheet.push_row(row.clone());
                }
            }
            book.add_sheet(MERGED_SHEET, sheet)?;
        }
    }

    // xlsx requires at least one sheet
    if book.is_empty() {
        book.add_sheet("Placeholder", message_sheet(FALLBACK_MSG)?)?;
    }

    Ok(book)
}

fn message_sheet(message: &str) -> Result<Sheet> {
    let mut sheet = Sheet::new();
    sheet.set_columns(vec![INFO_COLUMN.to_string()])?;
    sheet.push_row(vec![CellValue::Text(message.to_string())]);
    Ok(sheet)
}

/// Pick a name for the sheet of table `index` on page `page`.
///
/// `Page<p>_T<t>` normally; falls back to `T<ordinal>` when that name is
/// taken or too long, with `_n` suffixes as a last resort.
fn unique_sheet_name(book: &Book, page: u32, index: u32, ordinal: usize) -> String {
    let base = format!("Page{page}_T{index}");
    if base.chars().count() <= MAX_SHEET_NAME_LEN && !book.has_sheet(&base) {
        return base;
    }

    let short = format!("T{ordinal}");
    if !book.has_sheet(&short) {
        return short;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{short}_{n}");
        if !book.has_sheet(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
