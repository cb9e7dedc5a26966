use crate::detector::{Grid, Strategy, TableDetector};
use crate::error::{PdfError, Result};
use lopdf::Document;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Detection strategy for the first pass; lattice falls back to stream
    /// when it finds nothing in the whole document.
    pub strategy: Strategy,
    pub min_table_rows: usize,
    pub min_table_cols: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Lattice,
            min_table_rows: 2,
            min_table_cols: 2,
        }
    }
}

/// A table as detected in the PDF, before any cleaning
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Originating page number, 1-based
    pub page: u32,
    /// Table index within the page, 1-based
    pub index: u32,
    /// Cell grid; None = cell without text
    pub rows: Grid,
}

impl RawTable {
    /// True when no cell anywhere in the grid carries text
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(Option::is_none))
    }
}

pub struct PdfExtractor {
    options: ExtractOptions,
}

impl PdfExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extract all tables from a PDF file, in page order then
    /// table-within-page order.
    ///
    /// Runs the configured strategy over the whole document; when lattice
    /// detection finds nothing, retries once with stream detection. Zero
    /// detected tables is not an error.
    pub fn extract(&self, path: &Path) -> Result<Vec<RawTable>> {
        if !path.exists() {
            return Err(PdfError::NotFound(path.to_path_buf()));
        }
        if !has_pdf_extension(path) {
            return Err(PdfError::InvalidFormat(path.to_path_buf()));
        }

        let pages = self.page_texts(path)?;

        let mut tables: Vec<RawTable> = self.scan(&pages, self.options.strategy).collect();
        if tables.is_empty() && self.options.strategy == Strategy::Lattice {
            tracing::info!(
                "no tables found with lattice detection, retrying with stream detection"
            );
            tables = self.scan(&pages, Strategy::Stream).collect();
        }

        tracing::info!(tables = tables.len(), pages = pages.len(), "extraction done");
        Ok(tables)
    }

    /// Lazy scan of already-extracted page text with a fixed strategy.
    /// Yields tables in page order; blank false positives are dropped.
    pub fn scan<'a>(&self, pages: &'a [(u32, String)], strategy: Strategy) -> TableIter<'a> {
        TableIter {
            detector: TableDetector::new(
                strategy,
                self.options.min_table_rows,
                self.options.min_table_cols,
            ),
            pages: pages.iter(),
            current: Vec::new().into_iter(),
        }
    }

    /// Extract the text layer of every page, keyed by 1-based page number.
    fn page_texts(&self, path: &Path) -> Result<Vec<(u32, String)>> {
        match self.page_texts_with_lopdf(path) {
            Ok(pages) => Ok(pages),
            Err(e) => {
                // Whole-document fallback; page boundaries are lost, so the
                // result is treated as a single page. pdf-extract can panic
                // on malformed input, hence the catch_unwind.
                tracing::warn!("lopdf extraction failed, trying pdf-extract: {e}");
                match std::panic::catch_unwind(|| pdf_extract::extract_text(path)) {
                    Ok(Ok(text)) => Ok(vec![(1, text)]),
                    Ok(Err(fallback_err)) => {
                        tracing::warn!("pdf-extract fallback failed: {fallback_err}");
                        Err(e)
                    }
                    Err(_) => {
                        tracing::warn!("pdf-extract fallback panicked");
                        Err(e)
                    }
                }
            }
        }
    }

    fn page_texts_with_lopdf(&self, path: &Path) -> Result<Vec<(u32, String)>> {
        let doc = Document::load(path)
            .map_err(|e| PdfError::Parse(format!("Failed to load PDF: {e}")))?;

        let mut pages = Vec::new();
        let mut any_page_extracted = false;
        let mut last_error: Option<String> = None;

        for page_num in doc.get_pages().keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(content) => {
                    any_page_extracted = true;
                    pages.push((*page_num, content));
                }
                Err(e) => {
                    last_error = Some(e.to_string());
                    tracing::warn!("text extraction failed on page {page_num}: {e}");
                    pages.push((*page_num, String::new()));
                }
            }
        }

        if !any_page_extracted {
            let suffix = last_error.map(|e| format!(": {e}")).unwrap_or_default();
            return Err(PdfError::Extraction(format!(
                "Failed to extract text from any page{suffix}"
            )));
        }

        Ok(pages)
    }
}

/// Lazy iterator over detected tables, page by page. Non-restartable.
pub struct TableIter<'a> {
    detector: TableDetector,
    pages: std::slice::Iter<'a, (u32, String)>,
    current: std::vec::IntoIter<RawTable>,
}

impl Iterator for TableIter<'_> {
    type Item = RawTable;

    fn next(&mut self) -> Option<RawTable> {
        loop {
            if let Some(table) = self.current.next() {
                return Some(table);
            }

            let (page, text) = self.pages.next()?;
            let tables: Vec<RawTable> = self
                .detector
                .detect_tables(text)
                .into_iter()
                .enumerate()
                .map(|(i, rows)| RawTable {
                    page: *page,
                    index: i as u32 + 1,
                    rows,
                })
                .filter(|t| !t.is_blank())
                .collect();
            self.current = tables.into_iter();
        }
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32, text: &str) -> (u32, String) {
        (n, text.to_string())
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let extractor = PdfExtractor::new(ExtractOptions::default());
        let result = extractor.extract(Path::new("/nonexistent/input.pdf"));
        assert!(matches!(result, Err(PdfError::NotFound(_))));
    }

    #[test]
    fn test_wrong_extension_is_invalid_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "not a pdf").unwrap();

        let extractor = PdfExtractor::new(ExtractOptions::default());
        let result = extractor.extract(&path);
        assert!(matches!(result, Err(PdfError::InvalidFormat(_))));
    }

    #[test]
    fn test_pdf_extension_is_case_insensitive() {
        assert!(has_pdf_extension(Path::new("report.pdf")));
        assert!(has_pdf_extension(Path::new("report.PDF")));
        assert!(!has_pdf_extension(Path::new("report.docx")));
        assert!(!has_pdf_extension(Path::new("report")));
    }

    #[test]
    fn test_corrupt_pdf_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, "%PDF-1.5 garbage").unwrap();

        let extractor = PdfExtractor::new(ExtractOptions::default());
        assert!(extractor.extract(&path).is_err());
    }

    #[test]
    fn test_scan_orders_tables_by_page() {
        let pages = vec![
            page(1, "a  b\nc  d\n\ne  f\ng  h\n"),
            page(2, "i  j\nk  l\n"),
        ];
        let extractor = PdfExtractor::new(ExtractOptions {
            strategy: Strategy::Stream,
            ..ExtractOptions::default()
        });

        let tables: Vec<RawTable> = extractor.scan(&pages, Strategy::Stream).collect();
        let keys: Vec<(u32, u32)> = tables.iter().map(|t| (t.page, t.index)).collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_scan_skips_blank_false_positives() {
        // Bordered grid with no text in any cell
        let pages = vec![page(1, "|   |   |\n|   |   |\n")];
        let extractor = PdfExtractor::new(ExtractOptions::default());

        let tables: Vec<RawTable> = extractor.scan(&pages, Strategy::Lattice).collect();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_scan_is_lazy_per_page() {
        let pages = vec![
            page(1, "a  b\nc  d\n"),
            page(2, "e  f\ng  h\n"),
        ];
        let extractor = PdfExtractor::new(ExtractOptions::default());

        let mut iter = extractor.scan(&pages, Strategy::Stream);
        let first = iter.next().unwrap();
        assert_eq!((first.page, first.index), (1, 1));

        let second = iter.next().unwrap();
        assert_eq!((second.page, second.index), (2, 1));
        assert!(iter.next().is_none());
    }
}
