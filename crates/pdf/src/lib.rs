//! PDF table extraction for tabella
//!
//! Turns a PDF's text layer into [`RawTable`] grids, page by page. Two
//! detection strategies are available: lattice (ruled borders) and stream
//! (whitespace alignment); lattice falls back to stream when a whole-document
//! pass finds nothing.

pub mod detector;
pub mod error;
pub mod extractor;

use std::path::Path;

pub use detector::{Grid, Strategy, TableDetector};
pub use error::{PdfError, Result};
pub use extractor::{ExtractOptions, PdfExtractor, RawTable, TableIter};

/// Extract tables from a PDF file using default options
///
/// ```no_run
/// let tables = tabella_pdf::extract_tables_from_pdf("report.pdf")?;
/// for table in &tables {
///     println!("page {} table {}: {} rows", table.page, table.index, table.rows.len());
/// }
/// # Ok::<(), tabella_pdf::PdfError>(())
/// ```
pub fn extract_tables_from_pdf<P: AsRef<Path>>(path: P) -> Result<Vec<RawTable>> {
    PdfExtractor::new(ExtractOptions::default()).extract(path.as_ref())
}
