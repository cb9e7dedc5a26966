//! PDF-to-xlsx conversion pipeline.
//!
//! Glues the extractor ([`tabella_pdf`]) to the workbook model
//! ([`tabella_sheet`]): raw tables are normalized, typed, and laid out as
//! worksheets. The pipeline always produces a workbook; documents without
//! tables get a diagnostic sheet.

pub mod clean;
pub mod error;
pub mod pipeline;

pub use clean::{clean_table, CleanedTable};
pub use error::{ConvertError, Result};
pub use pipeline::{
    build_book, convert_file, convert_to_buffer, ConvertOptions, ConvertSummary, SheetLayout,
};

pub use tabella_pdf::{RawTable, Strategy};
