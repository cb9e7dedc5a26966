//! Sheet/Book model for tabella
//!
//! Provides the in-memory spreadsheet representation (typed cells, named
//! sheets, ordered books) and xlsx serialization used by the conversion
//! pipeline.
//!
//! # Examples
//!
//! ```
//! use tabella_sheet::{Book, CellValue, Sheet};
//!
//! let mut sheet = Sheet::with_name("Data");
//! sheet.set_columns(vec!["Name".to_string(), "Amount".to_string()]).unwrap();
//! sheet.push_row(vec![CellValue::Text("Widget".to_string()), CellValue::Number(1000.0)]);
//!
//! let mut book = Book::new();
//! book.add_sheet("Data", sheet).unwrap();
//! assert_eq!(book.sheet_count(), 1);
//! ```

pub mod book;
pub mod cell;
pub mod error;
pub mod sheet;
pub mod xlsx;

pub use book::{Book, MAX_SHEET_NAME_LEN};
pub use cell::CellValue;
pub use error::{Result, SheetError};
pub use sheet::Sheet;
