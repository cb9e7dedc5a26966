use crate::book::Book;
use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::Sheet;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Number formats applied to numeric cells: `0` for integral values,
/// `0.00` for fractional ones.
struct NumberFormats {
    integer: Format,
    decimal: Format,
}

impl NumberFormats {
    fn new() -> Self {
        Self {
            integer: Format::new().set_num_format("0"),
            decimal: Format::new().set_num_format("0.00"),
        }
    }
}

impl Sheet {
    /// Write this sheet's header row and data into a worksheet
    fn write_to_worksheet(&self, worksheet: &mut Worksheet, formats: &NumberFormats) -> Result<()> {
        worksheet.set_name(self.name())?;

        let mut row_offset: u32 = 0;
        if let Some(columns) = self.column_names() {
            for (col_idx, name) in columns.iter().enumerate() {
                worksheet.write_string(0, col_idx as u16, name)?;
            }
            row_offset = 1;
        }

        for (row_idx, row) in self.data().iter().enumerate() {
            let row_num = row_offset + row_idx as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = col_idx as u16;

                match cell {
                    CellValue::Empty => {} // Leave empty
                    CellValue::Number(n) => {
                        let format = if cell.is_integral() {
                            &formats.integer
                        } else {
                            &formats.decimal
                        };
                        worksheet.write_number_with_format(row_num, col_num, *n, format)?;
                    }
                    CellValue::Text(s) => {
                        worksheet.write_string(row_num, col_num, s)?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl Book {
    /// Save the book to an xlsx file
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = self.to_workbook()?;
        workbook.save(path.as_ref())?;
        Ok(())
    }

    /// Serialize the book to xlsx bytes in memory
    pub fn save_to_buffer(&self) -> Result<Vec<u8>> {
        let mut workbook = self.to_workbook()?;
        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }

    fn to_workbook(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let formats = NumberFormats::new();

        for (_, sheet) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            sheet.write_to_worksheet(worksheet, &formats)?;
        }

        Ok(workbook)
    }
}
