use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use std::collections::HashSet;

/// A sheet representing a 2D grid of cells (row-major storage)
///
/// Column names are optional: a sheet with named columns emits them as a
/// header row when written to xlsx; a sheet without writes data rows only.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    columns: Option<Vec<String>>,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            columns: None,
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            columns: None,
            data: converted,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of data rows (column header excluded)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        match &self.columns {
            Some(cols) => cols.len(),
            None => self.data.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    /// Check if the sheet has no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the column names, if set
    #[must_use]
    pub fn column_names(&self) -> Option<&Vec<String>> {
        self.columns.as_ref()
    }

    /// Name the columns of this sheet.
    ///
    /// Names must be unique; existing rows are padded with empty cells up to
    /// the column count.
    pub fn set_columns(&mut self, names: Vec<String>) -> Result<()> {
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(SheetError::DuplicateColumnName { name: name.clone() });
            }
        }
        let width = names.len();
        for row in &mut self.data {
            if row.len() < width {
                row.resize(width, CellValue::Empty);
            }
        }
        self.columns = Some(names);
        Ok(())
    }

    /// Append a data row, padding it with empty cells to the column count
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        if let Some(cols) = &self.columns {
            if row.len() < cols.len() {
                row.resize(cols.len(), CellValue::Empty);
            }
        }
        self.data.push(row);
    }

    /// Get a cell by (row, col), if present
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.data.get(row).and_then(|r| r.get(col))
    }

    /// Get the data grid
    #[must_use]
    pub fn data(&self) -> &[Vec<CellValue>] {
        &self.data
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sheet() {
        let sheet = Sheet::new();
        assert_eq!(sheet.name(), "Sheet1");
        assert!(sheet.is_empty());
        assert_eq!(sheet.col_count(), 0);
    }

    #[test]
    fn test_from_data() {
        let sheet = Sheet::from_data(vec![vec!["a", "b"], vec!["c", "d"]]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.col_count(), 2);
        assert_eq!(sheet.get(1, 0), Some(&CellValue::Text("c".to_string())));
    }

    #[test]
    fn test_set_columns() {
        let mut sheet = Sheet::new();
        sheet
            .set_columns(vec!["Name".to_string(), "Amount".to_string()])
            .unwrap();
        assert_eq!(sheet.col_count(), 2);
        assert_eq!(
            sheet.column_names(),
            Some(&vec!["Name".to_string(), "Amount".to_string()])
        );
    }

    #[test]
    fn test_set_columns_rejects_duplicates() {
        let mut sheet = Sheet::new();
        let result = sheet.set_columns(vec!["A".to_string(), "A".to_string()]);
        assert!(matches!(
            result,
            Err(SheetError::DuplicateColumnName { name }) if name == "A"
        ));
    }

    #[test]
    fn test_push_row_pads_to_columns() {
        let mut sheet = Sheet::new();
        sheet
            .set_columns(vec!["A".to_string(), "B".to_string(), "C".to_string()])
            .unwrap();
        sheet.push_row(vec![CellValue::Number(1.0)]);

        assert_eq!(sheet.get(0, 2), Some(&CellValue::Empty));
    }

    #[test]
    fn test_set_columns_pads_existing_rows() {
        let mut sheet = Sheet::from_data(vec![vec!["x"]]);
        sheet
            .set_columns(vec!["A".to_string(), "B".to_string()])
            .unwrap();
        assert_eq!(sheet.get(0, 1), Some(&CellValue::Empty));
    }
}
