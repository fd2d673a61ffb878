use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// A sheet representing a 2D grid of cells (row-major storage)
///
/// When columns are named, the header stays in row 0 of the grid and data
/// rows start at row 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
    column_names: Option<Vec<String>>,
    column_index: Option<HashMap<String, usize>>,
    column_formats: BTreeMap<usize, String>,
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
            data: Vec::new(),
            column_names: None,
            column_index: None,
            column_formats: BTreeMap::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        let mut sheet = Self::new();
        sheet.data = converted;
        sheet.pad_to_width();
        sheet
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of rows (header included)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    /// Number of leading header rows (1 when columns are named)
    #[must_use]
    pub fn header_rows(&self) -> usize {
        usize::from(self.column_names.is_some()).min(self.data.len())
    }

    /// Number of rows after the header
    #[must_use]
    pub fn data_row_count(&self) -> usize {
        self.row_count() - self.header_rows()
    }

    // ===== Cell Access =====

    /// Get a cell value by row and column index (0-based)
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.col_count(),
            })
    }

    /// Get a cell value by row index and column name
    pub fn get_by_name(&self, row: usize, col_name: &str) -> Result<&CellValue> {
        let col = self.column_index(col_name)?;
        self.get(row, col)
    }

    // ===== Row Operations =====

    /// Get a row by index
    pub fn row(&self, index: usize) -> Result<&Vec<CellValue>> {
        self.data
            .get(index)
            .ok_or(SheetError::RowIndexOutOfBounds {
                index,
                count: self.row_count(),
            })
    }

    /// Iterate over all rows, header included
    pub fn rows(&self) -> impl Iterator<Item = &Vec<CellValue>> {
        self.data.iter()
    }

    /// Iterate over the rows after the header
    pub fn data_rows(&self) -> impl Iterator<Item = &Vec<CellValue>> {
        self.data.iter().skip(self.header_rows())
    }

    /// Get reference to the raw data
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<CellValue>> {
        &self.data
    }

    /// Get mutable reference to the raw data
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }

    /// Keep the header and the data rows matching the predicate.
    /// Returns the number of rows removed.
    pub fn filter_data_rows<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&[CellValue]) -> bool,
    {
        let header = self.header_rows();
        let original_len = self.data.len();
        let mut index = 0;
        self.data.retain(|row| {
            let keep = index < header || predicate(row);
            index += 1;
            keep
        });
        original_len - self.data.len()
    }

    /// Pad every row with nulls up to the widest row
    pub fn pad_to_width(&mut self) {
        let width = self.data.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut self.data {
            row.resize(width, CellValue::Null);
        }
    }

    // ===== Column Operations =====

    /// Apply a function to the data cells of a named column (header untouched)
    pub fn column_map_by_name<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: Fn(&CellValue) -> CellValue,
    {
        let index = self.column_index(name)?;
        let header = self.header_rows();
        for row in self.data.iter_mut().skip(header) {
            row[index] = f(&row[index]);
        }
        Ok(())
    }

    /// Remove the last `n` columns from every row.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::InsufficientColumns` when the sheet has fewer than `n` columns.
    pub fn truncate_columns(&mut self, n: usize) -> Result<()> {
        let actual = self.col_count();
        if n > actual {
            return Err(SheetError::InsufficientColumns {
                required: n,
                actual,
            });
        }

        let keep = actual - n;
        for row in &mut self.data {
            row.truncate(keep);
        }
        self.column_formats.retain(|&col, _| col < keep);

        if self.column_names.is_some() {
            self.name_columns_unique(0)?;
        }
        Ok(())
    }

    /// Split the sheet by the distinct values of a named column, in first-seen
    /// order. Each part keeps the header, the column formats and the original
    /// row order.
    pub fn partition_by_column(&self, name: &str) -> Result<Vec<(CellValue, Sheet)>> {
        let index = self.column_index(name)?;
        let mut groups: IndexMap<String, (CellValue, Vec<Vec<CellValue>>)> = IndexMap::new();

        for row in self.data_rows() {
            let value = &row[index];
            groups
                .entry(Self::cell_key(value))
                .or_insert_with(|| (value.clone(), Vec::new()))
                .1
                .push(row.clone());
        }

        Ok(groups
            .into_values()
            .map(|(value, rows)| {
                let mut part = self.clone();
                part.data.truncate(self.header_rows());
                part.data.extend(rows);
                (value, part)
            })
            .collect())
    }

    // ===== Display Formats =====

    /// Set the number format used when the column is written out
    pub fn set_column_format(&mut self, col: usize, pattern: &str) -> Result<()> {
        if col >= self.col_count() {
            return Err(SheetError::ColumnIndexOutOfBounds {
                index: col,
                count: self.col_count(),
            });
        }
        self.column_formats.insert(col, pattern.to_string());
        Ok(())
    }

    /// All column formats keyed by column index
    #[must_use]
    pub fn column_formats(&self) -> &BTreeMap<usize, String> {
        &self.column_formats
    }

    // ===== Named Access =====

    /// Use the specified row as column headers
    ///
    /// # Errors
    ///
    /// Returns `SheetError::DuplicateColumnName` if the header row contains duplicate names.
    pub fn name_columns_by_row(&mut self, row_index: usize) -> Result<()> {
        let header_row = self.row(row_index)?;
        let names: Vec<String> = header_row.iter().map(CellValue::as_str).collect();

        let mut index_map = HashMap::new();
        for (i, name) in names.iter().enumerate() {
            if index_map.contains_key(name) {
                return Err(SheetError::DuplicateColumnName { name: name.clone() });
            }
            index_map.insert(name.clone(), i);
        }

        self.column_names = Some(names);
        self.column_index = Some(index_map);
        Ok(())
    }

    /// Use the specified row as column headers, renaming blank headers to
    /// `Unnamed: <i>` and repeated ones to `<name>.<k>`
    pub fn name_columns_unique(&mut self, row_index: usize) -> Result<()> {
        let header_row = self.row(row_index)?;
        let mut names = Vec::with_capacity(header_row.len());
        let mut index_map = HashMap::new();

        for (i, cell) in header_row.iter().enumerate() {
            let base = if cell.is_missing() {
                format!("Unnamed: {i}")
            } else {
                cell.as_str().trim().to_string()
            };
            let mut name = base.clone();
            let mut k = 1;
            while index_map.contains_key(&name) {
                name = format!("{base}.{k}");
                k += 1;
            }
            index_map.insert(name.clone(), i);
            names.push(name);
        }

        self.column_names = Some(names);
        self.column_index = Some(index_map);
        Ok(())
    }

    /// Get column names (if set)
    #[must_use]
    pub fn column_names(&self) -> Option<&Vec<String>> {
        self.column_names.as_ref()
    }

    /// Get the column index by name
    ///
    /// # Errors
    ///
    /// Returns `SheetError::MissingColumn` when no column has that name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.column_index
            .as_ref()
            .ok_or_else(|| {
                SheetError::ColumnsNotNamed("Call name_columns_by_row() first".to_string())
            })?
            .get(name)
            .copied()
            .ok_or_else(|| SheetError::MissingColumn {
                name: name.to_string(),
            })
    }

    fn cell_key(cell: &CellValue) -> String {
        match cell {
            CellValue::Null => "N".to_string(),
            CellValue::Bool(b) => format!("B{b}"),
            // Integral floats group with equal ints, as spreadsheets store both as numbers
            CellValue::Int(i) => format!("F{:?}", *i as f64),
            CellValue::Float(f) => format!("F{f:?}"),
            CellValue::String(s) => format!("S{s}"),
            CellValue::Date(dt) => format!("D{dt}"),
        }
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
