use crate::cell::{datetime_to_excel_serial, excel_serial_to_datetime, parse_iso_datetime, CellValue};
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Number format for date cells in columns without an explicit format
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Options for reading Excel files
#[derive(Debug, Clone, Default)]
pub struct XlsxReadOptions {
    /// Whether the first row contains headers
    pub has_headers: bool,
}

impl XlsxReadOptions {
    /// Set whether the first row contains headers
    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            excel_serial_to_datetime(serial).map_or(CellValue::Float(serial), CellValue::Date)
        }
        Data::DateTimeIso(s) => {
            parse_iso_datetime(s).map_or_else(|| CellValue::String(s.clone()), CellValue::Date)
        }
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}

/// Convert a used range into a grid anchored at A1, so positional reads
/// see the same columns the spreadsheet shows.
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let width = start_col as usize + range.width();

    let mut data: Vec<Vec<CellValue>> = (0..start_row)
        .map(|_| vec![CellValue::Null; width])
        .collect();

    for row in range.rows() {
        let mut row_data = vec![CellValue::Null; start_col as usize];
        row_data.extend(row.iter().map(data_to_cell_value));
        data.push(row_data);
    }

    data
}

impl Sheet {
    /// Load the first worksheet of a spreadsheet file (`.xlsx`, `.xls`, `.ods`)
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened or read.
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_xlsx_with_options(path, &XlsxReadOptions::default())
    }

    /// Load the first worksheet of a spreadsheet file with options
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened or read.
    pub fn from_xlsx_with_options<P: AsRef<Path>>(path: P, options: &XlsxReadOptions) -> Result<Self> {
        let mut workbook = open_workbook_auto(path.as_ref())?;
        Self::from_first_worksheet(&mut workbook, options)
    }

    /// Load the first worksheet of an in-memory spreadsheet
    ///
    /// # Errors
    ///
    /// Returns error if the bytes are not a readable spreadsheet.
    pub fn from_xlsx_bytes(bytes: &[u8], options: &XlsxReadOptions) -> Result<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        Self::from_first_worksheet(&mut workbook, options)
    }

    fn from_first_worksheet<RS: Read + Seek>(
        workbook: &mut Sheets<RS>,
        options: &XlsxReadOptions,
    ) -> Result<Self> {
        let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
            return Ok(Sheet::new());
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut sheet = Sheet::with_name(&sheet_name);
        *sheet.data_mut() = range_to_grid(&range);

        if options.has_headers && sheet.row_count() > 0 {
            sheet.name_columns_unique(0)?;
        }

        Ok(sheet)
    }

    /// Save the sheet to an Excel file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();
        self.write_to_worksheet(workbook.add_worksheet())?;
        workbook.save(path.as_ref())?;
        Ok(())
    }

    /// Serialize the sheet into xlsx bytes
    ///
    /// # Errors
    ///
    /// Returns error if the workbook cannot be assembled.
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        self.write_to_worksheet(workbook.add_worksheet())?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Write sheet data to a worksheet
    fn write_to_worksheet(&self, worksheet: &mut Worksheet) -> Result<()> {
        worksheet.set_name(self.name())?;

        let header_rows = self.header_rows();
        let default_date = Format::new().set_num_format(DEFAULT_DATE_FORMAT);
        let bold = Format::new().set_bold();
        let column_formats: BTreeMap<usize, (Format, Format)> = self
            .column_formats()
            .iter()
            .map(|(&col, pattern)| {
                (
                    col,
                    (
                        Format::new().set_bold().set_num_format(pattern),
                        Format::new().set_num_format(pattern),
                    ),
                )
            })
            .collect();

        for (row_idx, row) in self.data().iter().enumerate() {
            let row_num = u32::try_from(row_idx)
                .map_err(|_| SheetError::MalformedInput("Row index overflow".to_string()))?;
            let is_header = row_idx < header_rows;

            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = u16::try_from(col_idx)
                    .map_err(|_| SheetError::MalformedInput("Column index overflow".to_string()))?;

                let format = match (column_formats.get(&col_idx), is_header) {
                    (Some((header, _)), true) => Some(header),
                    (Some((_, body)), false) => Some(body),
                    (None, true) => Some(&bold),
                    (None, false) => None,
                };

                match (cell, format) {
                    (CellValue::Null, Some(format)) => {
                        worksheet.write_blank(row_num, col_num, format)?;
                    }
                    (CellValue::Null, None) => {}
                    (CellValue::Bool(b), Some(format)) => {
                        worksheet.write_boolean_with_format(row_num, col_num, *b, format)?;
                    }
                    (CellValue::Bool(b), None) => {
                        worksheet.write_boolean(row_num, col_num, *b)?;
                    }
                    (CellValue::Int(_) | CellValue::Float(_), format) => {
                        // Excel stores all numbers as f64, so integers > 2^53 may lose precision
                        let number = cell.as_float().unwrap_or_default();
                        match format {
                            Some(format) => {
                                worksheet.write_number_with_format(row_num, col_num, number, format)?
                            }
                            None => worksheet.write_number(row_num, col_num, number)?,
                        };
                    }
                    (CellValue::String(s), Some(format)) => {
                        worksheet.write_string_with_format(row_num, col_num, s, format)?;
                    }
                    (CellValue::String(s), None) => {
                        worksheet.write_string(row_num, col_num, s)?;
                    }
                    (CellValue::Date(dt), format) => {
                        let serial = datetime_to_excel_serial(dt);
                        worksheet.write_number_with_format(
                            row_num,
                            col_num,
                            serial,
                            format.unwrap_or(&default_date),
                        )?;
                    }
                }
            }
        }

        Ok(())
    }
}
