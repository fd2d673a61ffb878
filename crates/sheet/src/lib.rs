//! Sheet model for planilla
//!
//! Provides a small row-major table of typed cells, header-aware row and
//! column operations, and spreadsheet I/O (reading any format calamine
//! understands, writing xlsx with per-column number formats).
//!
//! # Examples
//!
//! ```
//! use planilla_sheet::{CellValue, Sheet};
//!
//! let mut sheet = Sheet::from_data(vec![
//!     vec!["Oficina", "Nombre"],
//!     vec!["7", "Ana"],
//! ]);
//! sheet.name_columns_by_row(0).unwrap();
//!
//! assert_eq!(sheet.data_row_count(), 1);
//! assert_eq!(sheet.get_by_name(1, "Nombre").unwrap(), &CellValue::from("Ana"));
//! ```

mod a1_notation;
mod cell;
mod error;
mod sheet;
mod xlsx;

/// Re-export column letter helpers.
pub use a1_notation::parse_column_letters;
/// Re-export cell value type and date conversions.
pub use cell::{datetime_to_excel_serial, excel_serial_to_datetime, parse_iso_datetime, CellValue};
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
/// Re-export XLSX options.
pub use xlsx::{XlsxReadOptions, DEFAULT_DATE_FORMAT};
