//! Positional layout of an annex input row.
//!
//! Input columns: office id, office name, employee id, employee name,
//! category, role, bonus, start date, end date, then one trailing column
//! that only takes part in the blank-row check.

use planilla_sheet::{CellValue, Result, Sheet, SheetError};

pub const OFFICE_ID: usize = 0;
pub const OFFICE_NAME: usize = 1;
pub const START_DATE: usize = 7;
pub const END_DATE: usize = 8;

/// Columns a sheet must have to be rendered
pub const REQUIRED_COLUMNS: usize = 9;
/// Columns read from each row; anything further right is ignored
pub const READ_COLUMNS: usize = 10;

/// Header of every rendered table
pub const TABLE_HEADER: [&str; 9] = [
    "NRO.OFICINA",
    "LEGAJO",
    "APELLIDO Y NOMBRE",
    "CATEGORÍA",
    "FUNCIÓN",
    "BONIFICACIÓN",
    "INGRESO",
    "EGRESO",
    "NOTIFICACION FIRMA Y FECHA",
];

/// Check the sheet is wide enough for the positional schema.
///
/// # Errors
///
/// Returns `SheetError::InsufficientColumns` when fewer than
/// [`REQUIRED_COLUMNS`] columns are present.
pub fn validate(sheet: &Sheet) -> Result<()> {
    let actual = sheet.col_count();
    if actual < REQUIRED_COLUMNS {
        return Err(SheetError::InsufficientColumns {
            required: REQUIRED_COLUMNS,
            actual,
        });
    }
    Ok(())
}

/// A data row viewed through the annex schema
#[derive(Debug, Clone, Copy)]
pub struct AnnexRow<'a> {
    cells: &'a [CellValue],
}

impl<'a> AnnexRow<'a> {
    /// Wrap a row already checked by [`validate`]
    #[must_use]
    pub fn new(row: &'a [CellValue]) -> Self {
        AnnexRow {
            cells: &row[..row.len().min(READ_COLUMNS)],
        }
    }

    #[must_use]
    pub fn office_id(&self) -> &'a CellValue {
        &self.cells[OFFICE_ID]
    }

    #[must_use]
    pub fn office_name(&self) -> &'a CellValue {
        &self.cells[OFFICE_NAME]
    }

    /// `<office-id> - <office-name>`
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} - {}", self.office_id(), self.office_name())
    }

    /// Every read cell except the office name is null
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.office_id().is_null() && !self.has_details()
    }

    /// Some cell past the office columns holds a value, whitespace included
    #[must_use]
    pub fn has_details(&self) -> bool {
        self.cells[OFFICE_NAME + 1..].iter().any(|cell| !cell.is_null())
    }

    /// Same office as another id, treating equal numbers as equal whatever
    /// their storage type
    #[must_use]
    pub fn same_office(&self, other: &CellValue) -> bool {
        match (self.office_id(), other) {
            (
                a @ (CellValue::Int(_) | CellValue::Float(_)),
                b @ (CellValue::Int(_) | CellValue::Float(_)),
            ) => a.as_float() == b.as_float(),
            (a, b) => a == b,
        }
    }

    /// Render into the 9 display cells; the signature cell stays blank
    #[must_use]
    pub fn render(&self, date_format: &str) -> [String; 9] {
        let mut rendered: [String; 9] = Default::default();
        let source = (0..REQUIRED_COLUMNS).filter(|&col| col != OFFICE_NAME);
        for (slot, col) in rendered.iter_mut().zip(source) {
            let cell = &self.cells[col];
            *slot = if col == START_DATE || col == END_DATE {
                cell.format_date_or_str(date_format)
            } else {
                cell.as_str()
            };
        }
        rendered
    }
}
