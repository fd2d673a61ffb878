//! Pure table transformations. Each function returns a new sheet and leaves
//! its input untouched.

use planilla_sheet::{parse_column_letters, CellValue, Result, Sheet};

/// One office slice produced by [`split_by_office`]
#[derive(Debug, Clone, PartialEq)]
pub struct OfficeSheet {
    /// The `Oficina` value shared by every data row
    pub office: CellValue,
    pub sheet: Sheet,
}

/// Remove the last `n` columns, keeping every row and the order of the rest.
///
/// # Errors
///
/// Returns `SheetError::InsufficientColumns` when the sheet has fewer than `n` columns.
pub fn trim_trailing_columns(sheet: &Sheet, n: usize) -> Result<Sheet> {
    let mut trimmed = sheet.clone();
    trimmed.truncate_columns(n)?;
    Ok(trimmed)
}

/// Drop data rows whose exit date is null or the empty string.
///
/// Whitespace-only text is kept, like any other value.
pub fn drop_rows_without_exit_date(sheet: &Sheet, column: &str) -> Result<Sheet> {
    let index = sheet.column_index(column)?;
    let mut filtered = sheet.clone();
    let removed = filtered.filter_data_rows(|row| !row[index].is_missing());
    tracing::debug!(column, removed, "dropped rows without exit date");
    Ok(filtered)
}

/// Replace the sentinel category label with its numeric code.
pub fn normalize_category(sheet: &Sheet, column: &str, label: &str, code: i64) -> Result<Sheet> {
    let mut normalized = sheet.clone();
    normalized.column_map_by_name(column, |cell| match cell {
        CellValue::String(s) if s == label => CellValue::Int(code),
        other => other.clone(),
    })?;
    Ok(normalized)
}

/// Split into one sheet per distinct office value, in first-seen order.
pub fn split_by_office(sheet: &Sheet, column: &str) -> Result<Vec<OfficeSheet>> {
    let offices: Vec<OfficeSheet> = sheet
        .partition_by_column(column)?
        .into_iter()
        .map(|(office, sheet)| OfficeSheet { office, sheet })
        .collect();
    tracing::debug!(offices = offices.len(), "split by office");
    Ok(offices)
}

/// Set the display format of the given columns (letters such as `H`).
///
/// Stored values are unchanged and non-date cells get the format too.
/// Columns past the end of the sheet are skipped.
///
/// # Errors
///
/// Returns `SheetError::InvalidColumnLetters` for a malformed column letter.
pub fn reformat_dates<S: AsRef<str>>(sheet: &Sheet, columns: &[S], pattern: &str) -> Result<Sheet> {
    let mut formatted = sheet.clone();
    for letters in columns {
        let col = parse_column_letters(letters.as_ref())?;
        if col >= formatted.col_count() {
            tracing::debug!(column = letters.as_ref(), "date column outside the sheet, skipped");
            continue;
        }
        formatted.set_column_format(col, pattern)?;
    }
    Ok(formatted)
}
