use crate::error::{Result, SheetError};

/// Convert column letters to 0-based column index
/// A=0, B=1, ... Z=25, AA=26, AB=27, ...
pub fn parse_column_letters(col_str: &str) -> Result<usize> {
    let trimmed = col_str.trim();
    if trimmed.is_empty() {
        return Err(SheetError::InvalidColumnLetters(col_str.to_string()));
    }

    let mut col = 0usize;
    for b in trimmed.to_ascii_uppercase().bytes() {
        if !b.is_ascii_uppercase() {
            return Err(SheetError::InvalidColumnLetters(col_str.to_string()));
        }
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add((b - b'A') as usize + 1))
            .ok_or_else(|| SheetError::InvalidColumnLetters(col_str.to_string()))?;
    }

    Ok(col - 1)
}
