use crate::document::{AnnexTable, Block};
use crate::schema::{self, AnnexRow};
use planilla_sheet::{Result, Sheet, SheetError};

/// Render one sheet into office tables separated by page breaks.
///
/// Row 0 is the header. A new table starts whenever the office id differs
/// from the previous rendered row's id, so an office that shows up again
/// later gets a second table instead of being merged into the first one.
/// Every table is followed by a page break.
///
/// # Errors
///
/// Returns `SheetError::InsufficientColumns` for sheets narrower than the
/// schema and `SheetError::MalformedInput` when there are no data rows.
pub fn render_sheet(sheet: &Sheet, date_format: &str) -> Result<Vec<Block>> {
    schema::validate(sheet)?;

    let mut rows = sheet
        .rows()
        .skip(1)
        .map(|row| AnnexRow::new(row))
        .filter(|row| !row.is_blank());

    let first = rows
        .next()
        .ok_or_else(|| SheetError::MalformedInput("sheet has no data rows".to_string()))?;

    let mut blocks = Vec::new();
    let mut current_office = first.office_id();
    let mut table = AnnexTable::new(first.title());

    for row in std::iter::once(first).chain(rows) {
        if !row.same_office(current_office) {
            current_office = row.office_id();
            let finished = std::mem::replace(&mut table, AnnexTable::new(row.title()));
            blocks.push(Block::Table(finished));
            blocks.push(Block::PageBreak);
        }

        if row.has_details() {
            table.rows.push(row.render(date_format));
        }
    }

    blocks.push(Block::Table(table));
    blocks.push(Block::PageBreak);

    tracing::debug!(
        sheet = sheet.name(),
        tables = blocks.len() / 2,
        "rendered office tables"
    );
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planilla_sheet::CellValue;

    const DATE_FORMAT: &str = "%d/%m/%Y";

    fn header() -> Vec<CellValue> {
        (0..10).map(|i| CellValue::from(format!("col{i}"))).collect()
    }

    fn row(office: i64, name: &str, legajo: i64) -> Vec<CellValue> {
        let mut cells = vec![CellValue::Null; 10];
        cells[0] = CellValue::Int(office);
        cells[1] = name.into();
        cells[2] = CellValue::Int(legajo);
        cells[3] = format!("Empleado {legajo}").into();
        cells
    }

    fn sheet(rows: Vec<Vec<CellValue>>) -> Sheet {
        let mut data = vec![header()];
        data.extend(rows);
        Sheet::from_data(data)
    }

    fn tables(blocks: &[Block]) -> Vec<&AnnexTable> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                Block::PageBreak => None,
            })
            .collect()
    }

    #[test]
    fn test_adjacent_runs_become_tables() {
        let input = sheet(vec![
            row(1, "Uno", 10),
            row(1, "Uno", 11),
            row(2, "Dos", 20),
            row(2, "Dos", 21),
            row(1, "Uno", 12),
        ]);
        let blocks = render_sheet(&input, DATE_FORMAT).unwrap();
        let tables = tables(&blocks);

        // Office 1 returns at the end and gets its own table
        assert_eq!(tables.len(), 3);
        let titles: Vec<&str> = tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["1 - Uno", "2 - Dos", "1 - Uno"]);
        let sizes: Vec<usize> = tables.iter().map(|t| t.rows.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_blocks_alternate_with_trailing_break() {
        let input = sheet(vec![row(1, "Uno", 10), row(2, "Dos", 20)]);
        let blocks = render_sheet(&input, DATE_FORMAT).unwrap();

        assert_eq!(blocks.len(), 4);
        assert!(matches!(blocks[0], Block::Table(_)));
        assert_eq!(blocks[1], Block::PageBreak);
        assert!(matches!(blocks[2], Block::Table(_)));
        assert_eq!(blocks[3], Block::PageBreak);
    }

    #[test]
    fn test_row_with_only_office_id_is_skipped() {
        let mut empty = vec![CellValue::Null; 10];
        empty[0] = CellValue::Int(1);
        let input = sheet(vec![row(1, "Uno", 10), empty, row(1, "Uno", 11)]);

        let blocks = render_sheet(&input, DATE_FORMAT).unwrap();
        let tables = tables(&blocks);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 2);
    }

    #[test]
    fn test_fully_blank_row_does_not_split() {
        let mut blank = vec![CellValue::Null; 10];
        blank[1] = "Uno".into();
        let input = sheet(vec![row(1, "Uno", 10), blank, vec![CellValue::Null; 10], row(1, "Uno", 11)]);

        let blocks = render_sheet(&input, DATE_FORMAT).unwrap();
        assert_eq!(tables(&blocks).len(), 1);
        assert_eq!(tables(&blocks)[0].rows.len(), 2);
    }

    #[test]
    fn test_whitespace_row_is_rendered() {
        let mut spaces = vec![CellValue::Null; 10];
        spaces[0] = CellValue::Int(1);
        spaces[2] = " ".into();
        let input = sheet(vec![row(1, "Uno", 10), spaces]);

        let blocks = render_sheet(&input, DATE_FORMAT).unwrap();
        let tables = tables(&blocks);
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[0].rows[1][1], " ");
    }

    #[test]
    fn test_title_uses_first_row_of_each_run() {
        let input = sheet(vec![row(5, "Cinco", 1), row(6, "Seis", 2), row(6, "Otro nombre", 3)]);
        let blocks = render_sheet(&input, DATE_FORMAT).unwrap();
        let titles: Vec<String> = tables(&blocks).iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["5 - Cinco", "6 - Seis"]);
    }

    #[test]
    fn test_no_data_rows() {
        let input = sheet(Vec::new());
        assert!(matches!(
            render_sheet(&input, DATE_FORMAT),
            Err(SheetError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_too_narrow() {
        let input = Sheet::from_data(vec![vec![CellValue::Null; 5], vec![CellValue::Int(1); 5]]);
        assert!(matches!(
            render_sheet(&input, DATE_FORMAT),
            Err(SheetError::InsufficientColumns { required: 9, actual: 5 })
        ));
    }
}
