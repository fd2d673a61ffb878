use crate::area::Area;
use crate::error::Result;
use crate::options::MensualizadosOptions;
use crate::transform::{
    drop_rows_without_exit_date, normalize_category, reformat_dates, split_by_office,
    trim_trailing_columns,
};
use planilla_sheet::{Sheet, XlsxReadOptions};

/// One uploaded mensualizados file, tagged with the area it belongs to
#[derive(Debug, Clone)]
pub struct MensualizadosRequest {
    pub area: Area,
    pub sheet: Sheet,
}

impl MensualizadosRequest {
    #[must_use]
    pub fn new(area: Area, sheet: Sheet) -> Self {
        MensualizadosRequest { area, sheet }
    }

    /// Build a request from an area label and raw spreadsheet bytes.
    ///
    /// The area is checked before the bytes are read, so an empty selection
    /// never touches the file.
    pub fn from_xlsx_bytes(area: &str, bytes: &[u8]) -> Result<Self> {
        Self::read(area.parse()?, bytes)
    }

    /// Read the first worksheet of raw spreadsheet bytes for an already chosen area
    pub fn read(area: Area, bytes: &[u8]) -> Result<Self> {
        let sheet = Sheet::from_xlsx_bytes(bytes, &XlsxReadOptions::default().with_headers(true))?;
        Ok(Self::new(area, sheet))
    }
}

/// A finished spreadsheet ready to be handed to the user
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    pub file_name: String,
    /// Caption for the download action
    pub label: String,
    pub bytes: Vec<u8>,
}

/// Run the mensualizados pipeline: filter, normalize, trim, split by office
/// when the area asks for it, and format the date columns.
pub fn process(
    request: &MensualizadosRequest,
    options: &MensualizadosOptions,
) -> Result<Vec<OutputFile>> {
    let area = request.area;
    let sheet = drop_rows_without_exit_date(&request.sheet, &options.exit_date_column)?;
    let sheet = normalize_category(
        &sheet,
        &options.category_column,
        &options.uncategorized_label,
        options.uncategorized_code,
    )?;
    let sheet = trim_trailing_columns(&sheet, options.trailing_columns)?;

    tracing::info!(
        area = %area,
        rows = sheet.data_row_count(),
        columns = sheet.col_count(),
        "prepared mensualizados"
    );

    if !area.splits_by_office() {
        let sheet = reformat_dates(&sheet, options.date_columns.as_slice(), &options.date_format)?;
        return Ok(vec![OutputFile {
            file_name: format!("{area}.xlsx"),
            label: "Descargar planilla de mensualizados".to_string(),
            bytes: sheet.to_xlsx_bytes()?,
        }]);
    }

    split_by_office(&sheet, &options.office_column)?
        .into_iter()
        .map(|office| -> Result<OutputFile> {
            let sheet = reformat_dates(&office.sheet, options.date_columns.as_slice(), &options.date_format)?;
            let office = office.office.as_str();
            tracing::debug!(area = %area, office = %office, rows = sheet.data_row_count(), "office file");
            Ok(OutputFile {
                file_name: format!("{area}_oficina_{office}.xlsx"),
                label: format!("Descargar planilla de la oficina: {office}"),
                bytes: sheet.to_xlsx_bytes()?,
            })
        })
        .collect()
}
