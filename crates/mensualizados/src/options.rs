use serde::Deserialize;

/// Column names and constants used by the mensualizados pipeline.
///
/// Every field has a default, so a configuration file only needs the keys
/// it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MensualizadosOptions {
    /// Number of trailing columns dropped from the input
    pub trailing_columns: usize,
    /// Rows with an empty value here are removed
    pub exit_date_column: String,
    pub category_column: String,
    /// Category label replaced by `uncategorized_code`
    pub uncategorized_label: String,
    pub uncategorized_code: i64,
    pub office_column: String,
    /// Column letters displayed with `date_format`
    pub date_columns: Vec<String>,
    pub date_format: String,
}

impl Default for MensualizadosOptions {
    fn default() -> Self {
        MensualizadosOptions {
            trailing_columns: 3,
            exit_date_column: "Fecha Egreso Cargo".to_string(),
            category_column: "Categoría".to_string(),
            uncategorized_label: "NO CATEGORIZADO".to_string(),
            uncategorized_code: 999,
            office_column: "Oficina".to_string(),
            date_columns: vec!["H".to_string(), "I".to_string()],
            date_format: "DD/MM/YYYY".to_string(),
        }
    }
}
