use crate::document::Typography;
use serde::Deserialize;

/// Rendering options for annex documents
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnexOptions {
    /// strftime pattern for the start and end date cells
    pub date_format: String,
    pub typography: Typography,
}

impl Default for AnnexOptions {
    fn default() -> Self {
        AnnexOptions {
            date_format: "%d/%m/%Y".to_string(),
            typography: Typography::default(),
        }
    }
}
