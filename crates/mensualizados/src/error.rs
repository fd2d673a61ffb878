use planilla_sheet::SheetError;
use thiserror::Error;

/// Errors raised while post-processing a mensualizados file
#[derive(Error, Debug)]
pub enum MensualizadosError {
    #[error("No area selected: choose the area before continuing")]
    NoAreaSelected,

    #[error("Unknown area: {0}")]
    UnknownArea(String),

    #[error(transparent)]
    Sheet(#[from] SheetError),
}

pub type Result<T> = std::result::Result<T, MensualizadosError>;
