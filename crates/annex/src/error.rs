use planilla_sheet::SheetError;
use thiserror::Error;

/// Errors raised while building an annex document
#[derive(Error, Debug)]
pub enum AnnexError {
    #[error("No spreadsheets were provided")]
    NoInputs,

    #[error("{file}: {source}")]
    Input {
        file: String,
        #[source]
        source: SheetError,
    },

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnnexError>;
