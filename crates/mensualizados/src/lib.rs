//! # planilla-mensualizados
//!
//! Post-processing for mensualizados spreadsheets: rows without an exit date
//! are dropped, the uncategorized label becomes a numeric code, trailing
//! columns are trimmed and, for the areas that need it, the sheet is split
//! into one file per office.
//!
//! ```no_run
//! use planilla_mensualizados::{process, MensualizadosOptions, MensualizadosRequest};
//!
//! let bytes = std::fs::read("mensualizados.xlsx").unwrap();
//! let request = MensualizadosRequest::from_xlsx_bytes("SALUD PUBLICA", &bytes).unwrap();
//! for file in process(&request, &MensualizadosOptions::default()).unwrap() {
//!     std::fs::write(&file.file_name, &file.bytes).unwrap();
//! }
//! ```

mod area;
mod error;
mod options;
mod pipeline;
pub mod transform;

pub use area::Area;
pub use error::{MensualizadosError, Result};
pub use options::MensualizadosOptions;
pub use pipeline::{process, MensualizadosRequest, OutputFile};
