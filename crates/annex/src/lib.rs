//! # planilla-annex
//!
//! Builds signature annexes: every uploaded spreadsheet is split into one
//! table per run of rows sharing an office id, each table titled
//! `<office-id> - <office-name>` and followed by a page break, and the
//! result is written as a landscape `.docx`.
//!
//! ```no_run
//! use planilla_annex::{build, AnnexInput, AnnexOptions, AnnexRequest};
//!
//! let input = AnnexInput::from_path("oficinas.xlsx").unwrap();
//! let request = AnnexRequest::new("Anexo Hacienda", vec![input]);
//! let output = build(&request, &AnnexOptions::default()).unwrap();
//! std::fs::write(&output.file_name, &output.bytes).unwrap();
//! ```

mod assemble;
mod document;
mod docx;
mod error;
mod options;
mod render;
pub mod schema;

pub use assemble::{assemble, build, AnnexInput, AnnexOutput, AnnexRequest, DEFAULT_TITLE};
pub use document::{AnnexTable, Block, Document, PageSetup, Typography};
pub use error::{AnnexError, Result};
pub use options::AnnexOptions;
pub use render::render_sheet;
