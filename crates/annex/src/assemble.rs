use crate::document::{Document, PageSetup};
use crate::error::{AnnexError, Result};
use crate::options::AnnexOptions;
use crate::render::render_sheet;
use planilla_sheet::{Sheet, XlsxReadOptions};
use std::path::Path;

/// Title used when the user leaves the file name blank
pub const DEFAULT_TITLE: &str = "Anexo Subsecretaría ABC";

/// One uploaded spreadsheet and the name it was uploaded under
#[derive(Debug, Clone)]
pub struct AnnexInput {
    pub name: String,
    pub sheet: Sheet,
}

impl AnnexInput {
    #[must_use]
    pub fn new(name: &str, sheet: Sheet) -> Self {
        AnnexInput {
            name: name.to_string(),
            sheet,
        }
    }

    /// Read the first worksheet of an uploaded file
    pub fn from_xlsx_bytes(name: &str, bytes: &[u8]) -> Result<Self> {
        let sheet = Sheet::from_xlsx_bytes(bytes, &XlsxReadOptions::default())
            .map_err(|source| AnnexError::Input {
                file: name.to_string(),
                source,
            })?;
        Ok(Self::new(name, sheet))
    }

    /// Read the first worksheet of a file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let sheet = Sheet::from_xlsx(path).map_err(|source| AnnexError::Input {
            file: name.clone(),
            source,
        })?;
        Ok(Self::new(&name, sheet))
    }
}

/// Everything needed to produce one annex document
#[derive(Debug, Clone)]
pub struct AnnexRequest {
    pub title: String,
    pub inputs: Vec<AnnexInput>,
}

impl AnnexRequest {
    #[must_use]
    pub fn new(title: &str, inputs: Vec<AnnexInput>) -> Self {
        AnnexRequest {
            title: title.to_string(),
            inputs,
        }
    }

    /// `<title>.docx`, falling back to [`DEFAULT_TITLE`] for a blank title
    #[must_use]
    pub fn output_file_name(&self) -> String {
        let title = self.title.trim();
        let title = if title.is_empty() { DEFAULT_TITLE } else { title };
        format!("{title}.docx")
    }
}

/// A serialized annex document
#[derive(Debug, Clone, PartialEq)]
pub struct AnnexOutput {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Render every input, in order, into one landscape document.
///
/// The first input that fails aborts the whole assembly; no partial
/// document is returned.
pub fn assemble(inputs: &[AnnexInput], options: &AnnexOptions) -> Result<Document> {
    if inputs.is_empty() {
        return Err(AnnexError::NoInputs);
    }

    let mut document = Document::new(PageSetup::landscape_a4(), options.typography.clone());
    for input in inputs {
        let blocks =
            render_sheet(&input.sheet, &options.date_format).map_err(|source| AnnexError::Input {
                file: input.name.clone(),
                source,
            })?;
        tracing::debug!(file = %input.name, blocks = blocks.len(), "rendered input");
        document.extend(blocks);
    }

    tracing::info!(
        inputs = inputs.len(),
        tables = document.tables().count(),
        "assembled annex document"
    );
    Ok(document)
}

/// Assemble and serialize a request
pub fn build(request: &AnnexRequest, options: &AnnexOptions) -> Result<AnnexOutput> {
    let document = assemble(&request.inputs, options)?;
    Ok(AnnexOutput {
        file_name: request.output_file_name(),
        bytes: document.to_docx_bytes()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        let request = AnnexRequest::new("  Anexo Hacienda ", Vec::new());
        assert_eq!(request.output_file_name(), "Anexo Hacienda.docx");

        let request = AnnexRequest::new("   ", Vec::new());
        assert_eq!(request.output_file_name(), "Anexo Subsecretaría ABC.docx");
    }

    #[test]
    fn test_assemble_without_inputs() {
        assert!(matches!(
            assemble(&[], &AnnexOptions::default()),
            Err(AnnexError::NoInputs)
        ));
    }

    #[test]
    fn test_bad_upload_names_the_file() {
        let result = AnnexInput::from_xlsx_bytes("roto.xlsx", b"not a workbook");
        assert!(matches!(result, Err(AnnexError::Input { file, .. }) if file == "roto.xlsx"));
    }
}
