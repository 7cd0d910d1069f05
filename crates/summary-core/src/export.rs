//! Summary exports
//!
//! Both exports take the summary text as displayed and produce an in-memory
//! file ready to be handed to a download.

use crate::config::{ExportNames, PdfLayout};
use crate::error::SummaryError;
use crate::pdf::render_summary_pdf;

pub const TEXT_MIME: &str = "text/plain";
pub const PDF_MIME: &str = "application/pdf";

/// A generated file waiting to be downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Plain-text export: the exact UTF-8 bytes of `summary`
pub fn export_text(summary: &str, names: &ExportNames) -> ExportFile {
    ExportFile {
        file_name: names.text_file.clone(),
        mime_type: TEXT_MIME,
        bytes: summary.as_bytes().to_vec(),
    }
}

/// Single-page PDF export
pub fn export_pdf(
    summary: &str,
    names: &ExportNames,
    layout: &PdfLayout,
) -> Result<ExportFile, SummaryError> {
    let bytes = render_summary_pdf(summary, layout)?;
    Ok(ExportFile {
        file_name: names.pdf_file.clone(),
        mime_type: PDF_MIME,
        bytes,
    })
}
