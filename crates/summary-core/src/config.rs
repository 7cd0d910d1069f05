//! Client configuration
//!
//! Every section falls back to its defaults, so a host page only has to pass
//! the values it wants to change:
//!
//! ```json
//! { "endpoint": "http://localhost:5000/process", "pdf": { "font_size": 12 } }
//! ```

use crate::error::SummaryError;
use serde::{Deserialize, Serialize};

/// Endpoint the hosted backend listens on
pub const DEFAULT_ENDPOINT: &str = "https://document-summary-assistant-a6xo.onrender.com/process";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL the multipart form is POSTed to
    pub endpoint: String,
    pub elements: ElementIds,
    pub placeholders: Placeholders,
    pub messages: Messages,
    pub exports: ExportNames,
    pub pdf: PdfLayout,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            elements: ElementIds::default(),
            placeholders: Placeholders::default(),
            messages: Messages::default(),
            exports: ExportNames::default(),
            pdf: PdfLayout::default(),
        }
    }
}

impl ClientConfig {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, SummaryError> {
        serde_json::from_str(json).map_err(|e| SummaryError::Config(e.to_string()))
    }
}

/// DOM element ids the client reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub file_input: String,
    pub length_select: String,
    pub extracted_text: String,
    pub summary_text: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            file_input: "fileInput".to_string(),
            length_select: "lengthSelect".to_string(),
            extracted_text: "extractedText".to_string(),
            summary_text: "summaryText".to_string(),
        }
    }
}

/// Text shown in both fields while a request is outstanding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    pub extracted_text: String,
    pub summary: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            extracted_text: "Extracting text...".to_string(),
            summary: "Summarizing...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub no_file_selected: String,
    pub connection_error_prefix: String,
    pub export_error_prefix: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            no_file_selected: "Please upload a PDF file.".to_string(),
            connection_error_prefix: "Error connecting to backend: ".to_string(),
            export_error_prefix: "Could not create PDF: ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportNames {
    pub text_file: String,
    pub pdf_file: String,
}

impl Default for ExportNames {
    fn default() -> Self {
        Self {
            text_file: "summary.txt".to_string(),
            pdf_file: "summary.pdf".to_string(),
        }
    }
}

/// Page geometry for the summary PDF
///
/// Offsets are in millimetres measured from the top-left corner of the page,
/// sizes are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub x_mm: f32,
    pub y_mm: f32,
    pub font_size: f32,
    pub line_height_factor: f32,
}

/// Points per millimetre
pub const PT_PER_MM: f32 = 72.0 / 25.4;

impl Default for PdfLayout {
    fn default() -> Self {
        // A4 portrait, Helvetica 16pt at (10mm, 10mm)
        Self {
            page_width: 595.28,
            page_height: 841.89,
            x_mm: 10.0,
            y_mm: 10.0,
            font_size: 16.0,
            line_height_factor: 1.15,
        }
    }
}

impl PdfLayout {
    /// Text origin in PDF user space (bottom-left origin)
    pub fn origin(&self) -> (f32, f32) {
        (
            self.x_mm * PT_PER_MM,
            self.page_height - self.y_mm * PT_PER_MM,
        )
    }

    pub fn leading(&self) -> f32 {
        self.font_size * self.line_height_factor
    }

    /// Reject geometry that cannot produce a visible page
    pub fn validate(&self) -> Result<(), SummaryError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.page_width) || !positive(self.page_height) {
            return Err(SummaryError::Pdf(format!(
                "Invalid page size {}x{}",
                self.page_width, self.page_height
            )));
        }
        if !positive(self.font_size) {
            return Err(SummaryError::Pdf(format!(
                "Invalid font size {}",
                self.font_size
            )));
        }
        Ok(())
    }
}
