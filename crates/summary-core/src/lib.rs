//! Document summary client logic
//!
//! Platform-independent half of the summary web client: request assembly,
//! response decoding, display state with stale-response protection, and the
//! text/PDF exports. The browser bindings live in `summary-wasm`.

pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod pdf;
pub mod request;
pub mod response;
pub mod state;

pub use config::{ClientConfig, ElementIds, ExportNames, Messages, PdfLayout, Placeholders};
pub use controller::{Transport, UploadController, UploadOutcome, View};
pub use error::SummaryError;
pub use export::{export_pdf, export_text, ExportFile, PDF_MIME, TEXT_MIME};
pub use pdf::render_summary_pdf;
pub use request::{FormPart, LengthPreference, SelectedFile, UploadFile, UploadRequest};
pub use response::ProcessingResult;
pub use state::{AppState, DisplayState, RequestTicket};
