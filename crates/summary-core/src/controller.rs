//! Upload controller
//!
//! Runs the three user actions against two seams: a [`Transport`] that
//! delivers the multipart request and returns the raw body, and a [`View`]
//! that shows state and alerts. All state lives here; the view only mirrors
//! it.
//!
//! ## Upload flow
//!
//! 1. Build the request; with no file selected, alert and stop.
//! 2. Issue a ticket and swap the display to the placeholder pair.
//! 3. Send and decode.
//! 4. If the ticket is still the latest, render the result or alert the
//!    error. Otherwise drop the response.

use crate::config::ClientConfig;
use crate::error::SummaryError;
use crate::export::{export_pdf, export_text, ExportFile};
use crate::request::{LengthPreference, UploadFile, UploadRequest};
use crate::response::ProcessingResult;
use crate::state::{AppState, DisplayState, RequestTicket};
use async_trait::async_trait;
use std::cell::RefCell;
use tracing::{debug, info, warn};

/// Delivers an upload to the processing endpoint
#[async_trait(?Send)]
pub trait Transport {
    /// File handle this transport knows how to put on the wire
    type File: UploadFile;

    /// POST the request and return the raw response body
    async fn send(&self, request: &UploadRequest<Self::File>) -> Result<String, SummaryError>;
}

/// Where state is shown and alerts are raised
pub trait View {
    fn render(&self, display: &DisplayState);

    /// Blocking notification
    fn notify(&self, message: &str);

    /// Summary text as currently displayed, including user edits
    fn summary_text(&self) -> String;
}

/// What happened to an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// No file selected, nothing was sent
    Rejected,
    Applied,
    Failed(SummaryError),
    /// A newer upload was issued before this one resolved
    Stale,
}

pub struct UploadController<T, V> {
    config: ClientConfig,
    transport: T,
    view: V,
    state: RefCell<AppState>,
}

impl<T: Transport, V: View> UploadController<T, V> {
    pub fn new(config: ClientConfig, transport: T, view: V) -> Self {
        Self {
            config,
            transport,
            view,
            state: RefCell::new(AppState::new()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Snapshot of the current display state
    pub fn display(&self) -> DisplayState {
        self.state.borrow().display().clone()
    }

    pub fn latest_generation(&self) -> u64 {
        self.state.borrow().latest_generation()
    }

    /// Model reported with the displayed result, if the backend named one
    pub fn model_used(&self) -> Option<String> {
        self.state.borrow().model_used().map(str::to_string)
    }

    /// Run one upload
    ///
    /// The ticket is issued and the placeholder rendered on the first poll,
    /// before the transport is called, so overlapping uploads are ordered by
    /// when they were started.
    pub async fn upload(&self, file: Option<T::File>, length: LengthPreference) -> UploadOutcome {
        let request = match UploadRequest::from_form(file, length) {
            Ok(request) => request,
            Err(err) => {
                self.view.notify(&err.user_message(&self.config.messages));
                return UploadOutcome::Rejected;
            }
        };

        let ticket = self.start(&request);

        // No state borrow is held across this await
        let result = match self.transport.send(&request).await {
            Ok(body) => ProcessingResult::decode(&body),
            Err(err) => Err(err),
        };

        self.finish(ticket, result)
    }

    /// Issue a ticket and show the placeholder
    fn start(&self, request: &UploadRequest<T::File>) -> RequestTicket {
        let placeholder = DisplayState::placeholder(&self.config.placeholders);
        let ticket = self.state.borrow_mut().begin(placeholder.clone());
        self.view.render(&placeholder);

        debug!(
            generation = ticket.generation(),
            file = %request.file.file_name(),
            size = request.file.size(),
            length = %request.length,
            endpoint = %self.config.endpoint,
            "upload started"
        );
        ticket
    }

    fn finish(
        &self,
        ticket: RequestTicket,
        result: Result<ProcessingResult, SummaryError>,
    ) -> UploadOutcome {
        let mut state = self.state.borrow_mut();
        if !state.is_current(ticket) {
            warn!(
                generation = ticket.generation(),
                latest = state.latest_generation(),
                "dropping stale upload response"
            );
            return UploadOutcome::Stale;
        }

        let err = match result {
            Ok(ProcessingResult::Success {
                extracted_text,
                summary,
                model_used,
            }) => {
                let shown = DisplayState::new(extracted_text, summary);
                info!(
                    generation = ticket.generation(),
                    summary_len = shown.summary.len(),
                    model = model_used.as_deref().unwrap_or("unknown"),
                    "upload applied"
                );
                state.complete_with_model(ticket, shown.clone(), model_used);
                drop(state);

                self.view.render(&shown);
                return UploadOutcome::Applied;
            }
            Ok(ProcessingResult::Failure { message }) => SummaryError::Application(message),
            Err(err) => err,
        };
        drop(state);

        // Placeholder stays up on failure
        warn!(generation = ticket.generation(), error = %err, "upload failed");
        self.view.notify(&err.user_message(&self.config.messages));
        UploadOutcome::Failed(err)
    }

    /// Current summary as a `.txt` download
    pub fn export_text(&self) -> ExportFile {
        export_text(&self.view.summary_text(), &self.config.exports)
    }

    /// Current summary as a single-page PDF download
    ///
    /// A rendering failure is alerted here and yields `None`; callers have
    /// nothing left to report.
    pub fn export_pdf(&self) -> Option<ExportFile> {
        let summary = self.view.summary_text();
        match export_pdf(&summary, &self.config.exports, &self.config.pdf) {
            Ok(file) => Some(file),
            Err(err) => {
                warn!(error = %err, "pdf export failed");
                self.view.notify(&err.user_message(&self.config.messages));
                None
            }
        }
    }
}
