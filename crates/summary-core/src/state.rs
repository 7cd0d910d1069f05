//! Display state and request generations
//!
//! Every upload takes a ticket carrying a monotonically increasing
//! generation. Only the response holding the latest ticket may touch the
//! display; older responses are dropped when they arrive.

use crate::config::Placeholders;
use serde::Serialize;

/// The pair of strings currently shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DisplayState {
    pub extracted_text: String,
    pub summary: String,
}

impl DisplayState {
    pub fn new(extracted_text: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            extracted_text: extracted_text.into(),
            summary: summary.into(),
        }
    }

    /// In-progress text shown while a request is outstanding
    pub fn placeholder(placeholders: &Placeholders) -> Self {
        Self::new(
            placeholders.extracted_text.clone(),
            placeholders.summary.clone(),
        )
    }
}

/// Handle identifying one issued upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    display: DisplayState,
    latest: u64,
    model_used: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Generation of the most recently issued request (0 = none yet)
    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// Issue a new ticket and switch the display to its placeholder
    pub fn begin(&mut self, placeholder: DisplayState) -> RequestTicket {
        self.latest += 1;
        self.display = placeholder;
        RequestTicket(self.latest)
    }

    /// Model reported with the result currently displayed
    pub fn model_used(&self) -> Option<&str> {
        self.model_used.as_deref()
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Replace the display with a completed result
    ///
    /// Returns `false` and leaves the state untouched when a newer request
    /// has been issued since `ticket`.
    pub fn complete(&mut self, ticket: RequestTicket, display: DisplayState) -> bool {
        self.complete_with_model(ticket, display, None)
    }

    /// Same as [`AppState::complete`], also recording the reporting model
    pub fn complete_with_model(
        &mut self,
        ticket: RequestTicket,
        display: DisplayState,
        model_used: Option<String>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.display = display;
        self.model_used = model_used;
        true
    }
}
