use crate::config::Messages;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("No file selected")]
    NoFileSelected,

    /// The endpoint answered with a structured `{ "error": ... }` payload
    #[error("{0}")]
    Application(String),

    /// Network failure, unreadable body, or a response of unknown shape
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("PDF export failed: {0}")]
    Pdf(String),

    #[error("Invalid client config: {0}")]
    Config(String),
}

impl SummaryError {
    /// Text shown to the user in the blocking alert
    pub fn user_message(&self, messages: &Messages) -> String {
        match self {
            SummaryError::NoFileSelected => messages.no_file_selected.clone(),
            SummaryError::Application(message) => message.clone(),
            SummaryError::Transport(detail) => {
                format!("{}{}", messages.connection_error_prefix, detail)
            }
            SummaryError::Pdf(detail) => format!("{}{}", messages.export_error_prefix, detail),
            SummaryError::Config(_) => self.to_string(),
        }
    }
}
