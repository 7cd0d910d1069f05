//! Decoding of the processing endpoint's JSON body
//!
//! The endpoint answers with one of two shapes, regardless of HTTP status:
//!
//! ```json
//! { "extracted_text": "...", "summary": "...", "model_used": "..." }
//! { "error": "No text extracted from file" }
//! ```
//!
//! Anything else is treated as a transport failure.

use crate::error::SummaryError;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProcessingResult {
    Success {
        extracted_text: String,
        summary: String,
        /// Model name reported by the backend, if any
        model_used: Option<String>,
    },
    Failure {
        message: String,
    },
}

impl ProcessingResult {
    /// Decode a raw response body
    pub fn decode(body: &str) -> Result<Self, SummaryError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| SummaryError::Transport(format!("Invalid JSON response: {}", e)))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, SummaryError> {
        let obj = value.as_object().ok_or_else(|| {
            SummaryError::Transport("Response is not a JSON object".to_string())
        })?;

        // A non-empty error string wins over any other field
        if let Some(message) = obj.get("error").and_then(Value::as_str) {
            if !message.is_empty() {
                return Ok(ProcessingResult::Failure {
                    message: message.to_string(),
                });
            }
        }

        let extracted_text = obj.get("extracted_text").and_then(Value::as_str);
        let summary = obj.get("summary").and_then(Value::as_str);

        match (extracted_text, summary) {
            (Some(extracted_text), Some(summary)) => Ok(ProcessingResult::Success {
                extracted_text: extracted_text.to_string(),
                summary: summary.to_string(),
                model_used: obj
                    .get("model_used")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            _ => Err(SummaryError::Transport(
                "Unexpected response shape: expected extracted_text and summary, or error"
                    .to_string(),
            )),
        }
    }

    /// Turn a failure payload into an application error
    pub fn into_result(self) -> Result<(String, String), SummaryError> {
        match self {
            ProcessingResult::Success {
                extracted_text,
                summary,
                ..
            } => Ok((extracted_text, summary)),
            ProcessingResult::Failure { message } => Err(SummaryError::Application(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decodes_success() {
        let body = r#"{"extracted_text":"  raw  ","summary":"short\n","model_used":"gemini-1.5-flash"}"#;
        let result = ProcessingResult::decode(body).unwrap();
        assert_eq!(
            result,
            ProcessingResult::Success {
                extracted_text: "  raw  ".into(),
                summary: "short\n".into(),
                model_used: Some("gemini-1.5-flash".into()),
            }
        );
    }

    #[test]
    fn test_model_used_is_optional() {
        let result = ProcessingResult::decode(r#"{"extracted_text":"a","summary":"b"}"#).unwrap();
        assert!(matches!(
            result,
            ProcessingResult::Success {
                model_used: None,
                ..
            }
        ));
    }

    #[test]
    fn test_decodes_failure() {
        let result = ProcessingResult::decode(r#"{"error":"Invalid file type"}"#).unwrap();
        assert_eq!(
            result,
            ProcessingResult::Failure {
                message: "Invalid file type".into()
            }
        );
    }

    #[test]
    fn test_error_takes_precedence() {
        let body = r#"{"error":"boom","extracted_text":"a","summary":"b"}"#;
        assert!(matches!(
            ProcessingResult::decode(body).unwrap(),
            ProcessingResult::Failure { .. }
        ));
    }

    #[test]
    fn test_empty_error_falls_through_to_success_fields() {
        let body = r#"{"error":"","extracted_text":"a","summary":"b"}"#;
        assert!(matches!(
            ProcessingResult::decode(body).unwrap(),
            ProcessingResult::Success { .. }
        ));
    }

    #[test]
    fn test_unknown_shape_is_transport_error() {
        let err = ProcessingResult::decode(r#"{"summary":"only half"}"#).unwrap_err();
        assert!(matches!(err, SummaryError::Transport(_)));
    }

    #[test]
    fn test_non_string_fields_are_rejected() {
        let err = ProcessingResult::decode(r#"{"extracted_text":1,"summary":2}"#).unwrap_err();
        assert!(matches!(err, SummaryError::Transport(_)));
    }

    #[test]
    fn test_non_object_is_transport_error() {
        let err = ProcessingResult::decode("[1,2,3]").unwrap_err();
        assert!(matches!(err, SummaryError::Transport(_)));
    }

    #[test]
    fn test_html_error_page_is_transport_error() {
        let err = ProcessingResult::decode("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SummaryError::Transport(_)));
    }

    #[test]
    fn test_failure_into_application_error() {
        let result = ProcessingResult::Failure {
            message: "No file uploaded".into(),
        };
        assert_eq!(
            result.into_result(),
            Err(SummaryError::Application("No file uploaded".into()))
        );
    }
}
