//! Upload request assembly

use crate::error::SummaryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multipart field carrying the document
pub const FILE_FIELD: &str = "file";
/// Multipart field carrying the length preference
pub const LENGTH_FIELD: &str = "length";

/// Summary length hint forwarded to the summarizer
///
/// Unknown selector values are kept as-is in `Other`, the client never
/// interprets the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LengthPreference {
    Short,
    #[default]
    Medium,
    Long,
    Other(String),
}

impl LengthPreference {
    pub fn parse(value: &str) -> Self {
        match value {
            "short" => LengthPreference::Short,
            "medium" => LengthPreference::Medium,
            "long" => LengthPreference::Long,
            other => LengthPreference::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LengthPreference::Short => "short",
            LengthPreference::Medium => "medium",
            LengthPreference::Long => "long",
            LengthPreference::Other(value) => value,
        }
    }
}

impl From<String> for LengthPreference {
    fn from(value: String) -> Self {
        LengthPreference::parse(&value)
    }
}

impl From<LengthPreference> for String {
    fn from(value: LengthPreference) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LengthPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the controller needs to know about an upload's file
///
/// Implemented by in-memory files here and by browser file handles in the
/// wasm bindings, so the handle can go into the form without a copy.
pub trait UploadFile {
    fn file_name(&self) -> String;
    fn size(&self) -> u64;
}

/// A file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

impl UploadFile for SelectedFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// One part of the multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart<'a, F> {
    File {
        field: &'static str,
        file: &'a F,
    },
    Text {
        field: &'static str,
        value: &'a str,
    },
}

/// Payload of a single upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest<F = SelectedFile> {
    pub file: F,
    pub length: LengthPreference,
}

impl<F> UploadRequest<F> {
    /// Build a request from the current form values
    ///
    /// Fails with `NoFileSelected` when the file input is empty. No other
    /// validation happens here; the backend owns file-type and size rules.
    pub fn from_form(file: Option<F>, length: LengthPreference) -> Result<Self, SummaryError> {
        let file = file.ok_or(SummaryError::NoFileSelected)?;
        Ok(Self { file, length })
    }

    /// Parts in the order they are appended to the form
    pub fn parts(&self) -> [FormPart<'_, F>; 2] {
        [
            FormPart::File {
                field: FILE_FIELD,
                file: &self.file,
            },
            FormPart::Text {
                field: LENGTH_FIELD,
                value: self.length.as_str(),
            },
        ]
    }
}
