//! `fetch`-backed transport
//!
//! Sends the request as `multipart/form-data`; the browser picks the
//! boundary, so no Content-Type header is set by hand.

use crate::dom::BrowserFile;
use async_trait::async_trait;
use summary_core::{FormPart, SummaryError, Transport, UploadRequest};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &UploadRequest<BrowserFile>) -> Result<String, JsValue> {
        let window = web_sys::window().ok_or("No window")?;

        let form = FormData::new()?;
        for part in request.parts() {
            match part {
                FormPart::File { field, file } => {
                    form.append_with_blob_and_filename(field, &file.0, &file.0.name())?
                }
                FormPart::Text { field, value } => form.append_with_str(field, value)?,
            }
        }
        let body: JsValue = form.into();

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&body);

        let request = Request::new_with_str_and_init(&self.endpoint, &opts)?;
        let response = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = response.dyn_into()?;

        // Error statuses still carry a JSON body; the decoder decides
        let text = JsFuture::from(response.text()?).await?;
        text.as_string()
            .ok_or_else(|| JsValue::from_str("Response body is not text"))
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    type File = BrowserFile;

    async fn send(&self, request: &UploadRequest<BrowserFile>) -> Result<String, SummaryError> {
        self.post(request)
            .await
            .map_err(|e| SummaryError::Transport(js_error_message(&e)))
    }
}

/// Render a thrown JS value the way `String(error)` would
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.to_string());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_error_message_of_type_error() {
        let err: JsValue = js_sys::TypeError::new("Failed to fetch").into();
        assert_eq!(js_error_message(&err), "TypeError: Failed to fetch");
    }

    #[wasm_bindgen_test]
    fn test_error_message_of_string() {
        assert_eq!(js_error_message(&JsValue::from_str("No window")), "No window");
    }

    #[wasm_bindgen_test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let transport = FetchTransport::new("http://127.0.0.1:9/process");
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(&[1u8, 2, 3][..]));
        let file = web_sys::File::new_with_u8_array_sequence(&parts, "a.pdf").unwrap();
        let request = UploadRequest::from_form(
            Some(BrowserFile(file)),
            summary_core::LengthPreference::Short,
        )
        .unwrap();

        let err = transport.send(&request).await.unwrap_err();
        assert!(matches!(err, SummaryError::Transport(_)));
    }
}
