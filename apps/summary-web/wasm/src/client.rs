//! JavaScript-facing upload client
//!
//! Wraps the core controller with the DOM view and the fetch transport and
//! exposes the three page actions.

use crate::blob::trigger_download;
use crate::dom::DomView;
use crate::fetch::FetchTransport;
use std::rc::Rc;
use summary_core::{ClientConfig, UploadController, UploadOutcome};
use wasm_bindgen::prelude::*;

type Controller = UploadController<FetchTransport, DomView>;

#[wasm_bindgen]
pub struct UploadClient {
    controller: Rc<Controller>,
}

#[wasm_bindgen]
impl UploadClient {
    /// Create a client, optionally overriding defaults with a JSON config
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<UploadClient, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => {
                ClientConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            _ => ClientConfig::default(),
        };

        let view = DomView::new(config.elements.clone())?;
        let transport = FetchTransport::new(config.endpoint.clone());

        Ok(Self {
            controller: Rc::new(UploadController::new(config, transport, view)),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn endpoint(&self) -> String {
        self.controller.transport().endpoint().to_string()
    }

    /// Submit the selected file and length preference
    ///
    /// Resolves to "applied", "rejected", "failed" or "stale". Failures are
    /// already alerted by the time the promise resolves.
    ///
    /// The form is read and the upload's ticket issued before the first
    /// await, so concurrent calls are ordered by call order.
    #[wasm_bindgen(js_name = uploadFile)]
    pub async fn upload_file(&self) -> Result<String, JsValue> {
        let controller = Rc::clone(&self.controller);
        let file = controller.view().selected_file()?;
        let length = controller.view().length_preference()?;

        let outcome = controller.upload(file, length).await;
        Ok(outcome_label(&outcome).to_string())
    }

    /// Download the displayed summary as plain text
    #[wasm_bindgen(js_name = downloadTXT)]
    pub fn download_txt(&self) -> Result<(), JsValue> {
        trigger_download(&self.controller.export_text())
    }

    /// Download the displayed summary as a single-page PDF
    ///
    /// A rendering failure is alerted to the user and the call still succeeds.
    #[wasm_bindgen(js_name = downloadPDF)]
    pub fn download_pdf(&self) -> Result<(), JsValue> {
        match self.controller.export_pdf() {
            Some(file) => trigger_download(&file),
            None => Ok(()),
        }
    }

    /// Current display state as `{ extracted_text, summary }`
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.display())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Number of uploads issued so far
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> f64 {
        self.controller.latest_generation() as f64
    }
}

pub fn outcome_label(outcome: &UploadOutcome) -> &'static str {
    match outcome {
        UploadOutcome::Rejected => "rejected",
        UploadOutcome::Applied => "applied",
        UploadOutcome::Failed(_) => "failed",
        UploadOutcome::Stale => "stale",
    }
}
