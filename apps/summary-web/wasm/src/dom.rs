//! DOM side of the client
//!
//! Reads the file input and length selector, writes the two text areas, and
//! raises alerts.

use summary_core::{DisplayState, ElementIds, LengthPreference, UploadFile, View};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, File, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Window,
};

/// File picked in the page's file input
///
/// Goes into the form as-is; the browser streams its contents when the
/// request is sent.
#[derive(Debug, Clone)]
pub struct BrowserFile(pub File);

impl UploadFile for BrowserFile {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

pub struct DomView {
    window: Window,
    document: Document,
    ids: ElementIds,
}

impl DomView {
    /// # Errors
    /// Returns JsValue error if unable to access window or document
    pub fn new(ids: ElementIds) -> Result<Self, JsValue> {
        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object available"))?;

        Ok(Self {
            window,
            document,
            ids,
        })
    }

    fn element<T: JsCast>(&self, id: &str) -> Result<T, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", id)))?
            .dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("Element #{} has the wrong type", id)))
    }

    /// First file of the file input
    pub fn selected_file(&self) -> Result<Option<BrowserFile>, JsValue> {
        let input: HtmlInputElement = self.element(&self.ids.file_input)?;
        Ok(input.files().and_then(|list| list.get(0)).map(BrowserFile))
    }

    pub fn length_preference(&self) -> Result<LengthPreference, JsValue> {
        let select: HtmlSelectElement = self.element(&self.ids.length_select)?;
        Ok(LengthPreference::parse(&select.value()))
    }

    fn set_text(&self, id: &str, value: &str) -> Result<(), JsValue> {
        let area: HtmlTextAreaElement = self.element(id)?;
        area.set_value(value);
        Ok(())
    }
}

impl View for DomView {
    fn render(&self, display: &DisplayState) {
        let result = self
            .set_text(&self.ids.extracted_text, &display.extracted_text)
            .and_then(|_| self.set_text(&self.ids.summary_text, &display.summary));
        if let Err(e) = result {
            web_sys::console::error_2(&"Failed to render summary:".into(), &e);
        }
    }

    fn notify(&self, message: &str) {
        if self.window.alert_with_message(message).is_err() {
            web_sys::console::warn_1(&format!("Alert suppressed: {}", message).into());
        }
    }

    fn summary_text(&self) -> String {
        self.element::<HtmlTextAreaElement>(&self.ids.summary_text)
            .map(|area| area.value())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(document: &Document, tag: &str, id: &str) {
        let el = document.create_element(tag).unwrap();
        el.set_id(id);
        document.body().unwrap().append_child(&el).unwrap();
    }

    fn fixture(prefix: &str) -> DomView {
        let document = web_sys::window().unwrap().document().unwrap();
        let ids = ElementIds {
            file_input: format!("{}-file", prefix),
            length_select: format!("{}-length", prefix),
            extracted_text: format!("{}-extracted", prefix),
            summary_text: format!("{}-summary", prefix),
        };
        mount(&document, "textarea", &ids.extracted_text);
        mount(&document, "textarea", &ids.summary_text);
        DomView::new(ids).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_render_writes_both_areas() {
        let view = fixture("render");
        view.render(&DisplayState::new("raw text", "the summary"));

        assert_eq!(view.summary_text(), "the summary");
        let extracted: HtmlTextAreaElement = view.element("render-extracted").unwrap();
        assert_eq!(extracted.value(), "raw text");
    }

    #[wasm_bindgen_test]
    fn test_empty_file_input_has_no_selection() {
        let view = fixture("nofile");
        let document = web_sys::window().unwrap().document().unwrap();
        let input: HtmlInputElement = document
            .create_element("input")
            .unwrap()
            .dyn_into()
            .unwrap();
        input.set_type("file");
        input.set_id("nofile-file");
        document.body().unwrap().append_child(&input).unwrap();

        assert!(view.selected_file().unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn test_browser_file_reports_name_and_size() {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(&b"%PDF-1.7"[..]));
        let file = File::new_with_u8_array_sequence(&parts, "scan.pdf").unwrap();
        let file = BrowserFile(file);

        assert_eq!(file.file_name(), "scan.pdf");
        assert_eq!(file.size(), 8);
    }

    #[wasm_bindgen_test]
    fn test_missing_summary_area_reads_empty() {
        let view = DomView::new(ElementIds {
            summary_text: "does-not-exist".into(),
            ..ElementIds::default()
        })
        .unwrap();
        assert_eq!(view.summary_text(), "");
    }
}
