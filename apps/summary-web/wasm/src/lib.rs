//! WASM bindings for the document summary page
//!
//! State and decoding live in `summary-core`; this crate only touches the
//! DOM, `fetch`, alerts and downloads.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { UploadClient } from './pkg/summary_wasm.js';
//!
//! await init();
//!
//! const client = new UploadClient(); // or new UploadClient('{"endpoint":"/process"}')
//! uploadButton.onclick = () => client.uploadFile();
//! txtButton.onclick = () => client.downloadTXT();
//! pdfButton.onclick = () => client.downloadPDF();
//! ```

pub mod blob;
pub mod client;
pub mod dom;
pub mod fetch;

use wasm_bindgen::prelude::*;

pub use client::UploadClient;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&format!("Summary client v{} initialized", get_version()).into());
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Format bytes as human-readable string
#[wasm_bindgen]
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
