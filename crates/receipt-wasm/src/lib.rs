//! WASM bindings for receipt field extraction.
//!
//! Browsers run OCR in JavaScript (e.g. Tesseract.js) and hand the
//! recognized text to these bindings for parsing and display.

use wasm_bindgen::prelude::*;

use receipt_core::ocr::{OcrResult, TextLine};
use receipt_core::receipt::render::{render_report, render_summary};
use receipt_core::{parse_receipt as parse_text, ScanResult};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Parse OCR text into `{store, date, items, total}`.
#[wasm_bindgen]
pub fn parse_receipt(text: &str) -> Result<JsValue, JsValue> {
    to_js(&parse_text(text))
}

/// Render the labelled receipt summary, optionally followed by the raw text.
#[wasm_bindgen]
pub fn render_receipt(text: &str, include_raw: bool) -> String {
    let record = parse_text(text);
    if include_raw {
        render_report(&record, text)
    } else {
        render_summary(&record)
    }
}

/// Collects browser-side OCR output for one receipt and parses it.
#[wasm_bindgen]
pub struct ReceiptScanner {
    lines: Vec<TextLine>,
    text: String,
}

#[wasm_bindgen]
impl ReceiptScanner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            text: String::new(),
        }
    }

    /// Add a recognized line with its quadrilateral corners.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn add_line(
        &mut self,
        text: &str,
        x1: f32, y1: f32,
        x2: f32, y2: f32,
        x3: f32, y3: f32,
        x4: f32, y4: f32,
        confidence: f32,
    ) {
        self.lines.push(TextLine {
            text: text.to_string(),
            bbox: [x1, y1, x2, y2, x3, y3, x4, y4],
            confidence,
        });
    }

    /// Set the full text, overriding any added lines.
    #[wasm_bindgen]
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Get the full text; added lines are joined in reading order.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        if self.text.is_empty() {
            OcrResult::from_lines(self.lines.clone(), (0, 0), 0).text
        } else {
            self.text.clone()
        }
    }

    /// Drop all collected lines and text.
    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.lines.clear();
        self.text.clear();
    }

    /// Parse the collected text into `{record, raw_text, processing_time_ms}`.
    #[wasm_bindgen]
    pub fn extract(&self) -> Result<JsValue, JsValue> {
        let text = self.get_text();
        if text.trim().is_empty() {
            web_sys::console::warn_1(&"receipt-wasm: no text to parse".into());
        }
        to_js(&ScanResult::from_text(&text))
    }
}

impl Default for ReceiptScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects instead of ES Maps, so results read like JSON in JS
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
