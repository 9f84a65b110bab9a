//! Core library for receipt scanning.
//!
//! This crate provides:
//! - Rule-based receipt field extraction (store, date, line items, total)
//! - An OCR engine seam with a pure Rust implementation
//! - Receipt data models and plain-text report rendering

pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;

pub use error::{OcrError, ReceiptError, Result};
pub use models::config::ScanConfig;
pub use models::receipt::{LineItem, ReceiptRecord};
pub use ocr::{OcrEngine, OcrResult, TextLine, validate_image_path};
#[cfg(feature = "native")]
pub use ocr::{PureOcrEngine, create_engine_from_dir};
pub use receipt::{ReceiptParser, ReceiptScanner, RuleReceiptParser, ScanResult, parse_receipt};
