//! Receipt field extraction module.

mod parser;
pub mod render;
pub mod rules;
mod scanner;

pub use parser::{parse_receipt, RuleReceiptParser};
pub use scanner::{ReceiptScanner, ScanResult};

use crate::models::receipt::ReceiptRecord;

/// Trait for receipt text parsers.
///
/// Parsing never fails: fields that cannot be found are left unset.
pub trait ReceiptParser {
    /// Parse a receipt from OCR text.
    fn parse(&self, text: &str) -> ReceiptRecord;
}
