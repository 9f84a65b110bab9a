//! Rule-based receipt parser.

use tracing::debug;

use crate::models::receipt::ReceiptRecord;

use super::rules::{DateExtractor, FieldExtractor, ItemExtractor, StoreExtractor, TotalExtractor};
use super::ReceiptParser;

/// Receipt parser built from independent regex extractors.
///
/// Each field is read by its own pass over the same text, so one field
/// failing to match never affects another. The parser holds no state and
/// can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleReceiptParser;

impl RuleReceiptParser {
    pub fn new() -> Self {
        Self
    }
}

impl ReceiptParser for RuleReceiptParser {
    fn parse(&self, text: &str) -> ReceiptRecord {
        let record = ReceiptRecord {
            store: StoreExtractor::new().extract(text).map(|m| m.value),
            date: DateExtractor::new().extract(text).map(|m| m.value),
            items: ItemExtractor::new().extract_all(text),
            total: TotalExtractor::new().extract(text).map(|m| m.value),
        };

        debug!(
            chars = text.len(),
            items = record.items.len(),
            has_store = record.store.is_some(),
            has_date = record.date.is_some(),
            has_total = record.total.is_some(),
            "Parsed receipt text"
        );

        record
    }
}

/// Parse receipt text with the default rule set.
pub fn parse_receipt(text: &str) -> ReceiptRecord {
    RuleReceiptParser::new().parse(text)
}
