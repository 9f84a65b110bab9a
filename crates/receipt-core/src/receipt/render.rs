//! Plain-text rendering of extracted receipts.

use crate::models::receipt::ReceiptRecord;

use super::rules::format_amount;

const SUMMARY_HEADER: &str = "=== EXTRACTED RECEIPT DATA ===";
const RAW_HEADER: &str = "=== RAW OCR TEXT ===";

/// Render the labelled summary of a receipt.
///
/// Sections are written only for fields that were found.
pub fn render_summary(record: &ReceiptRecord) -> String {
    let mut output = String::new();

    output.push_str(SUMMARY_HEADER);
    output.push_str("\n\n");

    if let Some(store) = &record.store {
        output.push_str(&format!("Store: {}\n", store));
    }

    if let Some(date) = &record.date {
        output.push_str(&format!("Date: {}\n", date));
    }

    if !record.items.is_empty() {
        output.push_str("\nItems:\n");
        for item in &record.items {
            output.push_str(&format!("  {}: {}\n", item.name, format_amount(item.price)));
        }
    }

    if let Some(total) = record.total {
        output.push_str(&format!("\nTotal: {}\n", format_amount(total)));
    }

    output
}

/// Render the summary followed by the raw OCR text it was parsed from.
pub fn render_report(record: &ReceiptRecord, raw_text: &str) -> String {
    let mut output = render_summary(record);

    output.push_str("\n\n");
    output.push_str(RAW_HEADER);
    output.push('\n');
    output.push_str(raw_text);

    output
}
