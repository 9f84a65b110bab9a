//! Total amount extraction.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::TOTAL;
use super::{ExtractionMatch, FieldExtractor};

/// Extractor for the labeled grand total (`Total: $6.49`).
///
/// Only the first labeled amount in the text counts. A "Subtotal" line that
/// comes before the "Total" line wins, since its label contains `total`.
pub struct TotalExtractor;

impl TotalExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = TOTAL.captures(text)?;
        let full_match = caps.get(0)?;
        let amount = parse_amount(&caps[1])?;

        Some(
            ExtractionMatch::new(amount, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        TOTAL
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let amount = parse_amount(&caps[1])?;
                Some(
                    ExtractionMatch::new(amount, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}

/// Parse a plain decimal amount such as `6.49`.
///
/// Returns `None` for anything `Decimal` cannot hold, which callers treat
/// the same as no match.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim()).ok()
}

/// Format an amount the way receipts print it (`$6.49`).
pub fn format_amount(amount: Decimal) -> String {
    format!("${:.2}", amount)
}
