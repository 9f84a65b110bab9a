//! Store name extraction.

use super::{segment_lines, trim_line, ExtractionMatch, FieldExtractor};

/// Takes the first non-blank line as the merchant name.
///
/// No attempt is made to tell a store header apart from a date or an item
/// line; receipts almost always print the merchant first.
pub struct StoreExtractor;

impl StoreExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StoreExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for StoreExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        segment_lines(text)
            .first()
            .map(|line| ExtractionMatch::new(trim_line(line).to_string(), *line))
    }

    /// Every non-blank line is a store name candidate, in order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        segment_lines(text)
            .into_iter()
            .map(|line| ExtractionMatch::new(trim_line(line).to_string(), line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_non_blank_line() {
        let store = StoreExtractor::new().extract("\n\n   TRADER JOE'S  \nMilk $3.99");

        assert_eq!(store.unwrap().value, "TRADER JOE'S");
    }

    #[test]
    fn test_store_not_validated() {
        let store = StoreExtractor::new().extract("2023-03-15\nStore X\n");

        assert_eq!(store.unwrap().value, "2023-03-15");
    }

    #[test]
    fn test_byte_order_mark_not_part_of_store() {
        let store = StoreExtractor::new().extract("\u{feff}Walmart\nMilk $3.99");

        assert_eq!(store.unwrap().value, "Walmart");
    }

    #[test]
    fn test_no_store_in_blank_text() {
        assert!(StoreExtractor::new().extract(" \n\t\n").is_none());
    }
}
