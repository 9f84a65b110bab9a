//! Rule-based field extractors for receipt text.

pub mod amounts;
pub mod dates;
pub mod items;
pub mod patterns;
pub mod store;

pub use amounts::{format_amount, parse_amount, TotalExtractor};
pub use dates::DateExtractor;
pub use items::{parse_item_line, ItemExtractor};
pub use store::StoreExtractor;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An extracted value together with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the searched text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Trim whitespace and byte-order marks from both ends of a line.
///
/// Text files saved by some editors start with U+FEFF, which `str::trim`
/// leaves in place.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Split OCR text into its non-blank lines, keeping their order.
///
/// Lines are returned as they appear (not trimmed); only lines that are
/// empty after trimming are dropped.
pub fn segment_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !trim_line(line).is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_segment_lines_drops_blank_lines() {
        let text = "Walmart\n\n   \n\tMilk $3.99\r\nTotal: $3.99\n";

        assert_eq!(segment_lines(text), vec!["Walmart", "\tMilk $3.99", "Total: $3.99"]);
    }

    #[test]
    fn test_trim_line_strips_byte_order_mark() {
        assert_eq!(trim_line("\u{feff}Walmart \r"), "Walmart");
        assert_eq!(trim_line("\u{feff}"), "");
        assert_eq!(segment_lines("\u{feff}\nShop"), vec!["Shop"]);
    }

    #[test]
    fn test_segment_lines_empty_input() {
        assert!(segment_lines("").is_empty());
        assert!(segment_lines(" \n\t\n").is_empty());
    }
}
