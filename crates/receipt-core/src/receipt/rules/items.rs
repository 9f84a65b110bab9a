//! Line item extraction.

use super::amounts::parse_amount;
use super::patterns::ITEM_LINE;
use super::{segment_lines, trim_line, FieldExtractor};
use crate::models::receipt::LineItem;

/// Extractor for `<description> $<price>` lines.
///
/// Every non-blank line is tried on its own. Nothing is filtered out, so
/// a `Total: $6.49` line yields an item named `Total:` as well.
pub struct ItemExtractor;

impl ItemExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ItemExtractor {
    type Output = LineItem;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        segment_lines(text).into_iter().find_map(parse_item_line)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        segment_lines(text).into_iter().filter_map(parse_item_line).collect()
    }
}

/// Parse a single line as an item, using the first `$` price on the line.
pub fn parse_item_line(line: &str) -> Option<LineItem> {
    let caps = ITEM_LINE.captures(line)?;
    let price = parse_amount(&caps[2])?;

    Some(LineItem::new(trim_line(&caps[1]), price))
}
