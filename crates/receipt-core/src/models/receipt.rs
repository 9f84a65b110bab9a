//! Receipt data model produced by the parser.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured fields extracted from one receipt's OCR text.
///
/// Every field is independently optional: a missing store line never
/// prevents the total from being read, and so on. `items` keeps the order
/// of the lines it was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Best-guess merchant name (first non-blank line).
    pub store: Option<String>,

    /// Date token exactly as it appeared in the text.
    pub date: Option<String>,

    /// Lines shaped like `<description> $<price>`.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Grand total.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,
}

/// A single priced line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Description text preceding the price.
    pub name: String,

    /// Price in the receipt's currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

impl ReceiptRecord {
    /// True when the parser found nothing at all.
    pub fn is_empty(&self) -> bool {
        self.store.is_none() && self.date.is_none() && self.items.is_empty() && self.total.is_none()
    }

    /// Names of the fields the parser left unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.store.is_none() {
            missing.push("store");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.items.is_empty() {
            missing.push("items");
        }
        if self.total.is_none() {
            missing.push("total");
        }
        missing
    }

    /// Sum of all item prices.
    ///
    /// Informational only. The total line itself can show up as an item, so
    /// this is not a reliable cross-check against `total`.
    pub fn items_sum(&self) -> Decimal {
        self.items.iter().map(|i| i.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_missing_fields() {
        let record = ReceiptRecord {
            store: Some("Walmart".to_string()),
            ..Default::default()
        };

        assert_eq!(record.missing_fields(), vec!["date", "items", "total"]);
        assert!(!record.is_empty());
        assert!(ReceiptRecord::default().is_empty());
    }

    #[test]
    fn test_items_sum() {
        let record = ReceiptRecord {
            items: vec![LineItem::new("Milk", dec("3.99")), LineItem::new("Bread", dec("2.50"))],
            ..Default::default()
        };

        assert_eq!(record.items_sum(), dec("6.49"));
    }

    #[test]
    fn test_json_shape() {
        let record = ReceiptRecord {
            store: Some("Walmart".to_string()),
            date: None,
            items: vec![LineItem::new("Milk", dec("3.99"))],
            total: Some(dec("6.49")),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "store": "Walmart",
                "date": null,
                "items": [{ "name": "Milk", "price": 3.99 }],
                "total": 6.49
            })
        );
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let record: ReceiptRecord = serde_json::from_str(r#"{"store": "Shop"}"#).unwrap();

        assert_eq!(record.store.as_deref(), Some("Shop"));
        assert!(record.items.is_empty());
        assert_eq!(record.total, None);
    }
}
