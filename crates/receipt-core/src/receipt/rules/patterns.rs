//! Regex patterns for receipt field extraction.
//!
//! Digits are spelled `[0-9]` so that only ASCII digits match, and the
//! total keywords fold case over ASCII only.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Labeled total: "Total: $6.49", "AMOUNT 12.00", "sum $3.10"
    pub static ref TOTAL: Regex = Regex::new(
        r"(?i-u:total|amount|sum)[:\s]*\$?([0-9]+\.[0-9]{2})"
    ).unwrap();

    // 03/15/2023, 3-5-23, 2023-03-15. Leftmost match wins; at the same
    // position the day/month/year form is tried first.
    pub static ref DATE: Regex = Regex::new(
        r"[0-9]{1,2}[/\-][0-9]{1,2}[/\-](?:[0-9]{4}|[0-9]{2})|[0-9]{4}[/\-][0-9]{1,2}[/\-][0-9]{1,2}"
    ).unwrap();

    // Item line: "Milk $3.99"
    pub static ref ITEM_LINE: Regex = Regex::new(
        r"(.+?)\s+\$([0-9]+\.[0-9]{2})"
    ).unwrap();
}
