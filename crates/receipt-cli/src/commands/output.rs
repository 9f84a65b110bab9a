//! Output formatting shared by the scan and batch commands.

use receipt_core::receipt::render::{render_report, render_summary};
use receipt_core::{ReceiptRecord, ScanResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per item
    Csv,
    /// Plain text report
    Text,
}

impl OutputFormat {
    /// File extension used when writing this format to disk.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Format a scan result for output.
pub fn format_result(
    result: &ScanResult,
    format: OutputFormat,
    include_raw: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(&result.record),
        OutputFormat::Csv => format_csv(&result.record),
        OutputFormat::Text => Ok(if include_raw {
            render_report(&result.record, &result.raw_text)
        } else {
            render_summary(&result.record)
        }),
    }
}

fn format_json(record: &ReceiptRecord) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

fn format_csv(record: &ReceiptRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["store", "date", "item", "price", "total"])?;

    let store = record.store.as_deref().unwrap_or_default();
    let date = record.date.as_deref().unwrap_or_default();
    let total = record.total.map(|t| t.to_string()).unwrap_or_default();

    if record.items.is_empty() {
        wtr.write_record([store, date, "", "", total.as_str()])?;
    }

    for item in &record.items {
        let price = item.price.to_string();
        wtr.write_record([store, date, item.name.as_str(), price.as_str(), total.as_str()])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
