//! OCR-then-parse pipeline.

use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::receipt::ReceiptRecord;
use crate::ocr::{validate_image_path, OcrEngine};

use super::{ReceiptParser, RuleReceiptParser};

/// Wall-clock timer for `processing_time_ms`.
///
/// `std::time::Instant` panics on `wasm32-unknown-unknown`, so browser
/// builds report 0.
#[cfg(not(target_arch = "wasm32"))]
struct Stopwatch(std::time::Instant);

#[cfg(not(target_arch = "wasm32"))]
impl Stopwatch {
    fn start() -> Self {
        Self(std::time::Instant::now())
    }

    fn elapsed_ms(&self) -> u64 {
        self.0.elapsed().as_millis() as u64
    }
}

#[cfg(target_arch = "wasm32")]
struct Stopwatch;

#[cfg(target_arch = "wasm32")]
impl Stopwatch {
    fn start() -> Self {
        Self
    }

    fn elapsed_ms(&self) -> u64 {
        0
    }
}

/// Result of scanning one receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Extracted receipt fields.
    pub record: ReceiptRecord,
    /// Text the record was parsed from.
    pub raw_text: String,
    /// OCR plus parsing time in milliseconds.
    pub processing_time_ms: u64,
    /// Name of the OCR engine, if OCR was run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_engine: Option<String>,
}

impl ScanResult {
    /// Parse text that was recognized elsewhere.
    pub fn from_text(text: &str) -> Self {
        let start = Stopwatch::start();
        let record = RuleReceiptParser::new().parse(text);

        Self {
            record,
            raw_text: text.to_string(),
            processing_time_ms: start.elapsed_ms(),
            ocr_engine: None,
        }
    }
}

/// Runs an OCR engine over receipt images and parses the recognized text.
pub struct ReceiptScanner<E> {
    engine: E,
    parser: RuleReceiptParser,
}

impl<E: OcrEngine> ReceiptScanner<E> {
    /// Create a scanner around an OCR engine.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            parser: RuleReceiptParser::new(),
        }
    }

    /// The wrapped OCR engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Recognize and parse a decoded image.
    ///
    /// An image with no recognizable text gives an empty record, not an
    /// error.
    pub fn scan_image(&self, image: &DynamicImage) -> Result<ScanResult> {
        let start = Stopwatch::start();

        let ocr = self.engine.recognize(image)?;
        if ocr.is_blank() {
            warn!("No text detected in image");
        }
        debug!(
            "{} recognized {} lines in {}ms",
            self.engine.name(),
            ocr.lines.len(),
            ocr.processing_time_ms
        );

        let record = self.parser.parse(&ocr.text);

        Ok(ScanResult {
            record,
            raw_text: ocr.text,
            processing_time_ms: start.elapsed_ms(),
            ocr_engine: Some(self.engine.name().to_string()),
        })
    }

    /// Validate, load and scan an image file.
    pub fn scan_path(&self, path: &Path) -> Result<ScanResult> {
        validate_image_path(path)?;
        info!("Scanning receipt image: {}", path.display());

        let image = image::open(path)?;
        self.scan_image(&image)
    }

    /// Parse text without running OCR.
    pub fn scan_text(&self, text: &str) -> ScanResult {
        ScanResult::from_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OcrError, ReceiptError};
    use crate::ocr::{OcrResult, TextLine};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    struct CannedEngine {
        lines: Vec<(&'static str, f32)>,
    }

    impl OcrEngine for CannedEngine {
        fn recognize(&self, image: &DynamicImage) -> std::result::Result<OcrResult, OcrError> {
            let lines = self
                .lines
                .iter()
                .map(|(text, y)| TextLine::from_rect(*text, 10.0, *y, 200.0, *y + 15.0, 0.9))
                .collect();
            Ok(OcrResult::from_lines(lines, (image.width(), image.height()), 5))
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    struct FailingEngine;

    impl OcrEngine for FailingEngine {
        fn recognize(&self, _image: &DynamicImage) -> std::result::Result<OcrResult, OcrError> {
            Err(OcrError::Recognition("model crashed".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_scan_image_parses_recognized_text() {
        // Out of order on purpose: lines are re-sorted top to bottom.
        let engine = CannedEngine {
            lines: vec![
                ("Total: $6.49", 130.0),
                ("Walmart", 10.0),
                ("Milk $3.99", 70.0),
                ("03/15/2023", 40.0),
            ],
        };
        let scanner = ReceiptScanner::new(engine);

        let result = scanner.scan_image(&DynamicImage::new_rgb8(240, 200)).unwrap();

        assert_eq!(result.raw_text, "Walmart\n03/15/2023\nMilk $3.99\nTotal: $6.49");
        assert_eq!(result.record.store.as_deref(), Some("Walmart"));
        assert_eq!(result.record.date.as_deref(), Some("03/15/2023"));
        assert_eq!(result.record.total, Some(Decimal::from_str("6.49").unwrap()));
        assert_eq!(result.ocr_engine.as_deref(), Some("canned"));
    }

    #[test]
    fn test_scan_blank_image_gives_empty_record() {
        let scanner = ReceiptScanner::new(CannedEngine { lines: Vec::new() });

        let result = scanner.scan_image(&DynamicImage::new_rgb8(10, 10)).unwrap();

        assert!(result.record.is_empty());
        assert_eq!(result.raw_text, "");
    }

    #[test]
    fn test_ocr_failure_is_surfaced() {
        let scanner = ReceiptScanner::new(FailingEngine);

        let err = scanner.scan_image(&DynamicImage::new_rgb8(10, 10)).unwrap_err();
        assert!(matches!(err, ReceiptError::Ocr(OcrError::Recognition(_))));
    }

    #[test]
    fn test_scan_path_rejects_non_images() {
        let scanner = ReceiptScanner::new(CannedEngine { lines: Vec::new() });

        let err = scanner.scan_path(Path::new("receipt.pdf")).unwrap_err();
        assert!(matches!(err, ReceiptError::Ocr(OcrError::UnsupportedImage(_))));
    }

    #[test]
    fn test_scan_path_reads_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        DynamicImage::new_rgb8(32, 32).save(&path).unwrap();

        let scanner = ReceiptScanner::new(CannedEngine {
            lines: vec![("Corner Store", 5.0), ("Total $1.00", 40.0)],
        });
        let result = scanner.scan_path(&path).unwrap();

        assert_eq!(result.record.store.as_deref(), Some("Corner Store"));
        assert_eq!(result.record.total, Some(Decimal::from_str("1.00").unwrap()));
    }

    #[test]
    fn test_scan_text_skips_ocr() {
        let scanner = ReceiptScanner::new(FailingEngine);

        let result = scanner.scan_text("Cafe\nTea $1.20");
        assert_eq!(result.record.items.len(), 1);
        assert_eq!(result.ocr_engine, None);
    }
}
