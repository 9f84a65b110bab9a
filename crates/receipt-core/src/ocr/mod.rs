//! OCR engine seam.
//!
//! The parser only ever sees text. Anything that can turn an image into
//! text lines implements [`OcrEngine`]; the `native` feature ships one
//! backed by `pure-onnx-ocr`.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use std::path::Path;

use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Image formats accepted as receipt input.
pub const SUPPORTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Gif,
];

/// Anything that recognizes text in an image.
pub trait OcrEngine {
    /// Recognize the text lines of an image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;

    /// Short engine name for logs and scan metadata.
    fn name(&self) -> &str;
}

/// A recognized line of text with its position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    /// Recognized text content.
    pub text: String,

    /// Quadrilateral corners (x1, y1, x2, y2, x3, y3, x4, y4).
    pub bbox: [f32; 8],

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextLine {
    /// Build a line from an axis-aligned rectangle.
    pub fn from_rect(
        text: impl Into<String>,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        confidence: f32,
    ) -> Self {
        Self {
            text: text.into(),
            bbox: [x1, y1, x2, y1, x2, y2, x1, y2],
            confidence,
        }
    }

    /// Get the axis-aligned bounding rectangle (min_x, min_y, max_x, max_y).
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR on one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized lines in reading order.
    pub lines: Vec<TextLine>,

    /// Full text (lines joined with newlines).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Assemble a result from recognized lines, ordering them for reading.
    pub fn from_lines(
        lines: Vec<TextLine>,
        image_size: (u32, u32),
        processing_time_ms: u64,
    ) -> Self {
        let mut result = Self {
            lines,
            text: String::new(),
            processing_time_ms,
            image_size,
        };
        result.sort_by_reading_order();
        result
    }

    /// Whether no text was recognized.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Sort lines top-to-bottom, left-to-right and rebuild the text.
    pub fn sort_by_reading_order(&mut self) {
        sort_by_reading_order(&mut self.lines);

        self.text = self
            .lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }
}

/// Sort lines into rows about 20px tall, then by x within a row.
pub fn sort_by_reading_order(lines: &mut [TextLine]) {
    lines.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();

        let row_a = (ay / 20.0) as i32;
        let row_b = (by / 20.0) as i32;

        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
        }
    });
}

/// Check that a file looks like an image we can decode.
pub fn validate_image_path(path: &Path) -> Result<ImageFormat, OcrError> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        OcrError::UnsupportedImage(format!("{} is not an image file", path.display()))
    })?;

    if SUPPORTED_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(OcrError::UnsupportedImage(format!(
            "{} ({:?} is not supported)",
            path.display(),
            format
        )))
    }
}

/// Create the pure Rust OCR engine from models in a directory.
#[cfg(feature = "native")]
pub fn create_engine_from_dir(
    model_dir: &Path,
    config: &crate::models::config::ScanConfig,
) -> Result<PureOcrEngine, OcrError> {
    PureOcrEngine::from_dir(model_dir, config)
}
