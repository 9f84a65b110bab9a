//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::{OcrConfig, ScanConfig};

use super::{OcrEngine, OcrResult, TextLine};

/// OCR engine backed by `pure-onnx-ocr` (no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
}

impl PureOcrEngine {
    /// Create an engine from the model files named in the configuration.
    pub fn from_dir(model_dir: &Path, config: &ScanConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join(&config.models.detection_model);
        let rec_path = model_dir.join(&config.models.recognition_model);
        let dict_path = model_dir.join(&config.models.dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!("missing model file {}", path.display())));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine,
            config: config.ocr.clone(),
        })
    }

    fn clean_text(&self, text: &str) -> String {
        if self.config.keep_unk {
            text.to_string()
        } else {
            text.replace("[UNK]", " ")
        }
    }
}

impl OcrEngine for PureOcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        debug!("Recognizing image: {}x{}", width, height);

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let total = results.len();
        let lines: Vec<TextLine> = results
            .iter()
            .filter(|r| r.confidence >= self.config.min_confidence)
            .map(|r| TextLine {
                text: self.clean_text(&r.text),
                bbox: polygon_to_bbox(&r.bounding_box),
                confidence: r.confidence,
            })
            .collect();

        if lines.len() < total {
            debug!(
                "Dropped {} of {} lines below confidence {:.2}",
                total - lines.len(),
                total,
                self.config.min_confidence
            );
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!("OCR complete: {} lines in {}ms", lines.len(), processing_time_ms);

        Ok(OcrResult::from_lines(lines, (width, height), processing_time_ms))
    }

    fn name(&self) -> &str {
        "pure-onnx-ocr"
    }
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}
