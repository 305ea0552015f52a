use std::path::Path;

use log::debug;
use tesseract::{PageSegMode, Tesseract};

use crate::utils::ExtractionError;

/// One recognized text fragment with the engine's confidence for it.
#[derive(Debug, Clone)]
pub struct OcrFragment {
    pub text: String,
    /// 0.0 when the engine reported nothing usable.
    pub confidence: f32,
}

/// Engine-agnostic page segmentation hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationMode {
    Auto,
    Block,
    Line,
    Word,
    RawLine,
}

/// Parameter bundle for one OCR pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OcrOptions {
    pub char_whitelist: Option<&'static str>,
    pub segmentation: SegmentationMode,
}

impl OcrOptions {
    pub const fn general() -> Self {
        OcrOptions {
            char_whitelist: None,
            segmentation: SegmentationMode::Auto,
        }
    }
}

/// Characters that can appear in a GPS overlay coordinate line.
pub const COORDINATE_CHARSET: &str = "0123456789°'\".,NSEW ";

/// Configurations for the coordinate-tuned OCR pass, tried in order:
/// whitelisted block/line/word/raw-line segmentation first, then general
/// fallbacks without the whitelist.
pub const COORDINATE_CONFIGS: &[OcrOptions] = &[
    OcrOptions {
        char_whitelist: Some(COORDINATE_CHARSET),
        segmentation: SegmentationMode::Block,
    },
    OcrOptions {
        char_whitelist: Some(COORDINATE_CHARSET),
        segmentation: SegmentationMode::Line,
    },
    OcrOptions {
        char_whitelist: Some(COORDINATE_CHARSET),
        segmentation: SegmentationMode::Word,
    },
    OcrOptions {
        char_whitelist: Some(COORDINATE_CHARSET),
        segmentation: SegmentationMode::RawLine,
    },
    OcrOptions {
        char_whitelist: None,
        segmentation: SegmentationMode::Block,
    },
    OcrOptions {
        char_whitelist: None,
        segmentation: SegmentationMode::Line,
    },
    OcrOptions {
        char_whitelist: None,
        segmentation: SegmentationMode::Word,
    },
];

/// Boundary to the OCR engine. The orchestrator owns an engine value
/// instead of reaching for a process-global instance, so tests can
/// substitute a stub.
pub trait OcrEngine {
    fn recognize(
        &self,
        image: &Path,
        options: &OcrOptions,
    ) -> Result<Vec<OcrFragment>, ExtractionError>;
}

/// Tesseract-backed engine. A fresh `Tesseract` is built per call; the
/// builder is consumed by its own chaining API and holds no state worth
/// keeping across images.
pub struct TesseractEngine {
    language: &'static str,
}

impl TesseractEngine {
    pub fn new() -> Self {
        TesseractEngine { language: "eng" }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(
        &self,
        image: &Path,
        options: &OcrOptions,
    ) -> Result<Vec<OcrFragment>, ExtractionError> {
        let path_str = image.to_str().ok_or_else(|| {
            ExtractionError::Engine(format!("non-UTF-8 image path: {:?}", image))
        })?;

        let mut tess = Tesseract::new(None, Some(self.language))
            .map_err(|e| ExtractionError::Engine(format!("failed to initialize Tesseract: {}", e)))?;

        if let Some(whitelist) = options.char_whitelist {
            tess = tess
                .set_variable("tessedit_char_whitelist", whitelist)
                .map_err(|e| {
                    ExtractionError::Engine(format!("failed to set Tesseract variable: {}", e))
                })?;
        }

        tess.set_page_seg_mode(match options.segmentation {
            SegmentationMode::Auto => PageSegMode::PsmAuto,
            SegmentationMode::Block => PageSegMode::PsmSingleBlock,
            SegmentationMode::Line => PageSegMode::PsmSingleLine,
            SegmentationMode::Word => PageSegMode::PsmSingleWord,
            SegmentationMode::RawLine => PageSegMode::PsmRawLine,
        });

        let mut tess = tess
            .set_image(path_str)
            .map_err(|e| ExtractionError::Engine(format!("failed to set image: {}", e)))?;

        let text = tess
            .get_text()
            .map_err(|e| ExtractionError::Engine(format!("failed to extract text: {}", e)))?;

        let confidence = (tess.mean_text_conf().max(0) as f32 / 100.0).min(1.0);
        debug!(
            "tesseract pass ({:?}) read {} chars, mean confidence {:.2}",
            options.segmentation,
            text.len(),
            confidence
        );

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| OcrFragment {
                text: line.to_string(),
                confidence,
            })
            .collect())
    }
}
