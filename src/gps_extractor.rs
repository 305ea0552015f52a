use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info, warn};

use crate::models::data::{
    ExtractionCandidate, ExtractionResult, StrategySource, SELECTION_PRIORITY,
};
use crate::models::region::RegionBounds;
use crate::processing::convert::{decimal_to_dms, Axis};
use crate::processing::image::{validate_image_file, CoordinateEnhancer, ImageEnhancer};
use crate::processing::normalize::normalize;
use crate::processing::ocr::{OcrEngine, OcrFragment, OcrOptions, TesseractEngine, COORDINATE_CONFIGS};
use crate::processing::patterns::{match_coordinates, RawMatch};
use crate::validation::region::RegionValidator;

/// Multi-strategy GPS coordinate extractor.
///
/// Runs up to three OCR passes over one image (original, enhanced copy,
/// coordinate-tuned parameters), turns each transcript into at most one
/// candidate coordinate pair, and picks the winner with the region
/// validator as a soft filter. Never returns an error: the worst case is
/// an empty result with `method = Failed`.
pub struct GpsExtractor<E = TesseractEngine, H = CoordinateEnhancer> {
    engine: E,
    enhancer: H,
    validator: RegionValidator,
}

impl GpsExtractor {
    /// Extractor with the Tesseract engine and the Indonesia bounds.
    pub fn new() -> Self {
        GpsExtractor::with_parts(
            TesseractEngine::new(),
            CoordinateEnhancer,
            crate::models::region::INDONESIA,
        )
    }
}

impl Default for GpsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: OcrEngine, H: ImageEnhancer> GpsExtractor<E, H> {
    pub fn with_parts(engine: E, enhancer: H, bounds: RegionBounds) -> Self {
        GpsExtractor {
            engine,
            enhancer,
            validator: RegionValidator::new(bounds),
        }
    }

    /// Extract a coordinate pair from one overlay photo.
    pub fn extract(&self, image_path: &Path) -> ExtractionResult {
        let start = Instant::now();

        if !validate_image_file(image_path) {
            warn!("unsupported image file: {:?}", image_path);
            let mut result =
                ExtractionResult::failed(format!("unsupported image file: {:?}", image_path));
            result.processing_time = start.elapsed().as_secs_f64();
            return result;
        }

        let mut candidates = Vec::new();

        if let Some(candidate) =
            self.run_pass(image_path, StrategySource::Original, &OcrOptions::general())
        {
            candidates.push(candidate);
        }

        // The artifact guard removes the enhanced copy on every exit path,
        // including a panic inside a later pass.
        let artifact = EnhancedArtifact::new(self.enhancer.enhance(image_path), image_path);
        if let Some(enhanced_path) = artifact.path() {
            if let Some(candidate) =
                self.run_pass(enhanced_path, StrategySource::Enhanced, &OcrOptions::general())
            {
                candidates.push(candidate);
            }
        } else {
            debug!("no enhanced image for {:?}, skipping enhanced pass", image_path);
        }

        if let Some(candidate) = self.run_optimized_pass(image_path) {
            candidates.push(candidate);
        }

        let mut result = self.select(candidates);
        result.processing_time = start.elapsed().as_secs_f64();
        result
    }

    /// One OCR pass. Engine failures and empty transcripts are logged and
    /// become "no candidate from this strategy", never errors.
    fn run_pass(
        &self,
        image_path: &Path,
        source: StrategySource,
        options: &OcrOptions,
    ) -> Option<ExtractionCandidate> {
        let fragments = match self.engine.recognize(image_path, options) {
            Ok(fragments) => fragments,
            Err(e) => {
                warn!("{} OCR pass failed: {}", source.label(), e);
                return None;
            }
        };
        let candidate = self.candidate_from_fragments(&fragments, source);
        match &candidate {
            Some(c) => debug!(
                "{} pass produced candidate {} {}",
                source.label(),
                c.latitude,
                c.longitude
            ),
            None => debug!("{} pass produced no candidate", source.label()),
        }
        candidate
    }

    /// The coordinate-tuned pass: iterate the tuned engine configurations
    /// and keep the first transcript that yields a candidate.
    fn run_optimized_pass(&self, image_path: &Path) -> Option<ExtractionCandidate> {
        for options in COORDINATE_CONFIGS {
            let fragments = match self.engine.recognize(image_path, options) {
                Ok(fragments) => fragments,
                Err(e) => {
                    debug!("optimized OCR configuration failed: {}", e);
                    continue;
                }
            };
            if let Some(candidate) =
                self.candidate_from_fragments(&fragments, StrategySource::Optimized)
            {
                debug!(
                    "optimized pass produced candidate {} {}",
                    candidate.latitude, candidate.longitude
                );
                return Some(candidate);
            }
        }
        debug!("optimized pass produced no candidate");
        None
    }

    fn candidate_from_fragments(
        &self,
        fragments: &[OcrFragment],
        source: StrategySource,
    ) -> Option<ExtractionCandidate> {
        if fragments.is_empty() {
            return None;
        }

        let text = fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let (latitude, longitude) = match match_coordinates(&normalize(&text))? {
            RawMatch::Dms {
                latitude,
                longitude,
            } => (latitude.format(), longitude.format()),
            RawMatch::DecimalPair {
                latitude,
                longitude,
            } => (
                decimal_to_dms(latitude, Axis::Latitude),
                decimal_to_dms(longitude, Axis::Longitude),
            ),
        };

        let reported: Vec<f32> = fragments
            .iter()
            .map(|f| f.confidence)
            .filter(|&c| c > 0.0)
            .collect();
        let confidence = if reported.is_empty() {
            source.base_confidence()
        } else {
            reported.iter().sum::<f32>() / reported.len() as f32
        };

        Some(ExtractionCandidate {
            latitude,
            longitude,
            source,
            confidence,
        })
    }

    /// Pick the winner: the first candidate in the fixed priority order
    /// that the region validator accepts; failing that, the first
    /// candidate produced at all as a best-effort fallback.
    fn select(&self, candidates: Vec<ExtractionCandidate>) -> ExtractionResult {
        if candidates.is_empty() {
            warn!("no coordinates found with any strategy");
            return ExtractionResult::failed("no coordinates found with any strategy");
        }

        for source in SELECTION_PRIORITY {
            if let Some(candidate) = candidates.iter().find(|c| c.source == source) {
                let validation = self.validator.validate(&candidate.latitude, &candidate.longitude);
                if validation.is_valid {
                    info!(
                        "selected valid coordinates from {}: {} {}",
                        source.label(),
                        candidate.latitude,
                        candidate.longitude
                    );
                    return ExtractionResult {
                        latitude: candidate.latitude.clone(),
                        longitude: candidate.longitude.clone(),
                        method: candidate.source.into(),
                        confidence: candidate.confidence,
                        is_valid: true,
                        processing_time: 0.0,
                        error: String::new(),
                    };
                }
                warn!(
                    "coordinates from {} rejected by region validator: {:?}",
                    source.label(),
                    validation.issues
                );
            }
        }

        // None validated; hand back the first reading so the operator can
        // review it instead of retyping from the photo.
        let fallback = &candidates[0];
        info!(
            "selected fallback coordinates from {}: {} {}",
            fallback.source.label(),
            fallback.latitude,
            fallback.longitude
        );
        ExtractionResult {
            latitude: fallback.latitude.clone(),
            longitude: fallback.longitude.clone(),
            method: fallback.source.into(),
            confidence: fallback.confidence,
            is_valid: false,
            processing_time: 0.0,
            error: String::new(),
        }
    }
}

/// Scope guard for the temporary enhanced image. Holds `None` when the
/// enhancer returned the original path.
struct EnhancedArtifact {
    path: Option<PathBuf>,
}

impl EnhancedArtifact {
    fn new(enhanced: PathBuf, original: &Path) -> Self {
        EnhancedArtifact {
            path: (enhanced != original).then_some(enhanced),
        }
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Drop for EnhancedArtifact {
    fn drop(&mut self) {
        if let Some(path) = &self.path {
            match std::fs::remove_file(path) {
                Ok(()) => debug!("removed enhanced image {:?}", path),
                Err(e) => debug!("could not remove enhanced image {:?}: {}", path, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::data::ExtractionMethod;
    use crate::models::region::INDONESIA;
    use crate::processing::ocr::SegmentationMode;
    use crate::utils::ExtractionError;

    const VALID_OVERLAY: &str = "6°52'35,698\"S 107°34'37,321\"E";
    const OUT_OF_REGION: &str = "40°00'00.000\"S 107°00'00.000\"E";

    /// Engine stub: routes the general pass by path name and the tuned
    /// pass by its non-default options.
    struct StubEngine {
        original: &'static str,
        enhanced: &'static str,
        optimized: &'static str,
        fail_original: bool,
    }

    impl StubEngine {
        fn text(s: &str) -> Result<Vec<OcrFragment>, ExtractionError> {
            Ok(s.lines()
                .filter(|l| !l.trim().is_empty())
                .map(|l| OcrFragment {
                    text: l.to_string(),
                    confidence: 0.0,
                })
                .collect())
        }
    }

    impl OcrEngine for StubEngine {
        fn recognize(
            &self,
            image: &Path,
            options: &OcrOptions,
        ) -> Result<Vec<OcrFragment>, ExtractionError> {
            if options.char_whitelist.is_some() || options.segmentation != SegmentationMode::Auto {
                return Self::text(self.optimized);
            }
            if image.to_string_lossy().contains("enhanced") {
                return Self::text(self.enhanced);
            }
            if self.fail_original {
                return Err(ExtractionError::Engine("simulated engine failure".into()));
            }
            Self::text(self.original)
        }
    }

    struct StubEnhancer {
        available: bool,
    }

    impl ImageEnhancer for StubEnhancer {
        fn enhance(&self, image: &Path) -> PathBuf {
            if self.available {
                image.with_file_name("stub_enhanced.jpg")
            } else {
                image.to_path_buf()
            }
        }
    }

    fn extractor(
        engine: StubEngine,
        enhancer: StubEnhancer,
    ) -> GpsExtractor<StubEngine, StubEnhancer> {
        GpsExtractor::with_parts(engine, enhancer, INDONESIA)
    }

    #[test]
    fn test_enhanced_candidate_preferred_when_valid() {
        let sut = extractor(
            StubEngine {
                original: OUT_OF_REGION,
                enhanced: VALID_OVERLAY,
                optimized: "",
                fail_original: false,
            },
            StubEnhancer { available: true },
        );
        let result = sut.extract(Path::new("foto.jpg"));
        assert!(result.is_valid);
        assert_eq!(result.method, ExtractionMethod::Enhanced);
        assert_eq!(result.latitude, "6°52'35.698\"S");
        assert_eq!(result.longitude, "107°34'37.321\"E");
        assert!((result.confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_zero_candidates_yield_failed_result() {
        let sut = extractor(
            StubEngine {
                original: "tidak ada koordinat",
                enhanced: "",
                optimized: "",
                fail_original: false,
            },
            StubEnhancer { available: true },
        );
        let result = sut.extract(Path::new("foto.jpg"));
        assert_eq!(result.method, ExtractionMethod::Failed);
        assert!(result.latitude.is_empty());
        assert!(result.longitude.is_empty());
        assert!(!result.is_valid);
        assert!(!result.error.is_empty());
    }

    #[test]
    fn test_fallback_to_first_candidate_when_none_validate() {
        let sut = extractor(
            StubEngine {
                original: OUT_OF_REGION,
                enhanced: OUT_OF_REGION,
                optimized: "",
                fail_original: false,
            },
            StubEnhancer { available: true },
        );
        let result = sut.extract(Path::new("foto.jpg"));
        assert!(!result.is_valid);
        assert_eq!(result.method, ExtractionMethod::Original);
        assert_eq!(result.latitude, "40°0'0.000\"S");
    }

    #[test]
    fn test_engine_failure_in_one_strategy_does_not_abort_others() {
        let sut = extractor(
            StubEngine {
                original: "",
                enhanced: VALID_OVERLAY,
                optimized: "",
                fail_original: true,
            },
            StubEnhancer { available: true },
        );
        let result = sut.extract(Path::new("foto.jpg"));
        assert!(result.is_valid);
        assert_eq!(result.method, ExtractionMethod::Enhanced);
    }

    #[test]
    fn test_optimized_pass_handles_decimal_pair() {
        let sut = extractor(
            StubEngine {
                original: "",
                enhanced: "",
                optimized: "-6.876562, 107.577145",
                fail_original: false,
            },
            StubEnhancer { available: false },
        );
        let result = sut.extract(Path::new("foto.jpg"));
        assert!(result.is_valid);
        assert_eq!(result.method, ExtractionMethod::Optimized);
        assert_eq!(result.latitude, "6°52'35.623\"S");
        assert_eq!(result.longitude, "107°34'37.722\"E");
    }

    #[test]
    fn test_unsupported_file_fails_fast() {
        let sut = extractor(
            StubEngine {
                original: VALID_OVERLAY,
                enhanced: "",
                optimized: "",
                fail_original: false,
            },
            StubEnhancer { available: false },
        );
        let result = sut.extract(Path::new("laporan.pdf"));
        assert_eq!(result.method, ExtractionMethod::Failed);
        assert!(result.error.contains("unsupported"));
    }
}
