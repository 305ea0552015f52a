use serde::{Deserialize, Serialize};

/// Which OCR pass produced a candidate coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategySource {
    Original,
    Enhanced,
    Optimized,
}

/// Fixed preference order applied when more than one strategy produced a
/// region-valid candidate. The enhanced image tends to give the cleanest
/// overlay text, the tuned-parameter pass the second cleanest.
pub const SELECTION_PRIORITY: [StrategySource; 3] = [
    StrategySource::Enhanced,
    StrategySource::Optimized,
    StrategySource::Original,
];

impl StrategySource {
    /// Confidence assigned to a candidate when the engine reports no usable
    /// per-fragment confidence of its own.
    pub fn base_confidence(self) -> f32 {
        match self {
            StrategySource::Original => 0.7,
            StrategySource::Enhanced => 0.8,
            StrategySource::Optimized => 0.9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrategySource::Original => "original",
            StrategySource::Enhanced => "enhanced",
            StrategySource::Optimized => "optimized",
        }
    }
}

/// How the final result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    Original,
    Enhanced,
    Optimized,
    Failed,
}

impl From<StrategySource> for ExtractionMethod {
    fn from(source: StrategySource) -> Self {
        match source {
            StrategySource::Original => ExtractionMethod::Original,
            StrategySource::Enhanced => ExtractionMethod::Enhanced,
            StrategySource::Optimized => ExtractionMethod::Optimized,
        }
    }
}

impl ExtractionMethod {
    pub fn label(self) -> &'static str {
        match self {
            ExtractionMethod::Original => "original",
            ExtractionMethod::Enhanced => "enhanced",
            ExtractionMethod::Optimized => "optimized",
            ExtractionMethod::Failed => "failed",
        }
    }
}

/// One strategy's output: a canonical DMS pair plus its provenance.
/// Produced per OCR pass and consumed immediately by the orchestrator.
#[derive(Debug, Clone)]
pub struct ExtractionCandidate {
    pub latitude: String,
    pub longitude: String,
    pub source: StrategySource,
    pub confidence: f32,
}

/// Final output of one extraction call. Coordinates are either a fully
/// canonical DMS pair or both empty; no partial results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub latitude: String,
    pub longitude: String,
    pub method: ExtractionMethod,
    pub confidence: f32,
    pub is_valid: bool,
    pub processing_time: f64,
    pub error: String,
}

impl ExtractionResult {
    pub fn failed(error: impl Into<String>) -> Self {
        ExtractionResult {
            latitude: String::new(),
            longitude: String::new(),
            method: ExtractionMethod::Failed,
            confidence: 0.0,
            is_valid: false,
            processing_time: 0.0,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_priority_order() {
        assert_eq!(SELECTION_PRIORITY[0], StrategySource::Enhanced);
        assert_eq!(SELECTION_PRIORITY[1], StrategySource::Optimized);
        assert_eq!(SELECTION_PRIORITY[2], StrategySource::Original);
    }

    #[test]
    fn test_failed_result_is_empty() {
        let result = ExtractionResult::failed("no coordinates");
        assert!(result.latitude.is_empty());
        assert!(result.longitude.is_empty());
        assert_eq!(result.method, ExtractionMethod::Failed);
        assert!(!result.is_valid);
    }
}
