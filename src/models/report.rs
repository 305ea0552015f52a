use std::collections::HashMap;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::models::data::ExtractionResult;

/// Per-method extraction statistics for a processed batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodStats {
    pub count: usize,
    pub success: usize,
}

/// Summary over a batch of extraction results, attached to the generated
/// inspection report so operators can see how reliable OCR was for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub total_images: usize,
    pub successful_extractions: usize,
    pub failed_extractions: usize,
    pub success_rate: f64,
    pub average_processing_time: f64,
    pub average_confidence: f64,
    pub method_statistics: HashMap<String, MethodStats>,
    pub error_count: usize,
    pub timestamp: String,
}

impl ProcessingReport {
    pub fn from_results(results: &[ExtractionResult]) -> Self {
        let total_images = results.len();
        let successful_extractions = results.iter().filter(|r| r.is_valid).count();
        let failed_extractions = total_images - successful_extractions;

        let average_processing_time = if total_images > 0 {
            results.iter().map(|r| r.processing_time).sum::<f64>() / total_images as f64
        } else {
            0.0
        };

        let confidences: Vec<f64> = results
            .iter()
            .filter(|r| r.confidence > 0.0)
            .map(|r| f64::from(r.confidence))
            .collect();
        let average_confidence = if confidences.is_empty() {
            0.0
        } else {
            confidences.iter().sum::<f64>() / confidences.len() as f64
        };

        let mut method_statistics: HashMap<String, MethodStats> = HashMap::new();
        for result in results {
            let stats = method_statistics
                .entry(result.method.label().to_string())
                .or_default();
            stats.count += 1;
            if result.is_valid {
                stats.success += 1;
            }
        }

        let error_count = results.iter().filter(|r| !r.error.is_empty()).count();

        ProcessingReport {
            total_images,
            successful_extractions,
            failed_extractions,
            success_rate: if total_images > 0 {
                successful_extractions as f64 / total_images as f64 * 100.0
            } else {
                0.0
            },
            average_processing_time,
            average_confidence,
            method_statistics,
            error_count,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
