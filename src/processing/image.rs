use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use imageproc::contrast::adaptive_threshold;
use imageproc::distance_transform::Norm;
use imageproc::filter::{gaussian_blur_f32, sharpen3x3};
use imageproc::morphology::close;
use log::{debug, warn};

const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

/// Boundary to the image-enhancement step, injectable like the OCR
/// engine so orchestrator tests can run without real image files.
pub trait ImageEnhancer {
    /// Returns the path of an enhanced copy, or the input path unchanged
    /// when no enhancement is available.
    fn enhance(&self, image: &Path) -> PathBuf;
}

/// Default enhancer backed by [`enhance_for_coordinates`].
pub struct CoordinateEnhancer;

impl ImageEnhancer for CoordinateEnhancer {
    fn enhance(&self, image: &Path) -> PathBuf {
        enhance_for_coordinates(image)
    }
}

/// Check the file extension against the formats the pipeline accepts.
pub fn validate_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Produce a version of the image tuned for reading the white-on-dark
/// overlay text: grayscale, invert, denoise, adaptive threshold, close
/// broken strokes, sharpen, then upscale for the OCR engine.
///
/// The enhanced copy is written as `<stem>_enhanced.jpg` beside the
/// source. Returning the original path signals "no enhancement
/// available"; the caller skips the enhanced pass in that case.
pub fn enhance_for_coordinates(image_path: &Path) -> PathBuf {
    match try_enhance(image_path) {
        Ok(enhanced) => enhanced,
        Err(e) => {
            warn!("image enhancement unavailable for {:?}: {}", image_path, e);
            image_path.to_path_buf()
        }
    }
}

fn try_enhance(image_path: &Path) -> Result<PathBuf, crate::utils::ExtractionError> {
    let img = image::open(image_path)
        .map_err(|e| crate::utils::ExtractionError::Image(format!("cannot read image: {}", e)))?;

    let mut gray = img.to_luma8();
    // Overlay text is white on a dark band; the engine prefers dark-on-light.
    imageops::invert(&mut gray);

    let blurred = gaussian_blur_f32(&gray, 0.8);
    let thresholded = adaptive_threshold(&blurred, 7);
    let cleaned = close(&thresholded, Norm::LInf, 1);
    let sharpened = sharpen3x3(&cleaned);

    let (width, height) = sharpened.dimensions();
    let upscaled = imageops::resize(
        &sharpened,
        (f64::from(width) * 2.5) as u32,
        (f64::from(height) * 2.5) as u32,
        FilterType::CatmullRom,
    );

    let mut enhanced_path = image_path.to_path_buf();
    let stem = enhanced_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image")
        .to_string();
    enhanced_path.set_file_name(format!("{}_enhanced.jpg", stem));

    upscaled
        .save(&enhanced_path)
        .map_err(|e| crate::utils::ExtractionError::Image(format!("cannot save enhanced image: {}", e)))?;

    debug!("enhanced image written to {:?}", enhanced_path);
    Ok(enhanced_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(validate_image_file(Path::new("foto_km12.jpg")));
        assert!(validate_image_file(Path::new("foto_km12.JPEG")));
        assert!(validate_image_file(Path::new("scan.tiff")));
        assert!(!validate_image_file(Path::new("laporan.pdf")));
        assert!(!validate_image_file(Path::new("no_extension")));
    }

    #[test]
    fn test_enhance_missing_file_returns_original() {
        let path = Path::new("does_not_exist.jpg");
        assert_eq!(enhance_for_coordinates(path), path.to_path_buf());
    }

    #[test]
    fn test_enhance_writes_sibling_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("overlay.png");
        let img = image::GrayImage::from_pixel(64, 32, image::Luma([40u8]));
        img.save(&src).unwrap();

        let enhanced = enhance_for_coordinates(&src);
        assert_ne!(enhanced, src);
        assert!(enhanced.ends_with("overlay_enhanced.jpg"));
        assert!(enhanced.exists());
    }
}
