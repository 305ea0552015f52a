pub mod convert;
pub mod image;
pub mod normalize;
pub mod ocr;
pub mod overlay;
pub mod patterns;

pub use convert::{decimal_to_dms, dms_to_decimal, parse_dms, Axis, DmsCoordinate, Hemisphere};
pub use image::{enhance_for_coordinates, validate_image_file};
pub use normalize::normalize;
pub use ocr::{OcrEngine, OcrFragment, OcrOptions, SegmentationMode, TesseractEngine};
pub use overlay::{extract_overlay_info, AddressComponents, OverlayInfo};
pub use patterns::{match_coordinates, RawMatch};
