pub mod models;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod gps_extractor;

pub use gps_extractor::GpsExtractor;
