use thiserror::Error;

/// Error kinds for the extraction pipeline.
///
/// `Format`, `Range` and `Region` never reach the orchestrator's caller as
/// errors; they are folded into validation issues or "no candidate"
/// outcomes. `Engine` failures are logged per strategy and downgraded.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Coordinate format error: {0}")]
    Format(String),
    #[error("Coordinate component out of range: {0}")]
    Range(String),
    #[error("Coordinates outside configured region: {0}")]
    Region(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Image error: {0}")]
    Image(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
