pub mod data;
pub mod region;
pub mod report;

pub use data::{
    ExtractionCandidate, ExtractionMethod, ExtractionResult, StrategySource, SELECTION_PRIORITY,
};
pub use region::{RegionBounds, SignRule, INDONESIA};
pub use report::{MethodStats, ProcessingReport};
