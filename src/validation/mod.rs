pub mod region;

pub use region::{RegionValidation, RegionValidator, ValidationIssue, ValidationIssueKind};
