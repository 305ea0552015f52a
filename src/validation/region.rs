use crate::models::region::RegionBounds;
use crate::processing::convert::{parse_dms, Axis};
use crate::utils::ExtractionError;

/// Classification of one validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssueKind {
    Format,
    Range,
    Region,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub kind: ValidationIssueKind,
    pub message: String,
}

/// Outcome of validating one DMS pair. All failing checks are collected;
/// nothing short-circuits, so a caller sees every problem at once.
#[derive(Debug, Clone)]
pub struct RegionValidation {
    pub is_valid: bool,
    pub decimal_latitude: Option<f64>,
    pub decimal_longitude: Option<f64>,
    pub issues: Vec<ValidationIssue>,
}

impl RegionValidation {
    pub fn has_issue(&self, kind: ValidationIssueKind) -> bool {
        self.issues.iter().any(|issue| issue.kind == kind)
    }
}

/// Checks a DMS coordinate pair against a configured geographic bounding
/// box and the region's hemisphere-sign convention.
pub struct RegionValidator {
    bounds: RegionBounds,
}

impl RegionValidator {
    pub fn new(bounds: RegionBounds) -> Self {
        RegionValidator { bounds }
    }

    pub fn validate(&self, latitude: &str, longitude: &str) -> RegionValidation {
        let mut issues = Vec::new();

        let lat_decimal = self.check_axis(latitude, Axis::Latitude, &mut issues);
        let lon_decimal = self.check_axis(longitude, Axis::Longitude, &mut issues);

        if let (Some(lat), Some(lon)) = (lat_decimal, lon_decimal) {
            if !self.bounds.contains(lat, lon) {
                issues.push(ValidationIssue {
                    kind: ValidationIssueKind::Region,
                    message: format!(
                        "coordinates ({:.6}, {:.6}) outside region bounds [{}, {}] x [{}, {}]",
                        lat,
                        lon,
                        self.bounds.lat_min,
                        self.bounds.lat_max,
                        self.bounds.lon_min,
                        self.bounds.lon_max
                    ),
                });
            }
            if !self.bounds.lat_sign.accepts(lat) {
                issues.push(ValidationIssue {
                    kind: ValidationIssueKind::Region,
                    message: format!("latitude {:.6} is in the wrong hemisphere for the region", lat),
                });
            }
            if !self.bounds.lon_sign.accepts(lon) {
                issues.push(ValidationIssue {
                    kind: ValidationIssueKind::Region,
                    message: format!(
                        "longitude {:.6} is in the wrong hemisphere for the region",
                        lon
                    ),
                });
            }
        }

        RegionValidation {
            is_valid: issues.is_empty(),
            decimal_latitude: lat_decimal,
            decimal_longitude: lon_decimal,
            issues,
        }
    }

    /// Parse one axis, record format and range findings, and return the
    /// decimal value when the string was at least parseable.
    fn check_axis(
        &self,
        input: &str,
        axis: Axis,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<f64> {
        let axis_name = match axis {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        };

        let dms = match parse_dms(input) {
            Ok(dms) => dms,
            Err(ExtractionError::Format(message)) => {
                issues.push(ValidationIssue {
                    kind: ValidationIssueKind::Format,
                    message: format!("{}: {}", axis_name, message),
                });
                return None;
            }
            Err(e) => {
                issues.push(ValidationIssue {
                    kind: ValidationIssueKind::Format,
                    message: format!("{}: {}", axis_name, e),
                });
                return None;
            }
        };

        if dms.hemisphere.axis() != axis {
            issues.push(ValidationIssue {
                kind: ValidationIssueKind::Format,
                message: format!(
                    "{}: hemisphere letter {} does not belong to this axis",
                    axis_name,
                    dms.hemisphere.letter()
                ),
            });
            return None;
        }

        let degree_limit = match axis {
            Axis::Latitude => 90,
            Axis::Longitude => 180,
        };
        if dms.degrees > degree_limit {
            issues.push(ValidationIssue {
                kind: ValidationIssueKind::Range,
                message: format!("{}: degrees {} exceed {}", axis_name, dms.degrees, degree_limit),
            });
        }
        if dms.minutes >= 60 {
            issues.push(ValidationIssue {
                kind: ValidationIssueKind::Range,
                message: format!("{}: minutes {} out of range", axis_name, dms.minutes),
            });
        }
        if dms.seconds >= 60.0 {
            issues.push(ValidationIssue {
                kind: ValidationIssueKind::Range,
                message: format!("{}: seconds {} out of range", axis_name, dms.seconds),
            });
        }

        Some(dms.to_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::INDONESIA;

    fn validator() -> RegionValidator {
        RegionValidator::new(INDONESIA)
    }

    #[test]
    fn test_valid_bandung_pair() {
        let result = validator().validate("6°52'35,698\"S", "107°34'37,321\"E");
        assert!(result.is_valid, "issues: {:?}", result.issues);
        assert!((result.decimal_latitude.unwrap() + 6.8766).abs() < 1e-3);
        assert!((result.decimal_longitude.unwrap() - 107.5770).abs() < 1e-3);
    }

    #[test]
    fn test_wrong_hemisphere_rejected() {
        // Magnitudes are plausible for the archipelago, but a Northern
        // latitude violates the configured sign convention.
        let result = validator().validate("6°52'35\"N", "107°34'37\"E");
        assert!(!result.is_valid);
        assert!(result.has_issue(ValidationIssueKind::Region));
    }

    #[test]
    fn test_latitude_outside_bounds_rejected() {
        let result = validator().validate("40°00'00\"S", "107°00'00\"E");
        assert!(!result.is_valid);
        assert!(result.has_issue(ValidationIssueKind::Region));
    }

    #[test]
    fn test_format_error_reported_per_axis() {
        let result = validator().validate("garbled", "107°34'37,321\"E");
        assert!(!result.is_valid);
        assert!(result.has_issue(ValidationIssueKind::Format));
        assert!(result.decimal_latitude.is_none());
        assert!(result.decimal_longitude.is_some());
    }

    #[test]
    fn test_range_errors_accumulate() {
        // Out-of-range minutes and seconds on both axes: every finding is
        // reported, not just the first.
        let result = validator().validate("95°61'75\"S", "181°00'00\"E");
        assert!(!result.is_valid);
        let ranges = result
            .issues
            .iter()
            .filter(|i| i.kind == ValidationIssueKind::Range)
            .count();
        assert!(ranges >= 3, "issues: {:?}", result.issues);
    }

    #[test]
    fn test_axis_mismatch_is_format_issue() {
        let result = validator().validate("6°52'35\"E", "107°34'37\"E");
        assert!(!result.is_valid);
        assert!(result.has_issue(ValidationIssueKind::Format));
    }
}
