use serde::{Deserialize, Serialize};

/// Sign convention a region expects for one axis of a decimal coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignRule {
    /// Value must be <= 0 (Southern latitude / Western longitude).
    NonPositive,
    /// Value must be >= 0 (Northern latitude / Eastern longitude).
    NonNegative,
    Any,
}

impl SignRule {
    pub fn accepts(self, value: f64) -> bool {
        match self {
            SignRule::NonPositive => value <= 0.0,
            SignRule::NonNegative => value >= 0.0,
            SignRule::Any => true,
        }
    }
}

/// Geographic bounding box used as a plausibility filter for extracted
/// coordinates, plus the hemisphere-sign convention the region expects.
/// Immutable for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_sign: SignRule,
    pub lon_sign: SignRule,
}

/// Approximate bounds of the Indonesian archipelago: 6°N to 11°S,
/// 95°E to 141°E. Overlay coordinates from the toll-road network are
/// expected South of the equator and East of the meridian.
pub const INDONESIA: RegionBounds = RegionBounds {
    lat_min: -11.0,
    lat_max: 6.0,
    lon_min: 95.0,
    lon_max: 141.0,
    lat_sign: SignRule::NonPositive,
    lon_sign: SignRule::NonNegative,
};

impl RegionBounds {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.lat_min <= lat && lat <= self.lat_max && self.lon_min <= lon && lon <= self.lon_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indonesia_contains_bandung() {
        assert!(INDONESIA.contains(-6.876562, 107.577145));
    }

    #[test]
    fn test_indonesia_rejects_southern_ocean() {
        assert!(!INDONESIA.contains(-40.0, 107.0));
    }

    #[test]
    fn test_sign_rules() {
        assert!(INDONESIA.lat_sign.accepts(-6.87));
        assert!(!INDONESIA.lat_sign.accepts(6.87));
        assert!(INDONESIA.lon_sign.accepts(107.58));
        assert!(!INDONESIA.lon_sign.accepts(-107.58));
        // Equator and prime meridian satisfy both conventions.
        assert!(INDONESIA.lat_sign.accepts(0.0));
        assert!(INDONESIA.lon_sign.accepts(0.0));
    }
}
