use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::ExtractionError;

/// Coordinate axis, used to pick the hemisphere letter when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// Hemisphere letter of a DMS coordinate. South and West carry a negative
/// sign in the decimal representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_char(c: char) -> Option<Hemisphere> {
        match c.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::South | Hemisphere::West => -1.0,
            Hemisphere::North | Hemisphere::East => 1.0,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }
}

/// A parsed DMS coordinate. Rendering uses the canonical form
/// `{degrees}°{minutes}'{seconds:.3}"{hemisphere}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmsCoordinate {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl DmsCoordinate {
    pub fn to_decimal(&self) -> f64 {
        let magnitude =
            f64::from(self.degrees) + f64::from(self.minutes) / 60.0 + self.seconds / 3600.0;
        magnitude * self.hemisphere.sign()
    }

    pub fn format(&self) -> String {
        format!(
            "{}°{}'{:.3}\"{}",
            self.degrees,
            self.minutes,
            self.seconds,
            self.hemisphere.letter()
        )
    }
}

lazy_static! {
    static ref DMS_STRING: Regex =
        Regex::new(r#"^\s*(\d{1,3})°\s*(\d{1,2})'\s*(\d{1,3}(?:[.,]\d+)?)"\s*([NSEW])\s*$"#)
            .unwrap();
}

/// Parse a DMS coordinate string. Comma seconds are accepted and read as
/// decimal separators.
pub fn parse_dms(input: &str) -> Result<DmsCoordinate, ExtractionError> {
    let captures = DMS_STRING
        .captures(input)
        .ok_or_else(|| ExtractionError::Format(format!("invalid DMS coordinate: {:?}", input)))?;

    let hemisphere = captures[4]
        .chars()
        .next()
        .and_then(Hemisphere::from_char)
        .ok_or_else(|| ExtractionError::Format(format!("invalid hemisphere in {:?}", input)))?;

    Ok(DmsCoordinate {
        degrees: captures[1]
            .parse()
            .map_err(|_| ExtractionError::Format(format!("invalid degrees in {:?}", input)))?,
        minutes: captures[2]
            .parse()
            .map_err(|_| ExtractionError::Format(format!("invalid minutes in {:?}", input)))?,
        seconds: captures[3]
            .replace(',', ".")
            .parse()
            .map_err(|_| ExtractionError::Format(format!("invalid seconds in {:?}", input)))?,
        hemisphere,
    })
}

/// Convert a DMS coordinate string to signed decimal degrees.
pub fn dms_to_decimal(input: &str) -> Result<f64, ExtractionError> {
    Ok(parse_dms(input)?.to_decimal())
}

/// Convert signed decimal degrees to the canonical DMS string for the
/// given axis. Seconds are rendered with 3 decimals; a value that rounds
/// up to 60.000 carries into the minutes (and degrees) so the rendered
/// components stay in range.
pub fn decimal_to_dms(decimal: f64, axis: Axis) -> String {
    let hemisphere = match axis {
        Axis::Latitude => {
            if decimal < 0.0 {
                Hemisphere::South
            } else {
                Hemisphere::North
            }
        }
        Axis::Longitude => {
            if decimal < 0.0 {
                Hemisphere::West
            } else {
                Hemisphere::East
            }
        }
    };

    let magnitude = decimal.abs();
    let mut degrees = magnitude.trunc() as u32;
    let minutes_float = (magnitude - f64::from(degrees)) * 60.0;
    let mut minutes = minutes_float.trunc() as u32;
    let mut seconds = (minutes_float - f64::from(minutes)) * 60.0;

    seconds = (seconds * 1000.0).round() / 1000.0;
    if seconds >= 60.0 {
        seconds = 0.0;
        minutes += 1;
    }
    if minutes >= 60 {
        minutes = 0;
        degrees += 1;
    }

    DmsCoordinate {
        degrees,
        minutes,
        seconds,
        hemisphere,
    }
    .format()
}
