use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::processing::convert::{Axis, DmsCoordinate, Hemisphere};
use crate::processing::normalize::normalize_decimal_separators;

/// One raw match from the coordinate grammars, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawMatch {
    Dms {
        latitude: DmsCoordinate,
        longitude: DmsCoordinate,
    },
    DecimalPair {
        latitude: f64,
        longitude: f64,
    },
}

lazy_static! {
    // DMS grammars in priority order. All of them accept comma-or-period
    // seconds; the halves differ in how much whitespace and which pair
    // separators they tolerate.
    static ref DMS_GRAMMARS: Vec<(&'static str, Regex)> = vec![
        // 6°52'35,698"S 107°34'37,321"E
        (
            "dms_comma_decimal",
            Regex::new(
                r#"(\d{1,3})°\s*(\d{1,2})'\s*(\d{1,3}(?:[.,]\d+)?)"\s*([NSEW])\s+(\d{1,3})°\s*(\d{1,2})'\s*(\d{1,3}(?:[.,]\d+)?)"\s*([NSEW])"#
            )
            .unwrap(),
        ),
        // 6°52'35.698"S107°34'37.321"E
        (
            "dms_compact",
            Regex::new(
                r#"(\d{1,3})°(\d{1,2})'(\d{1,3}(?:[.,]\d+)?)"([NSEW])(\d{1,3})°(\d{1,2})'(\d{1,3}(?:[.,]\d+)?)"([NSEW])"#
            )
            .unwrap(),
        ),
        // 6° 52' 35.698" S 107° 34' 37.321" E
        (
            "dms_spaced",
            Regex::new(
                r#"(\d{1,3})°\s*(\d{1,2})'\s*(\d{1,3}(?:[.,]\d+)?)"\s*([NSEW])\s*(\d{1,3})°\s*(\d{1,2})'\s*(\d{1,3}(?:[.,]\d+)?)"\s*([NSEW])"#
            )
            .unwrap(),
        ),
        // 6°52'35.698"S / 107°34'37.321"E  (also , and ;)
        (
            "dms_alt_separator",
            Regex::new(
                r#"(\d{1,3})°\s*(\d{1,2})'\s*(\d{1,3}(?:[.,]\d+)?)"\s*([NSEW])\s*[/,;]\s*(\d{1,3})°\s*(\d{1,2})'\s*(\d{1,3}(?:[.,]\d+)?)"\s*([NSEW])"#
            )
            .unwrap(),
        ),
    ];

    // Decimal-degree grammars, tried after every DMS grammar failed.
    static ref DECIMAL_GRAMMARS: Vec<(&'static str, Regex)> = vec![
        // -6.876562, 107.577145
        (
            "decimal_comma_pair",
            Regex::new(r"(-?\d{1,3}\.\d+)\s*,\s*(-?\d{1,3}\.\d+)").unwrap(),
        ),
        // +6.876562 +107.577145
        (
            "decimal_signed_pair",
            Regex::new(r"([+-]?\d{1,3}\.\d+)[,\s]\s*([+-]?\d{1,3}\.\d+)").unwrap(),
        ),
    ];
}

/// Apply the grammars in priority order to already-normalized text and
/// return the first acceptable match, if any.
///
/// First-match-wins: the first grammar producing at least one match with
/// valid direction letters ends the search; a match whose latitude letter
/// is not N/S or whose longitude letter is not E/W is discarded and the
/// search falls through to the next grammar.
pub fn match_coordinates(normalized: &str) -> Option<RawMatch> {
    for (name, grammar) in DMS_GRAMMARS.iter() {
        for captures in grammar.captures_iter(normalized) {
            match dms_from_captures(&captures) {
                Some(raw) => {
                    debug!("grammar {} matched", name);
                    return Some(raw);
                }
                // Direction letters in the wrong positions; keep looking.
                None => continue,
            }
        }
    }

    let decimal_text = normalize_decimal_separators(normalized);
    for (name, grammar) in DECIMAL_GRAMMARS.iter() {
        for captures in grammar.captures_iter(&decimal_text) {
            let latitude: f64 = captures[1].parse().ok()?;
            let longitude: f64 = captures[2].parse().ok()?;
            // Discard obviously implausible pairs (page numbers, timestamps).
            if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
                continue;
            }
            debug!("grammar {} matched", name);
            return Some(RawMatch::DecimalPair {
                latitude,
                longitude,
            });
        }
    }

    None
}

fn dms_from_captures(captures: &regex::Captures<'_>) -> Option<RawMatch> {
    let lat_dir = Hemisphere::from_char(captures[4].chars().next()?)?;
    let lon_dir = Hemisphere::from_char(captures[8].chars().next()?)?;
    if lat_dir.axis() != Axis::Latitude || lon_dir.axis() != Axis::Longitude {
        return None;
    }

    let latitude = DmsCoordinate {
        degrees: captures[1].parse().ok()?,
        minutes: captures[2].parse().ok()?,
        seconds: captures[3].replace(',', ".").parse().ok()?,
        hemisphere: lat_dir,
    };
    let longitude = DmsCoordinate {
        degrees: captures[5].parse().ok()?,
        minutes: captures[6].parse().ok()?,
        seconds: captures[7].replace(',', ".").parse().ok()?,
        hemisphere: lon_dir,
    };

    Some(RawMatch::Dms {
        latitude,
        longitude,
    })
}
