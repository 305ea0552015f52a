use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

// The GPS-overlay caption carries more than the coordinate pair: a
// timestamp, a compass bearing and an Indonesian address block. These are
// extracted best-effort and attached to the inspection record as plain
// text.

lazy_static! {
    static ref TIMESTAMP_PATTERNS: Vec<Regex> = vec![
        // 13 Jun 2025 12.59.06
        Regex::new(r"\d{1,2}\s+\w{3}\s+\d{4}\s+\d{2}\.\d{2}\.\d{2}").unwrap(),
        // 13/06/2025 12:59:06
        Regex::new(r"\d{1,2}/\d{1,2}/\d{4}\s+\d{2}:\d{2}:\d{2}").unwrap(),
        // 2025-06-13 12:59:06
        Regex::new(r"\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}").unwrap(),
    ];
    static ref COMPASS: Regex = Regex::new(r"\d{1,3}°\s*[NSEW]{1,2}\b").unwrap();
    static ref COORDINATE_LINE: Regex = Regex::new(r"\d+°\d+'\d+").unwrap();
    static ref TIME_LINE: Regex = Regex::new(r"\d{2}[:.]\d{2}[:.]\d{2}").unwrap();
}

/// Address-component keywords as they appear on Indonesian overlays.
const ADDRESS_KEYWORDS: [(&str, &[&str]); 5] = [
    ("street", &["jalan", "jl.", "jl "]),
    ("district", &["kecamatan", "kec.", "kec "]),
    ("subdistrict", &["kelurahan", "kel.", "desa"]),
    ("city", &["kota", "kabupaten", "kab."]),
    ("province", &["provinsi", "prov."]),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponents {
    pub street: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
}

/// Auxiliary information read from the overlay caption.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlayInfo {
    pub timestamp: Option<String>,
    pub compass_direction: Option<String>,
    pub address: AddressComponents,
    pub full_address: Option<String>,
}

/// Extract timestamp, compass bearing and address lines from raw OCR
/// text. Everything is optional; absent fields stay `None`.
pub fn extract_overlay_info(text: &str) -> OverlayInfo {
    OverlayInfo {
        timestamp: extract_timestamp(text),
        compass_direction: COMPASS.find(text).map(|m| m.as_str().to_string()),
        address: extract_address_components(text),
        full_address: construct_full_address(text),
    }
}

fn extract_timestamp(text: &str) -> Option<String> {
    TIMESTAMP_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().to_string())
}

fn extract_address_components(text: &str) -> AddressComponents {
    let mut components = AddressComponents::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();

        for (component, keywords) in ADDRESS_KEYWORDS {
            if let Some(keyword) = keywords.iter().find(|k| lower.contains(*k)) {
                let cleaned = lower
                    .replacen(keyword, "", 1)
                    .trim_matches(|c: char| c.is_whitespace() || c == ':' || c == ',')
                    .to_string();
                if cleaned.is_empty() {
                    continue;
                }
                let slot = match component {
                    "street" => &mut components.street,
                    "district" => &mut components.district,
                    "subdistrict" => &mut components.subdistrict,
                    "city" => &mut components.city,
                    _ => &mut components.province,
                };
                if slot.is_none() {
                    *slot = Some(cleaned);
                }
            }
        }
    }

    components
}

/// Join address-looking lines into one string, skipping coordinate and
/// timestamp lines. Capped at five components.
fn construct_full_address(text: &str) -> Option<String> {
    let mut address_lines = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || COORDINATE_LINE.is_match(line) || TIME_LINE.is_match(line) {
            continue;
        }

        let lower = line.to_lowercase();
        let has_keyword = ADDRESS_KEYWORDS
            .iter()
            .any(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)));

        if has_keyword || (line.len() > 10 && !line.chars().all(|c| c.is_ascii_digit())) {
            address_lines.push(line);
        }
        if address_lines.len() == 5 {
            break;
        }
    }

    if address_lines.is_empty() {
        None
    } else {
        Some(address_lines.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jalan Pasteur No. 28\n\
                          Kecamatan Sukajadi\n\
                          Kota Bandung\n\
                          Provinsi Jawa Barat\n\
                          6°52'35,698\"S 107°34'37,321\"E\n\
                          245° SW\n\
                          13 Jun 2025 12.59.06";

    #[test]
    fn test_timestamp_formats() {
        assert_eq!(
            extract_timestamp("13 Jun 2025 12.59.06"),
            Some("13 Jun 2025 12.59.06".to_string())
        );
        assert_eq!(
            extract_timestamp("foto 13/06/2025 12:59:06"),
            Some("13/06/2025 12:59:06".to_string())
        );
        assert_eq!(
            extract_timestamp("2025-06-13 12:59:06"),
            Some("2025-06-13 12:59:06".to_string())
        );
        assert_eq!(extract_timestamp("no timestamp here"), None);
    }

    #[test]
    fn test_overlay_sample() {
        let info = extract_overlay_info(SAMPLE);
        assert_eq!(info.timestamp.as_deref(), Some("13 Jun 2025 12.59.06"));
        assert_eq!(info.compass_direction.as_deref(), Some("245° SW"));
        assert_eq!(info.address.street.as_deref(), Some("pasteur no. 28"));
        assert_eq!(info.address.district.as_deref(), Some("sukajadi"));
        assert_eq!(info.address.city.as_deref(), Some("bandung"));
        assert_eq!(info.address.province.as_deref(), Some("jawa barat"));
    }

    #[test]
    fn test_full_address_skips_coordinate_and_time_lines() {
        let info = extract_overlay_info(SAMPLE);
        let full = info.full_address.unwrap();
        assert!(full.contains("Jalan Pasteur"));
        assert!(!full.contains("107°34'"));
        assert!(!full.contains("12.59.06"));
    }

    #[test]
    fn test_empty_text() {
        let info = extract_overlay_info("");
        assert!(info.timestamp.is_none());
        assert!(info.compass_direction.is_none());
        assert!(info.full_address.is_none());
        assert_eq!(info.address, AddressComponents::default());
    }
}
