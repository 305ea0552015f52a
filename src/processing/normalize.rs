use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Degree-sign stand-ins the OCR emits between the degree and minute
    // digit groups: 6*52'..., 6o52'..., 6O52'...
    static ref DEGREE_GLYPH: Regex =
        Regex::new(r"(\d)\s*[*oO]\s*(\d{1,2}\s*')").unwrap();
    // Slash or backslash read in place of the minute mark: 6°52/35.698"S
    static ref MINUTE_SLASH: Regex =
        Regex::new(r#"(\d)\s*[/\\]\s*(\d{1,2}(?:[.,]\d+)?\s*")"#).unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Clean raw OCR text of common character-recognition confusions so the
/// coordinate grammars match reliably. Pure; returns the input unchanged
/// when no substitution applies, and is idempotent.
pub fn normalize(raw: &str) -> String {
    let text = raw
        .replace('′', "'")
        .replace('″', "\"")
        .replace('‘', "'")
        .replace('’', "'")
        .replace('“', "\"")
        .replace('”', "\"");

    // Repair the minute mark first so the degree-glyph rule can anchor on it.
    let text = MINUTE_SLASH.replace_all(&text, "${1}'${2}");
    let text = DEGREE_GLYPH.replace_all(&text, "${1}°${2}");

    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Rewrite comma decimal separators to periods for the decimal-pair
/// grammars. The DMS grammars accept comma-or-period seconds themselves,
/// so this runs only on the decimal-degree matching path.
pub fn normalize_decimal_separators(text: &str) -> String {
    lazy_static! {
        static ref COMMA_DECIMAL: Regex = Regex::new(r"(\d),(\d)").unwrap();
    }
    COMMA_DECIMAL.replace_all(text, "${1}.${2}").into_owned()
}
