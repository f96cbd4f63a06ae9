//! Age validation and display bucketing.
//!
//! Ages are typed by hand, often on phones with non-Latin keyboards, so the
//! input is NFKC-normalized first: full-width digits, the full-width hyphen
//! and ideographic spaces all fold to their ASCII forms before matching.
//! Decimal digits NFKC leaves alone (Arabic-Indic, Devanagari, Thai and the
//! rest of Unicode `Nd`) are then folded to ASCII by digit value.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::input::RawValue;

/// Width of a display bucket, in years.
pub const AGE_BUCKET_WIDTH: u32 = 5;

const AGE_PATTERN: &str = r"^([0-9]+)(?:\s*-\s*([0-9]+))?$";

fn age_regex() -> &'static Regex {
    static AGE: OnceLock<Regex> = OnceLock::new();
    AGE.get_or_init(|| Regex::new(AGE_PATTERN).expect("age pattern is valid"))
}

fn decimal_digit_regex() -> &'static Regex {
    static DIGIT: OnceLock<Regex> = OnceLock::new();
    DIGIT.get_or_init(|| Regex::new(r"^\p{Nd}$").expect("digit pattern is valid"))
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    decimal_digit_regex().is_match(c.encode_utf8(&mut buf))
}

/// ASCII form of a Unicode decimal digit.
///
/// `Nd` digits are encoded as contiguous runs of ten, zero first, so the
/// value is the offset from the start of the run modulo ten.
fn fold_digit(c: char) -> char {
    if c.is_ascii_digit() || !is_decimal_digit(c) {
        return c;
    }
    let mut start = u32::from(c);
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    let value = (u32::from(c) - start) % 10;
    char::from_digit(value, 10).unwrap_or(c)
}

/// NFKC-normalize `text`, fold digits to ASCII and trim it.
fn normalize(text: &str) -> String {
    let folded: String = text.nfkc().map(fold_digit).collect();
    folded.trim().to_string()
}

/// Parse an age or age range into `(low, high)` as written.
fn parse_age(text: &str) -> Option<(u32, u32)> {
    let normalized = normalize(text);
    let caps = age_regex().captures(&normalized)?;
    let low: u32 = caps.get(1)?.as_str().parse().ok()?;
    let high = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => low,
    };
    Some((low, high))
}

/// Canonicalize an age (`"20"`) or age range (`"20-30"`).
///
/// Surrounding whitespace and whitespace around the hyphen are dropped.
/// Anything else (stray tokens, digits split by spaces) yields `""`.
///
/// # Errors
///
/// Returns [`crate::Error::NotText`] if the value is not text.
pub fn validate_age(value: &RawValue) -> Result<String> {
    let text = value.to_text()?;
    let normalized = normalize(&text);
    let Some(caps) = age_regex().captures(&normalized) else {
        return Ok(String::new());
    };
    let canonical = match (caps.get(1), caps.get(2)) {
        (Some(low), Some(high)) => format!("{}-{}", low.as_str(), high.as_str()),
        (Some(low), None) => low.as_str().to_string(),
        _ => String::new(),
    };
    Ok(canonical)
}

/// Snap an age or age range to a display bucket.
///
/// The lower bound is floored to a multiple of five. The upper bound is the
/// stated upper bound, raised to at least five years above the floor, so
/// `"22"` becomes `"20-25"`, `"40-40"` becomes `"40-45"` and `"40-48"`
/// stays `"40-48"`. Unparseable input yields `None`.
#[must_use]
pub fn fuzzify_age(value: Option<&str>) -> Option<String> {
    let (a, b) = parse_age(value?)?;
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let start = low - low % AGE_BUCKET_WIDTH;
    let end = high.max(start.saturating_add(AGE_BUCKET_WIDTH));
    Some(format!("{start}-{end}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age(s: &str) -> String {
        validate_age(&RawValue::from(s)).unwrap()
    }

    #[test]
    fn test_validate_age_single() {
        assert_eq!(age("20"), "20");
        assert_eq!(age(" 20 "), "20");
    }

    #[test]
    fn test_validate_age_full_width() {
        assert_eq!(age("\u{ff12}\u{ff10}"), "20");
        assert_eq!(age("\u{ff12}\u{ff10}\u{ff0d}\u{ff13}\u{ff10}"), "20-30");
        assert_eq!(
            age("\u{ff12}\u{ff10}\u{3000}\u{ff0d}\u{3000}\u{ff13}\u{ff10}"),
            "20-30"
        );
    }

    #[test]
    fn test_validate_age_other_scripts() {
        // Arabic-Indic
        assert_eq!(age("\u{662}\u{660}"), "20");
        assert_eq!(age("\u{662}\u{660} - \u{663}\u{669}"), "20-39");
        // Devanagari
        assert_eq!(age("\u{968}\u{966}-\u{969}\u{966}"), "20-30");
        // Thai
        assert_eq!(age("\u{e57}"), "7");
        assert_eq!(age("\u{662}\u{660}x"), "");
    }

    #[test]
    fn test_fold_digit() {
        assert_eq!(fold_digit('\u{660}'), '0');
        assert_eq!(fold_digit('\u{6f9}'), '9');
        assert_eq!(fold_digit('\u{96f}'), '9');
        assert_eq!(fold_digit('7'), '7');
        assert_eq!(fold_digit('x'), 'x');
        assert_eq!(fold_digit('\u{2167}'), '\u{2167}');
    }

    #[test]
    fn test_validate_age_range() {
        assert_eq!(age("20-30"), "20-30");
        assert_eq!(age("20 - 30"), "20-30");
    }

    #[test]
    fn test_validate_age_rejects() {
        assert_eq!(age("20 !"), "");
        assert_eq!(age("2 0"), "");
        assert_eq!(age("twenty"), "");
        assert_eq!(age("20-"), "");
        assert_eq!(age("20--30"), "");
        assert_eq!(age(""), "");
    }

    #[test]
    fn test_validate_age_non_text() {
        assert!(validate_age(&RawValue::Null).is_err());
    }

    #[test]
    fn test_fuzzify_age() {
        assert_eq!(fuzzify_age(Some("20")).as_deref(), Some("20-25"));
        assert_eq!(fuzzify_age(Some("22")).as_deref(), Some("20-25"));
        assert_eq!(fuzzify_age(Some("21-22")).as_deref(), Some("20-25"));
        assert_eq!(fuzzify_age(Some("40-48")).as_deref(), Some("40-48"));
        assert_eq!(fuzzify_age(Some("40-40")).as_deref(), Some("40-45"));
        assert_eq!(fuzzify_age(None), None);
        assert_eq!(fuzzify_age(Some("banana")), None);
    }

    #[test]
    fn test_fuzzify_age_reversed_and_full_width() {
        assert_eq!(fuzzify_age(Some("30-22")).as_deref(), Some("20-30"));
        assert_eq!(fuzzify_age(Some("\u{ff12}\u{ff12}")).as_deref(), Some("20-25"));
        assert_eq!(fuzzify_age(Some("0")).as_deref(), Some("0-5"));
    }

    #[test]
    fn test_fuzzify_age_other_scripts() {
        assert_eq!(fuzzify_age(Some("\u{662}\u{660}")).as_deref(), Some("20-25"));
        assert_eq!(
            fuzzify_age(Some("\u{968}\u{966}-\u{969}\u{966}")).as_deref(),
            Some("20-30")
        );
        assert_eq!(fuzzify_age(Some("\u{664}\u{662}")).as_deref(), Some("40-45"));
    }
}
