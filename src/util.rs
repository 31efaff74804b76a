// Field-level parsing and formatting helpers.
//
// This module centralizes the "dirty" text handling so the parser can
// assume each helper either yields a clean typed value or `None`.
use num_format::{Locale, ToFormattedString};

/// Parse a percentage string like `"46%"` into `46.0`.
///
/// - Trims whitespace and a trailing `%` sign (a bare number also works).
/// - Returns `None` for anything that does not parse as a float.
pub fn parse_percent(s: &str) -> Option<f64> {
    let s = s.trim().trim_end_matches('%').trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Parse a currency string like `" $ 43,678.17 "` into `43678.17`.
///
/// Strips dollar signs, thousands separators and all whitespace before
/// parsing; anything left that is not a plain float yields `None`.
pub fn parse_currency(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Extract the first contiguous run of ASCII digits anywhere in the
/// string as an integer, e.g. `"60x"` -> `60`, `"NET 30"` -> `30`.
///
/// Returns `None` when the string contains no digits at all.
pub fn digit_run(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let run: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    run.parse::<u32>().ok()
}

/// Parse a barrier-to-entry level, accepting only the valid range 1-3.
pub fn parse_barrier(s: &str) -> Option<u8> {
    match s.trim().parse::<u8>() {
        Ok(level @ 1..=3) => Some(level),
        _ => None,
    }
}

/// Format a float with fixed decimals and thousands separators,
/// e.g. `43678.17` -> `"43,678.17"`.
pub fn format_number(n: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    // `num-format` only groups integers, so the fraction is re-attached
    // after grouping.
    let grouped = int_part
        .parse::<i64>()
        .unwrap_or(0)
        .to_formatted_string(&Locale::en);
    let mut out = String::new();
    if n.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Thousands-separated integer formatting for console counts.
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
