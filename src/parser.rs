use crate::types::PrincipalRecord;
use crate::util::{digit_run, parse_barrier, parse_currency, parse_percent};
use csv::ReaderBuilder;
use std::error::Error;

/// Sentinel for "cash on delivery" terms, above any plausible day count.
pub const COD_TERMS_VALUE: f64 = 170.0;
/// Sentinel for "paid in advance" terms, strictly above the COD sentinel.
pub const PIA_TERMS_VALUE: f64 = 200.0;

pub const DEFAULT_MARGIN: f64 = 0.0;
pub const DEFAULT_TERMS_VALUE: f64 = 0.0;
pub const DEFAULT_BARRIER_LEVEL: u8 = 1;
pub const DEFAULT_REVENUE: f64 = 0.0;

/// Expected fields per row: name, margin, credit terms, barrier, revenue.
const FIELD_COUNT: usize = 5;

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub parsed_rows: usize,
    pub skipped_rows: usize,
}

/// Normalize a raw credit-terms field into its numeric value.
///
/// The two special tokens map to fixed sentinels; everything else keeps
/// the first digit run found in the string (so `"60x"` counts as 60
/// days). No digits and no token means zero-day terms.
pub fn normalize_terms(raw: &str) -> f64 {
    match raw.to_uppercase().as_str() {
        "COD" => COD_TERMS_VALUE,
        "PIA" => PIA_TERMS_VALUE,
        other => digit_run(other)
            .map(f64::from)
            .unwrap_or(DEFAULT_TERMS_VALUE),
    }
}

/// Strip surrounding whitespace and one layer of wrapping double quotes
/// from a raw field.
fn strip_field(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Parse a delimited text blob into normalized principal records.
///
/// Pure and total: malformed rows are skipped, malformed fields fall
/// back to their defaults, and the result keeps source-row order. The
/// first line is a header and is discarded without inspection.
pub fn parse_principals(text: &str) -> Vec<PrincipalRecord> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = match result {
            Ok(r) => r,
            Err(_) => continue,
        };
        if row.len() != FIELD_COUNT {
            continue;
        }
        if row.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        // Row index matching the source layout: line 2 is data row 1.
        // Falls back to the iteration ordinal if the reader loses track.
        let row_index = row
            .position()
            .map(|p| p.line().saturating_sub(1) as usize)
            .unwrap_or(idx + 1);

        let name = strip_field(&row[0]).to_string();
        let margin = parse_percent(strip_field(&row[1])).unwrap_or(DEFAULT_MARGIN);
        let credit_terms_label = strip_field(&row[2]).to_string();
        let credit_terms_value = normalize_terms(&credit_terms_label);
        let barrier_level =
            parse_barrier(strip_field(&row[3])).unwrap_or(DEFAULT_BARRIER_LEVEL);
        let revenue = parse_currency(strip_field(&row[4]))
            .map(|v| v.max(0.0))
            .unwrap_or(DEFAULT_REVENUE);

        records.push(PrincipalRecord {
            id: format!("{}-{}", name, row_index),
            name,
            margin,
            credit_terms_label,
            credit_terms_value,
            barrier_level,
            revenue,
        });
    }

    records
}

/// Read and parse a principals CSV from disk, counting how many data
/// rows made it through for console diagnostics.
pub fn load_principals(path: &str) -> Result<(Vec<PrincipalRecord>, LoadReport), Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    let records = parse_principals(&text);
    let total_rows = text
        .lines()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .count();
    let parsed_rows = records.len();
    let report = LoadReport {
        total_rows,
        parsed_rows,
        skipped_rows: total_rows.saturating_sub(parsed_rows),
    };
    Ok((records, report))
}
