use serde::Serialize;
use tabled::Tabled;

/// One normalized principal, produced by the parser.
///
/// Records are immutable once parsed; every downstream view works on a
/// copy of the record set and never writes back into it.
#[derive(Debug, Clone)]
pub struct PrincipalRecord {
    /// Stable list key, unique within one parse: name plus the 1-based
    /// data-row index.
    pub id: String,
    pub name: String,
    /// Profit margin in percent, e.g. 46.0 for "46%".
    pub margin: f64,
    /// The raw credit-terms field, kept verbatim for display.
    pub credit_terms_label: String,
    /// Normalized credit terms: a day count, or one of the two sentinel
    /// values for COD / PIA.
    pub credit_terms_value: f64,
    /// Barrier to entry, always 1, 2 or 3.
    pub barrier_level: u8,
    /// Annual revenue in dollars, never negative.
    pub revenue: f64,
}

/// A single bubble on the terms/margin chart, derived from one record at
/// render time. Recomputed on every view; never cached.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    /// Mapped x-coordinate on the credit-terms axis.
    pub x: f64,
    /// Margin percent.
    pub y: f64,
    /// Bubble size metric, sqrt(revenue).
    pub size: f64,
    pub name: String,
    pub original_terms: String,
    pub barrier_level: u8,
    pub revenue: f64,
    pub color: &'static str,
}

/// Sortable columns of the breakdown view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Margin,
    CreditTerms,
    Revenue,
    Barrier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Per-column filter criteria. Every set criterion must hold for a
/// record to pass; an empty filter passes everything.
///
/// Comparison semantics per column: substring (case-insensitive) for
/// text, minimum threshold for numeric columns, exact match for the
/// barrier level.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub name_query: Option<String>,
    pub terms_query: Option<String>,
    pub min_margin: Option<f64>,
    pub min_terms: Option<f64>,
    pub min_revenue: Option<f64>,
    pub barrier_level: Option<u8>,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct PrincipalTableRow {
    /// The record's stable key, kept in the export so downstream views
    /// can track rows across re-sorts.
    #[serde(rename = "Id")]
    #[tabled(rename = "Id")]
    pub id: String,
    #[serde(rename = "Principal")]
    #[tabled(rename = "Principal")]
    pub name: String,
    #[serde(rename = "MarginPct")]
    #[tabled(rename = "Margin %")]
    pub margin: String,
    #[serde(rename = "CreditTerms")]
    #[tabled(rename = "Credit Terms")]
    pub credit_terms: String,
    #[serde(rename = "Revenue")]
    #[tabled(rename = "Revenue")]
    pub revenue: String,
    #[serde(rename = "Barrier")]
    #[tabled(rename = "Barrier")]
    pub barrier: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ChartPointRow {
    #[serde(rename = "Principal")]
    #[tabled(rename = "Principal")]
    pub name: String,
    #[serde(rename = "X")]
    #[tabled(rename = "X")]
    pub x: String,
    #[serde(rename = "MarginPct")]
    #[tabled(rename = "Margin %")]
    pub margin: String,
    #[serde(rename = "Terms")]
    #[tabled(rename = "Terms")]
    pub terms: String,
    #[serde(rename = "Size")]
    #[tabled(rename = "Size")]
    pub size: String,
    #[serde(rename = "Color")]
    #[tabled(rename = "Color")]
    pub color: String,
}

/// Portfolio-wide aggregates over the visible record set.
#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub total_principals: usize,
    pub total_revenue: f64,
    pub avg_margin: f64,
    pub high_barrier_count: usize,
    pub immediate_terms_count: usize,
}

/// The field subset handed to the external narrative-summary service.
/// The service itself is out of process; this projection is the whole
/// contract with it.
#[derive(Debug, Serialize, Clone)]
pub struct NarrativeEntry {
    pub name: String,
    pub margin: f64,
    pub revenue: f64,
    pub terms: String,
    pub barrier: u8,
}
