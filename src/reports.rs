use crate::axis::{chart_point, AxisPolicy};
use crate::parser::COD_TERMS_VALUE;
use crate::types::{
    ChartPoint, ChartPointRow, NarrativeEntry, PrincipalRecord, PrincipalTableRow, RecordFilter,
    SortKey, SortOrder, SummaryStats,
};
use crate::util::format_number;
use std::cmp::Ordering;

impl RecordFilter {
    /// True when the record satisfies every set criterion.
    pub fn matches(&self, r: &PrincipalRecord) -> bool {
        if let Some(q) = &self.name_query {
            if !r.name.to_lowercase().contains(&q.to_lowercase()) {
                return false;
            }
        }
        if let Some(q) = &self.terms_query {
            if !r
                .credit_terms_label
                .to_lowercase()
                .contains(&q.to_lowercase())
            {
                return false;
            }
        }
        if let Some(min) = self.min_margin {
            if r.margin < min {
                return false;
            }
        }
        if let Some(min) = self.min_terms {
            if r.credit_terms_value < min {
                return false;
            }
        }
        if let Some(min) = self.min_revenue {
            if r.revenue < min {
                return false;
            }
        }
        if let Some(level) = self.barrier_level {
            if r.barrier_level != level {
                return false;
            }
        }
        true
    }
}

pub fn filter_records(data: &[PrincipalRecord], filter: &RecordFilter) -> Vec<PrincipalRecord> {
    data.iter().filter(|r| filter.matches(r)).cloned().collect()
}

/// Sort in place by one column. The sort is stable, so rows that compare
/// equal keep their source order as the tie-break.
pub fn sort_records(data: &mut [PrincipalRecord], key: SortKey, order: SortOrder) {
    let by_key = |a: &PrincipalRecord, b: &PrincipalRecord| -> Ordering {
        match key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Margin => a.margin.partial_cmp(&b.margin).unwrap_or(Ordering::Equal),
            SortKey::CreditTerms => a
                .credit_terms_value
                .partial_cmp(&b.credit_terms_value)
                .unwrap_or(Ordering::Equal),
            SortKey::Revenue => a.revenue.partial_cmp(&b.revenue).unwrap_or(Ordering::Equal),
            SortKey::Barrier => a.barrier_level.cmp(&b.barrier_level),
        }
    };
    match order {
        SortOrder::Ascending => data.sort_by(by_key),
        SortOrder::Descending => data.sort_by(|a, b| by_key(b, a)),
    }
}

/// Project every visible record into a chart point. Recomputed on each
/// call so the points can never go stale against the filtered set.
pub fn chart_points(data: &[PrincipalRecord], policy: AxisPolicy) -> Vec<ChartPoint> {
    data.iter().map(|r| chart_point(r, policy)).collect()
}

pub fn breakdown_rows(data: &[PrincipalRecord]) -> Vec<PrincipalTableRow> {
    data.iter()
        .map(|r| PrincipalTableRow {
            id: r.id.clone(),
            name: r.name.clone(),
            margin: format!("{}%", r.margin),
            credit_terms: r.credit_terms_label.clone(),
            revenue: format!("${}", format_number(r.revenue, 2)),
            barrier: format!("Level {}", r.barrier_level),
        })
        .collect()
}

pub fn chart_point_rows(points: &[ChartPoint]) -> Vec<ChartPointRow> {
    points
        .iter()
        .map(|p| ChartPointRow {
            name: p.name.clone(),
            x: format!("{}", p.x),
            margin: format!("{}%", p.y),
            terms: p.original_terms.clone(),
            size: format_number(p.size, 1),
            color: p.color.to_string(),
        })
        .collect()
}

/// Portfolio aggregates over the visible set. An empty set yields all
/// zeros rather than NaNs.
pub fn portfolio_summary(data: &[PrincipalRecord]) -> SummaryStats {
    let total_principals = data.len();
    let total_revenue: f64 = data.iter().map(|r| r.revenue).sum();
    let avg_margin = if data.is_empty() {
        0.0
    } else {
        data.iter().map(|r| r.margin).sum::<f64>() / data.len() as f64
    };
    let high_barrier_count = data.iter().filter(|r| r.barrier_level == 3).count();
    let immediate_terms_count = data
        .iter()
        .filter(|r| r.credit_terms_value >= COD_TERMS_VALUE)
        .count();
    SummaryStats {
        total_principals,
        total_revenue,
        avg_margin,
        high_barrier_count,
        immediate_terms_count,
    }
}

/// The projection consumed by the external narrative-summary service.
pub fn summary_payload(data: &[PrincipalRecord]) -> Vec<NarrativeEntry> {
    data.iter()
        .map(|r| NarrativeEntry {
            name: r.name.clone(),
            margin: r.margin,
            revenue: r.revenue,
            terms: r.credit_terms_label.clone(),
            barrier: r.barrier_level,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::PIA_TERMS_VALUE;

    fn rec(name: &str, margin: f64, terms: &str, value: f64, barrier: u8, revenue: f64) -> PrincipalRecord {
        PrincipalRecord {
            id: format!("{}-0", name),
            name: name.to_string(),
            margin,
            credit_terms_label: terms.to_string(),
            credit_terms_value: value,
            barrier_level: barrier,
            revenue,
        }
    }

    fn sample() -> Vec<PrincipalRecord> {
        vec![
            rec("Amedei", 46.0, "60x", 60.0, 3, 43678.17),
            rec("Botter", 48.0, "90", 90.0, 1, 11693.82),
            rec("Scrappy's Bitters", 73.0, "COD", COD_TERMS_VALUE, 1, 463.82),
            rec("Vincente", 55.0, "PIA", PIA_TERMS_VALUE, 2, 6701.44),
        ]
    }

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        let data = sample();
        let filter = RecordFilter {
            name_query: Some("bot".to_string()),
            ..RecordFilter::default()
        };
        let hits = filter_records(&data, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Botter");
    }

    #[test]
    fn empty_filter_passes_everything() {
        let data = sample();
        assert_eq!(filter_records(&data, &RecordFilter::default()).len(), data.len());
    }

    #[test]
    fn numeric_filters_are_minimum_thresholds() {
        let data = sample();
        let filter = RecordFilter {
            min_revenue: Some(10000.0),
            ..RecordFilter::default()
        };
        let hits = filter_records(&data, &filter);
        assert_eq!(hits.len(), 2);

        let filter = RecordFilter {
            min_margin: Some(50.0),
            min_terms: Some(COD_TERMS_VALUE),
            ..RecordFilter::default()
        };
        let hits = filter_records(&data, &filter);
        let names: Vec<&str> = hits.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Scrappy's Bitters", "Vincente"]);
    }

    #[test]
    fn barrier_filter_is_exact_match() {
        let data = sample();
        let filter = RecordFilter {
            barrier_level: Some(1),
            ..RecordFilter::default()
        };
        assert_eq!(filter_records(&data, &filter).len(), 2);
    }

    #[test]
    fn sort_by_revenue_descending() {
        let mut data = sample();
        sort_records(&mut data, SortKey::Revenue, SortOrder::Descending);
        let names: Vec<&str> = data.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Amedei", "Botter", "Vincente", "Scrappy's Bitters"]);
    }

    #[test]
    fn sort_ties_keep_source_order() {
        let mut data = vec![
            rec("First", 30.0, "90", 90.0, 1, 500.0),
            rec("Second", 40.0, "90", 90.0, 2, 500.0),
            rec("Third", 50.0, "30", 30.0, 3, 500.0),
        ];
        sort_records(&mut data, SortKey::Revenue, SortOrder::Descending);
        let names: Vec<&str> = data.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);

        sort_records(&mut data, SortKey::Revenue, SortOrder::Ascending);
        let names: Vec<&str> = data.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn chart_points_follow_the_visible_set() {
        let data = sample();
        let points = chart_points(&data, AxisPolicy::OutlierBand);
        assert_eq!(points.len(), data.len());
        assert_eq!(points[0].x, 60.0);
        assert_eq!(points[2].x, COD_TERMS_VALUE);
        assert_eq!(points[3].x, PIA_TERMS_VALUE);

        let filtered = filter_records(
            &data,
            &RecordFilter {
                barrier_level: Some(3),
                ..RecordFilter::default()
            },
        );
        assert_eq!(chart_points(&filtered, AxisPolicy::OutlierBand).len(), 1);
    }

    #[test]
    fn summary_counts_and_totals() {
        let stats = portfolio_summary(&sample());
        assert_eq!(stats.total_principals, 4);
        assert_eq!(stats.high_barrier_count, 1);
        assert_eq!(stats.immediate_terms_count, 2);
        assert!((stats.total_revenue - 62537.25).abs() < 1e-6);
        assert!((stats.avg_margin - 55.5).abs() < 1e-9);
    }

    #[test]
    fn summary_of_empty_set_is_all_zeros() {
        let stats = portfolio_summary(&[]);
        assert_eq!(stats.total_principals, 0);
        assert_eq!(stats.total_revenue, 0.0);
        assert_eq!(stats.avg_margin, 0.0);
        assert_eq!(stats.immediate_terms_count, 0);
    }

    #[test]
    fn narrative_payload_projects_the_contract_fields() {
        let payload = summary_payload(&sample());
        assert_eq!(payload.len(), 4);
        assert_eq!(payload[2].name, "Scrappy's Bitters");
        assert_eq!(payload[2].terms, "COD");
        assert_eq!(payload[2].barrier, 1);
        let json = serde_json::to_value(&payload[0]).unwrap();
        assert_eq!(json["margin"], 46.0);
        assert_eq!(json["revenue"], 43678.17);
    }

    #[test]
    fn breakdown_rows_format_for_display() {
        let rows = breakdown_rows(&sample()[..1]);
        assert_eq!(rows[0].id, "Amedei-0");
        assert_eq!(rows[0].name, "Amedei");
        assert_eq!(rows[0].margin, "46%");
        assert_eq!(rows[0].credit_terms, "60x");
        assert_eq!(rows[0].revenue, "$43,678.17");
        assert_eq!(rows[0].barrier, "Level 3");
    }
}
