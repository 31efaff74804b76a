use crate::parser::{COD_TERMS_VALUE, PIA_TERMS_VALUE};
use crate::types::{ChartPoint, PrincipalRecord};

/// Upper end of the main day-count band; anything between here and the
/// COD sentinel is a long-tail outlier.
pub const NOMINAL_AXIS_MAX: f64 = 120.0;
/// Where outlier day counts land on the axis, inside the visual gap
/// between the main band and the sentinel positions.
pub const OUTLIER_BAND_COORD: f64 = 145.0;

// Reserved coordinates of the offset policy: PIA opens the axis, COD
// sits just after it, day counts shift past both.
const OFFSET_PIA_COORD: f64 = 0.0;
const OFFSET_COD_COORD: f64 = 15.0;
const DAY_COUNT_SHIFT: f64 = 30.0;

/// Bubble colors for barrier levels 1, 2, 3.
pub const BARRIER_COLORS: [&str; 3] = ["#22c55e", "#eab308", "#ef4444"];
/// Fallback for any level outside the palette.
pub const FALLBACK_COLOR: &str = "#94a3b8";

/// How normalized credit-terms values become chart x-coordinates.
///
/// The two policies come from divergent renderings of the same data and
/// are deliberately kept separate; `OutlierBand` is the default because
/// it reads shortest terms to longest with COD and PIA always last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisPolicy {
    /// Day counts pass through; outliers above the nominal maximum
    /// collapse into a reserved gap; COD and PIA keep their sentinel
    /// coordinates at the far end.
    #[default]
    OutlierBand,
    /// Legacy rendering that opens with the immediate-payment positions:
    /// PIA at the origin, COD just after, day counts shifted past both.
    OffsetAfterImmediate,
}

impl AxisPolicy {
    pub fn name(self) -> &'static str {
        match self {
            AxisPolicy::OutlierBand => "outlier band",
            AxisPolicy::OffsetAfterImmediate => "offset after immediate",
        }
    }

    /// Map a normalized credit-terms value to its x-coordinate.
    ///
    /// Stateless and idempotent: the coordinate depends on the value
    /// alone, never on the rest of the dataset.
    pub fn map_terms(self, terms_value: f64) -> f64 {
        match self {
            AxisPolicy::OutlierBand => {
                if terms_value > NOMINAL_AXIS_MAX && terms_value < COD_TERMS_VALUE {
                    OUTLIER_BAND_COORD
                } else {
                    terms_value
                }
            }
            AxisPolicy::OffsetAfterImmediate => {
                if terms_value == PIA_TERMS_VALUE {
                    OFFSET_PIA_COORD
                } else if terms_value == COD_TERMS_VALUE {
                    OFFSET_COD_COORD
                } else {
                    terms_value + DAY_COUNT_SHIFT
                }
            }
        }
    }

    /// Axis label for a tick coordinate. The token overrides apply only
    /// at the exact reserved coordinates; every other tick shows the
    /// day count with a `d` suffix.
    pub fn tick_label(self, coord: f64) -> String {
        match self {
            AxisPolicy::OutlierBand => {
                if coord == COD_TERMS_VALUE {
                    "COD".to_string()
                } else if coord == PIA_TERMS_VALUE {
                    "PIA".to_string()
                } else {
                    format!("{}d", coord)
                }
            }
            AxisPolicy::OffsetAfterImmediate => {
                if coord == OFFSET_PIA_COORD {
                    "PIA".to_string()
                } else if coord == OFFSET_COD_COORD {
                    "COD".to_string()
                } else {
                    format!("{}d", coord - DAY_COUNT_SHIFT)
                }
            }
        }
    }

    /// Tick positions a renderer should draw for this policy.
    pub fn ticks(self) -> &'static [f64] {
        match self {
            AxisPolicy::OutlierBand => &[0.0, 30.0, 60.0, 90.0, 120.0, 170.0, 200.0],
            AxisPolicy::OffsetAfterImmediate => &[0.0, 15.0, 30.0, 60.0, 90.0, 120.0, 150.0],
        }
    }
}

/// Bubble size metric: area-proportional rendering squares the radius,
/// so the metric must be exactly sqrt(revenue).
pub fn size_metric(revenue: f64) -> f64 {
    revenue.sqrt()
}

pub fn barrier_color(level: u8) -> &'static str {
    match level {
        1..=3 => BARRIER_COLORS[(level - 1) as usize],
        _ => FALLBACK_COLOR,
    }
}

/// Project one record into its chart point under the given policy.
pub fn chart_point(record: &PrincipalRecord, policy: AxisPolicy) -> ChartPoint {
    ChartPoint {
        x: policy.map_terms(record.credit_terms_value),
        y: record.margin,
        size: size_metric(record.revenue),
        name: record.name.clone(),
        original_terms: record.credit_terms_label.clone(),
        barrier_level: record.barrier_level,
        revenue: record.revenue,
        color: barrier_color(record.barrier_level),
    }
}
