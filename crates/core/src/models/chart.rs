use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One slice of the current-allocation pie chart.
///
/// Percentages are left to the renderer (value / sum of all slice
/// values), matching how the tooltip computes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    /// Legend label (category display label)
    pub label: String,

    /// Slice value in TWD
    pub value: f64,

    /// Fill color
    pub color: String,
}

/// One stacked series of the trend chart: a category band in the
/// overview, or a single symbol in the per-category view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    /// Stable series key (category wire name or ticker symbol)
    pub key: String,

    /// Legend label
    pub name: String,

    /// Band color
    pub color: String,
}

/// One point of the trend chart — one journal snapshot.
///
/// `values[i]` belongs to `TrendChart::series[i]`; symbols absent from a
/// snapshot contribute 0.0, so every point has the same arity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Full snapshot date, kept for click-to-select interactions
    pub date: NaiveDate,

    /// Short axis label, `MM-DD`
    pub label: String,

    /// Stacked values in series order, all in TWD
    pub values: Vec<f64>,

    /// Total for this snapshot in TWD
    pub total: f64,
}

/// A complete trend data set ready for a stacked-area renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChart {
    /// Series definitions in stack order (bottom first)
    pub series: Vec<TrendSeries>,

    /// One point per snapshot, ascending by date
    pub points: Vec<TrendPoint>,
}
