use serde::{Deserialize, Serialize};

use super::holding::{AssetCategory, Holding};

/// Per-category breakdown, derived from the live holdings on every call.
/// Never persisted — snapshots cache only the final per-category totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Which category this summarizes
    pub category: AssetCategory,

    /// Display label (e.g., "Market ETF")
    pub label: String,

    /// Allocation chart color for this category
    pub color: String,

    /// The holdings that fell into this category
    pub holdings: Vec<Holding>,

    /// Sum of values held directly in TWD
    pub subtotal_twd: f64,

    /// Sum of values held in USD (not yet converted)
    pub subtotal_usd: f64,

    /// Combined total normalized into TWD: subtotal_twd + subtotal_usd × rate
    pub total_twd: f64,
}

/// Grand totals across all three categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Sum of all TWD-denominated holdings
    pub twd: f64,

    /// Sum of all USD-denominated holdings (unconverted)
    pub usd: f64,

    /// Everything normalized into TWD
    pub total_twd: f64,
}
