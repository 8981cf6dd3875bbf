use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::holding::Holding;

/// An immutable, dated copy of the full holding list plus cached
/// aggregate totals.
///
/// **Important**: the totals are computed once at save time and stored,
/// not recomputed on load. Imports trust them as-is (missing fields
/// default to zero), so a crafted import can desynchronize totals from
/// the embedded holdings — kept as-is rather than silently re-deriving.
///
/// Field names follow the journal's JSON schema exactly; exports from
/// older builds of the app import without translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Calendar day this snapshot covers — unique key within a journal
    pub date: NaiveDate,

    /// Deep copy of the holdings at save time; never aliases the live store
    pub holdings: Vec<Holding>,

    /// Grand total normalized into TWD, cached at save time
    #[serde(rename = "totalValueTWD", default)]
    pub total_value_twd: f64,

    /// Market ETF category total in TWD
    #[serde(rename = "marketEtfValue", default)]
    pub market_etf_value: f64,

    /// Bond ETF category total in TWD
    #[serde(rename = "bondEtfValue", default)]
    pub bond_etf_value: f64,

    /// Individual stock category total in TWD
    #[serde(rename = "individualStockValue", default)]
    pub individual_stock_value: f64,
}
