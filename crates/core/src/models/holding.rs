use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The currency a holding is denominated in.
///
/// TWD is the reporting currency — every total and chart value is
/// normalized into it. USD holdings are converted at a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "TWD")]
    Twd,
    #[serde(rename = "USD")]
    Usd,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Twd => write!(f, "TWD"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

/// The category a holding belongs to. Closed set of three.
///
/// Wire names (`MarketETF` etc.) match the journal's storage schema, so
/// files exported by older builds import without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    #[serde(rename = "MarketETF")]
    MarketEtf,
    #[serde(rename = "BondETF")]
    BondEtf,
    #[serde(rename = "IndividualStock")]
    IndividualStock,
}

impl AssetCategory {
    /// The three categories in their fixed display order.
    pub const ALL: [AssetCategory; 3] = [
        AssetCategory::MarketEtf,
        AssetCategory::BondEtf,
        AssetCategory::IndividualStock,
    ];

    /// Human-readable label used in summaries and chart legends.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AssetCategory::MarketEtf => "Market ETF",
            AssetCategory::BondEtf => "Bond ETF",
            AssetCategory::IndividualStock => "Stocks",
        }
    }

    /// Color used for this category's slice in the allocation chart.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            AssetCategory::MarketEtf => "#0f172a",
            AssetCategory::BondEtf => "#475569",
            AssetCategory::IndividualStock => "#94a3b8",
        }
    }

    /// Color used for this category's band in the overview trend chart.
    #[must_use]
    pub fn trend_color(&self) -> &'static str {
        match self {
            AssetCategory::MarketEtf => "#1e293b",
            AssetCategory::BondEtf => "#64748b",
            AssetCategory::IndividualStock => "#cbd5e1",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One recorded position: a single instrument in a single currency and
/// category.
///
/// The id is an opaque string, assigned at creation and stable across
/// edits. Imported journals may carry arbitrary id strings; we only ever
/// compare them for equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Opaque identity, stable across edits
    pub id: String,

    /// Ticker symbol, normalized to uppercase alphanumeric (e.g., "0050", "VTI")
    pub symbol: String,

    /// Value in the holding's own currency
    pub value: f64,

    /// Currency the value is denominated in
    pub currency: Currency,

    /// Which of the three categories this position belongs to
    pub category: AssetCategory,
}

impl Holding {
    /// Create a holding with a freshly generated identity.
    /// The symbol is normalized via [`normalize_symbol`].
    pub fn new(
        symbol: impl AsRef<str>,
        value: f64,
        currency: Currency,
        category: AssetCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            symbol: normalize_symbol(symbol.as_ref()),
            value,
            currency,
            category,
        }
    }
}

/// Normalize a free-text ticker to uppercase alphanumeric.
/// Everything else (spaces, punctuation, unicode) is dropped.
#[must_use]
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
