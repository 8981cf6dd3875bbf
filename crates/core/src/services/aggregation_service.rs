use crate::models::holding::{AssetCategory, Currency, Holding};
use crate::models::summary::{CategorySummary, PortfolioTotals};

/// Fixed USD → TWD exchange rate used for every normalization.
/// There is no live rate fetching anywhere in the system.
pub const USD_TWD_RATE: f64 = 32.5;

/// Derives per-category subtotals and grand totals from the holding list.
///
/// Pure functions, recomputed from scratch on every call — no caching.
/// The tie-out invariant: grand total == Σ category totals
/// == Σ TWD holdings + rate × Σ USD holdings.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Summarize the holdings into exactly three `CategorySummary`
    /// values in fixed display order (market, bond, stock).
    #[must_use]
    pub fn summarize(&self, holdings: &[Holding]) -> Vec<CategorySummary> {
        AssetCategory::ALL
            .iter()
            .map(|&category| self.summarize_category(holdings, category))
            .collect()
    }

    /// Grand totals across a set of category summaries.
    #[must_use]
    pub fn totals(&self, summaries: &[CategorySummary]) -> PortfolioTotals {
        let twd: f64 = summaries.iter().map(|s| s.subtotal_twd).sum();
        let usd: f64 = summaries.iter().map(|s| s.subtotal_usd).sum();
        PortfolioTotals {
            twd,
            usd,
            total_twd: twd + usd * USD_TWD_RATE,
        }
    }

    /// Total TWD value of one category — the number snapshots cache.
    #[must_use]
    pub fn category_total(&self, holdings: &[Holding], category: AssetCategory) -> f64 {
        holdings
            .iter()
            .filter(|h| h.category == category)
            .map(|h| Self::normalized_value(h))
            .sum()
    }

    /// A single holding's value normalized into TWD.
    #[must_use]
    pub fn normalized_value(holding: &Holding) -> f64 {
        match holding.currency {
            Currency::Twd => holding.value,
            Currency::Usd => holding.value * USD_TWD_RATE,
        }
    }

    fn summarize_category(&self, holdings: &[Holding], category: AssetCategory) -> CategorySummary {
        let items: Vec<Holding> = holdings
            .iter()
            .filter(|h| h.category == category)
            .cloned()
            .collect();

        let subtotal_twd: f64 = items
            .iter()
            .filter(|h| h.currency == Currency::Twd)
            .map(|h| h.value)
            .sum();
        let subtotal_usd: f64 = items
            .iter()
            .filter(|h| h.currency == Currency::Usd)
            .map(|h| h.value)
            .sum();

        CategorySummary {
            category,
            label: category.label().to_string(),
            color: category.color().to_string(),
            holdings: items,
            subtotal_twd,
            subtotal_usd,
            total_twd: subtotal_twd + subtotal_usd * USD_TWD_RATE,
        }
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
