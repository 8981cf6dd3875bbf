use crate::models::chart::{AllocationSlice, TrendChart, TrendPoint, TrendSeries};
use crate::models::holding::AssetCategory;
use crate::models::snapshot::PortfolioSnapshot;
use crate::models::summary::CategorySummary;
use crate::services::aggregation_service::AggregationService;

/// Shade palette cycled over symbols in the per-category trend view.
const SYMBOL_PALETTE: [&str; 6] = [
    "#0f172a", "#334155", "#64748b", "#94a3b8", "#cbd5e1", "#e2e8f0",
];

/// Turns summaries and journal history into render-ready chart data.
/// No drawing here — adapters only.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Pie slices for the current allocation. Empty categories are
    /// dropped so the renderer never draws a zero-width slice.
    #[must_use]
    pub fn allocation(&self, summaries: &[CategorySummary]) -> Vec<AllocationSlice> {
        summaries
            .iter()
            .filter(|s| s.total_twd > 0.0)
            .map(|s| AllocationSlice {
                label: s.label.clone(),
                value: s.total_twd,
                color: s.color.clone(),
            })
            .collect()
    }

    /// A slice's share of the whole, as a percentage. Zero when the
    /// chart itself is empty.
    #[must_use]
    pub fn slice_percentage(slices: &[AllocationSlice], slice: &AllocationSlice) -> f64 {
        let sum: f64 = slices.iter().map(|s| s.value).sum();
        if sum <= 0.0 {
            0.0
        } else {
            slice.value / sum * 100.0
        }
    }

    /// Stacked-area trend data over the journal history.
    ///
    /// `filter = None` gives the overview: three category bands using the
    /// totals cached on each snapshot, stacked stock → bond → market.
    /// `filter = Some(category)` breaks one category down per symbol,
    /// recomputed from each snapshot's holding list.
    #[must_use]
    pub fn trend(
        &self,
        snapshots: &[PortfolioSnapshot],
        filter: Option<AssetCategory>,
    ) -> TrendChart {
        match filter {
            None => Self::overview_trend(snapshots),
            Some(category) => Self::category_trend(snapshots, category),
        }
    }

    fn overview_trend(snapshots: &[PortfolioSnapshot]) -> TrendChart {
        // Stack order: lightest band (stocks) at the bottom, darkest
        // (market ETF) on top.
        let stack = [
            AssetCategory::IndividualStock,
            AssetCategory::BondEtf,
            AssetCategory::MarketEtf,
        ];

        let series = stack
            .iter()
            .map(|&category| TrendSeries {
                key: Self::category_key(category).to_string(),
                name: category.label().to_string(),
                color: category.trend_color().to_string(),
            })
            .collect();

        let points = snapshots
            .iter()
            .map(|snapshot| TrendPoint {
                date: snapshot.date,
                label: snapshot.date.format("%m-%d").to_string(),
                values: vec![
                    snapshot.individual_stock_value,
                    snapshot.bond_etf_value,
                    snapshot.market_etf_value,
                ],
                total: snapshot.total_value_twd,
            })
            .collect();

        TrendChart { series, points }
    }

    fn category_trend(snapshots: &[PortfolioSnapshot], category: AssetCategory) -> TrendChart {
        // Symbols in first-appearance order across the whole history,
        // so a symbol keeps its band color as new snapshots arrive.
        let mut symbols: Vec<String> = Vec::new();
        for snapshot in snapshots {
            for holding in snapshot.holdings.iter().filter(|h| h.category == category) {
                if !symbols.contains(&holding.symbol) {
                    symbols.push(holding.symbol.clone());
                }
            }
        }

        let series: Vec<TrendSeries> = symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| TrendSeries {
                key: symbol.clone(),
                name: symbol.clone(),
                color: SYMBOL_PALETTE[i % SYMBOL_PALETTE.len()].to_string(),
            })
            .collect();

        let points = snapshots
            .iter()
            .map(|snapshot| {
                let values: Vec<f64> = symbols
                    .iter()
                    .map(|symbol| {
                        snapshot
                            .holdings
                            .iter()
                            .filter(|h| h.category == category && &h.symbol == symbol)
                            .map(AggregationService::normalized_value)
                            .sum()
                    })
                    .collect();
                let total = values.iter().sum();

                TrendPoint {
                    date: snapshot.date,
                    label: snapshot.date.format("%m-%d").to_string(),
                    values,
                    total,
                }
            })
            .collect();

        TrendChart { series, points }
    }

    fn category_key(category: AssetCategory) -> &'static str {
        match category {
            AssetCategory::MarketEtf => "MarketETF",
            AssetCategory::BondEtf => "BondETF",
            AssetCategory::IndividualStock => "IndividualStock",
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
