pub mod advisor;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;

use advisor::AdvisorClient;
use errors::CoreError;
use models::{
    chart::{AllocationSlice, TrendChart},
    holding::{AssetCategory, Currency, Holding},
    snapshot::PortfolioSnapshot,
    summary::{CategorySummary, PortfolioTotals},
};
use services::{
    aggregation_service::AggregationService, calc, chart_service::ChartService,
    holding_service::HoldingService, journal_service::JournalService,
};
use storage::store::SnapshotStore;

/// Main entry point for the portfolio journal core library.
/// Holds the live holding list, the snapshot journal and the services
/// that operate on them.
#[must_use]
pub struct PortfolioJournal {
    holdings: Vec<Holding>,
    journal: JournalService,
    holding_service: HoldingService,
    aggregation_service: AggregationService,
    chart_service: ChartService,
    advisor: AdvisorClient,
    /// Id of the holding currently open in an edit session, if any.
    editing_id: Option<String>,
    /// True while an advisory request is in flight.
    analyzing: bool,
}

impl std::fmt::Debug for PortfolioJournal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioJournal")
            .field("holdings", &self.holdings.len())
            .field("snapshots", &self.journal.list().len())
            .field("editing_id", &self.editing_id)
            .field("analyzing", &self.analyzing)
            .finish()
    }
}

impl PortfolioJournal {
    /// Create a journal over the given store with an empty holding list.
    /// Without an API key the advisory panel degrades to a fixed message.
    pub fn new(store: Box<dyn SnapshotStore>, api_key: Option<String>) -> Self {
        Self::build(store, api_key, Vec::new())
    }

    /// Create a journal pre-seeded with a demonstration portfolio.
    pub fn with_sample_holdings(store: Box<dyn SnapshotStore>, api_key: Option<String>) -> Self {
        Self::build(store, api_key, sample_holdings())
    }

    /// Replace the advisor (tests, alternative backends).
    pub fn with_advisor(mut self, advisor: AdvisorClient) -> Self {
        self.advisor = advisor;
        self
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// The live holding list, in insertion order.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Add a holding. The value is a free-text expression ("25000",
    /// "1500+200") evaluated before validation. Merges into an existing
    /// row with the same (symbol, currency, category); returns the id of
    /// the affected row.
    pub fn add_holding(
        &mut self,
        symbol: &str,
        value_expr: &str,
        currency: Currency,
        category: AssetCategory,
    ) -> Result<String, CoreError> {
        let value = calc::evaluate(value_expr)?;
        self.holding_service
            .add_or_merge(&mut self.holdings, symbol, value, currency, category)
    }

    /// Open an edit session on the holding with the given id.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), CoreError> {
        if !self.holdings.iter().any(|h| h.id == id) {
            return Err(CoreError::HoldingNotFound(id.to_string()));
        }
        self.editing_id = Some(id.to_string());
        Ok(())
    }

    /// Abandon the current edit session, if any.
    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
    }

    /// The holding currently open for editing, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&Holding> {
        let id = self.editing_id.as_deref()?;
        self.holdings.iter().find(|h| h.id == id)
    }

    /// Commit the edit session: replace every field of the holding being
    /// edited and close the session. No merge check is performed, so an
    /// update may leave duplicate (symbol, currency, category) rows.
    pub fn update_holding(
        &mut self,
        symbol: &str,
        value_expr: &str,
        currency: Currency,
        category: AssetCategory,
    ) -> Result<(), CoreError> {
        let id = self
            .editing_id
            .clone()
            .ok_or_else(|| CoreError::InvalidValue("No holding is being edited".into()))?;
        let value = calc::evaluate(value_expr)?;
        self.holding_service
            .update(&mut self.holdings, &id, symbol, value, currency, category)?;
        self.editing_id = None;
        Ok(())
    }

    /// Remove the holding with the given id. Closes the edit session if
    /// it pointed at the removed row.
    pub fn remove_holding(&mut self, id: &str) -> Result<Holding, CoreError> {
        let removed = self.holding_service.remove(&mut self.holdings, id)?;
        if self.editing_id.as_deref() == Some(id) {
            self.editing_id = None;
        }
        Ok(removed)
    }

    /// Live preview of a value expression as the user types.
    /// `None` while the input doesn't evaluate.
    #[must_use]
    pub fn preview_value(&self, expr: &str) -> Option<f64> {
        calc::preview(expr)
    }

    // ── Aggregation ─────────────────────────────────────────────────

    /// The three category summaries in fixed display order.
    #[must_use]
    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        self.aggregation_service.summarize(&self.holdings)
    }

    /// Grand totals over the live holdings.
    #[must_use]
    pub fn totals(&self) -> PortfolioTotals {
        let summaries = self.aggregation_service.summarize(&self.holdings);
        self.aggregation_service.totals(&summaries)
    }

    // ── Journal ─────────────────────────────────────────────────────

    /// All recorded snapshots, ascending by date after any save.
    #[must_use]
    pub fn snapshots(&self) -> &[PortfolioSnapshot] {
        self.journal.list()
    }

    /// Whether a snapshot exists for the date.
    #[must_use]
    pub fn has_entry(&self, date: NaiveDate) -> bool {
        self.journal.has_entry(date)
    }

    /// Whether the snapshot for `date` exists and matches the live
    /// holdings exactly — i.e. archiving again would change nothing.
    #[must_use]
    pub fn is_synced(&self, date: NaiveDate) -> bool {
        self.journal
            .get(date)
            .is_some_and(|s| s.holdings == self.holdings)
    }

    /// Archive the live holdings under `date`, replacing any prior
    /// snapshot for the same day.
    pub fn save_snapshot(&mut self, date: NaiveDate) -> Result<(), CoreError> {
        self.journal.save(date, &self.holdings)?;
        Ok(())
    }

    /// Delete the snapshot for `date`. No-op when absent.
    pub fn delete_snapshot(&mut self, date: NaiveDate) -> Result<(), CoreError> {
        self.journal.delete(date)
    }

    /// Copy a snapshot's holdings back into the live workspace.
    /// The journal itself is untouched; the edit session is closed.
    pub fn load_snapshot(&mut self, date: NaiveDate) -> Result<(), CoreError> {
        let snapshot = self
            .journal
            .get(date)
            .ok_or_else(|| CoreError::Storage(format!("No snapshot recorded for {date}")))?;
        self.holdings = snapshot.holdings.clone();
        self.editing_id = None;
        Ok(())
    }

    /// Replace the whole journal from an exported payload.
    pub fn import_journal(&mut self, payload: &str) -> Result<usize, CoreError> {
        let snapshots = self.journal.import(payload)?;
        Ok(snapshots.len())
    }

    /// Serialize the full journal for download.
    pub fn export_journal(&self) -> Result<String, CoreError> {
        self.journal.export()
    }

    /// Suggested filename for the exported journal.
    #[must_use]
    pub fn export_filename(today: NaiveDate) -> String {
        JournalService::export_filename(today)
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Pie slices for the current allocation.
    #[must_use]
    pub fn allocation_chart(&self) -> Vec<AllocationSlice> {
        let summaries = self.aggregation_service.summarize(&self.holdings);
        self.chart_service.allocation(&summaries)
    }

    /// Stacked trend data over the journal history. `None` for the
    /// category overview, `Some(category)` for the per-symbol breakdown.
    #[must_use]
    pub fn trend_chart(&self, filter: Option<AssetCategory>) -> TrendChart {
        self.chart_service.trend(self.journal.list(), filter)
    }

    // ── Advisory ────────────────────────────────────────────────────

    /// True while an advisory request is in flight.
    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    /// Whether the advisor has a backend to talk to.
    #[must_use]
    pub fn advisor_configured(&self) -> bool {
        self.advisor.is_configured()
    }

    /// Ask the advisor to review the current allocation. Never errs:
    /// failures degrade to a fixed message.
    pub async fn analyze(&mut self) -> String {
        let summaries = self.aggregation_service.summarize(&self.holdings);
        let totals = self.aggregation_service.totals(&summaries);

        self.analyzing = true;
        let advice = self.advisor.analyze(&summaries, totals.total_twd).await;
        self.analyzing = false;
        advice
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(
        store: Box<dyn SnapshotStore>,
        api_key: Option<String>,
        holdings: Vec<Holding>,
    ) -> Self {
        Self {
            holdings,
            journal: JournalService::new(store),
            holding_service: HoldingService::new(),
            aggregation_service: AggregationService::new(),
            chart_service: ChartService::new(),
            advisor: AdvisorClient::new(api_key),
            editing_id: None,
            analyzing: false,
        }
    }
}

/// Demonstration portfolio: two market ETFs, two bond ETFs, two stocks,
/// mixing TWD and USD positions.
fn sample_holdings() -> Vec<Holding> {
    vec![
        Holding::new("0050", 1_500_000.0, Currency::Twd, AssetCategory::MarketEtf),
        Holding::new("VTI", 25_000.0, Currency::Usd, AssetCategory::MarketEtf),
        Holding::new("BND", 18_000.0, Currency::Usd, AssetCategory::BondEtf),
        Holding::new("00679B", 400_000.0, Currency::Twd, AssetCategory::BondEtf),
        Holding::new("TSLA", 6_000.0, Currency::Usd, AssetCategory::IndividualStock),
        Holding::new("2330", 300_000.0, Currency::Twd, AssetCategory::IndividualStock),
    ]
}
