use chrono::NaiveDate;
use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::holding::Holding;
use crate::models::snapshot::PortfolioSnapshot;
use crate::services::aggregation_service::AggregationService;
use crate::storage::store::SnapshotStore;

/// The snapshot journal: dated portfolio copies persisted as one JSON
/// document in a [`SnapshotStore`].
///
/// Loaded once at construction; every mutation rewrites the whole
/// collection. A missing or unparseable store reads as an empty journal
/// rather than an error — history should never block startup.
pub struct JournalService {
    store: Box<dyn SnapshotStore>,
    snapshots: Vec<PortfolioSnapshot>,
    aggregation: AggregationService,
}

impl JournalService {
    /// Load the journal from the store. Corruption is warn-logged and
    /// treated as empty.
    pub fn new(store: Box<dyn SnapshotStore>) -> Self {
        let snapshots = match store.read() {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<PortfolioSnapshot>>(&payload) {
                Ok(snapshots) => snapshots,
                Err(e) => {
                    warn!("journal store unreadable, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("journal store unreadable, starting empty: {e}");
                Vec::new()
            }
        };

        Self {
            store,
            snapshots,
            aggregation: AggregationService::new(),
        }
    }

    /// All snapshots, in stored order (ascending by date after any save).
    #[must_use]
    pub fn list(&self) -> &[PortfolioSnapshot] {
        &self.snapshots
    }

    /// The snapshot for a specific date, if recorded.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&PortfolioSnapshot> {
        self.snapshots.iter().find(|s| s.date == date)
    }

    /// Whether a snapshot exists for the date — drives the
    /// archive-vs-update affordance in the UI.
    #[must_use]
    pub fn has_entry(&self, date: NaiveDate) -> bool {
        self.snapshots.iter().any(|s| s.date == date)
    }

    /// Save a snapshot for `date`, replacing any prior entry for the
    /// same day (upsert-by-date).
    ///
    /// The holdings are deep-copied and the per-category + grand totals
    /// are computed here and cached on the snapshot. The collection is
    /// re-sorted ascending and persisted wholesale.
    pub fn save(
        &mut self,
        date: NaiveDate,
        holdings: &[Holding],
    ) -> Result<&[PortfolioSnapshot], CoreError> {
        let summaries = self.aggregation.summarize(holdings);
        let totals = self.aggregation.totals(&summaries);

        let snapshot = PortfolioSnapshot {
            date,
            holdings: holdings.to_vec(),
            total_value_twd: totals.total_twd,
            market_etf_value: summaries[0].total_twd,
            bond_etf_value: summaries[1].total_twd,
            individual_stock_value: summaries[2].total_twd,
        };

        self.snapshots.retain(|s| s.date != date);
        self.snapshots.push(snapshot);
        self.snapshots.sort_by_key(|s| s.date);

        self.persist()?;
        debug!("archived snapshot for {date} ({} total)", self.snapshots.len());
        Ok(&self.snapshots)
    }

    /// Delete the snapshot for `date`. A date with no entry is a no-op
    /// (the journal is persisted either way, unchanged).
    pub fn delete(&mut self, date: NaiveDate) -> Result<(), CoreError> {
        self.snapshots.retain(|s| s.date != date);
        self.persist()
    }

    /// Replace the entire journal with an externally supplied payload.
    ///
    /// Shape check first: the payload must be a JSON array whose every
    /// element carries a `date` field and a `holdings` array. Anything
    /// else is rejected with no write. On success the collection is
    /// stored verbatim — no merge with existing history, no re-sort, and
    /// the embedded totals are trusted as-is (missing ones default to 0).
    pub fn import(&mut self, payload: &str) -> Result<&[PortfolioSnapshot], CoreError> {
        let value: serde_json::Value = serde_json::from_str(payload)
            .map_err(|e| CoreError::InvalidImport(format!("not valid JSON: {e}")))?;

        let entries = value
            .as_array()
            .ok_or_else(|| CoreError::InvalidImport("expected a JSON array".into()))?;
        for (i, entry) in entries.iter().enumerate() {
            if entry.get("date").is_none() {
                return Err(CoreError::InvalidImport(format!(
                    "entry {i} is missing a date field"
                )));
            }
            if !entry.get("holdings").is_some_and(serde_json::Value::is_array) {
                return Err(CoreError::InvalidImport(format!(
                    "entry {i} is missing a holdings array"
                )));
            }
        }

        let snapshots: Vec<PortfolioSnapshot> = serde_json::from_value(value)
            .map_err(|e| CoreError::InvalidImport(format!("entry does not match schema: {e}")))?;

        self.snapshots = snapshots;
        self.persist()?;
        debug!("imported journal with {} snapshots", self.snapshots.len());
        Ok(&self.snapshots)
    }

    /// Serialize the full journal for download. Read-only.
    pub fn export(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.snapshots)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize journal: {e}")))
    }

    /// Backup filename with the current date embedded.
    #[must_use]
    pub fn export_filename(today: NaiveDate) -> String {
        format!("smartalloc_backup_{}.json", today.format("%Y-%m-%d"))
    }

    fn persist(&self) -> Result<(), CoreError> {
        let payload = serde_json::to_string(&self.snapshots)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize journal: {e}")))?;
        self.store.write(&payload)
    }
}
