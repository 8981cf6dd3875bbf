// ═══════════════════════════════════════════════════════════════════
// Journal Tests — JournalService, SnapshotStore implementations,
// import/export, trend adapters over history
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use portfolio_journal_core::errors::CoreError;
use portfolio_journal_core::models::holding::{AssetCategory, Currency, Holding};
use portfolio_journal_core::services::aggregation_service::USD_TWD_RATE;
use portfolio_journal_core::services::chart_service::ChartService;
use portfolio_journal_core::services::journal_service::JournalService;
use portfolio_journal_core::storage::store::{FileStore, MemoryStore, SnapshotStore, STORAGE_KEY};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn h(symbol: &str, value: f64, currency: Currency, category: AssetCategory) -> Holding {
    Holding::new(symbol, value, currency, category)
}

fn service() -> JournalService {
    JournalService::new(Box::new(MemoryStore::new()))
}

// ═══════════════════════════════════════════════════════════════════
// Save / Delete
// ═══════════════════════════════════════════════════════════════════

mod save_and_delete {
    use super::*;

    #[test]
    fn save_caches_totals_on_the_snapshot() {
        let mut journal = service();
        let holdings = vec![
            h("0050", 1_500_000.0, Currency::Twd, AssetCategory::MarketEtf),
            h("BND", 18_000.0, Currency::Usd, AssetCategory::BondEtf),
        ];
        journal.save(d(2024, 1, 15), &holdings).unwrap();

        let snapshot = journal.get(d(2024, 1, 15)).unwrap();
        assert_eq!(snapshot.market_etf_value, 1_500_000.0);
        assert_eq!(snapshot.bond_etf_value, 18_000.0 * USD_TWD_RATE);
        assert_eq!(snapshot.individual_stock_value, 0.0);
        assert_eq!(
            snapshot.total_value_twd,
            1_500_000.0 + 18_000.0 * USD_TWD_RATE
        );
        assert_eq!(snapshot.holdings.len(), 2);
    }

    #[test]
    fn saving_same_date_replaces_the_entry() {
        let mut journal = service();
        journal
            .save(d(2024, 1, 15), &[h("VTI", 100.0, Currency::Usd, AssetCategory::MarketEtf)])
            .unwrap();
        journal
            .save(d(2024, 1, 15), &[h("VTI", 999.0, Currency::Usd, AssetCategory::MarketEtf)])
            .unwrap();

        assert_eq!(journal.list().len(), 1);
        assert_eq!(journal.get(d(2024, 1, 15)).unwrap().holdings[0].value, 999.0);
    }

    #[test]
    fn saves_keep_the_journal_sorted_ascending() {
        let mut journal = service();
        journal.save(d(2024, 3, 1), &[]).unwrap();
        journal.save(d(2024, 1, 1), &[]).unwrap();
        journal.save(d(2024, 2, 1), &[]).unwrap();

        let dates: Vec<NaiveDate> = journal.list().iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![d(2024, 1, 1), d(2024, 2, 1), d(2024, 3, 1)]);
    }

    #[test]
    fn snapshot_holdings_do_not_alias_the_live_list() {
        let mut journal = service();
        let mut holdings = vec![h("VTI", 100.0, Currency::Usd, AssetCategory::MarketEtf)];
        journal.save(d(2024, 1, 15), &holdings).unwrap();

        holdings[0].value = 999.0;
        assert_eq!(journal.get(d(2024, 1, 15)).unwrap().holdings[0].value, 100.0);
    }

    #[test]
    fn delete_removes_the_entry() {
        let mut journal = service();
        journal.save(d(2024, 1, 15), &[]).unwrap();
        journal.delete(d(2024, 1, 15)).unwrap();
        assert!(!journal.has_entry(d(2024, 1, 15)));
        assert!(journal.list().is_empty());
    }

    #[test]
    fn delete_missing_date_is_a_noop() {
        let mut journal = service();
        journal.save(d(2024, 1, 15), &[]).unwrap();
        journal.delete(d(2030, 1, 1)).unwrap();
        assert_eq!(journal.list().len(), 1);
    }

    #[test]
    fn has_entry_and_get() {
        let mut journal = service();
        assert!(!journal.has_entry(d(2024, 1, 15)));
        assert!(journal.get(d(2024, 1, 15)).is_none());
        journal.save(d(2024, 1, 15), &[]).unwrap();
        assert!(journal.has_entry(d(2024, 1, 15)));
        assert!(journal.get(d(2024, 1, 15)).is_some());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Persistence & Recovery
// ═══════════════════════════════════════════════════════════════════

mod persistence {
    use super::*;

    #[test]
    fn journal_survives_a_reload_from_the_same_payload() {
        let mut journal = service();
        journal
            .save(d(2024, 1, 15), &[h("VTI", 100.0, Currency::Usd, AssetCategory::MarketEtf)])
            .unwrap();
        let payload = journal.export().unwrap();

        let reloaded = JournalService::new(Box::new(MemoryStore::with_payload(payload)));
        assert_eq!(reloaded.list().len(), 1);
        assert_eq!(reloaded.get(d(2024, 1, 15)).unwrap().holdings[0].symbol, "VTI");
    }

    #[test]
    fn corrupt_payload_reads_as_empty_journal() {
        let journal = JournalService::new(Box::new(MemoryStore::with_payload("{{{not json")));
        assert!(journal.list().is_empty());
    }

    #[test]
    fn wrong_shape_payload_reads_as_empty_journal() {
        let journal = JournalService::new(Box::new(MemoryStore::with_payload(
            r#"{"date":"2024-01-01"}"#,
        )));
        assert!(journal.list().is_empty());
    }

    #[test]
    fn empty_store_reads_as_empty_journal() {
        assert!(service().list().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Import / Export
// ═══════════════════════════════════════════════════════════════════

mod import_export {
    use super::*;

    #[test]
    fn export_then_import_reproduces_the_journal() {
        let mut journal = service();
        journal
            .save(d(2024, 1, 15), &[h("VTI", 100.0, Currency::Usd, AssetCategory::MarketEtf)])
            .unwrap();
        journal.save(d(2024, 2, 15), &[]).unwrap();
        let payload = journal.export().unwrap();
        let original = journal.list().to_vec();

        let mut target = service();
        target.import(&payload).unwrap();
        assert_eq!(target.list(), original.as_slice());
    }

    #[test]
    fn minimal_entries_import_with_defaulted_totals() {
        let mut journal = service();
        journal
            .import(r#"[{"date":"2024-01-01","holdings":[]}]"#)
            .unwrap();
        let snapshot = journal.get(d(2024, 1, 1)).unwrap();
        assert_eq!(snapshot.total_value_twd, 0.0);
    }

    #[test]
    fn import_replaces_existing_history_verbatim() {
        let mut journal = service();
        journal.save(d(2020, 6, 1), &[]).unwrap();

        // Deliberately out of order; import must not re-sort.
        journal
            .import(
                r#"[{"date":"2024-02-01","holdings":[]},{"date":"2024-01-01","holdings":[]}]"#,
            )
            .unwrap();

        let dates: Vec<NaiveDate> = journal.list().iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![d(2024, 2, 1), d(2024, 1, 1)]);
        assert!(!journal.has_entry(d(2020, 6, 1)));
    }

    #[test]
    fn import_rejects_non_array_payloads() {
        let mut journal = service();
        assert!(matches!(
            journal.import(r#"{"date":"2024-01-01","holdings":[]}"#),
            Err(CoreError::InvalidImport(_))
        ));
        assert!(matches!(
            journal.import("not json at all"),
            Err(CoreError::InvalidImport(_))
        ));
    }

    #[test]
    fn import_rejects_entries_missing_required_fields() {
        let mut journal = service();
        assert!(matches!(
            journal.import(r#"[{"foo":1}]"#),
            Err(CoreError::InvalidImport(_))
        ));
        assert!(matches!(
            journal.import(r#"[{"date":"2024-01-01"}]"#),
            Err(CoreError::InvalidImport(_))
        ));
        assert!(matches!(
            journal.import(r#"[{"date":"2024-01-01","holdings":"nope"}]"#),
            Err(CoreError::InvalidImport(_))
        ));
    }

    #[test]
    fn rejected_import_leaves_existing_history_intact() {
        let mut journal = service();
        journal.save(d(2024, 1, 15), &[]).unwrap();
        let _ = journal.import(r#"[{"foo":1}]"#);
        assert_eq!(journal.list().len(), 1);
        assert!(journal.has_entry(d(2024, 1, 15)));
    }

    #[test]
    fn export_filename_format() {
        assert_eq!(
            JournalService::export_filename(d(2025, 12, 31)),
            "smartalloc_backup_2025-12-31.json"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// Stores
// ═══════════════════════════════════════════════════════════════════

mod stores {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.read().unwrap(), None);
        store.write("payload").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("payload"));
    }

    #[test]
    fn file_store_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path());
        store.write("[1,2,3]").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("[1,2,3]"));
        assert!(store
            .path()
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with(STORAGE_KEY));
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("a/b/journal.json"));
        store.write("x").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn journal_persists_through_a_file_store() {
        let dir = tempfile::tempdir().unwrap();

        let mut journal = JournalService::new(Box::new(FileStore::in_dir(dir.path())));
        journal
            .save(d(2024, 1, 15), &[h("VTI", 100.0, Currency::Usd, AssetCategory::MarketEtf)])
            .unwrap();
        drop(journal);

        let reloaded = JournalService::new(Box::new(FileStore::in_dir(dir.path())));
        assert_eq!(reloaded.list().len(), 1);
        assert_eq!(reloaded.get(d(2024, 1, 15)).unwrap().holdings[0].symbol, "VTI");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trend chart over history
// ═══════════════════════════════════════════════════════════════════

mod trend_chart {
    use super::*;

    fn history() -> JournalService {
        let mut journal = service();
        journal
            .save(
                d(2024, 1, 15),
                &[
                    h("0050", 1_000_000.0, Currency::Twd, AssetCategory::MarketEtf),
                    h("BND", 10_000.0, Currency::Usd, AssetCategory::BondEtf),
                ],
            )
            .unwrap();
        journal
            .save(
                d(2024, 2, 15),
                &[
                    h("0050", 1_100_000.0, Currency::Twd, AssetCategory::MarketEtf),
                    h("VTI", 5_000.0, Currency::Usd, AssetCategory::MarketEtf),
                    h("BND", 10_000.0, Currency::Usd, AssetCategory::BondEtf),
                ],
            )
            .unwrap();
        journal
    }

    #[test]
    fn overview_stacks_stock_bond_market_from_cached_totals() {
        let journal = history();
        let chart = ChartService::new().trend(journal.list(), None);

        assert_eq!(chart.series.len(), 3);
        assert_eq!(chart.series[0].key, "IndividualStock");
        assert_eq!(chart.series[1].key, "BondETF");
        assert_eq!(chart.series[2].key, "MarketETF");
        assert_eq!(chart.series[2].color, AssetCategory::MarketEtf.trend_color());

        assert_eq!(chart.points.len(), 2);
        let first = &chart.points[0];
        assert_eq!(first.label, "01-15");
        assert_eq!(first.values[0], 0.0);
        assert_eq!(first.values[1], 10_000.0 * USD_TWD_RATE);
        assert_eq!(first.values[2], 1_000_000.0);
        assert_eq!(first.total, 1_000_000.0 + 10_000.0 * USD_TWD_RATE);
    }

    #[test]
    fn category_view_unions_symbols_in_first_appearance_order() {
        let journal = history();
        let chart = ChartService::new().trend(journal.list(), Some(AssetCategory::MarketEtf));

        let keys: Vec<&str> = chart.series.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["0050", "VTI"]);

        // VTI absent from the first snapshot contributes zero.
        assert_eq!(chart.points[0].values, vec![1_000_000.0, 0.0]);
        assert_eq!(
            chart.points[1].values,
            vec![1_100_000.0, 5_000.0 * USD_TWD_RATE]
        );
        assert_eq!(
            chart.points[1].total,
            1_100_000.0 + 5_000.0 * USD_TWD_RATE
        );
    }

    #[test]
    fn category_view_palette_cycles_past_six_symbols() {
        let mut journal = service();
        let holdings: Vec<Holding> = (0..8)
            .map(|i| h(&format!("S{i}"), 100.0, Currency::Twd, AssetCategory::IndividualStock))
            .collect();
        journal.save(d(2024, 1, 15), &holdings).unwrap();

        let chart =
            ChartService::new().trend(journal.list(), Some(AssetCategory::IndividualStock));
        assert_eq!(chart.series.len(), 8);
        // Seventh symbol wraps back to the first shade.
        assert_eq!(chart.series[6].color, chart.series[0].color);
        assert_eq!(chart.series[7].color, chart.series[1].color);
    }

    #[test]
    fn empty_history_yields_series_but_no_points() {
        let chart = ChartService::new().trend(&[], None);
        assert_eq!(chart.series.len(), 3);
        assert!(chart.points.is_empty());
    }
}
