// ═══════════════════════════════════════════════════════════════════
// Advisor Tests — AdvisorClient degradation paths, prompt digest,
// facade integration
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use portfolio_journal_core::advisor::{
    client::{ADVICE_FAILED, ADVICE_UNAVAILABLE},
    AdvisorClient, AdvisoryTransport,
};
use portfolio_journal_core::errors::CoreError;
use portfolio_journal_core::models::holding::{AssetCategory, Currency};
use portfolio_journal_core::services::aggregation_service::AggregationService;
use portfolio_journal_core::storage::store::MemoryStore;
use portfolio_journal_core::PortfolioJournal;

// ═══════════════════════════════════════════════════════════════════
// Mock Transport
// ═══════════════════════════════════════════════════════════════════

struct CannedTransport {
    reply: String,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl CannedTransport {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the captured prompts, usable after the transport has
    /// been handed to a client.
    fn prompt_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl AdvisoryTransport for CannedTransport {
    async fn generate(&self, prompt: &str) -> Result<String, CoreError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

struct FailingTransport;

#[async_trait]
impl AdvisoryTransport for FailingTransport {
    async fn generate(&self, _prompt: &str) -> Result<String, CoreError> {
        Err(CoreError::Api {
            provider: "Mock".into(),
            message: "boom".into(),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════
// AdvisorClient
// ═══════════════════════════════════════════════════════════════════

mod client {
    use super::*;

    #[tokio::test]
    async fn no_api_key_returns_unavailable_message() {
        let client = AdvisorClient::new(None);
        assert!(!client.is_configured());
        assert_eq!(client.analyze(&[], 0.0).await, ADVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn blank_api_key_counts_as_missing() {
        let client = AdvisorClient::new(Some("   ".into()));
        assert!(!client.is_configured());
        assert_eq!(client.analyze(&[], 0.0).await, ADVICE_UNAVAILABLE);
    }

    #[test]
    fn real_api_key_configures_the_transport() {
        let client = AdvisorClient::new(Some("key-123".into()));
        assert!(client.is_configured());
    }

    #[tokio::test]
    async fn transport_failure_degrades_to_failed_message() {
        let client = AdvisorClient::with_transport(Box::new(FailingTransport));
        assert_eq!(client.analyze(&[], 0.0).await, ADVICE_FAILED);
    }

    #[tokio::test]
    async fn successful_reply_is_passed_through() {
        let client = AdvisorClient::with_transport(Box::new(CannedTransport::new("looks fine")));
        assert_eq!(client.analyze(&[], 0.0).await, "looks fine");
    }

    #[tokio::test]
    async fn prompt_digests_the_portfolio() {
        let transport = CannedTransport::new("ok");
        let prompt_log = transport.prompt_log();
        let client = AdvisorClient::with_transport(Box::new(transport));

        let aggregation = AggregationService::new();
        let holdings = vec![
            portfolio_journal_core::models::holding::Holding::new(
                "0050",
                1_000_000.0,
                Currency::Twd,
                AssetCategory::MarketEtf,
            ),
            portfolio_journal_core::models::holding::Holding::new(
                "TSLA",
                6_000.0,
                Currency::Usd,
                AssetCategory::IndividualStock,
            ),
        ];
        let summaries = aggregation.summarize(&holdings);
        let totals = aggregation.totals(&summaries);

        client.analyze(&summaries, totals.total_twd).await;

        let prompts = prompt_log.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        let prompt = &prompts[0];
        assert!(prompt.contains("Market ETF"));
        assert!(prompt.contains("0050"));
        assert!(prompt.contains("TSLA"));
        assert!(prompt.contains("32.5"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Facade integration
// ═══════════════════════════════════════════════════════════════════

mod facade {
    use super::*;

    #[tokio::test]
    async fn facade_without_key_reports_unconfigured_advisor() {
        let mut pj = PortfolioJournal::new(Box::new(MemoryStore::new()), None);
        assert!(!pj.advisor_configured());
        assert!(!pj.is_analyzing());
        assert_eq!(pj.analyze().await, ADVICE_UNAVAILABLE);
        assert!(!pj.is_analyzing());
    }

    #[tokio::test]
    async fn facade_analysis_uses_injected_transport() {
        let mut pj = PortfolioJournal::with_sample_holdings(Box::new(MemoryStore::new()), None)
            .with_advisor(AdvisorClient::with_transport(Box::new(CannedTransport::new(
                "diversify more",
            ))));
        assert!(pj.advisor_configured());
        assert_eq!(pj.analyze().await, "diversify more");
        assert!(!pj.is_analyzing());
    }

    #[tokio::test]
    async fn facade_analysis_failure_degrades_gracefully() {
        let mut pj = PortfolioJournal::with_sample_holdings(Box::new(MemoryStore::new()), None)
            .with_advisor(AdvisorClient::with_transport(Box::new(FailingTransport)));
        assert_eq!(pj.analyze().await, ADVICE_FAILED);
        assert!(!pj.is_analyzing());
    }
}
