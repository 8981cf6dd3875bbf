use log::warn;

use crate::models::summary::CategorySummary;
use crate::services::aggregation_service::USD_TWD_RATE;

use super::transport::{AdvisoryTransport, GoogleGenerativeTransport};

/// Shown when no API key was configured at startup.
pub const ADVICE_UNAVAILABLE: &str =
    "AI analysis is unavailable: no API key is configured. Add one to enable portfolio advice.";

/// Shown when the backend request fails for any reason.
pub const ADVICE_FAILED: &str =
    "AI analysis failed. Please check your connection and try again later.";

/// Produces a natural-language allocation review of the portfolio.
///
/// Deliberately infallible: a missing key or a failed request degrades to
/// a fixed explanatory message instead of an error, so the advisory panel
/// can always render something.
pub struct AdvisorClient {
    transport: Option<Box<dyn AdvisoryTransport>>,
}

impl AdvisorClient {
    /// Build a client with the Google transport when a key is present.
    /// Without a key every analysis returns [`ADVICE_UNAVAILABLE`].
    pub fn new(api_key: Option<String>) -> Self {
        let transport: Option<Box<dyn AdvisoryTransport>> = match api_key {
            Some(key) if !key.trim().is_empty() => {
                Some(Box::new(GoogleGenerativeTransport::new(key)))
            }
            _ => {
                warn!("no advisory API key configured, analysis disabled");
                None
            }
        };
        Self { transport }
    }

    /// Build a client over an explicit transport (tests, other backends).
    pub fn with_transport(transport: Box<dyn AdvisoryTransport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// Whether analysis can actually reach a backend.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Analyze the current allocation. Never errs.
    pub async fn analyze(&self, summaries: &[CategorySummary], total_twd: f64) -> String {
        let Some(transport) = &self.transport else {
            return ADVICE_UNAVAILABLE.to_string();
        };

        let prompt = Self::build_prompt(summaries, total_twd);
        match transport.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("advisory request failed: {e}");
                ADVICE_FAILED.to_string()
            }
        }
    }

    /// Compact textual digest of the portfolio that goes into the prompt.
    fn build_prompt(summaries: &[CategorySummary], total_twd: f64) -> String {
        let mut digest = String::new();
        for summary in summaries {
            let pct = if total_twd > 0.0 {
                summary.total_twd / total_twd * 100.0
            } else {
                0.0
            };
            let symbols: Vec<&str> = summary.holdings.iter().map(|h| h.symbol.as_str()).collect();
            digest.push_str(&format!(
                "- {}: {:.0} TWD ({:.1}% of portfolio), holdings: {}\n",
                summary.label,
                summary.total_twd,
                pct,
                if symbols.is_empty() {
                    "none".to_string()
                } else {
                    symbols.join(", ")
                },
            ));
        }

        format!(
            "You are a financial advisor reviewing a personal investment portfolio.\n\
             Total value: {total_twd:.0} TWD (USD positions converted at a fixed rate of {USD_TWD_RATE} TWD/USD).\n\
             Allocation by category:\n{digest}\n\
             Give a concise review of this allocation: comment on the balance between \
             market ETFs, bond ETFs and individual stocks, point out concentration \
             risks, and suggest one or two concrete rebalancing ideas. Keep it under \
             200 words and do not give individual stock picks."
        )
    }
}
