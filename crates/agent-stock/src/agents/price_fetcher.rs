//! Current price lookup

use agent_core::{Agent, Outcome, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::MarketData;
use crate::engine::{ContextDelta, QueryContext};
use crate::fallback;
use crate::models::{MarketStatus, Quote};

/// Fetches the current quote, degrading to a deterministic fallback price
pub struct PriceFetcherAgent {
    provider: Arc<dyn MarketData>,
}

impl PriceFetcherAgent {
    pub fn new(provider: Arc<dyn MarketData>) -> Self {
        Self { provider }
    }

    /// Quote for `ticker`; never fails
    pub async fn fetch(&self, ticker: &str) -> Outcome<Quote> {
        info!("Fetching price data for ticker: {}", ticker);

        match self.provider.global_quote(ticker).await {
            Ok(snapshot) => Outcome::clean(Quote {
                price: snapshot.price,
                currency: "USD".to_string(),
                last_updated: snapshot.latest_trading_day,
                // The quote endpoint does not report session state
                market_status: MarketStatus::Closed,
            }),
            Err(e) => {
                warn!("Error fetching price for {}: {}", ticker, e);
                let quote = fallback::fallback_quote(ticker, Utc::now().to_rfc3339());
                Outcome::degraded(quote, e.to_string())
            }
        }
    }
}

#[async_trait]
impl Agent<QueryContext> for PriceFetcherAgent {
    async fn process(&self, context: &QueryContext) -> Result<Outcome<ContextDelta>> {
        let ticker = context.require_ticker()?;
        Ok(self.fetch(ticker).await.map(ContextDelta::Quote))
    }

    fn name(&self) -> &str {
        "PriceFetcherAgent"
    }
}
