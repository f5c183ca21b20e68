//! Price change over a timeframe

use agent_core::{Agent, Outcome, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::MarketData;
use crate::engine::{ContextDelta, QueryContext};
use crate::error::StockError;
use crate::fallback;
use crate::models::{DailyBar, PriceChange, Timeframe};

/// Computes the close-to-close move over the query's timeframe
pub struct PriceChangeAgent {
    provider: Arc<dyn MarketData>,
}

impl PriceChangeAgent {
    pub fn new(provider: Arc<dyn MarketData>) -> Self {
        Self { provider }
    }

    /// Change for `ticker`, or a synthesized one if the series is unusable
    pub async fn calculate(&self, ticker: &str, timeframe: Timeframe) -> Outcome<PriceChange> {
        info!(
            "Calculating price change for {} over {}",
            ticker, timeframe
        );

        let computed = match self.provider.daily_series(ticker).await {
            Ok(bars) => change_from_bars(ticker, &bars, timeframe),
            Err(e) => Err(e),
        };

        match computed {
            Ok(change) => Outcome::clean(change),
            Err(e) => {
                warn!("Error calculating price change for {}: {}", ticker, e);
                Outcome::degraded(fallback::mock_price_change(ticker, timeframe), e.to_string())
            }
        }
    }
}

/// Close-to-close change from a most-recent-first series
fn change_from_bars(
    ticker: &str,
    bars: &[DailyBar],
    timeframe: Timeframe,
) -> crate::Result<PriceChange> {
    let lookback = timeframe.lookback();
    let (Some(latest), Some(base)) = (bars.first(), bars.get(lookback)) else {
        return Err(StockError::unavailable(
            ticker,
            format!(
                "Insufficient price history: need {} daily bars, got {}",
                lookback + 1,
                bars.len()
            ),
        ));
    };

    if base.close == 0.0 {
        return Err(StockError::unavailable(
            ticker,
            format!("Zero base price on {}", base.date),
        ));
    }

    let change = latest.close - base.close;
    debug!(
        latest = %latest.date,
        base = %base.date,
        change,
        "Computed close-to-close change"
    );

    Ok(PriceChange {
        change,
        change_percent: change / base.close * 100.0,
        start_price: Some(base.close),
        end_price: Some(latest.close),
        timeframe,
    })
}

#[async_trait]
impl Agent<QueryContext> for PriceChangeAgent {
    async fn process(&self, context: &QueryContext) -> Result<Outcome<ContextDelta>> {
        let ticker = context.require_ticker()?;
        Ok(self
            .calculate(ticker, context.timeframe)
            .await
            .map(ContextDelta::PriceChange))
    }

    fn name(&self) -> &str {
        "PriceChangeAgent"
    }
}
