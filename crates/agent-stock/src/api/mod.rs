//! API clients for stock data providers

pub mod alpha_vantage;
pub mod pacing;

use crate::error::Result;
use crate::models::{DailyBar, NewsItem};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use alpha_vantage::AlphaVantageClient;
pub use pacing::{IntervalPacer, NoPacing, Pacer, pacer_for};

/// Latest quote as reported by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub price: f64,
    pub latest_trading_day: String,
}

/// Everything the pipeline needs from a market data provider
///
/// Implementations report every failure as an `Err`; the calling stage
/// decides how to degrade.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Current quote for a symbol
    async fn global_quote(&self, symbol: &str) -> Result<QuoteSnapshot>;

    /// Daily closes, most recent first
    async fn daily_series(&self, symbol: &str) -> Result<Vec<DailyBar>>;

    /// Recent articles mentioning a ticker
    async fn news_sentiment(&self, ticker: &str, limit: usize) -> Result<Vec<NewsItem>>;
}
