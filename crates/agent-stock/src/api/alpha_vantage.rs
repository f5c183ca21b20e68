//! Alpha Vantage API client

use super::{MarketData, QuoteSnapshot};
use crate::config::{ENV_API_KEY, StockConfig};
use crate::error::{Result, StockError};
use crate::models::{DailyBar, NewsItem};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

const PROVIDER: &str = "Alpha Vantage";

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl AlphaVantageClient {
    /// Create a client from configuration
    ///
    /// Requests time out after `request_timeout`. Spacing between calls is
    /// the caller's concern.
    pub fn new(config: &StockConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            api_key: config.alpha_vantage_api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Issue one GET and return the checked JSON envelope
    async fn query(&self, params: &[(&str, &str)]) -> Result<Value> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            StockError::ConfigError(format!("{ENV_API_KEY} environment variable not set"))
        })?;

        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .query(&[("apikey", api_key)])
            .send()
            .await?;

        let status = response.status();
        debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(StockError::AlphaVantageError(format!("HTTP error: {status}")));
        }

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body)?;
        check_envelope(&data)?;

        Ok(data)
    }
}

#[async_trait]
impl MarketData for AlphaVantageClient {
    #[instrument(skip(self))]
    async fn global_quote(&self, symbol: &str) -> Result<QuoteSnapshot> {
        let data = self
            .query(&[("function", "GLOBAL_QUOTE"), ("symbol", symbol)])
            .await?;
        parse_global_quote(symbol, &data)
    }

    #[instrument(skip(self))]
    async fn daily_series(&self, symbol: &str) -> Result<Vec<DailyBar>> {
        let data = self
            .query(&[("function", "TIME_SERIES_DAILY"), ("symbol", symbol)])
            .await?;
        parse_daily_series(symbol, &data)
    }

    #[instrument(skip(self))]
    async fn news_sentiment(&self, ticker: &str, limit: usize) -> Result<Vec<NewsItem>> {
        let limit = limit.to_string();
        let data = self
            .query(&[
                ("function", "NEWS_SENTIMENT"),
                ("tickers", ticker),
                ("limit", limit.as_str()),
            ])
            .await?;
        Ok(parse_news_feed(&data))
    }
}

fn text(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_string)
}

/// Reject rate-limit notices and explicit error envelopes
fn check_envelope(data: &Value) -> Result<()> {
    if let Some(error) = data.get("Error Message") {
        return Err(StockError::AlphaVantageError(text(error)));
    }

    if let Some(notice) = data.get("Note").or_else(|| data.get("Information")) {
        return Err(StockError::RateLimitExceeded {
            provider: PROVIDER.to_string(),
            notice: text(notice),
        });
    }

    Ok(())
}

fn parse_global_quote(symbol: &str, data: &Value) -> Result<QuoteSnapshot> {
    let quote = data
        .get("Global Quote")
        .and_then(Value::as_object)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| StockError::unavailable(symbol, "No Global Quote data in response"))?;

    let price = quote
        .get("05. price")
        .and_then(Value::as_str)
        .and_then(|p| p.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p != 0.0)
        .ok_or_else(|| StockError::unavailable(symbol, "No price data available in response"))?;

    let latest_trading_day = quote
        .get("07. latest trading day")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(QuoteSnapshot {
        price,
        latest_trading_day,
    })
}

fn parse_daily_series(symbol: &str, data: &Value) -> Result<Vec<DailyBar>> {
    let series = data
        .get("Time Series (Daily)")
        .and_then(Value::as_object)
        .ok_or_else(|| StockError::unavailable(symbol, "No daily data found"))?;

    let mut bars = series
        .iter()
        .map(|(date, values)| {
            let close = values
                .get("4. close")
                .and_then(Value::as_str)
                .and_then(|c| c.trim().parse::<f64>().ok())
                .filter(|c| c.is_finite())
                .ok_or_else(|| {
                    StockError::AlphaVantageError(format!("Malformed close price for {date}"))
                })?;
            Ok(DailyBar {
                date: date.clone(),
                close,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    bars.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(bars)
}

fn parse_news_feed(data: &Value) -> Vec<NewsItem> {
    let Some(feed) = data.get("feed").and_then(Value::as_array) else {
        return Vec::new();
    };

    let field = |item: &Value, key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    feed.iter()
        .map(|item| NewsItem {
            title: field(item, "title"),
            summary: field(item, "summary"),
            url: field(item, "url"),
            time_published: field(item, "time_published"),
            sentiment: item
                .get("overall_sentiment_label")
                .and_then(Value::as_str)
                .unwrap_or("Neutral")
                .to_string(),
        })
        .collect()
}
