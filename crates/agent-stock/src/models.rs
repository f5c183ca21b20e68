//! Data carried between pipeline stages

use crate::error::StockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A resolved company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerRecord {
    pub ticker: String,
    pub company_name: String,
}

/// Output of ticker resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerResolution {
    pub record: Option<TickerRecord>,
    pub confidence: f64,
}

impl TickerResolution {
    pub const RESOLVED_CONFIDENCE: f64 = 0.9;

    pub fn resolved(ticker: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            record: Some(TickerRecord {
                ticker: ticker.into(),
                company_name: company_name.into(),
            }),
            confidence: Self::RESOLVED_CONFIDENCE,
        }
    }

    pub fn unresolved() -> Self {
        Self {
            record: None,
            confidence: 0.0,
        }
    }

    pub fn ticker(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.ticker.as_str())
    }

    pub fn company_name(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.company_name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketStatus {
    Open,
    Closed,
}

/// Current quote for a ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    pub currency: String,
    pub last_updated: String,
    pub market_status: MarketStatus,
}

/// Window over which the price change is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "5D")]
    FiveDays,
    #[serde(rename = "1M")]
    OneMonth,
}

impl Timeframe {
    /// Number of trading days between the base close and the latest close
    pub fn lookback(self) -> usize {
        match self {
            Self::OneDay => 1,
            Self::FiveDays => 5,
            Self::OneMonth => 21,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::FiveDays => "5D",
            Self::OneMonth => "1M",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1D" => Ok(Self::OneDay),
            "5D" => Ok(Self::FiveDays),
            "1M" => Ok(Self::OneMonth),
            other => Err(StockError::ConfigError(format!(
                "Unsupported timeframe '{other}' (expected 1D, 5D or 1M)"
            ))),
        }
    }
}

/// Price movement over a timeframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub change: f64,
    pub change_percent: f64,
    /// Absent when the change is synthesized
    pub start_price: Option<f64>,
    pub end_price: Option<f64>,
    pub timeframe: Timeframe,
}

/// One bar of a daily series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading day, `YYYY-MM-DD`
    pub date: String,
    pub close: f64,
}

/// A news article with its sentiment label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub time_published: String,
    pub sentiment: String,
}

impl NewsItem {
    pub fn is_bullish(&self) -> bool {
        let label = self.sentiment.to_lowercase();
        label == "bullish" || label == "positive"
    }

    pub fn is_bearish(&self) -> bool {
        let label = self.sentiment.to_lowercase();
        label == "bearish" || label == "negative"
    }
}

/// Overall sentiment derived from the price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "Very Bullish")]
    VeryBullish,
    Bullish,
    Neutral,
    Bearish,
    #[serde(rename = "Very Bearish")]
    VeryBearish,
}

impl SentimentLabel {
    /// Classify a percent change
    pub fn from_percent(percent: f64) -> Self {
        if percent > 3.0 {
            Self::VeryBullish
        } else if percent > 1.0 {
            Self::Bullish
        } else if percent > -1.0 {
            Self::Neutral
        } else if percent > -3.0 {
            Self::Bearish
        } else {
            Self::VeryBearish
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryBullish => "Very Bullish",
            Self::Bullish => "Bullish",
            Self::Neutral => "Neutral",
            Self::Bearish => "Bearish",
            Self::VeryBearish => "Very Bearish",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generated analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub narrative: String,
    pub sentiment: SentimentLabel,
    pub key_factors: Vec<String>,
}
