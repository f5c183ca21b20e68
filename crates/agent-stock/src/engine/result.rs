//! Query response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::context::StageWarning;
use crate::models::{MarketStatus, NewsItem, SentimentLabel, Timeframe};

/// Outcome of one query, serialized as a flat JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Success(Box<StockReport>),
    Failure(FailureReport),
}

impl QueryResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(FailureReport {
            error: error.into(),
            success: false,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn report(&self) -> Option<&StockReport> {
        match self {
            Self::Success(report) => Some(report.as_ref()),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(&failure.error),
        }
    }
}

impl From<StockReport> for QueryResponse {
    fn from(report: StockReport) -> Self {
        Self::Success(Box::new(report))
    }
}

/// Compiled analysis for a resolved ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReport {
    pub ticker: String,
    pub company_name: String,
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub sentiment: SentimentLabel,
    pub news_count: usize,
    pub recent_news: Vec<NewsItem>,
    pub analysis: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,

    pub currency: String,
    pub market_status: MarketStatus,
    pub last_updated: String,
    /// Ticker resolution confidence
    pub confidence: f64,
    pub timeframe: Timeframe,
    pub key_factors: Vec<String>,
    /// Stages that fell back to substitute data
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<StageWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    pub error: String,
    pub success: bool,
}
