//! Per-query accumulating context

use agent_core::Context;
use serde::{Deserialize, Serialize};

use crate::models::{Analysis, NewsItem, PriceChange, Quote, Timeframe, TickerResolution};

/// Everything learned about one query so far
///
/// Fields start empty and are filled in pipeline order. A stage that has run
/// always leaves its field populated, with fallback data if need be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryContext {
    pub user_query: String,
    pub timeframe: Timeframe,
    pub resolution: Option<TickerResolution>,
    pub quote: Option<Quote>,
    pub price_change: Option<PriceChange>,
    pub news: Option<Vec<NewsItem>>,
    pub analysis: Option<Analysis>,
    /// Provider problems papered over by fallback data
    pub warnings: Vec<StageWarning>,
}

/// A degraded stage and the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageWarning {
    pub stage: String,
    pub message: String,
}

/// One stage's contribution to a [`QueryContext`]
#[derive(Debug, Clone, PartialEq)]
pub enum ContextDelta {
    Ticker(TickerResolution),
    Quote(Quote),
    PriceChange(PriceChange),
    News(Vec<NewsItem>),
    Analysis(Analysis),
}

impl QueryContext {
    pub fn new(user_query: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            user_query: user_query.into(),
            timeframe,
            resolution: None,
            quote: None,
            price_change: None,
            news: None,
            analysis: None,
            warnings: Vec::new(),
        }
    }

    pub fn ticker(&self) -> Option<&str> {
        self.resolution.as_ref().and_then(TickerResolution::ticker)
    }

    pub fn company_name(&self) -> Option<&str> {
        self.resolution
            .as_ref()
            .and_then(TickerResolution::company_name)
    }

    /// The resolved ticker, or a missing-input error for stages that need it
    pub fn require_ticker(&self) -> agent_core::Result<&str> {
        self.ticker()
            .ok_or_else(|| agent_core::Error::MissingInput("ticker".to_string()))
    }

    pub fn record_warning(&mut self, stage: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(StageWarning {
            stage: stage.into(),
            message: message.into(),
        });
    }
}

impl Context for QueryContext {
    type Delta = ContextDelta;

    fn merge(&mut self, delta: ContextDelta) {
        match delta {
            ContextDelta::Ticker(resolution) => self.resolution = Some(resolution),
            ContextDelta::Quote(quote) => self.quote = Some(quote),
            ContextDelta::PriceChange(change) => self.price_change = Some(change),
            ContextDelta::News(news) => self.news = Some(news),
            ContextDelta::Analysis(analysis) => self.analysis = Some(analysis),
        }
    }
}
