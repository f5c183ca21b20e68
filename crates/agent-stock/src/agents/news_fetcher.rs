//! Recent news for a ticker

use agent_core::{Agent, Outcome, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::MarketData;
use crate::config::StockConfig;
use crate::engine::{ContextDelta, QueryContext};
use crate::fallback;
use crate::models::NewsItem;

/// Fetches sentiment-tagged articles, falling back to a canned pair
pub struct NewsFetcherAgent {
    provider: Arc<dyn MarketData>,
    fetch_limit: usize,
    keep: usize,
}

impl NewsFetcherAgent {
    pub fn new(provider: Arc<dyn MarketData>, config: &StockConfig) -> Self {
        Self {
            provider,
            fetch_limit: config.news_fetch_limit,
            keep: config.news_keep,
        }
    }

    /// At most `keep` articles for `ticker`; never empty
    pub async fn fetch(&self, ticker: &str) -> Outcome<Vec<NewsItem>> {
        info!("Fetching news for ticker: {}", ticker);

        let mut outcome = match self.provider.news_sentiment(ticker, self.fetch_limit).await {
            Ok(news) if news.is_empty() => {
                info!("No news in feed for {}, using canned articles", ticker);
                Outcome::clean(fallback::canned_news(ticker))
            }
            Ok(news) => Outcome::clean(news),
            Err(e) => {
                warn!("Error fetching news for {}: {}", ticker, e);
                Outcome::degraded(fallback::canned_news(ticker), e.to_string())
            }
        };

        outcome.delta.truncate(self.keep);
        outcome
    }
}

#[async_trait]
impl Agent<QueryContext> for NewsFetcherAgent {
    async fn process(&self, context: &QueryContext) -> Result<Outcome<ContextDelta>> {
        let ticker = context.require_ticker()?;
        Ok(self.fetch(ticker).await.map(ContextDelta::News))
    }

    fn name(&self) -> &str {
        "NewsFetcherAgent"
    }
}
