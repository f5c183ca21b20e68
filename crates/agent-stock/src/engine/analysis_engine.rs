//! Stock Analysis Engine - runs the stage pipeline for one query

use agent_core::{Agent, Context};
use chrono::Utc;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::context::QueryContext;
use super::result::{QueryResponse, StockReport};
use crate::agents::{
    AnalysisGeneratorAgent, NewsFetcherAgent, PriceChangeAgent, PriceFetcherAgent,
    TickerResolverAgent,
};
use crate::api::{AlphaVantageClient, MarketData, pacer_for};
use crate::config::StockConfig;
use crate::error::Result;
use crate::models::{MarketStatus, SentimentLabel, Timeframe};

pub const NO_TICKER_ERROR: &str = "Could not identify stock ticker from query";

const NO_ANALYSIS: &str = "No analysis available";

/// Stock Analysis Engine
///
/// Resolves the ticker, then fetches the quote, price change and news before
/// generating the analysis. Stages run strictly in that order and each
/// stage's delta is merged before the next one starts.
///
/// Provider calls within one query are spaced by `min_call_interval`. The
/// spacing state lives only as long as the query, so concurrent queries on a
/// shared engine do not delay each other.
pub struct StockAnalysisEngine {
    config: Arc<StockConfig>,
    resolver: TickerResolverAgent,
    price: PriceFetcherAgent,
    price_change: PriceChangeAgent,
    news: NewsFetcherAgent,
    analysis: AnalysisGeneratorAgent,
}

impl StockAnalysisEngine {
    /// Create an engine backed by Alpha Vantage
    pub fn new(config: Arc<StockConfig>) -> Result<Self> {
        config.validate()?;
        let provider: Arc<dyn MarketData> = Arc::new(AlphaVantageClient::new(&config)?);
        Self::with_provider(config, provider)
    }

    /// Create an engine over any market data provider
    pub fn with_provider(config: Arc<StockConfig>, provider: Arc<dyn MarketData>) -> Result<Self> {
        Ok(Self {
            resolver: TickerResolverAgent::new()?,
            price: PriceFetcherAgent::new(provider.clone()),
            price_change: PriceChangeAgent::new(provider.clone()),
            news: NewsFetcherAgent::new(provider, &config),
            analysis: AnalysisGeneratorAgent::new(),
            config,
        })
    }

    pub fn config(&self) -> &StockConfig {
        &self.config
    }

    /// Answer a query over the configured timeframe
    pub async fn process_query(&self, query: &str) -> QueryResponse {
        self.process_query_for(query, self.config.timeframe).await
    }

    /// Answer a query over an explicit timeframe
    ///
    /// Never fails: errors and panics inside the pipeline come back as a
    /// failure response.
    #[instrument(skip(self))]
    pub async fn process_query_for(&self, query: &str, timeframe: Timeframe) -> QueryResponse {
        info!("Processing query: {}", query);

        let run = AssertUnwindSafe(self.run_pipeline(query, timeframe))
            .catch_unwind()
            .await;

        let message = match run {
            Ok(Ok(response)) => return response,
            Ok(Err(e)) => e.to_string(),
            Err(panic) => panic_message(panic.as_ref()),
        };

        error!("Error processing query: {}", message);
        QueryResponse::failure(format!("Failed to process query: {message}"))
    }

    async fn run_pipeline(
        &self,
        query: &str,
        timeframe: Timeframe,
    ) -> agent_core::Result<QueryResponse> {
        let mut context = QueryContext::new(query, timeframe);

        run_stage(&self.resolver, &mut context).await?;
        if context.ticker().is_none() {
            warn!("No ticker found in query: {}", query);
            return Ok(QueryResponse::failure(NO_TICKER_ERROR));
        }

        let pacer = pacer_for(self.config.min_call_interval);

        // First turn on a fresh pacer is immediate
        pacer.wait_turn().await;
        run_stage(&self.price, &mut context).await?;

        pacer.wait_turn().await;
        run_stage(&self.price_change, &mut context).await?;

        pacer.wait_turn().await;
        run_stage(&self.news, &mut context).await?;

        run_stage(&self.analysis, &mut context).await?;

        compile(context, self.config.recent_news)
    }
}

/// Run one stage and merge its delta, recording any fallback
async fn run_stage<A>(agent: &A, context: &mut QueryContext) -> agent_core::Result<()>
where
    A: Agent<QueryContext>,
{
    let stage = agent.name();
    debug!(stage, "Running stage");

    let outcome = agent.process(context).await?;
    if let Some(diagnostic) = outcome.diagnostic {
        warn!(stage, "Stage fell back to substitute data: {}", diagnostic);
        context.record_warning(stage, diagnostic);
    }
    context.merge(outcome.delta);

    Ok(())
}

fn compile(context: QueryContext, recent_news: usize) -> agent_core::Result<QueryResponse> {
    let ticker = context.require_ticker()?.to_string();
    let company_name = context.company_name().unwrap_or(ticker.as_str()).to_string();
    let confidence = context
        .resolution
        .as_ref()
        .map_or(0.0, |resolution| resolution.confidence);

    let quote = context.quote;
    let (price_change, price_change_percent) = context
        .price_change
        .as_ref()
        .map_or((0.0, 0.0), |pc| (pc.change, pc.change_percent));
    let news = context.news.unwrap_or_default();
    let (analysis, sentiment, key_factors) = match context.analysis {
        Some(a) => (a.narrative, a.sentiment, a.key_factors),
        None => (NO_ANALYSIS.to_string(), SentimentLabel::Neutral, Vec::new()),
    };

    info!(
        ticker = %ticker,
        sentiment = %sentiment,
        warnings = context.warnings.len(),
        "Compiled response"
    );

    Ok(StockReport {
        company_name,
        current_price: quote.as_ref().map_or(0.0, |q| q.price),
        price_change,
        price_change_percent,
        sentiment,
        news_count: news.len(),
        recent_news: news.into_iter().take(recent_news).collect(),
        analysis,
        timestamp: Utc::now(),
        success: true,
        currency: quote
            .as_ref()
            .map_or_else(|| "USD".to_string(), |q| q.currency.clone()),
        market_status: quote.as_ref().map_or(MarketStatus::Closed, |q| q.market_status),
        last_updated: quote.map(|q| q.last_updated).unwrap_or_default(),
        confidence,
        timeframe: context.timeframe,
        key_factors,
        warnings: context.warnings,
        ticker,
    }
    .into())
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unexpected panic".to_string()
    }
}
