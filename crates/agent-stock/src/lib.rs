//! Free-text stock query pipeline
//!
//! Answers questions like "How is Tesla doing today?" by running a fixed
//! sequence of stages over a shared [`QueryContext`]:
//!
//! - `TickerResolverAgent`: finds the ticker with a keyword/regex lookup
//! - `PriceFetcherAgent`: current quote
//! - `PriceChangeAgent`: close-to-close move over the requested timeframe
//! - `NewsFetcherAgent`: recent sentiment-tagged articles
//! - `AnalysisGeneratorAgent`: templated narrative, sentiment label and key factors
//!
//! Market data comes from Alpha Vantage. Every provider failure is recovered
//! inside its stage with deterministic substitute data, so a resolved ticker
//! always yields a complete response.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_stock::{StockAnalysisEngine, StockConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(StockConfig::from_env()?);
//!     let engine = StockAnalysisEngine::new(config)?;
//!
//!     let response = engine.process_query("How is Tesla doing today?").await;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod interface;
pub mod models;

// Re-export main types for convenience
pub use agents::{
    AnalysisGeneratorAgent, NewsFetcherAgent, PriceChangeAgent, PriceFetcherAgent,
    TickerResolverAgent,
};
pub use api::{AlphaVantageClient, MarketData};
pub use config::StockConfig;
pub use engine::{QueryContext, QueryResponse, StockAnalysisEngine, StockReport};
pub use error::{Result, StockError};
pub use models::{SentimentLabel, Timeframe};
