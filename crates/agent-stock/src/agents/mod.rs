//! Pipeline stages
//!
//! Each stage implements [`agent_core::Agent`] over
//! [`QueryContext`](crate::engine::QueryContext) and contributes one
//! [`ContextDelta`](crate::engine::ContextDelta).

pub mod analysis_generator;
pub mod news_fetcher;
pub mod price_change;
pub mod price_fetcher;
pub mod ticker_resolver;

pub use analysis_generator::AnalysisGeneratorAgent;
pub use news_fetcher::NewsFetcherAgent;
pub use price_change::PriceChangeAgent;
pub use price_fetcher::PriceFetcherAgent;
pub use ticker_resolver::TickerResolverAgent;
