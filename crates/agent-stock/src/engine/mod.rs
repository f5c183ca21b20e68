//! Stock Analysis Engine
//!
//! Coordination layer that threads a [`QueryContext`] through the stages

pub mod analysis_engine;
pub mod context;
pub mod result;

pub use analysis_engine::{NO_TICKER_ERROR, StockAnalysisEngine};
pub use context::{ContextDelta, QueryContext, StageWarning};
pub use result::{FailureReport, QueryResponse, StockReport};
