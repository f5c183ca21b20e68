//! Request handlers

use chrono::Utc;
use tracing::{info, warn};

use super::message::{AnalyzeRequest, HealthReport};
use crate::engine::{QueryResponse, StockAnalysisEngine};

pub const NO_QUERY_ERROR: &str = "No query provided";

/// Validate a request and run it through the engine
pub async fn analyze(engine: &StockAnalysisEngine, request: &AnalyzeRequest) -> QueryResponse {
    let Some(query) = request.trimmed_query() else {
        warn!("Rejected request without a query");
        return QueryResponse::failure(NO_QUERY_ERROR);
    };

    let timeframe = request.timeframe.unwrap_or(engine.config().timeframe);
    let response = engine.process_query_for(query, timeframe).await;
    info!(success = response.is_success(), "Analyze request finished");
    response
}

/// Liveness probe; performs no I/O
pub fn health() -> HealthReport {
    HealthReport {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketData;
    use crate::config::StockConfig;
    use crate::error::StockError;
    use crate::models::Timeframe;
    use std::sync::Arc;
    use std::time::Duration;

    fn engine(provider: MockMarketData) -> StockAnalysisEngine {
        let config = StockConfig::builder()
            .min_call_interval(Duration::ZERO)
            .build()
            .unwrap();
        StockAnalysisEngine::with_provider(Arc::new(config), Arc::new(provider)).unwrap()
    }

    #[tokio::test]
    async fn test_blank_query_rejected_before_pipeline() {
        let engine = engine(MockMarketData::new());

        for request in [AnalyzeRequest::default(), AnalyzeRequest::new(" \t ")] {
            let response = analyze(&engine, &request).await;
            assert_eq!(response.error(), Some(NO_QUERY_ERROR));
        }
    }

    #[tokio::test]
    async fn test_request_timeframe_is_used() {
        let mut provider = MockMarketData::new();
        provider
            .expect_global_quote()
            .returning(|s| Err(StockError::unavailable(s, "No price data")));
        provider
            .expect_daily_series()
            .returning(|s| Err(StockError::unavailable(s, "No daily data found")));
        provider
            .expect_news_sentiment()
            .returning(|_, _| Ok(Vec::new()));

        let request = AnalyzeRequest::new("spotify").with_timeframe(Timeframe::FiveDays);
        let response = analyze(&engine(provider), &request).await;

        let report = response.report().unwrap();
        assert_eq!(report.ticker, "SPOT");
        assert_eq!(report.timeframe, Timeframe::FiveDays);
    }

    #[test]
    fn test_health() {
        let report = health();
        assert_eq!(report.status, "healthy");

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "healthy");
        assert!(value["timestamp"].is_string());
    }
}
