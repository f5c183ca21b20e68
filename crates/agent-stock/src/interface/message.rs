//! Inbound request and liveness message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Timeframe;

/// A free-text analysis request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub query: Option<String>,
    /// Overrides the configured timeframe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
}

impl AnalyzeRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            timeframe: None,
        }
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = Some(timeframe);
        self
    }

    /// The trimmed query, if it has any content
    pub fn trimmed_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_query() {
        assert_eq!(
            AnalyzeRequest::new("  How is Tesla?  ").trimmed_query(),
            Some("How is Tesla?")
        );
        assert_eq!(AnalyzeRequest::new("   ").trimmed_query(), None);
        assert_eq!(AnalyzeRequest::default().trimmed_query(), None);
    }

    #[test]
    fn test_request_from_json() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"query": "apple"}"#).unwrap();
        assert_eq!(req.query.as_deref(), Some("apple"));
        assert_eq!(req.timeframe, None);

        let req: AnalyzeRequest =
            serde_json::from_str(r#"{"query": "apple", "timeframe": "5D"}"#).unwrap();
        assert_eq!(req.timeframe, Some(Timeframe::FiveDays));

        let req: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.query.is_none());
    }
}
