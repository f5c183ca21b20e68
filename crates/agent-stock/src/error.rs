//! Error types for stock analysis operations

use thiserror::Error;

/// Stock analysis specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Rate limit notice returned by the provider
    #[error("API limit exceeded for {provider}: {notice}")]
    RateLimitExceeded { provider: String, notice: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Alpha Vantage API error
    #[error("Alpha Vantage error: {0}")]
    AlphaVantageError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl StockError {
    /// Shorthand for a [`StockError::DataUnavailable`]
    pub fn unavailable(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Convert StockError to agent_core::Error
impl From<StockError> for agent_core::Error {
    fn from(err: StockError) -> Self {
        agent_core::Error::ProcessingFailed(err.to_string())
    }
}

/// Convert agent_core::Error to StockError
impl From<agent_core::Error> for StockError {
    fn from(err: agent_core::Error) -> Self {
        StockError::Other(err.to_string())
    }
}

impl From<agent_utils::EnvError> for StockError {
    fn from(err: agent_utils::EnvError) -> Self {
        StockError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StockError::unavailable("AAPL", "No price data available in response");
        assert_eq!(
            err.to_string(),
            "Data not available for AAPL: No price data available in response"
        );

        let err = StockError::RateLimitExceeded {
            provider: "Alpha Vantage".to_string(),
            notice: "5 calls per minute".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API limit exceeded for Alpha Vantage: 5 calls per minute"
        );
    }

    #[test]
    fn test_error_conversion() {
        let stock_err = StockError::AlphaVantageError("Invalid API call".to_string());
        let agent_err: agent_core::Error = stock_err.into();

        match agent_err {
            agent_core::Error::ProcessingFailed(msg) => {
                assert!(msg.contains("Alpha Vantage error"));
            }
            _ => panic!("Expected ProcessingFailed variant"),
        }
    }

    #[test]
    fn test_env_error_conversion() {
        let err: StockError = agent_utils::EnvError {
            key: "STOCK_REQUEST_TIMEOUT_SECS".to_string(),
            value: "ten".to_string(),
        }
        .into();
        assert!(matches!(err, StockError::ConfigError(_)));
    }
}
