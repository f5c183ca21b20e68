//! Configuration for stock analysis operations

use crate::error::{Result, StockError};
use crate::models::Timeframe;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Alpha Vantage endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Environment variable holding the Alpha Vantage key
pub const ENV_API_KEY: &str = "ALPHA_VANTAGE_API_KEY";
/// Environment variable overriding the provider endpoint
pub const ENV_BASE_URL: &str = "ALPHA_VANTAGE_BASE_URL";
/// Environment variable overriding the per-request timeout, in seconds
pub const ENV_REQUEST_TIMEOUT: &str = "STOCK_REQUEST_TIMEOUT_SECS";
/// Environment variable overriding the minimum gap between provider calls, in ms
pub const ENV_MIN_CALL_INTERVAL: &str = "STOCK_MIN_CALL_INTERVAL_MS";

/// Configuration for stock analysis operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Alpha Vantage API key (optional; without it every stage degrades to fallback data)
    pub alpha_vantage_api_key: Option<String>,

    /// Provider endpoint
    pub base_url: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Minimum gap between two consecutive provider calls
    pub min_call_interval: Duration,

    /// Number of articles requested from the news provider
    pub news_fetch_limit: usize,

    /// Number of articles kept in the context
    pub news_keep: usize,

    /// Number of articles echoed back in the response
    pub recent_news: usize,

    /// Window used by the price-change stage
    pub timeframe: Timeframe,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            min_call_interval: Duration::from_secs(1),
            news_fetch_limit: 10,
            news_keep: 5,
            recent_news: 3,
            timeframe: Timeframe::default(),
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Build a configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(StockError::ConfigError("base_url must not be empty".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.news_fetch_limit == 0 || self.news_keep == 0 {
            return Err(StockError::ConfigError(
                "news limits must be greater than 0".to_string(),
            ));
        }

        if self.recent_news > self.news_keep {
            return Err(StockError::ConfigError(format!(
                "recent_news ({}) cannot exceed news_keep ({})",
                self.recent_news, self.news_keep
            )));
        }

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    alpha_vantage_api_key: Option<String>,
    base_url: Option<String>,
    request_timeout: Option<Duration>,
    min_call_interval: Option<Duration>,
    news_fetch_limit: Option<usize>,
    news_keep: Option<usize>,
    recent_news: Option<usize>,
    timeframe: Option<Timeframe>,
    env_error: Option<StockError>,
}

impl StockConfigBuilder {
    /// Set Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set the provider endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the minimum gap between provider calls (zero disables pacing)
    pub fn min_call_interval(mut self, duration: Duration) -> Self {
        self.min_call_interval = Some(duration);
        self
    }

    /// Set how many articles to request from the news provider
    pub fn news_fetch_limit(mut self, limit: usize) -> Self {
        self.news_fetch_limit = Some(limit);
        self
    }

    /// Set how many articles to keep
    pub fn news_keep(mut self, keep: usize) -> Self {
        self.news_keep = Some(keep);
        self
    }

    /// Set how many articles the response echoes back
    pub fn recent_news(mut self, count: usize) -> Self {
        self.recent_news = Some(count);
        self
    }

    /// Set the price-change window
    pub fn timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = Some(timeframe);
        self
    }

    /// Load Alpha Vantage API key from environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Some(key) = agent_utils::env_string(ENV_API_KEY) {
            self.alpha_vantage_api_key = Some(key);
        }
        self
    }

    /// Load every supported setting from the environment
    ///
    /// A malformed value is reported by [`build`](Self::build).
    pub fn with_env(mut self) -> Self {
        self = self.with_env_api_key();

        if let Some(url) = agent_utils::env_string(ENV_BASE_URL) {
            self.base_url = Some(url);
        }

        match agent_utils::env_duration_secs(ENV_REQUEST_TIMEOUT) {
            Ok(Some(timeout)) => self.request_timeout = Some(timeout),
            Ok(None) => {}
            Err(e) => self.env_error = Some(e.into()),
        }

        match agent_utils::env_duration_millis(ENV_MIN_CALL_INTERVAL) {
            Ok(Some(interval)) => self.min_call_interval = Some(interval),
            Ok(None) => {}
            Err(e) => self.env_error = Some(e.into()),
        }

        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        if let Some(err) = self.env_error {
            return Err(err);
        }

        let defaults = StockConfig::default();

        let config = StockConfig {
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            base_url: self.base_url.unwrap_or(defaults.base_url),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            min_call_interval: self.min_call_interval.unwrap_or(defaults.min_call_interval),
            news_fetch_limit: self.news_fetch_limit.unwrap_or(defaults.news_fetch_limit),
            news_keep: self.news_keep.unwrap_or(defaults.news_keep),
            recent_news: self.recent_news.unwrap_or(defaults.recent_news),
            timeframe: self.timeframe.unwrap_or(defaults.timeframe),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.min_call_interval, Duration::from_secs(1));
        assert_eq!(config.news_fetch_limit, 10);
        assert_eq!(config.news_keep, 5);
        assert_eq!(config.recent_news, 3);
        assert_eq!(config.timeframe, Timeframe::OneDay);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = StockConfig::builder()
            .alpha_vantage_api_key("demo")
            .base_url("http://127.0.0.1:9")
            .request_timeout(Duration::from_secs(2))
            .min_call_interval(Duration::ZERO)
            .timeframe(Timeframe::FiveDays)
            .build()
            .unwrap();

        assert_eq!(config.alpha_vantage_api_key.as_deref(), Some("demo"));
        assert_eq!(config.base_url, "http://127.0.0.1:9");
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert!(config.min_call_interval.is_zero());
        assert_eq!(config.timeframe, Timeframe::FiveDays);
    }

    #[test]
    fn test_validation_recent_news_exceeds_kept() {
        let result = StockConfig::builder().news_keep(2).recent_news(3).build();
        assert!(matches!(result, Err(StockError::ConfigError(_))));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = StockConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let config = StockConfig {
            base_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
