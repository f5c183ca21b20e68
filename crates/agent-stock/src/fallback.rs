//! Deterministic substitute data used when a provider call fails
//!
//! Every value here is derived from a stable hash of the ticker, so the same
//! ticker always degrades to the same numbers regardless of process or host.

use crate::models::{MarketStatus, NewsItem, PriceChange, Quote, Timeframe};

/// Base of the fallback price range `[150, 250)`
const FALLBACK_PRICE_BASE: f64 = 150.0;

/// Stable 64-bit hash of a ticker
///
/// The first eight bytes of the BLAKE3 digest, read little-endian.
pub fn stable_hash(ticker: &str) -> u64 {
    let digest = blake3::hash(ticker.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

/// Fallback price for a ticker
pub fn fallback_price(ticker: &str) -> f64 {
    FALLBACK_PRICE_BASE + (stable_hash(ticker) % 100) as f64
}

/// Quote used when the quote provider is unavailable
pub fn fallback_quote(ticker: &str, last_updated: String) -> Quote {
    Quote {
        price: fallback_price(ticker),
        currency: "USD".to_string(),
        last_updated,
        market_status: MarketStatus::Closed,
    }
}

/// Synthesized price change in `[-10, 9]` dollars, percent in `[-0.5, 0.45]`
pub fn mock_price_change(ticker: &str, timeframe: Timeframe) -> PriceChange {
    let change = (stable_hash(ticker) % 20) as f64 - 10.0;
    PriceChange {
        change,
        change_percent: change / 100.0 * 5.0,
        start_price: None,
        end_price: None,
        timeframe,
    }
}

/// Two canned articles used when the news provider has nothing
pub fn canned_news(ticker: &str) -> Vec<NewsItem> {
    vec![
        NewsItem {
            title: format!("{ticker} Reports Strong Quarterly Earnings"),
            summary: format!(
                "{ticker} exceeded analysts' expectations with strong revenue growth and positive outlook for next quarter."
            ),
            url: "https://example.com/news1".to_string(),
            time_published: "2024-01-15T09:30:00".to_string(),
            sentiment: "Bullish".to_string(),
        },
        NewsItem {
            title: format!("Market Analysis: {ticker} Stock Movement"),
            summary: format!(
                "Recent market volatility has affected {ticker} stock price, but fundamentals remain strong."
            ),
            url: "https://example.com/news2".to_string(),
            time_published: "2024-01-14T14:22:00".to_string(),
            sentiment: "Neutral".to_string(),
        },
    ]
}
