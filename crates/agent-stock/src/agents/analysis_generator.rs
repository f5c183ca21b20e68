//! Templated analysis from price movement and news sentiment
//!
//! Generation is a pure function of its inputs: the same ticker, news and
//! price change always produce the same narrative, label and factors.

use agent_core::{Agent, Outcome, Result};
use async_trait::async_trait;
use tracing::info;

use crate::engine::{ContextDelta, QueryContext};
use crate::models::{Analysis, NewsItem, SentimentLabel};

const MAX_KEY_FACTORS: usize = 5;

/// Factors listed for every stock, after any movement-specific ones
const STANDING_FACTORS: [&str; 3] = ["Market sentiment", "Trading volume", "Sector performance"];

/// Turns the gathered data into a narrative, sentiment label and key factors
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalysisGeneratorAgent;

impl AnalysisGeneratorAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        ticker: &str,
        news: &[NewsItem],
        price_change: f64,
        price_change_percent: f64,
    ) -> Analysis {
        let bullish = news.iter().filter(|item| item.is_bullish()).count();
        let bearish = news.iter().filter(|item| item.is_bearish()).count();

        let consistency = if is_consistent(price_change_percent, bullish, bearish) {
            "consistent"
        } else {
            "inconsistent"
        };

        let narrative = format!(
            "Based on recent data, {ticker} has experienced a {direction} of \
             {price_change_percent:.2}% (${price_change:.2}) in the analyzed timeframe.\n\
             \n\
             News Analysis:\n\
             - {count} recent news articles found\n\
             - {bullish} articles with positive sentiment\n\
             - {bearish} articles with negative sentiment\n\
             \n\
             The price movement appears to be {consistency} with the overall news sentiment.\n\
             \n\
             Key recent developments include market reactions to earnings reports, \
             industry trends, and broader economic factors affecting the stock.",
            direction = direction(price_change_percent),
            count = news.len(),
        );

        Analysis {
            narrative,
            sentiment: SentimentLabel::from_percent(price_change_percent),
            key_factors: key_factors(price_change_percent, !news.is_empty()),
        }
    }
}

fn direction(percent: f64) -> &'static str {
    if percent > 2.0 {
        "significant increase"
    } else if percent > 0.0 {
        "modest increase"
    } else if percent < -2.0 {
        "significant decrease"
    } else if percent < 0.0 {
        "modest decrease"
    } else {
        "relatively stable movement"
    }
}

fn is_consistent(percent: f64, bullish: usize, bearish: usize) -> bool {
    (percent > 0.0 && bullish > bearish) || (percent < 0.0 && bearish > bullish)
}

fn key_factors(percent: f64, has_news: bool) -> Vec<String> {
    let mut factors = Vec::with_capacity(MAX_KEY_FACTORS);
    if percent.abs() > 2.0 {
        factors.push("Significant price volatility".to_string());
    }
    if has_news {
        factors.push("Recent news coverage".to_string());
    }
    factors.extend(STANDING_FACTORS.iter().map(ToString::to_string));
    factors.truncate(MAX_KEY_FACTORS);
    factors
}

#[async_trait]
impl Agent<QueryContext> for AnalysisGeneratorAgent {
    async fn process(&self, context: &QueryContext) -> Result<Outcome<ContextDelta>> {
        let ticker = context.require_ticker()?;
        let news = context.news.as_deref().unwrap_or_default();
        let (change, percent) = context
            .price_change
            .as_ref()
            .map_or((0.0, 0.0), |pc| (pc.change, pc.change_percent));

        let analysis = self.generate(ticker, news, change, percent);
        info!(
            ticker,
            sentiment = %analysis.sentiment,
            "Generated analysis"
        );

        Ok(Outcome::clean(ContextDelta::Analysis(analysis)))
    }

    fn name(&self) -> &str {
        "AnalysisGeneratorAgent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::canned_news;

    fn news_with(sentiments: &[&str]) -> Vec<NewsItem> {
        sentiments
            .iter()
            .enumerate()
            .map(|(n, s)| NewsItem {
                title: format!("Story {n}"),
                summary: String::new(),
                url: String::new(),
                time_published: String::new(),
                sentiment: (*s).to_string(),
            })
            .collect()
    }

    #[test]
    fn test_narrative_template() {
        let news = news_with(&["Bullish", "positive", "Neutral"]);
        let analysis = AnalysisGeneratorAgent.generate("AAPL", &news, 4.5, 2.5);

        let expected = "Based on recent data, AAPL has experienced a significant increase of 2.50% ($4.50) in the analyzed timeframe.\n\
            \n\
            News Analysis:\n\
            - 3 recent news articles found\n\
            - 2 articles with positive sentiment\n\
            - 0 articles with negative sentiment\n\
            \n\
            The price movement appears to be consistent with the overall news sentiment.\n\
            \n\
            Key recent developments include market reactions to earnings reports, industry trends, and broader economic factors affecting the stock.";
        assert_eq!(analysis.narrative, expected);
        assert_eq!(analysis.sentiment, SentimentLabel::Bullish);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let news = canned_news("TSLA");
        let agent = AnalysisGeneratorAgent::new();
        let first = agent.generate("TSLA", &news, -3.0, -0.15);
        let second = agent.generate("TSLA", &news, -3.0, -0.15);
        assert_eq!(first, second);
    }

    #[test]
    fn test_direction_boundaries() {
        assert_eq!(direction(2.01), "significant increase");
        assert_eq!(direction(2.0), "modest increase");
        assert_eq!(direction(0.01), "modest increase");
        assert_eq!(direction(0.0), "relatively stable movement");
        assert_eq!(direction(-0.01), "modest decrease");
        assert_eq!(direction(-2.0), "modest decrease");
        assert_eq!(direction(-2.01), "significant decrease");
    }

    #[test]
    fn test_sentiment_boundaries() {
        let agent = AnalysisGeneratorAgent;
        let label = |pct| agent.generate("F", &[], 0.0, pct).sentiment;
        assert_eq!(label(3.01), SentimentLabel::VeryBullish);
        assert_eq!(label(3.0), SentimentLabel::Bullish);
        assert_eq!(label(1.0), SentimentLabel::Neutral);
        assert_eq!(label(-1.0), SentimentLabel::Bearish);
        assert_eq!(label(-3.0), SentimentLabel::VeryBearish);
    }

    #[test]
    fn test_consistency() {
        let bearish_news = news_with(&["Bearish", "negative", "Bullish"]);
        let analysis = AnalysisGeneratorAgent.generate("GM", &bearish_news, -5.0, -2.5);
        assert!(analysis.narrative.contains("appears to be consistent"));

        let analysis = AnalysisGeneratorAgent.generate("GM", &bearish_news, 5.0, 2.5);
        assert!(analysis.narrative.contains("appears to be inconsistent"));

        // A flat move is never consistent
        let analysis = AnalysisGeneratorAgent.generate("GM", &bearish_news, 0.0, 0.0);
        assert!(analysis.narrative.contains("appears to be inconsistent"));
    }

    #[test]
    fn test_key_factors() {
        let news = canned_news("AMC");
        let full = AnalysisGeneratorAgent.generate("AMC", &news, 10.0, 4.0);
        assert_eq!(
            full.key_factors,
            vec![
                "Significant price volatility",
                "Recent news coverage",
                "Market sentiment",
                "Trading volume",
                "Sector performance",
            ]
        );

        let quiet = AnalysisGeneratorAgent.generate("AMC", &[], 0.1, 0.1);
        assert_eq!(
            quiet.key_factors,
            vec!["Market sentiment", "Trading volume", "Sector performance"]
        );
        assert!(quiet.key_factors.len() <= MAX_KEY_FACTORS);
    }

    #[tokio::test]
    async fn test_process_without_price_change() {
        use crate::models::{TickerResolution, Timeframe};
        use agent_core::Context;

        let mut ctx = QueryContext::new("ford", Timeframe::OneDay);
        ctx.merge(ContextDelta::Ticker(TickerResolution::resolved("F", "Ford")));

        let outcome = AnalysisGeneratorAgent.process(&ctx).await.unwrap();
        match outcome.delta {
            ContextDelta::Analysis(analysis) => {
                assert_eq!(analysis.sentiment, SentimentLabel::Neutral);
                assert!(analysis.narrative.contains("relatively stable movement"));
                assert!(analysis.narrative.contains("- 0 recent news articles found"));
            }
            other => panic!("unexpected delta: {other:?}"),
        }
    }
}
