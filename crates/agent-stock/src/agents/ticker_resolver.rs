//! Ticker resolution from free-text queries

use agent_core::{Agent, Outcome, Result};
use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, info};

use crate::engine::{ContextDelta, QueryContext};
use crate::error::StockError;
use crate::models::TickerResolution;

/// Known companies: lower-case alias and ticker
///
/// Order matters: aliases are matched first to last, and the last alias for
/// a ticker supplies its display name.
const KNOWN_COMPANIES: &[(&str, &str)] = &[
    ("tesla", "TSLA"),
    ("apple", "AAPL"),
    ("microsoft", "MSFT"),
    ("google", "GOOGL"),
    ("alphabet", "GOOGL"),
    ("amazon", "AMZN"),
    ("nvidia", "NVDA"),
    ("meta", "META"),
    ("facebook", "META"),
    ("palantir", "PLTR"),
    ("netflix", "NFLX"),
    ("spotify", "SPOT"),
    ("uber", "UBER"),
    ("airbnb", "ABNB"),
    ("coinbase", "COIN"),
    ("robinhood", "HOOD"),
    ("gamestop", "GME"),
    ("amc", "AMC"),
    ("blackberry", "BB"),
    ("nokia", "NOK"),
    ("ford", "F"),
    ("general motors", "GM"),
    ("gm", "GM"),
];

/// A standalone run of one to five capitals
const TICKER_PATTERN: &str = r"\b[A-Z]{1,5}\b";

/// Maps a query to a ticker with a keyword/regex lookup
pub struct TickerResolverAgent {
    ticker_pattern: Regex,
}

impl TickerResolverAgent {
    /// Create a new resolver
    pub fn new() -> crate::Result<Self> {
        let ticker_pattern = Regex::new(TICKER_PATTERN)
            .map_err(|e| StockError::Other(format!("Invalid ticker pattern: {e}")))?;
        Ok(Self { ticker_pattern })
    }

    /// Resolve a query
    ///
    /// Tries a standalone uppercase token first, then company aliases, then
    /// known symbols appearing anywhere in the lower-cased text.
    pub fn resolve(&self, query: &str) -> TickerResolution {
        if let Some(token) = self.ticker_pattern.find(query) {
            let ticker = token.as_str();
            let company_name = company_name_for(ticker).unwrap_or_else(|| ticker.to_string());
            debug!(ticker, "Matched standalone ticker token");
            return TickerResolution::resolved(ticker, company_name);
        }

        let lowered = query.to_lowercase();

        if let Some(&(alias, ticker)) = KNOWN_COMPANIES
            .iter()
            .find(|&&(alias, _)| lowered.contains(alias))
        {
            debug!(alias, ticker, "Matched company alias");
            return TickerResolution::resolved(ticker, title_case(alias));
        }

        if let Some(ticker) =
            known_tickers().find(|ticker| lowered.contains(&ticker.to_lowercase()))
        {
            debug!(ticker, "Matched lower-cased ticker");
            let company_name = company_name_for(ticker).unwrap_or_else(|| ticker.to_string());
            return TickerResolution::resolved(ticker, company_name);
        }

        TickerResolution::unresolved()
    }
}

/// Display name for a known ticker, from its last alias
fn company_name_for(ticker: &str) -> Option<String> {
    KNOWN_COMPANIES
        .iter()
        .rev()
        .find(|&&(_, t)| t == ticker)
        .map(|&(alias, _)| title_case(alias))
}

/// Upper-case the first letter of every word
fn title_case(alias: &str) -> String {
    alias
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Known symbols in order of first appearance
fn known_tickers() -> impl Iterator<Item = &'static str> {
    KNOWN_COMPANIES
        .iter()
        .enumerate()
        .filter_map(|(i, &(_, ticker))| {
            let seen = KNOWN_COMPANIES[..i].iter().any(|&(_, t)| t == ticker);
            (!seen).then_some(ticker)
        })
}

#[async_trait]
impl Agent<QueryContext> for TickerResolverAgent {
    async fn process(&self, context: &QueryContext) -> Result<Outcome<ContextDelta>> {
        let resolution = self.resolve(&context.user_query);
        info!(
            ticker = resolution.ticker().unwrap_or("<none>"),
            confidence = resolution.confidence,
            "Ticker resolution finished"
        );
        Ok(Outcome::clean(ContextDelta::Ticker(resolution)))
    }

    fn name(&self) -> &str {
        "TickerResolverAgent"
    }
}
