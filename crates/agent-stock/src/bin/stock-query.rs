//! Stock query CLI
//!
//! Answers one free-text question about a stock and prints the JSON response.
//!
//! # Usage
//!
//! ```bash
//! export ALPHA_VANTAGE_API_KEY="your-key"
//!
//! cargo run --bin stock-query -p agent-stock -- "How is Tesla doing today?"
//! cargo run --bin stock-query -p agent-stock -- --timeframe 5D --pretty NVDA
//! cargo run --bin stock-query -p agent-stock -- --health
//! ```

use agent_stock::interface::{self, AnalyzeRequest};
use agent_stock::{StockAnalysisEngine, StockConfig, Timeframe};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stock-query")]
#[command(about = "Ask a question about a stock", long_about = None)]
struct Args {
    /// Free-text query, e.g. "How is Tesla doing today?"
    query: Vec<String>,

    /// Price change window: 1D, 5D or 1M
    #[arg(short, long)]
    timeframe: Option<Timeframe>,

    /// Pretty-print the JSON response
    #[arg(short, long)]
    pretty: bool,

    /// Print a liveness report and exit
    #[arg(long)]
    health: bool,
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agent_utils::init_tracing_with("warn,agent_stock=info");

    let args = Args::parse();

    if args.health {
        return print_json(&interface::health(), args.pretty);
    }

    let config = Arc::new(StockConfig::from_env()?);
    if config.alpha_vantage_api_key.is_none() {
        info!("No Alpha Vantage API key configured; responses will use fallback data");
    }

    let engine = StockAnalysisEngine::new(config)?;

    let mut request = AnalyzeRequest::new(args.query.join(" "));
    if let Some(timeframe) = args.timeframe {
        request = request.with_timeframe(timeframe);
    }

    let response = interface::analyze(&engine, &request).await;
    print_json(&response, args.pretty)?;

    if !response.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
