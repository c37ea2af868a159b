//! Print the analysis of the given symbols.
//!
//! Usage: `tradesight [stock:|crypto:]SYMBOL...`, e.g. `tradesight AAPL crypto:bitcoin`.
//! Symbols without a prefix are treated as stocks.

use dotenvy::dotenv;
use std::sync::Arc;
use tradesight::config::Config;
use tradesight::core::bootstrap::build_provider;
use tradesight::core::{AnalysisOrchestrator, Clock, SystemClock};
use tradesight::logging;
use tradesight::models::{AssetAnalysis, AssetType};
use tradesight::services::currency::{format_price, Currency};

fn parse_target(arg: &str) -> Result<(String, AssetType), String> {
    match arg.split_once(':') {
        Some((kind, symbol)) => Ok((symbol.to_string(), kind.parse()?)),
        None => Ok((arg.to_string(), AssetType::Stock)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    let targets = std::env::args()
        .skip(1)
        .map(|arg| parse_target(&arg))
        .collect::<Result<Vec<_>, _>>()?;
    if targets.is_empty() {
        return Err("usage: tradesight [stock:|crypto:]SYMBOL...".into());
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let provider = build_provider(&config, clock.clone())?;
    let orchestrator = AnalysisOrchestrator::new(clock);

    let results = orchestrator
        .analyze_many(provider.as_ref(), &targets)
        .await;
    for ((symbol, _), result) in targets.iter().zip(results) {
        match result {
            Ok(analysis) => print_analysis(&analysis),
            Err(e) => println!("{}: {}", symbol, e),
        }
        println!();
    }

    Ok(())
}

fn print_analysis(analysis: &AssetAnalysis) {
    let signal = &analysis.signal;
    let currency = Currency::Usd;
    println!("{} ({})", analysis.asset.symbol, analysis.asset.name);
    println!("  Price: {}", format_price(analysis.asset.price, currency));
    println!("  Signal: {} (strength {:.0})", signal.classification, signal.strength);
    println!(
        "  Probability: up {}% / down {}%",
        signal.probability.up, signal.probability.down
    );
    println!("  Confidence: {:.0}%", signal.confidence);
    if let Some(target) = &signal.price_target {
        println!(
            "  Targets: bullish {} / bearish {}",
            format_price(target.bullish, currency),
            format_price(target.bearish, currency)
        );
    }
    println!("  Reasons:");
    for (i, reason) in signal.reasoning.iter().enumerate() {
        println!("    {}. {}", i + 1, reason);
    }
}
