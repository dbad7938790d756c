//! Demo: Market Watch
//!
//! Showcases: public market data, client-side request pacing
//!
//! Run: cargo run --bin market_watch [pair ...]

use btce_rest::{BtceClient, ClientConfig, Pair, TradeSide};
use colored::*;
use rust_decimal::Decimal;
use std::time::Instant;

const ROUNDS: usize = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut pairs = std::env::args()
        .skip(1)
        .map(|arg| arg.parse::<Pair>())
        .collect::<Result<Vec<_>, _>>()?;
    if pairs.is_empty() {
        pairs = vec![Pair::new(Pair::BTC_USD), Pair::new(Pair::LTC_BTC)];
    }

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  MARKET WATCH".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = BtceClient::with_config(ClientConfig::from_env()?)?;
    let start = Instant::now();

    for round in 1..=ROUNDS {
        println!("{} Round {}/{}", "▶".cyan(), round, ROUNDS);

        for pair in &pairs {
            match client.ticker(pair).await {
                Ok(ticker) => println!(
                    "  {:<8} {} {}  {} {}  {} {}  {} {}",
                    pair.as_str().to_uppercase().bold(),
                    "LAST:".yellow(),
                    ticker.last,
                    "BID:".yellow(),
                    ticker.sell,
                    "ASK:".yellow(),
                    ticker.buy,
                    "SPREAD:".green(),
                    ticker.spread()
                ),
                Err(e) => println!("  {:<8} {} {}", pair, "error:".red(), e),
            }
        }
        println!();
    }

    for pair in &pairs {
        let trades = match client.trades(pair).await {
            Ok(trades) => trades,
            Err(e) => {
                println!("  {} {}: {}", "✗".red(), pair, e);
                continue;
            }
        };

        let volume: Decimal = trades.iter().map(|t| t.amount).sum();
        let notional: Decimal = trades.iter().map(|t| t.notional()).sum();
        println!(
            "{} {} recent trades on {}, volume {}, vwap {}",
            "✓".green(),
            trades.len(),
            pair,
            volume,
            if volume.is_zero() { Decimal::ZERO } else { (notional / volume).round_dp(5) }
        );

        for trade in trades.iter().take(5) {
            let side = match trade.trade_type {
                TradeSide::Bid => "bid".green(),
                TradeSide::Ask => "ask".red(),
            };
            let time = trade
                .executed_at()
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_default();
            println!("    {} {} {} @ {} {}", time, side, trade.amount, trade.price, trade.price_currency);
        }
    }

    println!();
    println!(
        "{} {:.1}s elapsed (public requests paced at {:?})",
        "Done.".dimmed(),
        start.elapsed().as_secs_f64(),
        client.rate_limiter().config().public_interval
    );

    Ok(())
}
