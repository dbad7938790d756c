//! Demo: Account Summary
//!
//! Showcases: authenticated trade API calls, envelope handling
//!
//! Run: BTCE_API_KEY=... BTCE_API_SECRET=... cargo run --bin account_summary

use btce_rest::{BtceClient, ClientConfig, HistoryFilter, TradeHistoryQuery};
use colored::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT SUMMARY".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = BtceClient::with_config(ClientConfig::from_env()?)?;
    if !client.has_credentials() {
        println!("{} Set BTCE_API_KEY and BTCE_API_SECRET first", "✗".red());
        return Ok(());
    }

    let info = client.get_info().await?.into_result()?;
    let server_time = info
        .server_time_utc()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default();

    println!("{} Server time {}", "✓".green(), server_time);
    println!(
        "  {} info={} trade={} withdraw={}",
        "Rights:".yellow(),
        info.rights.info,
        info.rights.trade,
        info.rights.withdraw
    );
    println!(
        "  {} {}   {} {}",
        "Transactions:".yellow(),
        info.transaction_count,
        "Open orders:".yellow(),
        info.open_orders
    );
    println!();

    println!("{}", "  Balances".bold());
    let mut funds: Vec<_> = info.funds.non_zero().collect();
    funds.sort_by(|a, b| a.0.cmp(b.0));
    if funds.is_empty() {
        println!("  {}", "(all zero)".dimmed());
    }
    for (currency, amount) in funds {
        println!("  {:>5}  {}", currency.to_uppercase(), amount);
    }
    println!();

    println!("{}", "  Active orders".bold());
    let orders = client.active_orders(None).await?;
    if orders.is_success() {
        for order in orders.into_result()? {
            println!(
                "  #{:<10} {:<8} {:<4} {} @ {}",
                order.order_id,
                order.details.pair,
                order.details.kind,
                order.details.amount,
                order.details.rate
            );
        }
    } else {
        // The exchange reports an empty list as an error
        println!("  {}", orders.error.dimmed());
    }
    println!();

    println!("{}", "  Last trades".bold());
    let query = TradeHistoryQuery::new().with_filter(HistoryFilter::new().with_count(10));
    let trades = client.trade_history(&query).await?;
    if trades.is_success() {
        for trade in trades.into_result()? {
            let side = match trade.details.trade_type() {
                Some(btce_rest::TradeType::Buy) => "buy".green(),
                Some(btce_rest::TradeType::Sell) => "sell".red(),
                None => trade.details.kind.as_str().normal(),
            };
            println!(
                "  #{:<10} {:<8} {:<4} {} @ {}",
                trade.order_id, trade.details.pair, side, trade.details.amount, trade.details.rate
            );
        }
    } else {
        println!("  {}", trades.error.dimmed());
    }

    Ok(())
}
