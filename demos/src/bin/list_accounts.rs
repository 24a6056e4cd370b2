//! Demo 2: Account Listing
//!
//! Showcases: cursor pagination, typed resource mapping, money amounts
//!
//! Run: cargo run --bin list_accounts

use coinbase_rest::{ClientConfig, CoinbaseClient, ListOptions, ListRequest};
use coinbase_types::Account;
use colored::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

const PAGE_SIZE: u32 = 25;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  COINBASE ACCOUNTS".cyan().bold());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = CoinbaseClient::new(ClientConfig::from_env()?)?;

    println!(
        "  {:<24} {:<8} {:>20} {:>8}",
        "NAME".white().bold(),
        "TYPE".white().bold(),
        "BALANCE".white().bold(),
        "PRIMARY".white().bold()
    );
    println!("  {}", "─".repeat(64));

    let mut request = Some(ListRequest::with_options("accounts", ListOptions::new().limit(PAGE_SIZE)));
    let mut pages = 0;
    let mut total = 0;
    let mut funded = 0;

    while let Some(current) = request {
        let page = client.get_page_of::<Account>(&current).await?;
        pages += 1;

        for account in &page.items {
            total += 1;
            let balance = account
                .balance
                .as_ref()
                .map(|b| b.to_string())
                .unwrap_or_else(|| "-".to_string());
            let has_funds = account
                .balance
                .as_ref()
                .is_some_and(|b| b.amount > Decimal::ZERO);
            if has_funds {
                funded += 1;
            }

            println!(
                "  {:<24} {:<8} {:>20} {:>8}",
                account.name.as_deref().unwrap_or("(unnamed)"),
                account.account_type.as_deref().unwrap_or("-"),
                if has_funds { balance.green() } else { balance.normal() },
                if account.primary { "✓".green() } else { "".normal() }
            );
        }

        request = page.next_request();
    }

    println!();
    println!(
        "{} {} accounts over {} pages, {} with a balance",
        "✓".green(),
        total,
        pages,
        funded
    );

    Ok(())
}
