//! Demo 1: Credential Check
//!
//! Showcases: key-pair authentication, single resource fetch, error classification
//!
//! Requires COINBASE_API_KEY_NAME, COINBASE_API_PRIVATE_KEY (or
//! COINBASE_ACCESS_TOKEN) and COINBASE_ACCOUNT_ID.
//!
//! Run: cargo run --bin check_credentials

use coinbase_rest::{ClientConfig, CoinbaseClient, RestError};
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  COINBASE CREDENTIAL CHECK".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let account_id = std::env::var("COINBASE_ACCOUNT_ID")
        .map_err(|_| "COINBASE_ACCOUNT_ID must be set to an account you own")?;

    let config = ClientConfig::from_env()?;
    let client = CoinbaseClient::new(config)?;
    println!("{} Client created ({:?} mode)", "✓".green(), client.auth_mode());

    match client.get_account(&account_id).await {
        Ok(account) => {
            println!("{} Credentials accepted", "✓".green());
            println!(
                "  {:<10} {}",
                "ACCOUNT".white().bold(),
                account.name.as_deref().unwrap_or(&account.id)
            );
            if let Some(balance) = account.balance {
                println!("  {:<10} {}", "BALANCE".white().bold(), balance.to_string().yellow());
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Request failed: {}", "✗".red(), e);
            match &e {
                RestError::HttpStatus { status: 401, .. } => {
                    println!("  The key was rejected; check the key name and private key.");
                }
                RestError::HttpStatus { status: 404, .. } => {
                    println!("  Credentials work, but the account id was not found.");
                }
                RestError::Timeout | RestError::Transport(_) => {
                    println!("  Could not reach the API.");
                }
                _ => {}
            }
            Err(e.into())
        }
    }
}
