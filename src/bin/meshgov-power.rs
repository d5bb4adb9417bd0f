#![forbid(unsafe_code)]
//! Show the voting power of an account

use colored::*;
use meshgov::cli::{load_client_from_config, parse_address, parse_u256};
use std::env;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage:");
        println!("  meshgov-power <address> [block]");
        return;
    }

    let account = match parse_address(&args[1]) {
        Ok(account) => account,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            return;
        }
    };

    let (_config, client) = match load_client_from_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{} {}", "❌ Config:".red(), e);
            return;
        }
    };

    let result = if args.len() > 2 {
        match parse_u256(&args[2]) {
            Ok(block) => client.voting_power_at(account, block).await,
            Err(e) => {
                eprintln!("{} {}", "❌".red(), e);
                return;
            }
        }
    } else {
        client.voting_power(account).await
    };

    match result {
        Ok(power) => {
            println!("{}", "⚖️  Voting power".bright_cyan().bold());
            println!("   account: {:?}", account);
            println!("   power:   {}", format!("{}", power).bold());
        }
        Err(e) => eprintln!("{} {}", "❌ Failed:".red(), e),
    }
}
