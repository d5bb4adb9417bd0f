#![forbid(unsafe_code)]
//! Cast a vote on a governance proposal

use colored::*;
use meshgov::cli::{load_client_from_config, parse_support, parse_u256};
use std::env;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        print_usage();
        return;
    }

    let proposal_id = match parse_u256(&args[1]) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            return;
        }
    };
    let support = match parse_support(&args[2]) {
        Ok(support) => support,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            return;
        }
    };
    let reason = if args.len() > 3 {
        Some(args[3..].join(" "))
    } else {
        None
    };

    let (_config, client) = match load_client_from_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{} {}", "❌ Config:".red(), e);
            return;
        }
    };

    println!("🗳️  Casting {} vote on {:#x}...", support, proposal_id);
    match client.cast_vote(proposal_id, support, reason.as_deref()).await {
        Ok(receipt) => {
            println!("{}", "✅ Vote counted".green().bold());
            println!("   voter:  {:?}", receipt.voter);
            println!("   weight: {}", receipt.weight);
            println!("   tx:     {:#x}", receipt.tx_hash);
            println!("   block:  {}", receipt.block_number);
        }
        Err(e) => eprintln!("{} {}", "❌ Failed:".red(), e),
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  meshgov-vote <proposal-id> <for|against|abstain> [reason...]");
}
