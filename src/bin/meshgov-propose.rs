#![forbid(unsafe_code)]
//! Submit a governance proposal

use colored::*;
use ethers::types::Bytes;
use meshgov::cli::{load_client_from_config, parse_address, parse_calldata, parse_u256};
use meshgov::types::ProposalAction;
use std::env;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        print_usage();
        return;
    }

    let target = match parse_address(&args[1]) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            return;
        }
    };
    let value = match parse_u256(&args[2]) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            return;
        }
    };
    let calldata: Bytes = match parse_calldata(&args[3]) {
        Ok(calldata) => calldata,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            return;
        }
    };
    let description = args[4..].join(" ");

    let (_config, client) = match load_client_from_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{} {}", "❌ Config:".red(), e);
            return;
        }
    };

    let action = ProposalAction::new(vec![target], vec![value], vec![calldata], description);

    println!("📤 Submitting proposal...");
    match client.create_proposal(&action).await {
        Ok(submission) => {
            println!("{}", "✅ Proposal submitted".green().bold());
            println!("   id:    {:#x}", submission.id);
            println!("   tx:    {:#x}", submission.tx_hash);
            println!("   block: {}", submission.block_number);
        }
        Err(e) => eprintln!("{} {}", "❌ Failed:".red(), e),
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  meshgov-propose <target> <value-wei> <calldata-hex> <description...>");
    println!();
    println!("Example:");
    println!("  meshgov-propose 0xabc...def 0 0x1249c58b Raise relay rewards for epoch 42");
}
