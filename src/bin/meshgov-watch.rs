#![forbid(unsafe_code)]
//! Watch a proposal and drive it to execution

use colored::*;
use ethers::types::Bytes;
use meshgov::cli::{load_client_from_config, parse_address, parse_calldata, parse_u256};
use meshgov::monitor::watch_proposal;
use meshgov::types::ProposalAction;
use std::env;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        println!("Usage:");
        println!("  meshgov-watch <target> <value-wei> <calldata-hex> <description...>");
        println!();
        println!("Polls the proposal derived from the action, queues it when it");
        println!("succeeds and executes it once the timelock releases.");
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

    let (config, client) = match load_client_from_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{} {}", "❌ Config:".red(), e);
            return;
        }
    };

    let action = ProposalAction::new(vec![target], vec![value], vec![calldata], description);

    println!("👁️  Watching proposal {:#x}", action.proposal_id());
    match watch_proposal(&client, &action, &config.monitor).await {
        Ok(state) => println!("{} final state: {}", "🏁".green(), format!("{}", state).bold()),
        Err(e) => eprintln!("{} {}", "❌ Failed:".red(), e),
    }
}
