#![forbid(unsafe_code)]
//! Check, queue and execute governance proposals

use colored::*;
use ethers::types::Bytes;
use meshgov::cli::{load_client_from_config, parse_address, parse_calldata, parse_u256};
use meshgov::types::ProposalAction;
use std::env;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: meshgov-execute check <proposal-id>");
                return;
            }
            check(&args[2]).await;
        }
        "queue" => {
            if let Some(action) = action_from_args(&args[2..]) {
                queue(&action).await;
            }
        }
        "run" => {
            if let Some(action) = action_from_args(&args[2..]) {
                run(&action).await;
            }
        }
        _ => print_usage(),
    }
}

async fn check(raw_id: &str) {
    let proposal_id = match parse_u256(raw_id) {
        Ok(id) => id,
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

    match client.executability(proposal_id).await {
        Ok(verdict) => {
            if verdict.ready {
                println!("{}", "✅ Executable now".green().bold());
            } else {
                println!("{}", "⏳ Not executable yet".yellow().bold());
            }
            println!("   state:      {}", verdict.state);
            println!("   eta:        {}", verdict.eta);
            println!("   chain time: {}", verdict.chain_timestamp);
        }
        Err(e) => eprintln!("{} {}", "❌ Failed:".red(), e),
    }
}

async fn queue(action: &ProposalAction) {
    let (_config, client) = match load_client_from_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{} {}", "❌ Config:".red(), e);
            return;
        }
    };

    println!("⏱️  Queueing proposal {:#x}...", action.proposal_id());
    match client.queue_proposal(action).await {
        Ok(outcome) => {
            println!("{}", "✅ Queued".green().bold());
            println!("   tx:    {:#x}", outcome.tx_hash);
            println!("   block: {}", outcome.block_number);
        }
        Err(e) => eprintln!("{} {}", "❌ Failed:".red(), e),
    }
}

async fn run(action: &ProposalAction) {
    let (_config, client) = match load_client_from_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{} {}", "❌ Config:".red(), e);
            return;
        }
    };

    println!("⚙️  Executing proposal {:#x}...", action.proposal_id());
    match client.execute_proposal(action).await {
        Ok(outcome) => {
            println!("{}", "✅ Executed".green().bold());
            println!("   tx:    {:#x}", outcome.tx_hash);
            println!("   block: {}", outcome.block_number);
        }
        Err(e) => eprintln!("{} {}", "❌ Failed:".red(), e),
    }
}

fn action_from_args(args: &[String]) -> Option<ProposalAction> {
    if args.len() < 4 {
        print_usage();
        return None;
    }

    let target = match parse_address(&args[0]) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            return None;
        }
    };
    let value = match parse_u256(&args[1]) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            return None;
        }
    };
    let calldata: Bytes = match parse_calldata(&args[2]) {
        Ok(calldata) => calldata,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            return None;
        }
    };
    let description = args[3..].join(" ");

    Some(ProposalAction::new(
        vec![target],
        vec![value],
        vec![calldata],
        description,
    ))
}

fn print_usage() {
    println!("Usage:");
    println!("  meshgov-execute check <proposal-id>                            - Is it executable?");
    println!("  meshgov-execute queue <target> <value> <calldata> <desc...>    - Queue behind timelock");
    println!("  meshgov-execute run <target> <value> <calldata> <desc...>      - Execute");
    println!();
    println!("The action arguments must match the original proposal exactly;");
    println!("the proposal id is derived from them.");
}
