#![forbid(unsafe_code)]
//! Show one governance proposal

use colored::*;
use meshgov::cli::{load_client_from_config, parse_u256};
use std::env;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage:");
        println!("  meshgov-proposal <proposal-id> [--json]");
        return;
    }

    let proposal_id = match parse_u256(&args[1]) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            return;
        }
    };
    let as_json = args.iter().any(|a| a == "--json");

    let (_config, client) = match load_client_from_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{} {}", "❌ Config:".red(), e);
            return;
        }
    };

    match client.get_proposal(proposal_id).await {
        Ok(proposal) => {
            if as_json {
                match serde_json::to_string_pretty(&proposal) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("{} {}", "❌".red(), e),
                }
                return;
            }

            println!("{}", "📜 Proposal".bright_cyan().bold());
            println!("   id:       {:#x}", proposal.id);
            println!("   state:    {}", format!("{}", proposal.state).bold());
            println!("   proposer: {:?}", proposal.proposer);
            println!("   snapshot: block {}", proposal.snapshot_block);
            println!("   deadline: block {}", proposal.deadline_block);
            if !proposal.eta.is_zero() {
                println!("   eta:      {}", proposal.eta);
            }
            println!();
            println!("   {}  {}", "for:".green(), proposal.for_votes);
            println!("   {}  {}", "against:".red(), proposal.against_votes);
            println!("   {}  {}", "abstain:".yellow(), proposal.abstain_votes);
            println!("   total:    {}", proposal.total_votes());
        }
        Err(e) => eprintln!("{} {}", "❌ Failed:".red(), e),
    }
}
