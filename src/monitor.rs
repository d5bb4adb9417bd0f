//! Proposal monitoring loop
//!
//! Polls one proposal and drives it forward: queue it when it succeeds,
//! execute it once the timelock releases, stop on any terminal state.
//! Transient poll failures are logged and retried on the next tick.

use std::time::Duration;
use tracing::{info, warn};

use crate::client::GovernorClient;
use crate::config::MonitorConfig;
use crate::error::{GovError, Result};
use crate::types::{ProposalAction, ProposalState};

/// Watch a proposal until it reaches a terminal state or the poll budget
/// runs out; returns the last observed state.
pub async fn watch_proposal(
    client: &GovernorClient,
    action: &ProposalAction,
    config: &MonitorConfig,
) -> Result<ProposalState> {
    action.validate()?;
    if client.is_read_only() {
        return Err(GovError::SignerRequired("watch_proposal"));
    }

    let id = action.proposal_id();
    let interval = Duration::from_secs(config.poll_interval_secs);
    info!(
        "Watching proposal {:#x} (poll every {}s, up to {} polls)",
        id, config.poll_interval_secs, config.max_polls
    );

    let mut last: Option<ProposalState> = None;
    for _ in 0..config.max_polls {
        match client.proposal_state(id).await {
            Ok(state) => {
                if last != Some(state) {
                    info!("Proposal {:#x} is now {}", id, state);
                    last = Some(state);
                }

                match state {
                    ProposalState::Succeeded => {
                        match client.queue_proposal(action).await {
                            Ok(outcome) => {
                                info!("Proposal queued in block {}", outcome.block_number)
                            }
                            // A governor without a timelock has no queue
                            // step; execution goes straight from Succeeded.
                            Err(e) => {
                                warn!("Queue failed ({}); attempting direct execution", e);
                                match client.execute_proposal(action).await {
                                    Ok(outcome) => {
                                        info!(
                                            "Proposal executed in block {}",
                                            outcome.block_number
                                        );
                                        return Ok(ProposalState::Executed);
                                    }
                                    Err(e) => warn!("Direct execution failed: {}", e),
                                }
                            }
                        }
                    }
                    ProposalState::Queued => match client.executability(id).await {
                        Ok(verdict) if verdict.ready => {
                            match client.execute_proposal(action).await {
                                Ok(outcome) => {
                                    info!("Proposal executed in block {}", outcome.block_number);
                                    return Ok(ProposalState::Executed);
                                }
                                Err(e) => warn!("Execution failed: {}", e),
                            }
                        }
                        Ok(verdict) => {
                            info!(
                                "Timelock pending: eta {} > chain time {}",
                                verdict.eta, verdict.chain_timestamp
                            );
                        }
                        Err(e) => warn!("Executability check failed: {}", e),
                    },
                    state if state.is_terminal() => return Ok(state),
                    _ => {}
                }
            }
            Err(e) => warn!("Poll of proposal {:#x} failed: {}", id, e),
        }

        tokio::time::sleep(interval).await;
    }

    let state = last.unwrap_or(ProposalState::Pending);
    warn!(
        "Gave up watching proposal {:#x} after {} polls (last state: {})",
        id, config.max_polls, state
    );
    Ok(state)
}
