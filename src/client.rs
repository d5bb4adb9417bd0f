//! The governance client façade
//!
//! `GovernorClient` is a thin wrapper over one Governor contract and its
//! votes token. Every method is a straight-line request/response call:
//! check the precondition, hand the call to the provider, map the result
//! into a small record. Nonce management, gas estimation, signing and ABI
//! encoding all belong to the underlying library.

use chrono::Utc;
use ethers::abi::Detokenize;
use ethers::contract::builders::ContractCall;
use ethers::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::config::GovConfig;
use crate::contracts::{Governor, ProposalCreatedFilter, VoteCastFilter, VotesToken};
use crate::error::{GovError, Result};
use crate::history::{TxHistory, TxKind, TxRecord, TxStatus};
use crate::types::{
    Executability, GovernorParams, Proposal, ProposalAction, ProposalState, ProposalSubmission,
    TxOutcome, VoteReceipt, VoteSupport,
};

/// Read-only provider stack.
pub type ReadProvider = Provider<Http>;
/// Signing provider stack for mutating calls.
pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

const HISTORY_CAPACITY: usize = 256;

#[derive(Debug)]
pub struct GovernorClient {
    provider: Arc<ReadProvider>,
    signer_address: Option<Address>,
    governor: Governor<ReadProvider>,
    token: VotesToken<ReadProvider>,
    governor_rw: Option<Governor<SignerClient>>,
    token_rw: Option<VotesToken<SignerClient>>,
    confirmations: usize,
    tx_timeout: Duration,
    history: RwLock<TxHistory>,
}

impl GovernorClient {
    /// Build a client from config. Without a private key the client comes
    /// up read-only; every mutating method then fails fast before any RPC.
    pub fn new(config: &GovConfig) -> Result<Self> {
        let provider = Provider::<Http>::try_from(config.rpc.url.as_str())
            .map_err(|e| GovError::Provider(e.to_string()))?;
        let provider = Arc::new(provider);

        let governor_addr: Address = config
            .contracts
            .governor
            .parse()
            .map_err(|_| GovError::InvalidAddress(config.contracts.governor.clone()))?;
        let token_addr: Address = config
            .contracts
            .token
            .parse()
            .map_err(|_| GovError::InvalidAddress(config.contracts.token.clone()))?;

        let governor = Governor::new(governor_addr, provider.clone());
        let token = VotesToken::new(token_addr, provider.clone());

        let (signer_address, governor_rw, token_rw) = match config.signer.resolve_private_key() {
            Some(key) => {
                let wallet: LocalWallet =
                    key.parse().map_err(|e| GovError::Wallet(format!("{}", e)))?;
                let wallet = wallet.with_chain_id(config.rpc.chain_id);
                let address = wallet.address();
                let client = Arc::new(SignerMiddleware::new((*provider).clone(), wallet));
                info!("Governance client signer: {:?}", address);
                (
                    Some(address),
                    Some(Governor::new(governor_addr, client.clone())),
                    Some(VotesToken::new(token_addr, client)),
                )
            }
            None => {
                info!("Governance client running read-only (no signer configured)");
                (None, None, None)
            }
        };

        Ok(Self {
            provider,
            signer_address,
            governor,
            token,
            governor_rw,
            token_rw,
            confirmations: config.rpc.confirmations,
            tx_timeout: Duration::from_secs(config.rpc.tx_timeout_secs),
            history: RwLock::new(TxHistory::new(HISTORY_CAPACITY)),
        })
    }

    pub fn signer_address(&self) -> Option<Address> {
        self.signer_address
    }

    pub fn is_read_only(&self) -> bool {
        self.signer_address.is_none()
    }

    // ─────────────────────────────────────────────────────────────
    // Mutating operations
    // ─────────────────────────────────────────────────────────────

    /// Submit a new proposal. Returns the proposal id decoded from the
    /// `ProposalCreated` event, recomputed locally if the log is missing.
    pub async fn create_proposal(&self, action: &ProposalAction) -> Result<ProposalSubmission> {
        action.validate()?;
        let governor = self.require_signer_governor("create_proposal")?;

        let title = action.description.lines().next().unwrap_or("");
        info!("Submitting proposal: {}", title);

        let call = governor.propose(
            action.targets.clone(),
            action.values.clone(),
            action.calldatas.clone(),
            action.description.clone(),
        );
        let receipt = self.submit(TxKind::Propose, call).await?;

        let mut id = None;
        for log in &receipt.logs {
            if let Ok(event) = self.governor.decode_event::<ProposalCreatedFilter>(
                "ProposalCreated",
                log.topics.clone(),
                log.data.clone(),
            ) {
                id = Some(event.proposal_id);
                break;
            }
        }
        let id = id.unwrap_or_else(|| {
            warn!("ProposalCreated event not found in receipt; recomputing id locally");
            action.proposal_id()
        });

        info!("Proposal {:#x} submitted", id);
        Ok(ProposalSubmission {
            id,
            tx_hash: receipt.transaction_hash,
            block_number: block_of(&receipt),
        })
    }

    /// Cast a vote, optionally with a reason string. The counted weight is
    /// decoded from the `VoteCast` event.
    pub async fn cast_vote(
        &self,
        proposal_id: U256,
        support: VoteSupport,
        reason: Option<&str>,
    ) -> Result<VoteReceipt> {
        let governor = self.require_signer_governor("cast_vote")?;
        let voter = self.signer_address.unwrap_or_default();

        info!("Casting {} vote on proposal {:#x}", support, proposal_id);

        let receipt = match reason {
            Some(reason) => {
                let call =
                    governor.cast_vote_with_reason(proposal_id, support.as_u8(), reason.to_string());
                self.submit(TxKind::Vote, call).await?
            }
            None => {
                let call = governor.cast_vote(proposal_id, support.as_u8());
                self.submit(TxKind::Vote, call).await?
            }
        };

        let mut weight = U256::zero();
        for log in &receipt.logs {
            if let Ok(event) = self.governor.decode_event::<VoteCastFilter>(
                "VoteCast",
                log.topics.clone(),
                log.data.clone(),
            ) {
                weight = event.weight;
                break;
            }
        }

        Ok(VoteReceipt {
            proposal_id,
            voter,
            support,
            weight,
            tx_hash: receipt.transaction_hash,
            block_number: block_of(&receipt),
        })
    }

    /// Queue a succeeded proposal behind the governor's timelock.
    pub async fn queue_proposal(&self, action: &ProposalAction) -> Result<TxOutcome> {
        action.validate()?;
        let governor = self.require_signer_governor("queue_proposal")?;

        info!("Queueing proposal {:#x}", action.proposal_id());
        let call = governor.queue(
            action.targets.clone(),
            action.values.clone(),
            action.calldatas.clone(),
            action.description_hash(),
        );
        let receipt = self.submit(TxKind::Queue, call).await?;
        Ok(outcome_of(&receipt))
    }

    /// Execute a proposal whose timelock delay (if any) has expired.
    pub async fn execute_proposal(&self, action: &ProposalAction) -> Result<TxOutcome> {
        action.validate()?;
        let governor = self.require_signer_governor("execute_proposal")?;

        info!("Executing proposal {:#x}", action.proposal_id());
        let call = governor.execute(
            action.targets.clone(),
            action.values.clone(),
            action.calldatas.clone(),
            action.description_hash(),
        );
        let receipt = self.submit(TxKind::Execute, call).await?;
        Ok(outcome_of(&receipt))
    }

    /// Delegate the signer's token balance so it counts as voting power.
    pub async fn delegate(&self, delegatee: Address) -> Result<TxOutcome> {
        let token = match &self.token_rw {
            Some(token) => token,
            None => {
                warn!("delegate requires a configured signer");
                return Err(GovError::SignerRequired("delegate"));
            }
        };

        info!("Delegating voting power to {:?}", delegatee);
        let call = token.delegate(delegatee);
        let receipt = self.submit(TxKind::Delegate, call).await?;
        Ok(outcome_of(&receipt))
    }

    // ─────────────────────────────────────────────────────────────
    // Read operations
    // ─────────────────────────────────────────────────────────────

    /// Read one proposal into a record: lifecycle state, proposer, timing
    /// and the three tallies.
    pub async fn get_proposal(&self, proposal_id: U256) -> Result<Proposal> {
        let state = self.proposal_state(proposal_id).await?;
        let (against_votes, for_votes, abstain_votes) = self
            .governor
            .proposal_votes(proposal_id)
            .call()
            .await
            .map_err(|e| self.read_failed("proposalVotes", e))?;
        let snapshot_block = self
            .governor
            .proposal_snapshot(proposal_id)
            .call()
            .await
            .map_err(|e| self.read_failed("proposalSnapshot", e))?;
        let deadline_block = self
            .governor
            .proposal_deadline(proposal_id)
            .call()
            .await
            .map_err(|e| self.read_failed("proposalDeadline", e))?;
        let proposer = self
            .governor
            .proposal_proposer(proposal_id)
            .call()
            .await
            .map_err(|e| self.read_failed("proposalProposer", e))?;
        let eta = self
            .governor
            .proposal_eta(proposal_id)
            .call()
            .await
            .map_err(|e| self.read_failed("proposalEta", e))?;

        Ok(Proposal {
            id: proposal_id,
            state,
            proposer,
            snapshot_block,
            deadline_block,
            eta,
            against_votes,
            for_votes,
            abstain_votes,
        })
    }

    /// Current lifecycle state of a proposal.
    pub async fn proposal_state(&self, proposal_id: U256) -> Result<ProposalState> {
        let raw = self
            .governor
            .state(proposal_id)
            .call()
            .await
            .map_err(|e| self.read_failed("state", e))?;
        ProposalState::from_u8(raw)
    }

    /// Current voting power of an account (delegated ERC20Votes balance).
    pub async fn voting_power(&self, account: Address) -> Result<U256> {
        self.token
            .get_votes(account)
            .call()
            .await
            .map_err(|e| self.read_failed("getVotes", e))
    }

    /// Voting power of an account at a past block, e.g. a proposal snapshot.
    pub async fn voting_power_at(&self, account: Address, block: U256) -> Result<U256> {
        self.token
            .get_past_votes(account, block)
            .call()
            .await
            .map_err(|e| self.read_failed("getPastVotes", e))
    }

    /// Whether an account already voted on a proposal.
    pub async fn has_voted(&self, proposal_id: U256, account: Address) -> Result<bool> {
        self.governor
            .has_voted(proposal_id, account)
            .call()
            .await
            .map_err(|e| self.read_failed("hasVoted", e))
    }

    /// Executability verdict plus the raw inputs it was derived from.
    ///
    /// `Queued` is ready once the timelock eta has passed. `Succeeded`
    /// reports ready because a governor without a timelock executes
    /// straight from that state; behind a timelock the execute call will
    /// revert and the proposal must be queued first.
    pub async fn executability(&self, proposal_id: U256) -> Result<Executability> {
        let state = self.proposal_state(proposal_id).await?;
        let eta = self
            .governor
            .proposal_eta(proposal_id)
            .call()
            .await
            .map_err(|e| self.read_failed("proposalEta", e))?;
        let chain_timestamp = self.chain_timestamp().await?;

        let ready = match state {
            ProposalState::Succeeded => true,
            ProposalState::Queued => chain_timestamp >= eta,
            _ => false,
        };

        Ok(Executability {
            state,
            eta,
            chain_timestamp,
            ready,
        })
    }

    /// Convenience wrapper over [`executability`](Self::executability).
    pub async fn is_executable(&self, proposal_id: U256) -> Result<bool> {
        Ok(self.executability(proposal_id).await?.ready)
    }

    /// One-call snapshot of the governor's tunables.
    pub async fn governor_params(&self) -> Result<GovernorParams> {
        let voting_delay = self
            .governor
            .voting_delay()
            .call()
            .await
            .map_err(|e| self.read_failed("votingDelay", e))?;
        let voting_period = self
            .governor
            .voting_period()
            .call()
            .await
            .map_err(|e| self.read_failed("votingPeriod", e))?;
        let proposal_threshold = self
            .governor
            .proposal_threshold()
            .call()
            .await
            .map_err(|e| self.read_failed("proposalThreshold", e))?;

        // quorum() only answers for mined timepoints, so ask one block back
        let latest = self.provider.get_block_number().await?;
        let quorum = self
            .governor
            .quorum(U256::from(latest.as_u64().saturating_sub(1)))
            .call()
            .await
            .map_err(|e| self.read_failed("quorum", e))?;

        Ok(GovernorParams {
            voting_delay,
            voting_period,
            proposal_threshold,
            quorum,
        })
    }

    /// Most recent transactions this client submitted, oldest first.
    pub async fn history(&self, limit: usize) -> Vec<TxRecord> {
        self.history.read().await.recent(limit)
    }

    // ─────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────

    fn require_signer_governor(&self, op: &'static str) -> Result<&Governor<SignerClient>> {
        match &self.governor_rw {
            Some(governor) => Ok(governor),
            None => {
                warn!("{} requires a configured signer", op);
                Err(GovError::SignerRequired(op))
            }
        }
    }

    fn read_failed<E: std::fmt::Display>(&self, call: &str, err: E) -> GovError {
        error!("Governor read {} failed: {}", call, err);
        GovError::Contract(format!("{}: {}", call, err))
    }

    async fn chain_timestamp(&self) -> Result<U256> {
        let block = self
            .provider
            .get_block(BlockNumber::Latest)
            .await?
            .ok_or_else(|| GovError::Provider("latest block unavailable".to_string()))?;
        Ok(block.timestamp)
    }

    /// Send a signed contract call and wait for its receipt: the shared
    /// build/sign/broadcast/wait dance every mutating operation goes
    /// through. Confirmed and reverted transactions both land in history.
    async fn submit<D: Detokenize>(
        &self,
        kind: TxKind,
        call: ContractCall<SignerClient, D>,
    ) -> Result<TransactionReceipt> {
        let pending = call.send().await.map_err(|e| {
            error!("Failed to send {:?} transaction: {}", kind, e);
            GovError::Contract(e.to_string())
        })?;
        let tx_hash = *pending;
        info!("{:?} tx sent: {:#x}", kind, tx_hash);

        let wait = pending.confirmations(self.confirmations);
        let receipt = match tokio::time::timeout(self.tx_timeout, wait).await {
            Ok(Ok(Some(receipt))) => receipt,
            Ok(Ok(None)) => {
                error!("{:?} tx {:#x} dropped from the mempool", kind, tx_hash);
                return Err(GovError::Dropped(tx_hash));
            }
            Ok(Err(e)) => {
                error!("Waiting for {:?} tx {:#x} failed: {}", kind, tx_hash, e);
                return Err(GovError::Provider(e.to_string()));
            }
            Err(_) => {
                error!(
                    "{:?} tx {:#x} not confirmed within {:?}",
                    kind, tx_hash, self.tx_timeout
                );
                return Err(GovError::ReceiptTimeout(tx_hash));
            }
        };

        let confirmed = receipt.status == Some(U64::from(1));
        let record = TxRecord {
            kind,
            tx_hash: receipt.transaction_hash,
            block_number: block_of(&receipt),
            gas_used: receipt.gas_used.unwrap_or_default(),
            status: if confirmed {
                TxStatus::Confirmed
            } else {
                TxStatus::Reverted
            },
            submitted_at: Utc::now(),
        };
        self.history.write().await.push(record);

        if !confirmed {
            error!(
                "{:?} tx {:#x} reverted in block {}",
                kind,
                tx_hash,
                block_of(&receipt)
            );
            return Err(GovError::Reverted(receipt.transaction_hash));
        }

        info!("{:?} tx confirmed in block {}", kind, block_of(&receipt));
        Ok(receipt)
    }
}

fn block_of(receipt: &TransactionReceipt) -> u64 {
    receipt.block_number.map(|b| b.as_u64()).unwrap_or_default()
}

fn outcome_of(receipt: &TransactionReceipt) -> TxOutcome {
    TxOutcome {
        tx_hash: receipt.transaction_hash,
        block_number: block_of(receipt),
        gas_used: receipt.gas_used.unwrap_or_default(),
    }
}
