//! Governance data records shared across the crate
//!
//! All numbering matches the Governor contract wire format exactly; the
//! conversions from raw bytes are fallible because the contract is the
//! authority on what a state byte means.

use ethers::abi::Token;
use ethers::types::{Address, Bytes, TxHash, U256};
use ethers::utils::keccak256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GovError, Result};

/// Canonical Governor proposal lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalState {
    Pending = 0,
    Active = 1,
    Canceled = 2,
    Defeated = 3,
    Succeeded = 4,
    Queued = 5,
    Expired = 6,
    Executed = 7,
}

impl ProposalState {
    pub fn from_u8(raw: u8) -> Result<Self> {
        match raw {
            0 => Ok(ProposalState::Pending),
            1 => Ok(ProposalState::Active),
            2 => Ok(ProposalState::Canceled),
            3 => Ok(ProposalState::Defeated),
            4 => Ok(ProposalState::Succeeded),
            5 => Ok(ProposalState::Queued),
            6 => Ok(ProposalState::Expired),
            7 => Ok(ProposalState::Executed),
            other => Err(GovError::UnknownState(other)),
        }
    }

    /// A terminal state can never transition again; polling may stop.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProposalState::Canceled
                | ProposalState::Defeated
                | ProposalState::Expired
                | ProposalState::Executed
        )
    }
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ProposalState::Pending => "pending",
            ProposalState::Active => "active",
            ProposalState::Canceled => "canceled",
            ProposalState::Defeated => "defeated",
            ProposalState::Succeeded => "succeeded",
            ProposalState::Queued => "queued",
            ProposalState::Expired => "expired",
            ProposalState::Executed => "executed",
        };
        write!(f, "{}", name)
    }
}

/// Vote direction, numbered as `castVote` expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteSupport {
    Against = 0,
    For = 1,
    Abstain = 2,
}

impl VoteSupport {
    pub fn from_u8(raw: u8) -> Result<Self> {
        match raw {
            0 => Ok(VoteSupport::Against),
            1 => Ok(VoteSupport::For),
            2 => Ok(VoteSupport::Abstain),
            other => Err(GovError::UnknownSupport(other)),
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for VoteSupport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            VoteSupport::Against => "against",
            VoteSupport::For => "for",
            VoteSupport::Abstain => "abstain",
        };
        write!(f, "{}", name)
    }
}

/// The payload of a proposal: parallel target/value/calldata arrays plus
/// the free-text description. The proposal id is a pure function of this.
#[derive(Debug, Clone)]
pub struct ProposalAction {
    pub targets: Vec<Address>,
    pub values: Vec<U256>,
    pub calldatas: Vec<Bytes>,
    pub description: String,
}

impl ProposalAction {
    pub fn new(
        targets: Vec<Address>,
        values: Vec<U256>,
        calldatas: Vec<Bytes>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            targets,
            values,
            calldatas,
            description: description.into(),
        }
    }

    /// Targets, values and calldatas must line up one-to-one and the
    /// proposal must do at least one thing.
    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(GovError::InvalidAction(
                "proposal must contain at least one call".to_string(),
            ));
        }
        if self.targets.len() != self.values.len() || self.values.len() != self.calldatas.len() {
            return Err(GovError::InvalidAction(format!(
                "mismatched action arrays: {} targets, {} values, {} calldatas",
                self.targets.len(),
                self.values.len(),
                self.calldatas.len()
            )));
        }
        Ok(())
    }

    /// keccak256 of the UTF-8 description, as `queue`/`execute` expect it.
    pub fn description_hash(&self) -> [u8; 32] {
        keccak256(self.description.as_bytes())
    }

    /// Recompute the proposal id exactly as `Governor.hashProposal` does:
    /// keccak256 over the ABI encoding of the action arrays and the
    /// description hash.
    pub fn proposal_id(&self) -> U256 {
        let encoded = ethers::abi::encode(&[
            Token::Array(self.targets.iter().map(|a| Token::Address(*a)).collect()),
            Token::Array(self.values.iter().map(|v| Token::Uint(*v)).collect()),
            Token::Array(
                self.calldatas
                    .iter()
                    .map(|c| Token::Bytes(c.to_vec()))
                    .collect(),
            ),
            Token::FixedBytes(self.description_hash().to_vec()),
        ]);
        U256::from_big_endian(&keccak256(encoded))
    }
}

/// One proposal as read from the chain.
#[derive(Debug, Clone, Serialize)]
pub struct Proposal {
    pub id: U256,
    pub state: ProposalState,
    pub proposer: Address,
    pub snapshot_block: U256,
    pub deadline_block: U256,
    /// Timelock release timestamp; zero when the proposal is not queued.
    pub eta: U256,
    pub against_votes: U256,
    pub for_votes: U256,
    pub abstain_votes: U256,
}

impl Proposal {
    pub fn total_votes(&self) -> U256 {
        self.against_votes + self.for_votes + self.abstain_votes
    }
}

/// Result of submitting a new proposal.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalSubmission {
    pub id: U256,
    pub tx_hash: TxHash,
    pub block_number: u64,
}

/// Result of a counted vote.
#[derive(Debug, Clone, Serialize)]
pub struct VoteReceipt {
    pub proposal_id: U256,
    pub voter: Address,
    pub support: VoteSupport,
    /// Weight counted by the contract; zero if the governor emitted no
    /// `VoteCast` event.
    pub weight: U256,
    pub tx_hash: TxHash,
    pub block_number: u64,
}

/// Outcome of a queue/execute/delegate transaction.
#[derive(Debug, Clone, Serialize)]
pub struct TxOutcome {
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub gas_used: U256,
}

/// Executability verdict with the raw inputs that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Executability {
    pub state: ProposalState,
    pub eta: U256,
    pub chain_timestamp: U256,
    pub ready: bool,
}

/// Snapshot of the governor's tunables.
#[derive(Debug, Clone, Serialize)]
pub struct GovernorParams {
    pub voting_delay: U256,
    pub voting_period: U256,
    pub proposal_threshold: U256,
    pub quorum: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_action() -> ProposalAction {
        ProposalAction::new(
            vec![Address::from_low_u64_be(0xbeef)],
            vec![U256::zero()],
            vec![Bytes::from(vec![0xde, 0xad])],
            "# Raise relay rewards\n\nBump the per-epoch relay budget.",
        )
    }

    #[test]
    fn test_state_roundtrip() {
        for raw in 0u8..=7 {
            let state = ProposalState::from_u8(raw).unwrap();
            assert_eq!(state as u8, raw);
        }
        assert!(ProposalState::from_u8(8).is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(ProposalState::Executed.is_terminal());
        assert!(ProposalState::Defeated.is_terminal());
        assert!(ProposalState::Canceled.is_terminal());
        assert!(ProposalState::Expired.is_terminal());
        assert!(!ProposalState::Pending.is_terminal());
        assert!(!ProposalState::Active.is_terminal());
        assert!(!ProposalState::Succeeded.is_terminal());
        assert!(!ProposalState::Queued.is_terminal());
    }

    #[test]
    fn test_support_wire_values() {
        assert_eq!(VoteSupport::Against.as_u8(), 0);
        assert_eq!(VoteSupport::For.as_u8(), 1);
        assert_eq!(VoteSupport::Abstain.as_u8(), 2);
        assert!(VoteSupport::from_u8(3).is_err());
    }

    #[test]
    fn test_action_validation() {
        let action = test_action();
        assert!(action.validate().is_ok());

        let empty = ProposalAction::new(vec![], vec![], vec![], "nothing");
        assert!(empty.validate().is_err());

        let lopsided = ProposalAction::new(
            vec![Address::zero()],
            vec![U256::zero(), U256::one()],
            vec![Bytes::new()],
            "bad arrays",
        );
        let err = lopsided.validate().unwrap_err();
        assert!(err.to_string().contains("mismatched action arrays"));
    }

    #[test]
    fn test_proposal_id_is_deterministic() {
        let a = test_action();
        let b = test_action();
        assert_eq!(a.proposal_id(), b.proposal_id());
        assert_ne!(a.proposal_id(), U256::zero());
    }

    #[test]
    fn test_proposal_id_depends_on_description() {
        let a = test_action();
        let mut b = test_action();
        b.description.push_str(" (amended)");
        assert_ne!(a.proposal_id(), b.proposal_id());
        assert_ne!(a.description_hash(), b.description_hash());
    }

    #[test]
    fn test_proposal_id_depends_on_calldata() {
        let a = test_action();
        let mut b = test_action();
        b.calldatas[0] = Bytes::from(vec![0xca, 0xfe]);
        assert_ne!(a.proposal_id(), b.proposal_id());
    }

    #[test]
    fn test_total_votes() {
        let proposal = Proposal {
            id: U256::one(),
            state: ProposalState::Active,
            proposer: Address::zero(),
            snapshot_block: U256::from(100),
            deadline_block: U256::from(200),
            eta: U256::zero(),
            against_votes: U256::from(3),
            for_votes: U256::from(10),
            abstain_votes: U256::from(2),
        };
        assert_eq!(proposal.total_votes(), U256::from(15));
    }
}
