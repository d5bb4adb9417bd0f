//! Fixed contract ABIs for the governance surface
//!
//! Two contracts cover everything the client does: the Governor itself and
//! its ERC20Votes token. The bindings are generated from human-readable
//! ABI fragments; anything the governor exposes beyond these entry points
//! is out of scope for this client.

use ethers::prelude::abigen;

abigen!(
    Governor,
    r#"[
        function propose(address[] targets, uint256[] values, bytes[] calldatas, string description) external returns (uint256)
        function castVote(uint256 proposalId, uint8 support) external returns (uint256)
        function castVoteWithReason(uint256 proposalId, uint8 support, string reason) external returns (uint256)
        function queue(address[] targets, uint256[] values, bytes[] calldatas, bytes32 descriptionHash) external returns (uint256)
        function execute(address[] targets, uint256[] values, bytes[] calldatas, bytes32 descriptionHash) external payable returns (uint256)
        function state(uint256 proposalId) external view returns (uint8)
        function proposalVotes(uint256 proposalId) external view returns (uint256 againstVotes, uint256 forVotes, uint256 abstainVotes)
        function proposalSnapshot(uint256 proposalId) external view returns (uint256)
        function proposalDeadline(uint256 proposalId) external view returns (uint256)
        function proposalProposer(uint256 proposalId) external view returns (address)
        function proposalEta(uint256 proposalId) external view returns (uint256)
        function hasVoted(uint256 proposalId, address account) external view returns (bool)
        function votingDelay() external view returns (uint256)
        function votingPeriod() external view returns (uint256)
        function proposalThreshold() external view returns (uint256)
        function quorum(uint256 blockNumber) external view returns (uint256)
        event ProposalCreated(uint256 proposalId, address proposer, address[] targets, uint256[] values, string[] signatures, bytes[] calldatas, uint256 startBlock, uint256 endBlock, string description)
        event VoteCast(address indexed voter, uint256 proposalId, uint8 support, uint256 weight, string reason)
        event ProposalQueued(uint256 proposalId, uint256 eta)
        event ProposalExecuted(uint256 proposalId)
    ]"#
);

abigen!(
    VotesToken,
    r#"[
        function getVotes(address account) external view returns (uint256)
        function getPastVotes(address account, uint256 timepoint) external view returns (uint256)
        function balanceOf(address account) external view returns (uint256)
        function delegates(address account) external view returns (address)
        function delegate(address delegatee) external
        event DelegateChanged(address indexed delegator, address indexed fromDelegate, address indexed toDelegate)
    ]"#
);
