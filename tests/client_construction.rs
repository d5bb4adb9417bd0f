//! Integration tests for client construction and signer gating
//!
//! Nothing here touches the network: the read-only precondition fires
//! before any RPC is issued, which is exactly what these tests pin down.

use ethers::types::{Address, Bytes, U256};
use meshgov::client::GovernorClient;
use meshgov::config::GovConfig;
use meshgov::error::GovError;
use meshgov::monitor::watch_proposal;
use meshgov::types::{ProposalAction, VoteSupport};

fn config(private_key: Option<&str>) -> GovConfig {
    let signer = match private_key {
        Some(key) => format!("private_key = \"{}\"", key),
        None => String::new(),
    };
    toml::from_str(&format!(
        r#"
        [rpc]
        url = "http://localhost:8545"
        chain_id = 31337

        [contracts]
        governor = "0x1111111111111111111111111111111111111111"
        token = "0x2222222222222222222222222222222222222222"

        [signer]
        {}
        "#,
        signer
    ))
    .expect("Failed to parse test config")
}

fn single_call_action() -> ProposalAction {
    ProposalAction::new(
        vec![Address::from_low_u64_be(7)],
        vec![U256::zero()],
        vec![Bytes::from(vec![0x12, 0x49, 0xc5, 0x8b])],
        "# Mint epoch rewards\n\nMint the relay reward budget for the epoch.",
    )
}

#[test]
fn test_read_only_client_comes_up() {
    let client = GovernorClient::new(&config(None)).expect("Failed to build client");
    assert!(client.is_read_only());
    assert!(client.signer_address().is_none());
}

#[test]
fn test_signing_client_derives_address() {
    let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    let client = GovernorClient::new(&config(Some(key))).expect("Failed to build client");
    assert!(!client.is_read_only());
    assert_eq!(
        format!("{:?}", client.signer_address().unwrap()),
        "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
    );
}

#[tokio::test]
async fn test_read_only_client_refuses_to_vote() {
    let client = GovernorClient::new(&config(None)).expect("Failed to build client");
    let err = client
        .cast_vote(U256::one(), VoteSupport::For, Some("looks good"))
        .await
        .unwrap_err();
    assert!(matches!(err, GovError::SignerRequired("cast_vote")));
}

#[tokio::test]
async fn test_read_only_client_refuses_to_watch() {
    let client = GovernorClient::new(&config(None)).expect("Failed to build client");
    let gov_config = config(None);
    let err = watch_proposal(&client, &single_call_action(), &gov_config.monitor)
        .await
        .unwrap_err();
    assert!(matches!(err, GovError::SignerRequired("watch_proposal")));
}

#[tokio::test]
async fn test_malformed_action_rejected_before_rpc() {
    let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    let client = GovernorClient::new(&config(Some(key))).expect("Failed to build client");

    let lopsided = ProposalAction::new(
        vec![Address::from_low_u64_be(7)],
        vec![],
        vec![Bytes::new()],
        "bad arrays",
    );
    let err = client.create_proposal(&lopsided).await.unwrap_err();
    assert!(matches!(err, GovError::InvalidAction(_)));

    let empty = ProposalAction::new(vec![], vec![], vec![], "no calls");
    let err = client.execute_proposal(&empty).await.unwrap_err();
    assert!(matches!(err, GovError::InvalidAction(_)));
}
