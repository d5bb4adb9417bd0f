//! Error types for MeshGov

use ethers::types::TxHash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Signer required for {0}; set signer.private_key or GOV_PRIVATE_KEY")]
    SignerRequired(&'static str),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Invalid proposal action: {0}")]
    InvalidAction(String),
    #[error("Unknown proposal state: {0}")]
    UnknownState(u8),
    #[error("Unknown vote support: {0}")]
    UnknownSupport(u8),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Contract call failed: {0}")]
    Contract(String),
    #[error("Wallet error: {0}")]
    Wallet(String),
    #[error("Transaction {0:#x} reverted on-chain")]
    Reverted(TxHash),
    #[error("Transaction {0:#x} dropped from the mempool")]
    Dropped(TxHash),
    #[error("Timed out waiting for receipt of {0:#x}")]
    ReceiptTimeout(TxHash),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for GovError {
    fn from(err: std::io::Error) -> Self {
        GovError::Io(err.to_string())
    }
}

impl From<ethers::providers::ProviderError> for GovError {
    fn from(err: ethers::providers::ProviderError) -> Self {
        GovError::Provider(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, GovError>;
