//! Shared helpers for the meshgov-* command line tools

use ethers::types::{Address, Bytes, U256};

use crate::client::GovernorClient;
use crate::config::{load_config, GovConfig};
use crate::error::{GovError, Result};
use crate::types::VoteSupport;

/// Load `governor.toml` and build a client from it, the way every CLI
/// entrypoint starts.
pub fn load_client_from_config() -> Result<(GovConfig, GovernorClient)> {
    let config = load_config()?;
    let client = GovernorClient::new(&config)?;
    Ok((config, client))
}

/// Parse a proposal id: `0x`-prefixed hex or plain decimal.
pub fn parse_u256(s: &str) -> Result<U256> {
    let parsed = if let Some(hex_digits) = s.strip_prefix("0x") {
        U256::from_str_radix(hex_digits, 16).ok()
    } else {
        U256::from_dec_str(s).ok()
    };
    parsed.ok_or_else(|| GovError::Config(format!("Invalid number: {}", s)))
}

pub fn parse_address(s: &str) -> Result<Address> {
    s.parse()
        .map_err(|_| GovError::InvalidAddress(s.to_string()))
}

/// Parse `for` / `against` / `abstain` (or their wire bytes 1 / 0 / 2).
pub fn parse_support(s: &str) -> Result<VoteSupport> {
    match s.to_lowercase().as_str() {
        "for" | "yes" | "1" => Ok(VoteSupport::For),
        "against" | "no" | "0" => Ok(VoteSupport::Against),
        "abstain" | "2" => Ok(VoteSupport::Abstain),
        other => Err(GovError::Config(format!(
            "Invalid vote direction: {} (expected for/against/abstain)",
            other
        ))),
    }
}

/// Decode `0x`-prefixed (or bare) hex calldata.
pub fn parse_calldata(s: &str) -> Result<Bytes> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() {
        return Ok(Bytes::new());
    }
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| GovError::Config(format!("Invalid calldata hex: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u256_decimal_and_hex() {
        assert_eq!(parse_u256("42").unwrap(), U256::from(42));
        assert_eq!(parse_u256("0x2a").unwrap(), U256::from(42));
        assert!(parse_u256("0xzz").is_err());
        assert!(parse_u256("forty-two").is_err());
    }

    #[test]
    fn test_parse_support_aliases() {
        assert_eq!(parse_support("for").unwrap(), VoteSupport::For);
        assert_eq!(parse_support("FOR").unwrap(), VoteSupport::For);
        assert_eq!(parse_support("yes").unwrap(), VoteSupport::For);
        assert_eq!(parse_support("against").unwrap(), VoteSupport::Against);
        assert_eq!(parse_support("no").unwrap(), VoteSupport::Against);
        assert_eq!(parse_support("abstain").unwrap(), VoteSupport::Abstain);
        assert!(parse_support("maybe").is_err());
    }

    #[test]
    fn test_parse_calldata() {
        assert_eq!(
            parse_calldata("0xdead").unwrap(),
            Bytes::from(vec![0xde, 0xad])
        );
        assert_eq!(parse_calldata("beef").unwrap(), Bytes::from(vec![0xbe, 0xef]));
        assert_eq!(parse_calldata("0x").unwrap(), Bytes::new());
        assert!(parse_calldata("0xg1").is_err());
    }

    #[test]
    fn test_parse_address() {
        assert!(parse_address("0x0000000000000000000000000000000000000001").is_ok());
        assert!(parse_address("nope").is_err());
    }
}
