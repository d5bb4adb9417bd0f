//! Integration tests for configuration loading
//!
//! These go through real files on disk, the way the binaries load
//! governor.toml at startup.

use meshgov::config::load_config_from;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_full_config_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        r#"
[rpc]
url = "https://rpc-amoy.polygon.technology"
chain_id = 80002
tx_timeout_secs = 90
confirmations = 2

[contracts]
governor = "0x1111111111111111111111111111111111111111"
token = "0x2222222222222222222222222222222222222222"

[signer]
private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"

[monitor]
poll_interval_secs = 10
max_polls = 60
"#
    )
    .expect("Failed to write temp config");

    let config = load_config_from(file.path()).expect("Failed to load config");

    assert_eq!(config.rpc.url, "https://rpc-amoy.polygon.technology");
    assert_eq!(config.rpc.chain_id, 80002);
    assert_eq!(config.rpc.tx_timeout_secs, 90);
    assert_eq!(config.rpc.confirmations, 2);
    assert_eq!(
        config.contracts.governor,
        "0x1111111111111111111111111111111111111111"
    );
    assert_eq!(
        config.contracts.token,
        "0x2222222222222222222222222222222222222222"
    );
    assert!(config.signer.private_key.is_some());
    assert_eq!(config.monitor.poll_interval_secs, 10);
    assert_eq!(config.monitor.max_polls, 60);
}

#[test]
fn test_minimal_config_gets_defaults() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        r#"
[rpc]
url = "http://localhost:8545"
chain_id = 31337

[contracts]
governor = "0x1111111111111111111111111111111111111111"
token = "0x2222222222222222222222222222222222222222"
"#
    )
    .expect("Failed to write temp config");

    let config = load_config_from(file.path()).expect("Failed to load config");

    assert_eq!(config.rpc.tx_timeout_secs, 120);
    assert_eq!(config.rpc.confirmations, 1);
    assert_eq!(config.monitor.poll_interval_secs, 30);
    assert_eq!(config.monitor.max_polls, 240);
    assert!(config.signer.private_key.is_none());
}

#[test]
fn test_missing_governor_rejected() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        r#"
[rpc]
url = "http://localhost:8545"
chain_id = 31337

[contracts]
governor = ""
token = "0x2222222222222222222222222222222222222222"
"#
    )
    .expect("Failed to write temp config");

    let err = load_config_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("contracts.governor must be set"));
}

#[test]
fn test_malformed_toml_rejected() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "this is not toml [[[").expect("Failed to write temp config");

    let err = load_config_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("Config error"));
}
