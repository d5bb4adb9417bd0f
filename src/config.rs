//! Configuration management for MeshGov

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{GovError, Result};

#[derive(Debug, Deserialize)]
pub struct GovConfig {
    pub rpc: RpcConfig,
    pub contracts: ContractsConfig,
    #[serde(default)]
    pub signer: SignerConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

#[derive(Debug, Deserialize)]
pub struct RpcConfig {
    pub url: String,
    pub chain_id: u64,
    #[serde(default = "default_tx_timeout")]
    pub tx_timeout_secs: u64,
    #[serde(default = "default_confirmations")]
    pub confirmations: usize,
}

#[derive(Debug, Deserialize)]
pub struct ContractsConfig {
    pub governor: String,
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignerConfig {
    #[serde(default)]
    pub private_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            max_polls: default_max_polls(),
        }
    }
}

fn default_tx_timeout() -> u64 {
    120
}

fn default_confirmations() -> usize {
    1
}

fn default_poll_interval() -> u64 {
    30
}

fn default_max_polls() -> u32 {
    240
}

impl SignerConfig {
    /// Resolve the private key: the config file wins, the `GOV_PRIVATE_KEY`
    /// environment variable (including `.env`) is the fallback.
    pub fn resolve_private_key(&self) -> Option<String> {
        if let Some(key) = &self.private_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        dotenvy::dotenv().ok();
        std::env::var("GOV_PRIVATE_KEY").ok().filter(|k| !k.is_empty())
    }
}

pub fn load_config() -> Result<GovConfig> {
    load_config_from("governor.toml")
}

pub fn load_config_from<P: AsRef<Path>>(path: P) -> Result<GovConfig> {
    let config_str = fs::read_to_string(path).unwrap_or_default();
    let config: GovConfig = if config_str.is_empty() {
        // Provide sane defaults when governor.toml is absent; validation
        // below still insists on the fields that have no usable default.
        GovConfig {
            rpc: RpcConfig {
                url: String::new(),
                chain_id: 1,
                tx_timeout_secs: default_tx_timeout(),
                confirmations: default_confirmations(),
            },
            contracts: ContractsConfig {
                governor: String::new(),
                token: String::new(),
            },
            signer: SignerConfig::default(),
            monitor: MonitorConfig::default(),
        }
    } else {
        toml::from_str(&config_str).map_err(|e| GovError::Config(e.to_string()))?
    };

    // Validate critical values
    if config.rpc.url.is_empty() {
        return Err(GovError::Config(
            "rpc.url must be set in governor.toml".to_string(),
        ));
    }

    if config.contracts.governor.is_empty() {
        return Err(GovError::Config(
            "contracts.governor must be set in governor.toml".to_string(),
        ));
    }

    if config.contracts.token.is_empty() {
        return Err(GovError::Config(
            "contracts.token must be set in governor.toml".to_string(),
        ));
    }

    Ok(config)
}
