//! MeshGov - A thin client for OpenZeppelin Governor-style DAO contracts
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Governance Client
//! - [`client`] - The `GovernorClient` façade (propose, vote, read, execute)
//! - [`contracts`] - Fixed Governor / votes-token ABIs
//! - [`types`] - Proposal records, states, vote directions
//!
//! ## Operations
//! - [`monitor`] - Proposal polling loop (queue and execute when ready)
//! - [`history`] - In-memory log of submitted transactions
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`cli`] - CLI utilities

#![forbid(unsafe_code)]

// ============================================================================
// Governance Client
// ============================================================================
pub mod client;
pub mod contracts;
pub mod types;

// ============================================================================
// Operations
// ============================================================================
pub mod history;
pub mod monitor;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod cli;
pub mod config;
pub mod error;
