//! Token Bridge Contract - Rate-Limited Cross-Chain Token Transfers
//!
//! Moves one cw20 token between chains over a message transport endpoint.
//! The token is either locked in the bridge (lock/unlock) or burned and
//! re-minted against the bridge's issuance cap (mint/burn).
//!
//! # Outgoing Flow
//! 1. User calls `SendFrom` with the transport fee attached
//! 2. Amount is trimmed to shared decimals and checked against route limits
//! 3. Tokens are burned or locked, and the payload goes to the endpoint
//!
//! # Incoming Flow (Nonblocking)
//! 1. Endpoint calls `LzReceive`; caller, source and payload type are checked
//! 2. Crediting runs as a sub-message to the bridge itself
//! 3. A failed credit is parked by payload hash and can be retried by anyone
//!
//! # Security
//! - Trusted remote per route
//! - USD rate limits per route and direction (24h window)
//! - Whitelist exemption
//! - Emergency pause functionality

pub mod codec;
pub mod contract;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
mod query;
pub mod rate_limit;
pub mod state;

pub use crate::codec::{adapter_params_v1, Payload};
pub use crate::error::ContractError;
pub use crate::hash::{keccak256, payload_hash};
