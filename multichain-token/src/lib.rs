//! Multichain Token - cw20 with Capped Issuance
//!
//! A cw20 token whose supply is issued by bridges. Each minter holds a cap;
//! minting consumes it and burning restores it. Minting, burning, cap
//! management, blacklist and pause are gated by an external permission
//! authority, keyed by the operation name.
//!
//! Balances and allowances are handled by `cw20-base`; this crate adds the
//! issuance ledger and the compliance checks in front of every balance move.

pub mod contract;
pub mod error;
pub mod ledger;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
