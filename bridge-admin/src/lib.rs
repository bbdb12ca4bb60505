//! Admin Gateway - owner of a token bridge.
//!
//! Privileged bridge operations reach the bridge only through `Forward`.
//! An operation passes when its name is active in the function registry and
//! the permission authority allows the caller to invoke it on the gateway.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
