//! Access Control Manager
//!
//! Holds call permissions keyed by `(contract, function, account)` and answers
//! `IsAllowedToCall` queries for access-controlled contracts. A grant against
//! the wildcard contract `*` applies to every contract.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
