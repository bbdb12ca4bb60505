//! Common - Shared Types and Interfaces for the Multichain Bridge Contracts
//!
//! This package holds the message shapes that cross contract boundaries:
//! the transport endpoint, the price oracle, the permission authority and
//! the issuance API a bridge calls on its token.

pub mod asset;
pub mod oracle;
pub mod permission;
pub mod token;
pub mod transport;

pub use asset::AssetInfo;
pub use oracle::{query_price, OracleQueryMsg, PriceResponse};
pub use permission::{is_allowed_to_call, IsAllowedResponse, PermissionQueryMsg};
pub use token::IssuerExecuteMsg;
pub use transport::{
    EndpointExecuteMsg, EndpointQueryMsg, FeeResponse, OftReceiverMsg, ReceiverExecuteMsg,
};
