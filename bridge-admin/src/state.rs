//! State definitions for the admin gateway

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:bridge-admin";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Selector under which the gateway's own bridge ownership transfer is authorized
pub const TRANSFER_BRIDGE_OWNERSHIP: &str = "transfer_bridge_ownership";

/// Reply id of forwarded bridge calls
pub const FORWARD_REPLY_ID: u64 = 1;

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// Owned token bridge
    pub bridge: Addr,
    pub permission_authority: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Proposed owner awaiting `accept_ownership`
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

/// Function registry. Only active operations are stored.
pub const REGISTRY: Map<&str, bool> = Map::new("registry");
