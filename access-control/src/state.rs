use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:access-control";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Contract key matching every contract
pub const ANY_CONTRACT: &str = "*";

pub const OWNER: Item<Addr> = Item::new("owner");

/// Key: (contract or "*", function signature, account)
pub const PERMISSIONS: Map<(&str, &str, &Addr), bool> = Map::new("permissions");
