use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:multichain-token";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub permission_authority: Addr,
    pub paused: bool,
}

pub const CONFIG: Item<Config> = Item::new("config");

// ============================================================================
// Issuance Ledger
// ============================================================================

/// Issuance allowance of one minter. `minted <= cap` always holds.
#[cw_serde]
#[derive(Default)]
pub struct MinterInfo {
    pub cap: Uint128,
    pub minted: Uint128,
}

impl MinterInfo {
    pub fn available(&self) -> Uint128 {
        self.cap.saturating_sub(self.minted)
    }
}

/// Absent entries read as zero cap, zero minted
pub const MINTERS: Map<&Addr, MinterInfo> = Map::new("minters");

// ============================================================================
// Compliance
// ============================================================================

pub const BLACKLIST: Map<&Addr, bool> = Map::new("blacklist");
