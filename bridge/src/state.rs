//! State definitions for the token bridge
//!
//! Routes are keyed by the remote chain id. Each route carries its trusted
//! remote and its four USD limits; the live rate windows are stored
//! separately per route and direction.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// How the bridge debits and credits its token
#[cw_serde]
#[derive(Copy)]
pub enum TokenMode {
    /// Outbound tokens are locked in the bridge, inbound tokens are released
    LockUnlock,
    /// Outbound tokens are burned, inbound tokens are minted against the
    /// bridge's issuance cap
    MintBurn,
}

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Sole caller of privileged operations (normally the admin gateway)
    pub owner: Addr,
    /// Bridged cw20 token
    pub token: Addr,
    pub mode: TokenMode,
    /// Transport endpoint, the only accepted caller of `lz_receive`
    pub endpoint: Addr,
    /// USD price source for rate limiting
    pub oracle: Addr,
    /// Token decimals on this chain
    pub local_decimals: u8,
    /// Decimals used on the wire
    pub shared_decimals: u8,
    /// 10^(local_decimals - shared_decimals)
    pub ld2sd_rate: Uint128,
    pub paused: bool,
    pub send_and_call_enabled: bool,
    /// Fixed at instantiation; enables the `force_mint` recovery operation
    pub force_mint_active: bool,
}

/// Per remote chain configuration
#[cw_serde]
#[derive(Default)]
pub struct Route {
    /// Remote bridge address bytes; inbound traffic from any other source is rejected
    pub trusted_remote: Option<Binary>,
    /// USD limits, 18 decimals. Zero on an unconfigured route blocks all traffic.
    pub max_single_send: Uint128,
    pub max_daily_send: Uint128,
    pub max_single_receive: Uint128,
    pub max_daily_receive: Uint128,
    /// Maximum outbound payload size in bytes (default applied when unset)
    pub payload_size_limit: Option<u64>,
}

/// Fixed 24-hour accumulation window
#[cw_serde]
pub struct RateWindow {
    pub window_start: Timestamp,
    pub accumulated_usd: Uint128,
}

/// Message accepted by `lz_receive` and currently being delivered
#[cw_serde]
pub struct InFlightMessage {
    pub src_chain_id: u16,
    pub src_address: Binary,
    pub nonce: u64,
    pub payload_hash: Binary,
}

/// Bridge statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub total_sent: u64,
    pub total_received: u64,
    pub total_failed: u64,
    pub total_retried: u64,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:token-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rate limit period in seconds (24 hours)
pub const RATE_LIMIT_PERIOD: u64 = 86_400;

/// Payload size limit for routes without an explicit one
pub const DEFAULT_PAYLOAD_SIZE_LIMIT: u64 = 10_000;

/// Reply id of the nonblocking receive sub-message
pub const NONBLOCKING_RECEIVE_REPLY_ID: u64 = 1;

// ============================================================================
// Core State Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATS: Item<Stats> = Item::new("stats");

/// Key: remote chain id
pub const ROUTES: Map<u16, Route> = Map::new("routes");

/// Key: (remote chain id, direction)
pub const RATE_WINDOWS: Map<(u16, &str), RateWindow> = Map::new("rate_windows");

/// Minimum destination gas. Key: (remote chain id, packet type)
pub const MIN_DST_GAS: Map<(u16, u8), u64> = Map::new("min_dst_gas");

/// Accounts exempt from rate limits
pub const WHITELIST: Map<&Addr, bool> = Map::new("whitelist");

/// Tokens held on behalf of remote chains (lock/unlock mode)
pub const LOCKED_BALANCE: Item<Uint128> = Item::new("locked_balance");

// ============================================================================
// Failed Message Recovery
// ============================================================================

/// keccak256 of undelivered payloads.
/// Key: (src chain id, src address bytes, nonce)
pub const FAILED_MESSAGES: Map<(u16, &[u8], u64), Binary> = Map::new("failed_messages");

/// Set between `lz_receive` and the reply of its nonblocking sub-message
pub const IN_FLIGHT: Item<InFlightMessage> = Item::new("in_flight");
