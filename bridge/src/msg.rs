//! Message types for the token bridge
//!
//! This module defines all messages for instantiation, execution, and queries.
//! Every execute variant has a stable snake_case name, returned by
//! [`ExecuteMsg::operation`], under which an admin gateway registers and
//! authorizes it.

use common::AssetInfo;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};

pub use crate::rate_limit::{Direction, Eligibility};
pub use crate::state::TokenMode;
pub use common::FeeResponse;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Bridged cw20 token; its decimals are read at instantiation
    pub token: String,
    pub mode: TokenMode,
    /// Decimals used on the wire, at most the token's decimals
    pub shared_decimals: u8,
    /// Transport endpoint
    pub endpoint: String,
    /// Price oracle used for USD rate limits
    pub oracle: String,
    /// Allow the owner to credit recipients directly with `force_mint`
    pub force_mint_active: bool,
    /// Defaults to the instantiator
    pub owner: Option<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outgoing Transfers
    // ========================================================================
    /// Bridge `amount` from `from` (must be the sender) to `to_address` on
    /// `dst_chain_id`. The transport fee is attached as native funds; any
    /// excess goes back to `refund_address`.
    ///
    /// Lock/unlock mode requires an allowance to the bridge.
    SendFrom {
        from: String,
        dst_chain_id: u16,
        /// Recipient address bytes on the destination chain
        to_address: Binary,
        amount: Uint128,
        refund_address: String,
        zro_payment_address: Option<String>,
        /// `[u16 version][u256 gas]...`
        adapter_params: Binary,
    },

    /// Like `SendFrom`, and additionally invoke `on_oft_received` on the
    /// recipient with `payload` once credited. Disabled by default.
    SendAndCall {
        from: String,
        dst_chain_id: u16,
        to_address: Binary,
        amount: Uint128,
        payload: Binary,
        /// Gas reserved for the downstream call on top of the base minimum
        dst_gas_for_call: u64,
        refund_address: String,
        zro_payment_address: Option<String>,
        adapter_params: Binary,
    },

    // ========================================================================
    // Incoming Transfers
    // ========================================================================
    /// Delivery from the transport endpoint
    LzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },

    /// Internal: credit step of a delivery. Only callable by the bridge itself.
    NonblockingLzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },

    // ========================================================================
    // Failed Message Recovery
    // ========================================================================
    /// Re-attempt a failed delivery. Authorization: anyone.
    RetryMessage {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },

    /// Discard a failed delivery without crediting anyone
    DropFailedMessage {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
    },

    /// Credit `to` directly, bypassing transport, pause and limits.
    /// Manual recovery after a drop; only if enabled at instantiation.
    ForceMint {
        src_chain_id: u16,
        to: String,
        amount: Uint128,
    },

    // ========================================================================
    // Route Configuration
    // ========================================================================
    SetOracle {
        oracle: String,
    },

    /// USD limit (18 decimals) for a single outbound transfer
    SetMaxSingleTransactionLimit {
        chain_id: u16,
        limit: Uint128,
    },

    /// USD limit (18 decimals) for outbound transfers per 24h window
    SetMaxDailyLimit {
        chain_id: u16,
        limit: Uint128,
    },

    SetMaxSingleReceiveTransactionLimit {
        chain_id: u16,
        limit: Uint128,
    },

    SetMaxDailyReceiveLimit {
        chain_id: u16,
        limit: Uint128,
    },

    SetTrustedRemoteAddress {
        remote_chain_id: u16,
        /// Remote bridge address bytes
        remote_address: Binary,
    },

    RemoveTrustedRemote {
        remote_chain_id: u16,
    },

    SetMinDstGas {
        dst_chain_id: u16,
        packet_type: u8,
        min_gas: u64,
    },

    SetPayloadSizeLimit {
        dst_chain_id: u16,
        size: u64,
    },

    // ========================================================================
    // Administration
    // ========================================================================
    Pause {},

    Unpause {},

    /// Exempt `user` from rate limits (or revoke the exemption)
    SetWhitelist {
        user: String,
        val: bool,
    },

    UpdateSendAndCallEnabled {
        enabled: bool,
    },

    /// Move stray funds out of the bridge. Locked tokens cannot be swept.
    SweepToken {
        token: AssetInfo,
        to: String,
        amount: Uint128,
    },

    TransferOwnership {
        new_owner: String,
    },
}

impl ExecuteMsg {
    /// Operation name used by the admin gateway's registry and authority.
    pub fn operation(&self) -> &'static str {
        match self {
            ExecuteMsg::SendFrom { .. } => "send_from",
            ExecuteMsg::SendAndCall { .. } => "send_and_call",
            ExecuteMsg::LzReceive { .. } => "lz_receive",
            ExecuteMsg::NonblockingLzReceive { .. } => "nonblocking_lz_receive",
            ExecuteMsg::RetryMessage { .. } => "retry_message",
            ExecuteMsg::DropFailedMessage { .. } => "drop_failed_message",
            ExecuteMsg::ForceMint { .. } => "force_mint",
            ExecuteMsg::SetOracle { .. } => "set_oracle",
            ExecuteMsg::SetMaxSingleTransactionLimit { .. } => "set_max_single_transaction_limit",
            ExecuteMsg::SetMaxDailyLimit { .. } => "set_max_daily_limit",
            ExecuteMsg::SetMaxSingleReceiveTransactionLimit { .. } => {
                "set_max_single_receive_transaction_limit"
            }
            ExecuteMsg::SetMaxDailyReceiveLimit { .. } => "set_max_daily_receive_limit",
            ExecuteMsg::SetTrustedRemoteAddress { .. } => "set_trusted_remote_address",
            ExecuteMsg::RemoveTrustedRemote { .. } => "remove_trusted_remote",
            ExecuteMsg::SetMinDstGas { .. } => "set_min_dst_gas",
            ExecuteMsg::SetPayloadSizeLimit { .. } => "set_payload_size_limit",
            ExecuteMsg::Pause {} => "pause",
            ExecuteMsg::Unpause {} => "unpause",
            ExecuteMsg::SetWhitelist { .. } => "set_whitelist",
            ExecuteMsg::UpdateSendAndCallEnabled { .. } => "update_send_and_call_enabled",
            ExecuteMsg::SweepToken { .. } => "sweep_token",
            ExecuteMsg::TransferOwnership { .. } => "transfer_ownership",
        }
    }
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(Addr)]
    Owner {},

    /// Trusted remote, limits, gas minimums and payload limit of a route
    #[returns(RouteResponse)]
    Route { chain_id: u16 },

    /// Current window with expiry applied
    #[returns(RateWindowResponse)]
    RateWindow { chain_id: u16, direction: Direction },

    /// Whether `from` could send `amount` to `dst_chain_id` right now,
    /// as far as rate limits are concerned
    #[returns(Eligibility)]
    IsEligibleToSend {
        from: String,
        dst_chain_id: u16,
        amount: Uint128,
    },

    /// keccak256 of the stored payload, if delivery failed
    #[returns(Option<Binary>)]
    FailedMessage {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
    },

    #[returns(bool)]
    IsWhitelisted { account: String },

    #[returns(FeeResponse)]
    EstimateSendFee {
        dst_chain_id: u16,
        to_address: Binary,
        amount: Uint128,
        use_zro: bool,
        adapter_params: Binary,
    },

    #[returns(FeeResponse)]
    EstimateSendAndCallFee {
        from: String,
        dst_chain_id: u16,
        to_address: Binary,
        amount: Uint128,
        payload: Binary,
        dst_gas_for_call: u64,
        use_zro: bool,
        adapter_params: Binary,
    },

    /// Supply on this chain not held by the bridge
    #[returns(Uint128)]
    CirculatingSupply {},

    #[returns(Uint128)]
    LockedBalance {},

    #[returns(StatsResponse)]
    Stats {},
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub token: Addr,
    pub mode: TokenMode,
    pub endpoint: Addr,
    pub oracle: Addr,
    pub local_decimals: u8,
    pub shared_decimals: u8,
    pub ld2sd_rate: Uint128,
    pub paused: bool,
    pub send_and_call_enabled: bool,
    pub force_mint_active: bool,
}

#[cw_serde]
pub struct RouteResponse {
    pub chain_id: u16,
    pub trusted_remote: Option<Binary>,
    pub max_single_send: Uint128,
    pub max_daily_send: Uint128,
    pub max_single_receive: Uint128,
    pub max_daily_receive: Uint128,
    /// Per packet type: `[send, send_and_call]`
    pub min_dst_gas: Vec<u64>,
    pub payload_size_limit: u64,
}

#[cw_serde]
pub struct RateWindowResponse {
    pub window_start: Timestamp,
    pub accumulated_usd: Uint128,
    pub daily_limit: Uint128,
    pub remaining_usd: Uint128,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_sent: u64,
    pub total_received: u64,
    pub total_failed: u64,
    pub total_retried: u64,
}

/// Outcome of a delivery, reported in the `outcome` attribute
#[cw_serde]
pub enum ReceiveOutcome {
    Delivered,
    Parked { reason: String },
}

impl ReceiveOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiveOutcome::Delivered => "delivered",
            ReceiveOutcome::Parked { .. } => "parked",
        }
    }
}
