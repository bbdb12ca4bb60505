//! Error types for the token bridge

use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Owner is not send caller")]
    SenderNotOwner,

    #[error("Invalid endpoint caller")]
    InvalidEndpointCaller,

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Zero address not allowed")]
    ZeroAddressNotAllowed,

    #[error("ChainId must not be zero")]
    ChainIdMustNotBeZero,

    #[error("Single transaction limit > Daily limit")]
    SingleLimitExceedsDailyLimit,

    #[error("Shared decimals {shared} exceed local decimals {local}")]
    InvalidSharedDecimals { shared: u8, local: u8 },

    #[error("Destination chain is not a trusted source: {chain_id}")]
    DestinationNotTrusted { chain_id: u16 },

    #[error("Minimum gas limit not set for chain {chain_id}, packet type {packet_type}")]
    MinGasLimitNotSet { chain_id: u16, packet_type: u8 },

    #[error("Gas limit is too low: minimum {minimum}")]
    GasLimitTooLow { minimum: u64 },

    #[error("Invalid adapter params")]
    InvalidAdapterParams,

    #[error("Payload size is too large: {size} > {limit}")]
    PayloadSizeTooLarge { size: u64, limit: u64 },

    #[error("Force mint is not active")]
    ForceMintNotActive,

    // ========================================================================
    // Capacity Errors
    // ========================================================================

    #[error("Single Transaction Limit Exceed: {amount_usd} > {limit}")]
    SingleTransactionLimitExceeded { amount_usd: Uint128, limit: Uint128 },

    #[error("Daily Transaction Limit Exceed: {requested} over {remaining} remaining")]
    DailyTransactionLimitExceeded {
        requested: Uint128,
        remaining: Uint128,
    },

    #[error("Insufficient balance: {available} available, {requested} requested")]
    InsufficientBalance {
        available: Uint128,
        requested: Uint128,
    },

    // ========================================================================
    // Compliance Errors
    // ========================================================================

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("sendAndCall is disabled")]
    SendAndCallDisabled,

    // ========================================================================
    // Protocol Errors
    // ========================================================================

    #[error("Amount too small")]
    AmountTooSmall,

    #[error("AmountSD overflow")]
    AmountOverflow,

    #[error("Invalid source sending contract")]
    InvalidSourceSender,

    #[error("Unrecognized payload type")]
    UnrecognizedPayloadType,

    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Caller must be the bridge itself")]
    NotSelf,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

    // ========================================================================
    // Recovery Errors
    // ========================================================================

    #[error("No stored message")]
    NoStoredMessage,

    #[error("Invalid payload")]
    InvalidPayload,
}
