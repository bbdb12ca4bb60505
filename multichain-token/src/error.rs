use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Base(#[from] cw20_base::ContractError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized")]
    Unauthorized,

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Zero address not allowed")]
    ZeroAddressNotAllowed,

    #[error("Source and destination must differ")]
    AddressesMustDiffer,

    // ========================================================================
    // Capacity Errors
    // ========================================================================
    #[error("Mint limit exceeded: requested {requested}, available {available}")]
    MintLimitExceeded {
        requested: Uint128,
        available: Uint128,
    },

    #[error("New cap {cap} is below minted amount {minted}")]
    NewCapBelowMinted { cap: Uint128, minted: Uint128 },

    // ========================================================================
    // Compliance Errors
    // ========================================================================
    #[error("Token is paused")]
    TokenPaused,

    #[error("Account {account} is blacklisted")]
    AccountBlacklisted { account: String },
}
