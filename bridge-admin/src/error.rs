//! Error types for the admin gateway

use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    OnlyOwner,

    #[error("Unauthorized: caller is not allowed to call {operation}")]
    Unauthorized { operation: String },

    #[error("Caller is not the pending owner")]
    NotPendingOwner,

    #[error("No pending ownership transfer")]
    NoPendingOwner,

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Operation not found: {operation}")]
    OperationNotFound { operation: String },

    #[error("Length mismatch: {signatures} signatures, {flags} flags")]
    LengthMismatch { signatures: usize, flags: usize },

    #[error("Zero address not allowed")]
    ZeroAddressNotAllowed,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
