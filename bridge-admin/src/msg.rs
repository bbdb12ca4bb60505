//! Message types for the admin gateway

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

pub use token_bridge::msg::ExecuteMsg as BridgeExecuteMsg;

#[cw_serde]
pub struct InstantiateMsg {
    /// Token bridge this gateway will own
    pub bridge: String,
    pub permission_authority: String,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mark operations active or inactive. Owner only; both vectors must
    /// have the same length.
    UpsertSignature {
        signatures: Vec<String>,
        active: Vec<bool>,
    },

    /// Relay a bridge call. The operation must be active and the caller
    /// allowed to call it on this gateway. Attached funds are passed on.
    Forward { msg: BridgeExecuteMsg },

    /// Hand the bridge to another owner, normally a replacement gateway.
    /// Authorized like a forwarded `transfer_bridge_ownership` operation.
    TransferBridgeOwnership { new_owner: String },

    /// Owner only
    SetPermissionAuthority { authority: String },

    /// Propose a new gateway owner (owner only)
    TransferOwnership { new_owner: String },

    /// Complete a proposed ownership transfer (pending owner only)
    AcceptOwnership {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(bool)]
    IsRegistered { signature: String },

    /// Active operations in ascending order
    #[returns(RegisteredOperationsResponse)]
    RegisteredOperations {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(Option<Addr>)]
    PendingOwner {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub bridge: Addr,
    pub permission_authority: Addr,
}

#[cw_serde]
pub struct RegisteredOperationsResponse {
    pub operations: Vec<String>,
}
