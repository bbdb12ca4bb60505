use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

pub use common::permission::IsAllowedResponse;

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiator
    pub owner: Option<String>,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Allow `account` to call `function_sig` on `contract` ("*" for any contract)
    GiveCallPermission {
        contract: String,
        function_sig: String,
        account: String,
    },
    RevokeCallPermission {
        contract: String,
        function_sig: String,
        account: String,
    },
    TransferOwnership { new_owner: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Whether `account` may call `function_sig` on `contract`, wildcard grants included
    #[returns(IsAllowedResponse)]
    IsAllowedToCall {
        account: String,
        contract: String,
        function_sig: String,
    },

    /// Exact grant lookup, no wildcard expansion
    #[returns(bool)]
    HasPermission {
        contract: String,
        function_sig: String,
        account: String,
    },

    #[returns(Addr)]
    Owner {},
}
