//! Permission authority boundary.
//!
//! Answers "may `account` invoke `function_sig` on `contract`?".

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, QuerierWrapper, StdResult};

#[cw_serde]
#[derive(QueryResponses)]
pub enum PermissionQueryMsg {
    #[returns(IsAllowedResponse)]
    IsAllowedToCall {
        account: String,
        contract: String,
        function_sig: String,
    },
}

#[cw_serde]
pub struct IsAllowedResponse {
    pub allowed: bool,
}

pub fn is_allowed_to_call(
    querier: &QuerierWrapper,
    authority: &Addr,
    account: &Addr,
    contract: &Addr,
    function_sig: &str,
) -> StdResult<bool> {
    let res: IsAllowedResponse = querier.query_wasm_smart(
        authority,
        &PermissionQueryMsg::IsAllowedToCall {
            account: account.to_string(),
            contract: contract.to_string(),
            function_sig: function_sig.to_string(),
        },
    )?;
    Ok(res.allowed)
}
