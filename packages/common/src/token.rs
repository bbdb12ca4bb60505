//! Issuance API of the multichain token, as seen by a minter.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, CosmosMsg, StdResult, Uint128, WasmMsg};

/// Subset of the multichain token's execute messages used by bridges.
/// Serialises identically to the token's own variants.
#[cw_serde]
pub enum IssuerExecuteMsg {
    /// Mint against the caller's cap
    Mint { recipient: String, amount: Uint128 },
    /// Burn from `account`, restoring the caller's capacity
    Burn { account: String, amount: Uint128 },
}

impl IssuerExecuteMsg {
    pub fn into_cosmos_msg(self, token: impl Into<String>) -> StdResult<CosmosMsg> {
        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.into(),
            msg: to_json_binary(&self)?,
            funds: vec![],
        }))
    }
}
