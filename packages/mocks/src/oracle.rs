//! Mock price oracle. Anyone may set a price; querying an unset asset fails.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError, StdResult,
    Uint128,
};
use cw_storage_plus::Map;

use common::{OracleQueryMsg, PriceResponse};

#[cw_serde]
pub enum ExecuteMsg {
    /// `price` is USD per whole token, scaled by 1e18
    SetPrice { asset: String, price: Uint128 },
}

const PRICES: Map<&str, Uint128> = Map::new("prices");

pub fn instantiate(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> StdResult<Response> {
    Ok(Response::new().add_attribute("method", "instantiate"))
}

pub fn execute(deps: DepsMut, _env: Env, _info: MessageInfo, msg: ExecuteMsg) -> StdResult<Response> {
    match msg {
        ExecuteMsg::SetPrice { asset, price } => {
            PRICES.save(deps.storage, &asset, &price)?;
            Ok(Response::new()
                .add_attribute("method", "set_price")
                .add_attribute("asset", asset)
                .add_attribute("price", price))
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: OracleQueryMsg) -> StdResult<Binary> {
    match msg {
        OracleQueryMsg::GetPrice { asset } => {
            let price = PRICES
                .may_load(deps.storage, &asset)?
                .ok_or_else(|| StdError::generic_err(format!("no price for {asset}")))?;
            to_json_binary(&PriceResponse { price })
        }
    }
}
