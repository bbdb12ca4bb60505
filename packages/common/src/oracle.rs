//! Price oracle boundary.
//!
//! The oracle is a black box returning the USD price of one whole unit of an
//! asset, scaled by 1e18.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, QuerierWrapper, StdResult, Uint128};

/// Fixed-point scale of oracle prices (1e18 = 1 USD).
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

#[cw_serde]
#[derive(QueryResponses)]
pub enum OracleQueryMsg {
    /// USD price per whole unit of `asset`
    #[returns(PriceResponse)]
    GetPrice { asset: String },
}

#[cw_serde]
pub struct PriceResponse {
    pub price: Uint128,
}

/// Fetch the price of `asset`. Oracle errors propagate to the caller.
pub fn query_price(querier: &QuerierWrapper, oracle: &Addr, asset: &str) -> StdResult<Uint128> {
    let res: PriceResponse = querier.query_wasm_smart(
        oracle,
        &OracleQueryMsg::GetPrice {
            asset: asset.to_string(),
        },
    )?;
    Ok(res.price)
}
