//! Query handlers for the token bridge.
//!
//! This module contains all query message handlers for retrieving contract state.

use cosmwasm_std::{Addr, Binary, Deps, Env, StdError, StdResult, Uint128};
use cw20::{Cw20QueryMsg, TokenInfoResponse};

use common::{EndpointQueryMsg, FeeResponse};

use crate::codec::{ld2sd, remove_dust, Payload, PT_SEND, PT_SEND_AND_CALL};
use crate::error::ContractError;
use crate::msg::{ConfigResponse, RateWindowResponse, RouteResponse, StatsResponse};
use crate::rate_limit::{current_window, eligibility, limits, token_usd_value, Direction, Eligibility};
use crate::state::{
    TokenMode, CONFIG, DEFAULT_PAYLOAD_SIZE_LIMIT, FAILED_MESSAGES, LOCKED_BALANCE, MIN_DST_GAS,
    ROUTES, STATS, WHITELIST,
};

fn std_err(err: ContractError) -> StdError {
    match err {
        ContractError::Std(e) => e,
        other => StdError::generic_err(other.to_string()),
    }
}

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        token: config.token,
        mode: config.mode,
        endpoint: config.endpoint,
        oracle: config.oracle,
        local_decimals: config.local_decimals,
        shared_decimals: config.shared_decimals,
        ld2sd_rate: config.ld2sd_rate,
        paused: config.paused,
        send_and_call_enabled: config.send_and_call_enabled,
        force_mint_active: config.force_mint_active,
    })
}

pub fn query_owner(deps: Deps) -> StdResult<Addr> {
    Ok(CONFIG.load(deps.storage)?.owner)
}

/// Query bridge statistics.
pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_sent: stats.total_sent,
        total_received: stats.total_received,
        total_failed: stats.total_failed,
        total_retried: stats.total_retried,
    })
}

// ============================================================================
// Route Queries
// ============================================================================

/// Query a route. Unconfigured routes read as all-zero limits.
pub fn query_route(deps: Deps, chain_id: u16) -> StdResult<RouteResponse> {
    let route = ROUTES.may_load(deps.storage, chain_id)?.unwrap_or_default();
    let min_dst_gas = [PT_SEND, PT_SEND_AND_CALL]
        .into_iter()
        .map(|packet_type| -> StdResult<u64> {
            Ok(MIN_DST_GAS
                .may_load(deps.storage, (chain_id, packet_type))?
                .unwrap_or_default())
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(RouteResponse {
        chain_id,
        trusted_remote: route.trusted_remote,
        max_single_send: route.max_single_send,
        max_daily_send: route.max_daily_send,
        max_single_receive: route.max_single_receive,
        max_daily_receive: route.max_daily_receive,
        min_dst_gas,
        payload_size_limit: route.payload_size_limit.unwrap_or(DEFAULT_PAYLOAD_SIZE_LIMIT),
    })
}

/// Query the current rate window of a route with expiry applied.
pub fn query_rate_window(
    deps: Deps,
    env: Env,
    chain_id: u16,
    direction: Direction,
) -> StdResult<RateWindowResponse> {
    let route = ROUTES.may_load(deps.storage, chain_id)?.unwrap_or_default();
    let (_, daily_limit) = limits(&route, direction);
    let window =
        current_window(deps.storage, chain_id, direction, env.block.time).map_err(std_err)?;

    Ok(RateWindowResponse {
        window_start: window.window_start,
        accumulated_usd: window.accumulated_usd,
        daily_limit,
        remaining_usd: daily_limit.saturating_sub(window.accumulated_usd),
    })
}

/// Query whether `from` could send `amount` right now, as far as the
/// send limits of `dst_chain_id` are concerned.
pub fn query_is_eligible_to_send(
    deps: Deps,
    env: Env,
    from: String,
    dst_chain_id: u16,
    amount: Uint128,
) -> StdResult<Eligibility> {
    let config = CONFIG.load(deps.storage)?;
    let from = deps.api.addr_validate(&from)?;
    let route = ROUTES.may_load(deps.storage, dst_chain_id)?.unwrap_or_default();
    let whitelisted = WHITELIST.has(deps.storage, &from);

    let amount_usd = token_usd_value(
        &deps.querier,
        &config.oracle,
        &config.token,
        amount,
        config.local_decimals,
    )
    .map_err(std_err)?;

    eligibility(
        deps.storage,
        dst_chain_id,
        &route,
        Direction::Send,
        amount_usd,
        env.block.time,
        whitelisted,
    )
    .map_err(std_err)
}

pub fn query_is_whitelisted(deps: Deps, account: String) -> StdResult<bool> {
    let account = deps.api.addr_validate(&account)?;
    Ok(WHITELIST.has(deps.storage, &account))
}

// ============================================================================
// Failed Message Queries
// ============================================================================

pub fn query_failed_message(
    deps: Deps,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
) -> StdResult<Option<Binary>> {
    FAILED_MESSAGES.may_load(deps.storage, (src_chain_id, src_address.as_slice(), nonce))
}

// ============================================================================
// Fee Estimation
// ============================================================================

/// Fee quote of the endpoint for the payload a `send_from` would produce.
pub fn query_estimate_send_fee(
    deps: Deps,
    env: Env,
    dst_chain_id: u16,
    to_address: Binary,
    amount: Uint128,
    use_zro: bool,
    adapter_params: Binary,
) -> StdResult<FeeResponse> {
    let amount_sd = quoted_amount_sd(deps, amount)?;
    let payload = Payload::Send {
        to: to_address.to_vec(),
        amount_sd,
    };
    estimate_fees(deps, env, dst_chain_id, &payload, use_zro, adapter_params)
}

/// Fee quote of the endpoint for the payload a `send_and_call` would produce.
#[allow(clippy::too_many_arguments)]
pub fn query_estimate_send_and_call_fee(
    deps: Deps,
    env: Env,
    from: String,
    dst_chain_id: u16,
    to_address: Binary,
    amount: Uint128,
    payload: Binary,
    dst_gas_for_call: u64,
    use_zro: bool,
    adapter_params: Binary,
) -> StdResult<FeeResponse> {
    let from = deps.api.addr_validate(&from)?;
    let amount_sd = quoted_amount_sd(deps, amount)?;
    let payload = Payload::SendAndCall {
        to: to_address.to_vec(),
        amount_sd,
        from: from.as_bytes().to_vec(),
        dst_gas_for_call,
        call_payload: payload.to_vec(),
    };
    estimate_fees(deps, env, dst_chain_id, &payload, use_zro, adapter_params)
}

fn quoted_amount_sd(deps: Deps, amount: Uint128) -> StdResult<u64> {
    let config = CONFIG.load(deps.storage)?;
    let (amount, _) = remove_dust(amount, config.ld2sd_rate);
    ld2sd(amount, config.ld2sd_rate).map_err(std_err)
}

fn estimate_fees(
    deps: Deps,
    env: Env,
    dst_chain_id: u16,
    payload: &Payload,
    use_zro: bool,
    adapter_params: Binary,
) -> StdResult<FeeResponse> {
    let config = CONFIG.load(deps.storage)?;
    deps.querier.query_wasm_smart(
        &config.endpoint,
        &EndpointQueryMsg::EstimateFees {
            dst_chain_id,
            user_application: env.contract.address.to_string(),
            payload: payload.encode().map_err(std_err)?,
            pay_in_zro: use_zro,
            adapter_params,
        },
    )
}

// ============================================================================
// Supply Queries
// ============================================================================

/// Supply on this chain outside the bridge's custody.
pub fn query_circulating_supply(deps: Deps) -> StdResult<Uint128> {
    let config = CONFIG.load(deps.storage)?;
    let info: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(&config.token, &Cw20QueryMsg::TokenInfo {})?;
    match config.mode {
        TokenMode::MintBurn => Ok(info.total_supply),
        TokenMode::LockUnlock => {
            let locked = LOCKED_BALANCE.load(deps.storage)?;
            Ok(info.total_supply.saturating_sub(locked))
        }
    }
}

pub fn query_locked_balance(deps: Deps) -> StdResult<Uint128> {
    LOCKED_BALANCE.load(deps.storage)
}
