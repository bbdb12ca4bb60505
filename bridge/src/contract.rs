//! Token bridge entry points.
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;
use cw20::{Cw20QueryMsg, TokenInfoResponse};

use crate::codec::ld2sd_rate;
use crate::error::ContractError;
use crate::execute::{
    execute_drop_failed_message, execute_force_mint, execute_lz_receive,
    execute_nonblocking_lz_receive, execute_pause, execute_remove_trusted_remote,
    execute_retry_message, execute_send_and_call, execute_send_from, execute_set_limit,
    execute_set_min_dst_gas, execute_set_oracle, execute_set_payload_size_limit,
    execute_set_trusted_remote_address, execute_set_whitelist, execute_sweep_token,
    execute_transfer_ownership, execute_unpause, execute_update_send_and_call_enabled,
    reply_nonblocking_receive, LimitKind, SendRequest,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_circulating_supply, query_config, query_estimate_send_and_call_fee,
    query_estimate_send_fee, query_failed_message, query_is_eligible_to_send,
    query_is_whitelisted, query_locked_balance, query_owner, query_rate_window, query_route,
    query_stats,
};
use crate::rate_limit::Direction;
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, LOCKED_BALANCE,
    NONBLOCKING_RECEIVE_REPLY_ID, STATS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    let token = deps.api.addr_validate(&msg.token)?;
    let endpoint = deps.api.addr_validate(&msg.endpoint)?;
    let oracle = deps.api.addr_validate(&msg.oracle)?;

    // Local decimals come from the token itself
    let token_info: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(&token, &Cw20QueryMsg::TokenInfo {})?;
    let rate = ld2sd_rate(token_info.decimals, msg.shared_decimals)?;

    let config = Config {
        owner,
        token,
        mode: msg.mode,
        endpoint,
        oracle,
        local_decimals: token_info.decimals,
        shared_decimals: msg.shared_decimals,
        ld2sd_rate: rate,
        paused: false,
        send_and_call_enabled: false,
        force_mint_active: msg.force_mint_active,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;
    LOCKED_BALANCE.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("token", config.token)
        .add_attribute("local_decimals", config.local_decimals.to_string())
        .add_attribute("shared_decimals", config.shared_decimals.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outgoing transfers
        ExecuteMsg::SendFrom {
            from,
            dst_chain_id,
            to_address,
            amount,
            refund_address,
            zro_payment_address,
            adapter_params,
        } => execute_send_from(
            deps,
            env,
            info,
            SendRequest {
                from,
                dst_chain_id,
                to_address,
                amount,
                refund_address,
                zro_payment_address,
                adapter_params,
                call: None,
            },
        ),
        ExecuteMsg::SendAndCall {
            from,
            dst_chain_id,
            to_address,
            amount,
            payload,
            dst_gas_for_call,
            refund_address,
            zro_payment_address,
            adapter_params,
        } => execute_send_and_call(
            deps,
            env,
            info,
            SendRequest {
                from,
                dst_chain_id,
                to_address,
                amount,
                refund_address,
                zro_payment_address,
                adapter_params,
                call: Some((payload, dst_gas_for_call)),
            },
        ),

        // Incoming transfers
        ExecuteMsg::LzReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => execute_lz_receive(deps, env, info, src_chain_id, src_address, nonce, payload),
        ExecuteMsg::NonblockingLzReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => execute_nonblocking_lz_receive(
            deps,
            env,
            info,
            src_chain_id,
            src_address,
            nonce,
            payload,
        ),

        // Failed message recovery
        ExecuteMsg::RetryMessage {
            src_chain_id,
            src_address,
            nonce,
            payload,
        } => execute_retry_message(deps, env, src_chain_id, src_address, nonce, payload),
        ExecuteMsg::DropFailedMessage {
            src_chain_id,
            src_address,
            nonce,
        } => execute_drop_failed_message(deps, info, src_chain_id, src_address, nonce),
        ExecuteMsg::ForceMint {
            src_chain_id,
            to,
            amount,
        } => execute_force_mint(deps, info, src_chain_id, to, amount),

        // Route configuration
        ExecuteMsg::SetOracle { oracle } => execute_set_oracle(deps, info, oracle),
        ExecuteMsg::SetMaxSingleTransactionLimit { chain_id, limit } => execute_set_limit(
            deps,
            info,
            chain_id,
            Direction::Send,
            LimitKind::Single,
            limit,
        ),
        ExecuteMsg::SetMaxDailyLimit { chain_id, limit } => execute_set_limit(
            deps,
            info,
            chain_id,
            Direction::Send,
            LimitKind::Daily,
            limit,
        ),
        ExecuteMsg::SetMaxSingleReceiveTransactionLimit { chain_id, limit } => execute_set_limit(
            deps,
            info,
            chain_id,
            Direction::Receive,
            LimitKind::Single,
            limit,
        ),
        ExecuteMsg::SetMaxDailyReceiveLimit { chain_id, limit } => execute_set_limit(
            deps,
            info,
            chain_id,
            Direction::Receive,
            LimitKind::Daily,
            limit,
        ),
        ExecuteMsg::SetTrustedRemoteAddress {
            remote_chain_id,
            remote_address,
        } => execute_set_trusted_remote_address(deps, info, remote_chain_id, remote_address),
        ExecuteMsg::RemoveTrustedRemote { remote_chain_id } => {
            execute_remove_trusted_remote(deps, info, remote_chain_id)
        }
        ExecuteMsg::SetMinDstGas {
            dst_chain_id,
            packet_type,
            min_gas,
        } => execute_set_min_dst_gas(deps, info, dst_chain_id, packet_type, min_gas),
        ExecuteMsg::SetPayloadSizeLimit { dst_chain_id, size } => {
            execute_set_payload_size_limit(deps, info, dst_chain_id, size)
        }

        // Admin operations
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::SetWhitelist { user, val } => execute_set_whitelist(deps, info, user, val),
        ExecuteMsg::UpdateSendAndCallEnabled { enabled } => {
            execute_update_send_and_call_enabled(deps, info, enabled)
        }
        ExecuteMsg::SweepToken { token, to, amount } => {
            execute_sweep_token(deps, env, info, token, to, amount)
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        NONBLOCKING_RECEIVE_REPLY_ID => reply_nonblocking_receive(deps, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        // Core queries
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Owner {} => to_json_binary(&query_owner(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),

        // Route queries
        QueryMsg::Route { chain_id } => to_json_binary(&query_route(deps, chain_id)?),
        QueryMsg::RateWindow {
            chain_id,
            direction,
        } => to_json_binary(&query_rate_window(deps, env, chain_id, direction)?),
        QueryMsg::IsEligibleToSend {
            from,
            dst_chain_id,
            amount,
        } => to_json_binary(&query_is_eligible_to_send(
            deps,
            env,
            from,
            dst_chain_id,
            amount,
        )?),
        QueryMsg::IsWhitelisted { account } => {
            to_json_binary(&query_is_whitelisted(deps, account)?)
        }

        // Failed message queries
        QueryMsg::FailedMessage {
            src_chain_id,
            src_address,
            nonce,
        } => to_json_binary(&query_failed_message(
            deps,
            src_chain_id,
            src_address,
            nonce,
        )?),

        // Fee queries
        QueryMsg::EstimateSendFee {
            dst_chain_id,
            to_address,
            amount,
            use_zro,
            adapter_params,
        } => to_json_binary(&query_estimate_send_fee(
            deps,
            env,
            dst_chain_id,
            to_address,
            amount,
            use_zro,
            adapter_params,
        )?),
        QueryMsg::EstimateSendAndCallFee {
            from,
            dst_chain_id,
            to_address,
            amount,
            payload,
            dst_gas_for_call,
            use_zro,
            adapter_params,
        } => to_json_binary(&query_estimate_send_and_call_fee(
            deps,
            env,
            from,
            dst_chain_id,
            to_address,
            amount,
            payload,
            dst_gas_for_call,
            use_zro,
            adapter_params,
        )?),

        // Supply queries
        QueryMsg::CirculatingSupply {} => to_json_binary(&query_circulating_supply(deps)?),
        QueryMsg::LockedBalance {} => to_json_binary(&query_locked_balance(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
