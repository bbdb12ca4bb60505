//! Outgoing transfer handlers.
//!
//! Both entry points run the same pipeline: sender check, pause and route
//! checks, dust removal, gas and payload size checks, rate limit, debit,
//! and dispatch to the transport endpoint with the attached fee.

use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, DepsMut, Env, Event, MessageInfo, Response, Storage,
    Uint128, Uint256, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use common::{EndpointExecuteMsg, IssuerExecuteMsg};

use crate::codec::{adapter_params_gas, ld2sd, remove_dust, Payload};
use crate::error::ContractError;
use crate::rate_limit::{check_and_consume, token_usd_value, Direction};
use crate::state::{
    TokenMode, CONFIG, DEFAULT_PAYLOAD_SIZE_LIMIT, LOCKED_BALANCE, MIN_DST_GAS, ROUTES, STATS,
    WHITELIST,
};

use super::{cw20_msg, hex_bytes};

/// Parameters shared by `send_from` and `send_and_call`
pub struct SendRequest {
    pub from: String,
    pub dst_chain_id: u16,
    pub to_address: Binary,
    pub amount: Uint128,
    pub refund_address: String,
    pub zro_payment_address: Option<String>,
    pub adapter_params: Binary,
    /// Downstream call payload and its gas, for send-and-call
    pub call: Option<(Binary, u64)>,
}

pub fn execute_send_from(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    req: SendRequest,
) -> Result<Response, ContractError> {
    send(deps, env, info, req)
}

pub fn execute_send_and_call(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    req: SendRequest,
) -> Result<Response, ContractError> {
    if !CONFIG.load(deps.storage)?.send_and_call_enabled {
        return Err(ContractError::SendAndCallDisabled);
    }
    send(deps, env, info, req)
}

fn send(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    req: SendRequest,
) -> Result<Response, ContractError> {
    let from = deps.api.addr_validate(&req.from)?;
    if from != info.sender {
        return Err(ContractError::SenderNotOwner);
    }
    let refund_address = deps.api.addr_validate(&req.refund_address)?;

    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let route = ROUTES
        .may_load(deps.storage, req.dst_chain_id)?
        .unwrap_or_default();
    let destination = route
        .trusted_remote
        .clone()
        .ok_or(ContractError::DestinationNotTrusted {
            chain_id: req.dst_chain_id,
        })?;

    // Only whole shared-decimal units travel; the dust stays with the sender
    let (amount, _dust) = remove_dust(req.amount, config.ld2sd_rate);
    if amount.is_zero() {
        return Err(ContractError::AmountTooSmall);
    }
    let amount_sd = ld2sd(amount, config.ld2sd_rate)?;

    let (payload, extra_gas) = match &req.call {
        None => (
            Payload::Send {
                to: req.to_address.to_vec(),
                amount_sd,
            },
            0,
        ),
        Some((call_payload, dst_gas_for_call)) => (
            Payload::SendAndCall {
                to: req.to_address.to_vec(),
                amount_sd,
                from: from.as_bytes().to_vec(),
                dst_gas_for_call: *dst_gas_for_call,
                call_payload: call_payload.to_vec(),
            },
            *dst_gas_for_call,
        ),
    };

    check_gas_limit(
        deps.storage,
        req.dst_chain_id,
        payload.packet_type(),
        &req.adapter_params,
        extra_gas,
    )?;

    let encoded = payload.encode()?;
    let size_limit = route.payload_size_limit.unwrap_or(DEFAULT_PAYLOAD_SIZE_LIMIT);
    if encoded.len() as u64 > size_limit {
        return Err(ContractError::PayloadSizeTooLarge {
            size: encoded.len() as u64,
            limit: size_limit,
        });
    }

    let whitelisted = WHITELIST.has(deps.storage, &from);
    if !whitelisted {
        let amount_usd = token_usd_value(
            &deps.querier,
            &config.oracle,
            &config.token,
            amount,
            config.local_decimals,
        )?;
        check_and_consume(
            deps.storage,
            req.dst_chain_id,
            &route,
            Direction::Send,
            amount_usd,
            env.block.time,
            false,
        )?;
    }

    let debit = debit_msg(
        deps.storage,
        &env.contract.address,
        &config.token,
        config.mode,
        &from,
        amount,
    )?;

    let dispatch = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.endpoint.to_string(),
        msg: to_json_binary(&EndpointExecuteMsg::Send {
            dst_chain_id: req.dst_chain_id,
            destination,
            payload: encoded,
            refund_address: refund_address.to_string(),
            zro_payment_address: req.zro_payment_address,
            adapter_params: req.adapter_params,
        })?,
        funds: info.funds,
    });

    STATS.update(deps.storage, |mut stats| -> Result<_, ContractError> {
        stats.total_sent += 1;
        Ok(stats)
    })?;

    let method = if req.call.is_some() {
        "send_and_call"
    } else {
        "send_from"
    };

    Ok(Response::new()
        .add_message(debit)
        .add_message(dispatch)
        .add_event(
            Event::new("send_to_chain")
                .add_attribute("dst_chain_id", req.dst_chain_id.to_string())
                .add_attribute("from", from.as_str())
                .add_attribute("to_address", hex_bytes(&req.to_address))
                .add_attribute("amount", amount),
        )
        .add_attribute("method", method)
        .add_attribute("amount_sd", amount_sd.to_string()))
}

/// Requested destination gas must cover the route minimum plus `extra_gas`.
fn check_gas_limit(
    storage: &dyn Storage,
    dst_chain_id: u16,
    packet_type: u8,
    adapter_params: &[u8],
    extra_gas: u64,
) -> Result<(), ContractError> {
    let provided = adapter_params_gas(adapter_params)?;
    let min_gas = MIN_DST_GAS
        .may_load(storage, (dst_chain_id, packet_type))?
        .filter(|gas| *gas > 0)
        .ok_or(ContractError::MinGasLimitNotSet {
            chain_id: dst_chain_id,
            packet_type,
        })?;
    let minimum = min_gas.checked_add(extra_gas).ok_or(ContractError::InvalidAdapterParams)?;
    if provided < Uint256::from(minimum) {
        return Err(ContractError::GasLimitTooLow { minimum });
    }
    Ok(())
}

/// Burn from, or lock into the bridge, `amount` of `from`'s tokens.
fn debit_msg(
    storage: &mut dyn Storage,
    bridge: &Addr,
    token: &Addr,
    mode: TokenMode,
    from: &Addr,
    amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    match mode {
        TokenMode::MintBurn => Ok(IssuerExecuteMsg::Burn {
            account: from.to_string(),
            amount,
        }
        .into_cosmos_msg(token.as_str())?),
        TokenMode::LockUnlock => {
            LOCKED_BALANCE.update(storage, |locked| -> Result<_, ContractError> {
                Ok(locked.checked_add(amount)?)
            })?;
            cw20_msg(
                token,
                &Cw20ExecuteMsg::TransferFrom {
                    owner: from.to_string(),
                    recipient: bridge.to_string(),
                    amount,
                },
            )
        }
    }
}
