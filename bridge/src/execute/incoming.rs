//! Incoming transfer handlers.
//!
//! `lz_receive` performs the checks whose failure must reach the transport
//! (caller, trusted remote, payload type) and then runs the credit step as
//! a sub-message to itself. A failing credit step is rolled back and its
//! payload hash parked in `FAILED_MESSAGES`, so the transport nonce is
//! consumed either way. Parked messages are re-run by `retry_message`.

use cosmwasm_std::{
    to_json_binary, Addr, Binary, DepsMut, Env, Event, MessageInfo, Reply, Response, Storage,
    SubMsg, SubMsgResult, WasmMsg,
};

use common::OftReceiverMsg;

use crate::codec::{sd2ld, Payload};
use crate::error::ContractError;
use crate::hash::{payload_hash, to_hex};
use crate::msg::{ExecuteMsg, ReceiveOutcome};
use crate::rate_limit::{check_and_consume, token_usd_value, Direction};
use crate::state::{
    InFlightMessage, CONFIG, FAILED_MESSAGES, IN_FLIGHT, NONBLOCKING_RECEIVE_REPLY_ID, ROUTES,
    STATS, WHITELIST,
};

use super::{credit_msg, hex_bytes};

// ============================================================================
// Delivery
// ============================================================================

pub fn execute_lz_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.endpoint {
        return Err(ContractError::InvalidEndpointCaller);
    }
    ensure_trusted_source(deps.storage, src_chain_id, &src_address)?;
    Payload::decode(&payload)?;

    IN_FLIGHT.save(
        deps.storage,
        &InFlightMessage {
            src_chain_id,
            src_address: src_address.clone(),
            nonce,
            payload_hash: payload_hash(&payload),
        },
    )?;

    let credit_step = WasmMsg::Execute {
        contract_addr: env.contract.address.to_string(),
        msg: to_json_binary(&ExecuteMsg::NonblockingLzReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_always(
            credit_step,
            NONBLOCKING_RECEIVE_REPLY_ID,
        ))
        .add_attribute("method", "lz_receive")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("nonce", nonce.to_string()))
}

pub fn execute_nonblocking_lz_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> Result<Response, ContractError> {
    if info.sender != env.contract.address {
        return Err(ContractError::NotSelf);
    }
    let res = credit_inbound(deps, &env, src_chain_id, &src_address, nonce, &payload)?;
    Ok(res.add_attribute("method", "nonblocking_lz_receive"))
}

/// Settle the credit step: park the message if it failed.
pub fn reply_nonblocking_receive(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let in_flight = IN_FLIGHT.load(deps.storage)?;
    IN_FLIGHT.remove(deps.storage);

    let outcome = match msg.result {
        SubMsgResult::Ok(_) => ReceiveOutcome::Delivered,
        SubMsgResult::Err(reason) => ReceiveOutcome::Parked { reason },
    };

    let mut res = Response::new()
        .add_attribute("method", "nonblocking_receive_reply")
        .add_attribute("outcome", outcome.as_str());

    if let ReceiveOutcome::Parked { reason } = outcome {
        FAILED_MESSAGES.save(
            deps.storage,
            (
                in_flight.src_chain_id,
                in_flight.src_address.as_slice(),
                in_flight.nonce,
            ),
            &in_flight.payload_hash,
        )?;
        STATS.update(deps.storage, |mut stats| -> Result<_, ContractError> {
            stats.total_failed += 1;
            Ok(stats)
        })?;
        res = res.add_event(
            Event::new("message_failed")
                .add_attribute("src_chain_id", in_flight.src_chain_id.to_string())
                .add_attribute("src_address", hex_bytes(&in_flight.src_address))
                .add_attribute("nonce", in_flight.nonce.to_string())
                .add_attribute("payload_hash", to_hex(&in_flight.payload_hash))
                .add_attribute("reason", reason),
        );
    }

    Ok(res)
}

// ============================================================================
// Retry
// ============================================================================

pub fn execute_retry_message(
    deps: DepsMut,
    env: Env,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
    payload: Binary,
) -> Result<Response, ContractError> {
    let key = (src_chain_id, src_address.as_slice(), nonce);
    let stored = FAILED_MESSAGES
        .may_load(deps.storage, key)?
        .ok_or(ContractError::NoStoredMessage)?;
    let hash = payload_hash(&payload);
    if stored != hash {
        return Err(ContractError::InvalidPayload);
    }
    ensure_trusted_source(deps.storage, src_chain_id, &src_address)?;

    FAILED_MESSAGES.remove(deps.storage, key);
    STATS.update(deps.storage, |mut stats| -> Result<_, ContractError> {
        stats.total_retried += 1;
        Ok(stats)
    })?;

    // Any failure here reverts the retry and leaves the entry in place
    let res = credit_inbound(deps, &env, src_chain_id, &src_address, nonce, &payload)?;

    Ok(res
        .add_event(
            Event::new("retry_message_success")
                .add_attribute("src_chain_id", src_chain_id.to_string())
                .add_attribute("src_address", hex_bytes(&src_address))
                .add_attribute("nonce", nonce.to_string())
                .add_attribute("payload_hash", to_hex(&hash)),
        )
        .add_attribute("method", "retry_message"))
}

// ============================================================================
// Credit
// ============================================================================

fn ensure_trusted_source(
    storage: &dyn Storage,
    src_chain_id: u16,
    src_address: &Binary,
) -> Result<(), ContractError> {
    let trusted = ROUTES
        .may_load(storage, src_chain_id)?
        .and_then(|route| route.trusted_remote);
    match trusted {
        Some(remote) if remote == *src_address => Ok(()),
        _ => Err(ContractError::InvalidSourceSender),
    }
}

/// Pause check, receive-side rate limit, then mint or unlock to the
/// recipient and, for send-and-call, invoke the recipient.
fn credit_inbound(
    deps: DepsMut,
    env: &Env,
    src_chain_id: u16,
    src_address: &Binary,
    nonce: u64,
    payload: &Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let payload = Payload::decode(payload)?;
    let to = recipient(&deps, payload.to())?;
    let amount = sd2ld(payload.amount_sd(), config.ld2sd_rate)?;

    if !WHITELIST.has(deps.storage, &to) {
        let route = ROUTES
            .may_load(deps.storage, src_chain_id)?
            .unwrap_or_default();
        let amount_usd = token_usd_value(
            &deps.querier,
            &config.oracle,
            &config.token,
            amount,
            config.local_decimals,
        )?;
        check_and_consume(
            deps.storage,
            src_chain_id,
            &route,
            Direction::Receive,
            amount_usd,
            env.block.time,
            false,
        )?;
    }

    let mut res = Response::new().add_message(credit_msg(deps.storage, &config, &to, amount)?);

    if let Payload::SendAndCall {
        from, call_payload, ..
    } = payload
    {
        res = res.add_message(WasmMsg::Execute {
            contract_addr: to.to_string(),
            msg: to_json_binary(&OftReceiverMsg::OnOftReceived {
                src_chain_id,
                src_address: src_address.clone(),
                nonce,
                from: Binary::from(from),
                amount,
                payload: Binary::from(call_payload),
            })?,
            funds: vec![],
        });
    }

    STATS.update(deps.storage, |mut stats| -> Result<_, ContractError> {
        stats.total_received += 1;
        Ok(stats)
    })?;

    Ok(res.add_event(
        Event::new("receive_from_chain")
            .add_attribute("src_chain_id", src_chain_id.to_string())
            .add_attribute("to", to.as_str())
            .add_attribute("amount", amount),
    ))
}

fn recipient(deps: &DepsMut, to: &[u8]) -> Result<Addr, ContractError> {
    let to = std::str::from_utf8(to).map_err(|_| ContractError::MalformedPayload {
        reason: "recipient is not utf-8".to_string(),
    })?;
    Ok(deps.api.addr_validate(to)?)
}
