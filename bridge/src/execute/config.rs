//! Route configuration handlers.
//!
//! This module handles:
//! - Oracle address
//! - Send and receive USD limits per route
//! - Trusted remotes
//! - Minimum destination gas and payload size limits

use cosmwasm_std::{Binary, DepsMut, Event, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::rate_limit::Direction;
use crate::state::{Route, CONFIG, MIN_DST_GAS, ROUTES};

use super::{hex_bytes, load_config_as_owner};

// ============================================================================
// Oracle
// ============================================================================

pub fn execute_set_oracle(
    deps: DepsMut,
    info: MessageInfo,
    oracle: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info.sender)?;
    if oracle.is_empty() {
        return Err(ContractError::ZeroAddressNotAllowed);
    }
    let new_oracle = deps.api.addr_validate(&oracle)?;
    let old_oracle = std::mem::replace(&mut config.oracle, new_oracle.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_event(
            Event::new("oracle_changed")
                .add_attribute("old_oracle", old_oracle)
                .add_attribute("new_oracle", new_oracle),
        )
        .add_attribute("method", "set_oracle"))
}

// ============================================================================
// Rate Limits
// ============================================================================

/// Which of the two limits of a direction is being set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitKind {
    Single,
    Daily,
}

/// Set one of the four route limits, keeping single <= daily.
pub fn execute_set_limit(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    direction: Direction,
    kind: LimitKind,
    limit: Uint128,
) -> Result<Response, ContractError> {
    load_config_as_owner(deps.storage, &info.sender)?;

    let mut route = ROUTES.may_load(deps.storage, chain_id)?.unwrap_or_default();
    let (single, daily) = match direction {
        Direction::Send => (&mut route.max_single_send, &mut route.max_daily_send),
        Direction::Receive => (&mut route.max_single_receive, &mut route.max_daily_receive),
    };
    match kind {
        LimitKind::Single if limit > *daily => {
            return Err(ContractError::SingleLimitExceedsDailyLimit)
        }
        LimitKind::Daily if limit < *single => {
            return Err(ContractError::SingleLimitExceedsDailyLimit)
        }
        LimitKind::Single => *single = limit,
        LimitKind::Daily => *daily = limit,
    }
    ROUTES.save(deps.storage, chain_id, &route)?;

    let method = match (direction, kind) {
        (Direction::Send, LimitKind::Single) => "set_max_single_transaction_limit",
        (Direction::Send, LimitKind::Daily) => "set_max_daily_limit",
        (Direction::Receive, LimitKind::Single) => "set_max_single_receive_transaction_limit",
        (Direction::Receive, LimitKind::Daily) => "set_max_daily_receive_limit",
    };

    Ok(Response::new()
        .add_attribute("method", method)
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("limit", limit))
}

// ============================================================================
// Trusted Remotes
// ============================================================================

pub fn execute_set_trusted_remote_address(
    deps: DepsMut,
    info: MessageInfo,
    remote_chain_id: u16,
    remote_address: Binary,
) -> Result<Response, ContractError> {
    load_config_as_owner(deps.storage, &info.sender)?;
    if remote_chain_id == 0 {
        return Err(ContractError::ChainIdMustNotBeZero);
    }
    if remote_address.is_empty() {
        return Err(ContractError::ZeroAddressNotAllowed);
    }

    ROUTES.update(deps.storage, remote_chain_id, |route| -> Result<_, ContractError> {
        Ok(Route {
            trusted_remote: Some(remote_address.clone()),
            ..route.unwrap_or_default()
        })
    })?;

    Ok(Response::new()
        .add_event(
            Event::new("set_trusted_remote")
                .add_attribute("remote_chain_id", remote_chain_id.to_string())
                .add_attribute("remote_address", hex_bytes(&remote_address)),
        )
        .add_attribute("method", "set_trusted_remote_address"))
}

pub fn execute_remove_trusted_remote(
    deps: DepsMut,
    info: MessageInfo,
    remote_chain_id: u16,
) -> Result<Response, ContractError> {
    load_config_as_owner(deps.storage, &info.sender)?;

    if let Some(mut route) = ROUTES.may_load(deps.storage, remote_chain_id)? {
        route.trusted_remote = None;
        ROUTES.save(deps.storage, remote_chain_id, &route)?;
    }

    Ok(Response::new()
        .add_attribute("method", "remove_trusted_remote")
        .add_attribute("remote_chain_id", remote_chain_id.to_string()))
}

// ============================================================================
// Gas and Payload Limits
// ============================================================================

pub fn execute_set_min_dst_gas(
    deps: DepsMut,
    info: MessageInfo,
    dst_chain_id: u16,
    packet_type: u8,
    min_gas: u64,
) -> Result<Response, ContractError> {
    load_config_as_owner(deps.storage, &info.sender)?;
    MIN_DST_GAS.save(deps.storage, (dst_chain_id, packet_type), &min_gas)?;

    Ok(Response::new()
        .add_attribute("method", "set_min_dst_gas")
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("packet_type", packet_type.to_string())
        .add_attribute("min_gas", min_gas.to_string()))
}

pub fn execute_set_payload_size_limit(
    deps: DepsMut,
    info: MessageInfo,
    dst_chain_id: u16,
    size: u64,
) -> Result<Response, ContractError> {
    load_config_as_owner(deps.storage, &info.sender)?;

    ROUTES.update(deps.storage, dst_chain_id, |route| -> Result<_, ContractError> {
        Ok(Route {
            payload_size_limit: Some(size),
            ..route.unwrap_or_default()
        })
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_payload_size_limit")
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("size", size.to_string()))
}
