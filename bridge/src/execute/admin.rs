//! Admin operations handlers.
//!
//! This module handles:
//! - Pause/unpause
//! - Whitelist and send-and-call switch
//! - Ownership transfer
//! - Token sweep
//! - Failed message drop and forced credit

use cosmwasm_std::{Binary, DepsMut, Env, Event, MessageInfo, Response, Uint128};

use common::AssetInfo;

use crate::error::ContractError;
use crate::state::{TokenMode, CONFIG, FAILED_MESSAGES, LOCKED_BALANCE, WHITELIST};

use super::{credit_msg, hex_bytes, load_config_as_owner};

// ============================================================================
// Pause/Unpause
// ============================================================================

/// Pause the bridge (stops sends and parks deliveries).
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info.sender)?;
    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "pause"))
}

/// Unpause the bridge.
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info.sender)?;
    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "unpause"))
}

// ============================================================================
// Whitelist / Features
// ============================================================================

pub fn execute_set_whitelist(
    deps: DepsMut,
    info: MessageInfo,
    user: String,
    val: bool,
) -> Result<Response, ContractError> {
    load_config_as_owner(deps.storage, &info.sender)?;
    let user = deps.api.addr_validate(&user)?;
    if val {
        WHITELIST.save(deps.storage, &user, &true)?;
    } else {
        WHITELIST.remove(deps.storage, &user);
    }

    Ok(Response::new()
        .add_event(
            Event::new("set_whitelist")
                .add_attribute("user", user.as_str())
                .add_attribute("val", val.to_string()),
        )
        .add_attribute("method", "set_whitelist"))
}

pub fn execute_update_send_and_call_enabled(
    deps: DepsMut,
    info: MessageInfo,
    enabled: bool,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info.sender)?;
    config.send_and_call_enabled = enabled;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_send_and_call_enabled")
        .add_attribute("enabled", enabled.to_string()))
}

// ============================================================================
// Ownership
// ============================================================================

/// Hand the bridge to a new owner, normally an admin gateway.
pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info.sender)?;
    let new_owner = deps.api.addr_validate(&new_owner)?;
    let previous_owner = std::mem::replace(&mut config.owner, new_owner.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_ownership")
        .add_attribute("previous_owner", previous_owner)
        .add_attribute("new_owner", new_owner))
}

// ============================================================================
// Asset Recovery
// ============================================================================

/// Move stray funds out of the bridge.
///
/// For the bridged token in lock/unlock mode only the balance above the
/// locked amount is sweepable.
pub fn execute_sweep_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: AssetInfo,
    to: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = load_config_as_owner(deps.storage, &info.sender)?;
    let to = deps.api.addr_validate(&to)?;

    let balance = token.query_balance(&deps.querier, &env.contract.address)?;
    let reserved = match (&token, config.mode) {
        (AssetInfo::Cw20 { contract_addr }, TokenMode::LockUnlock)
            if *contract_addr == config.token.as_str() =>
        {
            LOCKED_BALANCE.load(deps.storage)?
        }
        _ => Uint128::zero(),
    };
    let available = balance.saturating_sub(reserved);
    if amount > available {
        return Err(ContractError::InsufficientBalance {
            available,
            requested: amount,
        });
    }

    Ok(Response::new()
        .add_message(token.transfer_msg(&to, amount)?)
        .add_event(
            Event::new("sweep_token")
                .add_attribute("token", token.as_str())
                .add_attribute("to", to.as_str())
                .add_attribute("amount", amount),
        )
        .add_attribute("method", "sweep_token"))
}

/// Write off a failed delivery without crediting anyone.
pub fn execute_drop_failed_message(
    deps: DepsMut,
    info: MessageInfo,
    src_chain_id: u16,
    src_address: Binary,
    nonce: u64,
) -> Result<Response, ContractError> {
    load_config_as_owner(deps.storage, &info.sender)?;

    let key = (src_chain_id, src_address.as_slice(), nonce);
    if !FAILED_MESSAGES.has(deps.storage, key) {
        return Err(ContractError::NoStoredMessage);
    }
    FAILED_MESSAGES.remove(deps.storage, key);

    Ok(Response::new()
        .add_event(
            Event::new("drop_failed_message")
                .add_attribute("src_chain_id", src_chain_id.to_string())
                .add_attribute("src_address", hex_bytes(&src_address))
                .add_attribute("nonce", nonce.to_string()),
        )
        .add_attribute("method", "drop_failed_message"))
}

/// Credit `to` directly, outside the transport. No pause or limit checks.
pub fn execute_force_mint(
    deps: DepsMut,
    info: MessageInfo,
    src_chain_id: u16,
    to: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = load_config_as_owner(deps.storage, &info.sender)?;
    if !config.force_mint_active {
        return Err(ContractError::ForceMintNotActive);
    }
    let to = deps.api.addr_validate(&to)?;
    let credit = credit_msg(deps.storage, &config, &to, amount)?;

    Ok(Response::new()
        .add_message(credit)
        .add_event(
            Event::new("force_mint")
                .add_attribute("src_chain_id", src_chain_id.to_string())
                .add_attribute("to", to.as_str())
                .add_attribute("amount", amount),
        )
        .add_attribute("method", "force_mint"))
}
