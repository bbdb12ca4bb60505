//! Execute handlers for the token bridge.
//!
//! This module contains all execute message handlers, organized by category:
//! - `outgoing` - SendFrom and SendAndCall
//! - `incoming` - LzReceive, the nonblocking credit step and RetryMessage
//! - `config` - Route limits, trusted remotes, gas minimums, oracle
//! - `admin` - Pause, whitelist, ownership, sweep and failed message recovery

mod admin;
mod config;
mod incoming;
mod outgoing;

pub use admin::*;
pub use config::*;
pub use incoming::*;
pub use outgoing::*;

use cosmwasm_std::{Addr, Binary, CosmosMsg, Storage, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use common::IssuerExecuteMsg;

use crate::error::ContractError;
use crate::state::{Config, TokenMode, CONFIG, LOCKED_BALANCE};

/// Load the config, failing unless `sender` is the owner.
pub(crate) fn load_config_as_owner(
    storage: &dyn Storage,
    sender: &Addr,
) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

/// Message crediting `amount` to `recipient`: a mint against the bridge's
/// cap, or a release from the locked balance.
pub(crate) fn credit_msg(
    storage: &mut dyn Storage,
    config: &Config,
    recipient: &Addr,
    amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    match config.mode {
        TokenMode::MintBurn => Ok(IssuerExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        }
        .into_cosmos_msg(config.token.as_str())?),
        TokenMode::LockUnlock => {
            let locked = LOCKED_BALANCE.load(storage)?;
            let remaining =
                locked
                    .checked_sub(amount)
                    .map_err(|_| ContractError::InsufficientBalance {
                        available: locked,
                        requested: amount,
                    })?;
            LOCKED_BALANCE.save(storage, &remaining)?;
            Ok(cw20_msg(
                &config.token,
                &Cw20ExecuteMsg::Transfer {
                    recipient: recipient.to_string(),
                    amount,
                },
            )?)
        }
    }
}

pub(crate) fn cw20_msg(
    token: &Addr,
    msg: &Cw20ExecuteMsg,
) -> Result<CosmosMsg, ContractError> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: cosmwasm_std::to_json_binary(msg)?,
        funds: vec![],
    }))
}

/// Hex rendering of remote address bytes for event attributes
pub(crate) fn hex_bytes(bytes: &Binary) -> String {
    crate::hash::to_hex(bytes.as_slice())
}
