//! Admin gateway entry points.

use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, Env, Event,
    MessageInfo, Order, Reply, Response, StdResult, SubMsg, SubMsgResult, WasmMsg,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use common::is_allowed_to_call;

use crate::error::ContractError;
use crate::msg::{
    BridgeExecuteMsg, ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg,
    RegisteredOperationsResponse,
};
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, FORWARD_REPLY_ID, PENDING_OWNER, REGISTRY,
    TRANSFER_BRIDGE_OWNERSHIP,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

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

    let config = Config {
        owner: info.sender,
        bridge: deps.api.addr_validate(&msg.bridge)?,
        permission_authority: deps.api.addr_validate(&msg.permission_authority)?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("bridge", config.bridge))
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
        ExecuteMsg::UpsertSignature { signatures, active } => {
            execute_upsert_signature(deps, info, signatures, active)
        }
        ExecuteMsg::Forward { msg } => execute_forward(deps, env, info, msg),
        ExecuteMsg::TransferBridgeOwnership { new_owner } => {
            execute_transfer_bridge_ownership(deps, env, info, new_owner)
        }
        ExecuteMsg::SetPermissionAuthority { authority } => {
            execute_set_permission_authority(deps, info, authority)
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::AcceptOwnership {} => execute_accept_ownership(deps, info),
    }
}

fn load_config_as_owner(deps: &DepsMut, sender: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::OnlyOwner);
    }
    Ok(config)
}

/// Fail unless `operation` is active and the authority lets `caller` invoke
/// it on this gateway.
fn authorize(
    deps: &DepsMut,
    env: &Env,
    config: &Config,
    caller: &Addr,
    operation: &str,
) -> Result<(), ContractError> {
    if !REGISTRY.has(deps.storage, operation) {
        return Err(ContractError::OperationNotFound {
            operation: operation.to_string(),
        });
    }
    let allowed = is_allowed_to_call(
        &deps.querier,
        &config.permission_authority,
        caller,
        &env.contract.address,
        operation,
    )?;
    if !allowed {
        return Err(ContractError::Unauthorized {
            operation: operation.to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// Function Registry
// ============================================================================

pub fn execute_upsert_signature(
    deps: DepsMut,
    info: MessageInfo,
    signatures: Vec<String>,
    active: Vec<bool>,
) -> Result<Response, ContractError> {
    load_config_as_owner(&deps, &info.sender)?;
    if signatures.len() != active.len() {
        return Err(ContractError::LengthMismatch {
            signatures: signatures.len(),
            flags: active.len(),
        });
    }

    let mut res = Response::new().add_attribute("method", "upsert_signature");
    for (signature, active) in signatures.into_iter().zip(active) {
        if active {
            REGISTRY.save(deps.storage, &signature, &true)?;
        } else {
            REGISTRY.remove(deps.storage, &signature);
        }
        res = res.add_event(
            Event::new("function_registry_changed")
                .add_attribute("signature", signature)
                .add_attribute("active", active.to_string()),
        );
    }
    Ok(res)
}

// ============================================================================
// Forwarding
// ============================================================================

pub fn execute_forward(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: BridgeExecuteMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let operation = msg.operation();
    authorize(&deps, &env, &config, &info.sender, operation)?;

    let call = WasmMsg::Execute {
        contract_addr: config.bridge.to_string(),
        msg: to_json_binary(&msg)?,
        funds: info.funds,
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(call, FORWARD_REPLY_ID))
        .add_attribute("method", "forward")
        .add_attribute("operation", operation)
        .add_attribute("caller", info.sender))
}

pub fn execute_transfer_bridge_ownership(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    authorize(&deps, &env, &config, &info.sender, TRANSFER_BRIDGE_OWNERSHIP)?;
    let new_owner = deps.api.addr_validate(&new_owner)?;

    let call = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.bridge.to_string(),
        msg: to_json_binary(&BridgeExecuteMsg::TransferOwnership {
            new_owner: new_owner.to_string(),
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(call)
        .add_attribute("method", "transfer_bridge_ownership")
        .add_attribute("new_owner", new_owner))
}

// ============================================================================
// Administration
// ============================================================================

pub fn execute_set_permission_authority(
    deps: DepsMut,
    info: MessageInfo,
    authority: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(&deps, &info.sender)?;
    if authority.is_empty() {
        return Err(ContractError::ZeroAddressNotAllowed);
    }
    config.permission_authority = deps.api.addr_validate(&authority)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_permission_authority")
        .add_attribute("authority", config.permission_authority))
}

pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    load_config_as_owner(&deps, &info.sender)?;
    let new_owner = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(deps.storage, &new_owner)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_ownership")
        .add_attribute("pending_owner", new_owner))
}

pub fn execute_accept_ownership(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;
    if info.sender != pending {
        return Err(ContractError::NotPendingOwner);
    }

    let mut config = CONFIG.load(deps.storage)?;
    let previous_owner = std::mem::replace(&mut config.owner, pending);
    CONFIG.save(deps.storage, &config)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_ownership")
        .add_attribute("previous_owner", previous_owner)
        .add_attribute("new_owner", config.owner))
}

// ============================================================================
// Reply
// ============================================================================

/// Relay the bridge's response data as the gateway's own.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    if msg.id != FORWARD_REPLY_ID {
        return Err(ContractError::UnknownReplyId { id: msg.id });
    }
    let mut res = Response::new();
    if let SubMsgResult::Ok(response) = msg.result {
        if let Some(data) = response.data {
            res = res.set_data(data);
        }
    }
    Ok(res)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::IsRegistered { signature } => {
            to_json_binary(&REGISTRY.has(deps.storage, &signature))
        }
        QueryMsg::RegisteredOperations { start_after, limit } => {
            to_json_binary(&query_registered_operations(deps, start_after, limit)?)
        }
        QueryMsg::PendingOwner {} => to_json_binary(&PENDING_OWNER.may_load(deps.storage)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        bridge: config.bridge,
        permission_authority: config.permission_authority,
    })
}

fn query_registered_operations(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<RegisteredOperationsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let operations = REGISTRY
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    Ok(RegisteredOperationsResponse { operations })
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
