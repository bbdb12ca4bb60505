//! Multichain Token - Entry Points

use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;
use cw20_base::allowances::{
    execute_burn_from, execute_decrease_allowance, execute_increase_allowance,
    execute_send_from, execute_transfer_from, query_allowance,
};
use cw20_base::contract::{execute_send, execute_transfer, query_balance, query_token_info};
use cw20_base::enumerable::query_all_accounts;
use cw20_base::state::{BALANCES, TOKEN_INFO};

use common::is_allowed_to_call;

use crate::error::ContractError;
use crate::ledger;
use crate::msg::{ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, MinterResponse, QueryMsg};
use crate::state::{
    Config, MinterInfo, BLACKLIST, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, MINTERS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let permission_authority = deps.api.addr_validate(&msg.permission_authority)?;

    // Token metadata and initial balances are validated and stored by cw20-base
    cw20_base::contract::instantiate(
        deps.branch(),
        env,
        info.clone(),
        cw20_base::msg::InstantiateMsg {
            name: msg.name,
            symbol: msg.symbol,
            decimals: msg.decimals,
            initial_balances: msg.initial_balances,
            mint: None,
            marketing: None,
        },
    )?;
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    CONFIG.save(
        deps.storage,
        &Config {
            owner: info.sender.clone(),
            permission_authority: permission_authority.clone(),
            paused: false,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("permission_authority", permission_authority))
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
    if let Some(operation) = msg.gated_operation() {
        require_permission(deps.as_ref(), &env, &info.sender, operation)?;
    }

    match msg {
        // Issuance
        ExecuteMsg::Mint { recipient, amount } => execute_mint(deps, info, recipient, amount),
        ExecuteMsg::Burn { account, amount } => execute_burn(deps, info, account, amount),
        ExecuteMsg::SetMintCap { minter, amount } => execute_set_mint_cap(deps, minter, amount),
        ExecuteMsg::MigrateMinterTokens {
            source,
            destination,
        } => execute_migrate_minter_tokens(deps, source, destination),
        ExecuteMsg::UpdateBlacklist { user, value } => execute_update_blacklist(deps, user, value),
        ExecuteMsg::Pause {} => execute_set_paused(deps, true),
        ExecuteMsg::Unpause {} => execute_set_paused(deps, false),

        // Owner
        ExecuteMsg::SetPermissionAuthority { authority } => {
            execute_set_permission_authority(deps, info, authority)
        }

        // cw20, behind the compliance checks
        ExecuteMsg::Transfer { recipient, amount } => {
            let to = deps.api.addr_validate(&recipient)?;
            ensure_can_move(deps.as_ref(), &[&info.sender, &to])?;
            Ok(execute_transfer(deps, env, info, recipient, amount)?)
        }
        ExecuteMsg::Send {
            contract,
            amount,
            msg,
        } => {
            let to = deps.api.addr_validate(&contract)?;
            ensure_can_move(deps.as_ref(), &[&info.sender, &to])?;
            Ok(execute_send(deps, env, info, contract, amount, msg)?)
        }
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => {
            let from = deps.api.addr_validate(&owner)?;
            let to = deps.api.addr_validate(&recipient)?;
            ensure_can_move(deps.as_ref(), &[&from, &to])?;
            Ok(execute_transfer_from(deps, env, info, owner, recipient, amount)?)
        }
        ExecuteMsg::SendFrom {
            owner,
            contract,
            amount,
            msg,
        } => {
            let from = deps.api.addr_validate(&owner)?;
            let to = deps.api.addr_validate(&contract)?;
            ensure_can_move(deps.as_ref(), &[&from, &to])?;
            Ok(execute_send_from(deps, env, info, owner, contract, amount, msg)?)
        }
        ExecuteMsg::BurnFrom { owner, amount } => {
            let from = deps.api.addr_validate(&owner)?;
            ensure_can_move(deps.as_ref(), &[&from])?;
            Ok(execute_burn_from(deps, env, info, owner, amount)?)
        }
        ExecuteMsg::IncreaseAllowance {
            spender,
            amount,
            expires,
        } => Ok(execute_increase_allowance(
            deps, env, info, spender, amount, expires,
        )?),
        ExecuteMsg::DecreaseAllowance {
            spender,
            amount,
            expires,
        } => Ok(execute_decrease_allowance(
            deps, env, info, spender, amount, expires,
        )?),
    }
}

fn require_permission(
    deps: Deps,
    env: &Env,
    caller: &Addr,
    operation: &str,
) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let allowed = is_allowed_to_call(
        &deps.querier,
        &config.permission_authority,
        caller,
        &env.contract.address,
        operation,
    )?;
    if !allowed {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Balance moves are refused while paused or when any party is blacklisted.
fn ensure_can_move(deps: Deps, accounts: &[&Addr]) -> Result<(), ContractError> {
    if CONFIG.load(deps.storage)?.paused {
        return Err(ContractError::TokenPaused);
    }
    for account in accounts {
        if BLACKLIST.has(deps.storage, account) {
            return Err(ContractError::AccountBlacklisted {
                account: account.to_string(),
            });
        }
    }
    Ok(())
}

fn mint_limit_event(kind: &str, minter: &Addr, info: &MinterInfo) -> Event {
    Event::new(kind)
        .add_attribute("minter", minter)
        .add_attribute("available", info.available())
}

fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;
    ensure_can_move(deps.as_ref(), &[&recipient])?;

    let minter = ledger::consume(deps.storage, &info.sender, amount)?;

    BALANCES.update(deps.storage, &recipient, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })?;
    TOKEN_INFO.update(deps.storage, |mut token| -> StdResult<_> {
        token.total_supply = token.total_supply.checked_add(amount)?;
        Ok(token)
    })?;

    Ok(Response::new()
        .add_event(mint_limit_event("mint_limit_decreased", &info.sender, &minter))
        .add_attribute("method", "mint")
        .add_attribute("minter", info.sender)
        .add_attribute("to", recipient)
        .add_attribute("amount", amount))
}

fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    account: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let account = deps.api.addr_validate(&account)?;
    ensure_can_move(deps.as_ref(), &[&account])?;

    BALANCES.update(deps.storage, &account, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_sub(amount)?)
    })?;
    TOKEN_INFO.update(deps.storage, |mut token| -> StdResult<_> {
        token.total_supply = token.total_supply.checked_sub(amount)?;
        Ok(token)
    })?;

    let minter = ledger::restore(deps.storage, &info.sender, amount)?;

    Ok(Response::new()
        .add_event(mint_limit_event("mint_limit_increased", &info.sender, &minter))
        .add_attribute("method", "burn")
        .add_attribute("minter", info.sender)
        .add_attribute("from", account)
        .add_attribute("amount", amount))
}

fn execute_set_mint_cap(
    deps: DepsMut,
    minter: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let minter = deps.api.addr_validate(&minter)?;
    let info = ledger::set_cap(deps.storage, &minter, amount)?;

    Ok(Response::new()
        .add_event(
            Event::new("mint_cap_changed")
                .add_attribute("minter", minter.as_str())
                .add_attribute("cap", info.cap),
        )
        .add_attribute("method", "set_mint_cap")
        .add_attribute("minter", minter)
        .add_attribute("cap", amount))
}

fn execute_migrate_minter_tokens(
    deps: DepsMut,
    source: String,
    destination: String,
) -> Result<Response, ContractError> {
    let source = deps.api.addr_validate(&source)?;
    let destination = deps.api.addr_validate(&destination)?;

    let (moved, src, dst) = ledger::migrate(deps.storage, &source, &destination)?;

    Ok(Response::new()
        .add_event(mint_limit_event("mint_limit_decreased", &destination, &dst))
        .add_event(mint_limit_event("mint_limit_increased", &source, &src))
        .add_event(
            Event::new("minted_tokens_migrated")
                .add_attribute("source", source.as_str())
                .add_attribute("destination", destination.as_str())
                .add_attribute("amount", moved),
        )
        .add_attribute("method", "migrate_minter_tokens"))
}

fn execute_update_blacklist(
    deps: DepsMut,
    user: String,
    value: bool,
) -> Result<Response, ContractError> {
    let user = deps.api.addr_validate(&user)?;
    if value {
        BLACKLIST.save(deps.storage, &user, &true)?;
    } else {
        BLACKLIST.remove(deps.storage, &user);
    }

    Ok(Response::new()
        .add_event(
            Event::new("blacklist_updated")
                .add_attribute("user", user.as_str())
                .add_attribute("value", value.to_string()),
        )
        .add_attribute("method", "update_blacklist"))
}

fn execute_set_paused(deps: DepsMut, paused: bool) -> Result<Response, ContractError> {
    CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.paused = paused;
        Ok(config)
    })?;

    let method = if paused { "pause" } else { "unpause" };
    Ok(Response::new().add_attribute("method", method))
}

fn execute_set_permission_authority(
    deps: DepsMut,
    info: MessageInfo,
    authority: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    if authority.is_empty() {
        return Err(ContractError::ZeroAddressNotAllowed);
    }
    config.permission_authority = deps.api.addr_validate(&authority)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_permission_authority")
        .add_attribute("authority", authority))
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address } => to_json_binary(&query_balance(deps, address)?),
        QueryMsg::TokenInfo {} => to_json_binary(&query_token_info(deps)?),
        QueryMsg::Allowance { owner, spender } => {
            to_json_binary(&query_allowance(deps, owner, spender)?)
        }
        QueryMsg::AllAccounts { start_after, limit } => {
            to_json_binary(&query_all_accounts(deps, start_after, limit)?)
        }
        QueryMsg::Minter { minter } => to_json_binary(&query_minter(deps, minter)?),
        QueryMsg::IsBlacklisted { account } => {
            let account = deps.api.addr_validate(&account)?;
            to_json_binary(&BLACKLIST.has(deps.storage, &account))
        }
        QueryMsg::Paused {} => to_json_binary(&CONFIG.load(deps.storage)?.paused),
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&ConfigResponse {
                owner: config.owner,
                permission_authority: config.permission_authority,
                paused: config.paused,
            })
        }
    }
}

fn query_minter(deps: Deps, minter: String) -> StdResult<MinterResponse> {
    let minter = deps.api.addr_validate(&minter)?;
    let info = MINTERS
        .may_load(deps.storage, &minter)?
        .unwrap_or_default();
    Ok(MinterResponse {
        available: info.available(),
        cap: info.cap,
        minted: info.minted,
        minter,
    })
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
