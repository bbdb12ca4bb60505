//! Access Control Manager - Entry Points

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, IsAllowedResponse, MigrateMsg, QueryMsg};
use crate::state::{ANY_CONTRACT, CONTRACT_NAME, CONTRACT_VERSION, OWNER, PERMISSIONS};

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
    OWNER.save(deps.storage, &owner)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let owner = OWNER.load(deps.storage)?;
    if info.sender != owner {
        return Err(ContractError::Unauthorized);
    }

    match msg {
        ExecuteMsg::GiveCallPermission {
            contract,
            function_sig,
            account,
        } => {
            let (contract, account) = validate_grant(deps.as_ref(), &contract, &function_sig, &account)?;
            PERMISSIONS.save(deps.storage, (&contract, &function_sig, &account), &true)?;

            Ok(Response::new()
                .add_attribute("method", "give_call_permission")
                .add_attribute("contract", contract)
                .add_attribute("function_sig", function_sig)
                .add_attribute("account", account))
        }
        ExecuteMsg::RevokeCallPermission {
            contract,
            function_sig,
            account,
        } => {
            let (contract, account) = validate_grant(deps.as_ref(), &contract, &function_sig, &account)?;
            let key = (contract.as_str(), function_sig.as_str(), &account);
            if !PERMISSIONS.has(deps.storage, key) {
                return Err(ContractError::PermissionNotFound);
            }
            PERMISSIONS.remove(deps.storage, key);

            Ok(Response::new()
                .add_attribute("method", "revoke_call_permission")
                .add_attribute("contract", contract)
                .add_attribute("function_sig", function_sig)
                .add_attribute("account", account))
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            let new_owner = deps.api.addr_validate(&new_owner)?;
            OWNER.save(deps.storage, &new_owner)?;

            Ok(Response::new()
                .add_attribute("method", "transfer_ownership")
                .add_attribute("previous_owner", owner)
                .add_attribute("new_owner", new_owner))
        }
    }
}

fn validate_grant(
    deps: Deps,
    contract: &str,
    function_sig: &str,
    account: &str,
) -> Result<(String, cosmwasm_std::Addr), ContractError> {
    if function_sig.is_empty() {
        return Err(ContractError::EmptySignature);
    }
    let contract = if contract == ANY_CONTRACT {
        contract.to_string()
    } else {
        deps.api.addr_validate(contract)?.into_string()
    };
    let account = deps.api.addr_validate(account)?;
    Ok((contract, account))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::IsAllowedToCall {
            account,
            contract,
            function_sig,
        } => {
            let account = deps.api.addr_validate(&account)?;
            let allowed = PERMISSIONS.has(deps.storage, (&contract, &function_sig, &account))
                || PERMISSIONS.has(deps.storage, (ANY_CONTRACT, &function_sig, &account));
            to_json_binary(&IsAllowedResponse { allowed })
        }
        QueryMsg::HasPermission {
            contract,
            function_sig,
            account,
        } => {
            let account = deps.api.addr_validate(&account)?;
            to_json_binary(&PERMISSIONS.has(deps.storage, (&contract, &function_sig, &account)))
        }
        QueryMsg::Owner {} => to_json_binary(&OWNER.load(deps.storage)?),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
