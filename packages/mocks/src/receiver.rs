//! Mock send-and-call recipient. Records the last `on_oft_received` call,
//! or rejects every call when instantiated with `reject: true`.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
    Uint128,
};
use cw_storage_plus::Item;

use common::OftReceiverMsg;

#[cw_serde]
pub struct InstantiateMsg {
    pub reject: bool,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Option<ReceivedCall>)]
    LastReceived {},
}

#[cw_serde]
pub struct ReceivedCall {
    pub src_chain_id: u16,
    pub nonce: u64,
    pub from: Binary,
    pub amount: Uint128,
    pub payload: Binary,
}

const REJECT: Item<bool> = Item::new("reject");
const LAST_RECEIVED: Item<ReceivedCall> = Item::new("last_received");

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    REJECT.save(deps.storage, &msg.reject)?;
    Ok(Response::new().add_attribute("method", "instantiate"))
}

pub fn execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: OftReceiverMsg,
) -> StdResult<Response> {
    match msg {
        OftReceiverMsg::OnOftReceived {
            src_chain_id,
            nonce,
            from,
            amount,
            payload,
            ..
        } => {
            if REJECT.load(deps.storage)? {
                return Err(StdError::generic_err("receiver rejected the call"));
            }
            LAST_RECEIVED.save(
                deps.storage,
                &ReceivedCall {
                    src_chain_id,
                    nonce,
                    from,
                    amount,
                    payload,
                },
            )?;
            Ok(Response::new().add_attribute("method", "on_oft_received"))
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::LastReceived {} => to_json_binary(&LAST_RECEIVED.may_load(deps.storage)?),
    }
}
