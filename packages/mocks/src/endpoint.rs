//! Mock transport endpoint.
//!
//! `send` charges `base_fee + fee_per_byte * payload_len` in `fee_denom`,
//! refunds the excess, assigns the next outbound nonce for
//! `(dst_chain_id, sender)` and hands the payload to the destination
//! endpoint in the same transaction. The destination endpoint enforces
//! in-order nonces and delivers `lz_receive`; when delivery fails the
//! payload is stored and the path stays blocked until `retry_payload`.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, Event,
    MessageInfo, Reply, Response, StdError, StdResult, SubMsg, SubMsgResult, Uint128, WasmMsg,
};
use cw_storage_plus::{Item, Map};
use thiserror::Error;

use common::{FeeResponse, ReceiverExecuteMsg};

pub const RECEIVE_REPLY_ID: u64 = 1;

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug, PartialEq)]
pub enum EndpointError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Insufficient fee: required {required}, provided {provided}")]
    InsufficientFee {
        required: Uint128,
        provided: Uint128,
    },

    #[error("No endpoint registered for application {application}")]
    UnknownDestination { application: String },

    #[error("Wrong nonce: expected {expected}, got {got}")]
    WrongNonce { expected: u64, got: u64 },

    #[error("Path is blocked by a stored payload")]
    PathBlocked,

    #[error("No stored payload")]
    NoStoredPayload,

    #[error("Payload does not match the stored one")]
    InvalidPayload,
}

// ============================================================================
// Messages
// ============================================================================

#[cw_serde]
pub struct InstantiateMsg {
    pub chain_id: u16,
    pub fee_denom: String,
    pub base_fee: Uint128,
    pub fee_per_byte: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Route deliveries for `user_application` through `endpoint`
    SetDestEndpoint {
        user_application: String,
        endpoint: String,
    },
    Send {
        dst_chain_id: u16,
        destination: Binary,
        payload: Binary,
        refund_address: String,
        zro_payment_address: Option<String>,
        adapter_params: Binary,
    },
    /// Called by the source endpoint
    ReceivePayload {
        src_chain_id: u16,
        src_address: Binary,
        dst_address: String,
        nonce: u64,
        payload: Binary,
    },
    /// Store the next delivered payload instead of delivering it
    BlockNextMsg {},
    RetryPayload {
        src_chain_id: u16,
        src_address: Binary,
        payload: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(FeeResponse)]
    EstimateFees {
        dst_chain_id: u16,
        user_application: String,
        payload: Binary,
        pay_in_zro: bool,
        adapter_params: Binary,
    },

    #[returns(Option<StoredPayload>)]
    StoredPayload {
        src_chain_id: u16,
        src_address: Binary,
    },

    #[returns(u64)]
    OutboundNonce {
        dst_chain_id: u16,
        src_address: String,
    },

    #[returns(u64)]
    InboundNonce {
        src_chain_id: u16,
        src_address: Binary,
    },
}

// ============================================================================
// State
// ============================================================================

#[cw_serde]
pub struct EndpointConfig {
    pub chain_id: u16,
    pub fee_denom: String,
    pub base_fee: Uint128,
    pub fee_per_byte: Uint128,
}

#[cw_serde]
pub struct StoredPayload {
    pub dst_address: Addr,
    pub nonce: u64,
    pub payload: Binary,
    pub reason: String,
}

#[cw_serde]
struct InFlight {
    src_chain_id: u16,
    src_address: Binary,
    dst_address: Addr,
    nonce: u64,
    payload: Binary,
}

const CONFIG: Item<EndpointConfig> = Item::new("config");
const DEST_ENDPOINTS: Map<&str, Addr> = Map::new("dest_endpoints");
const OUTBOUND_NONCE: Map<(u16, &Addr), u64> = Map::new("outbound_nonce");
const INBOUND_NONCE: Map<(u16, &[u8]), u64> = Map::new("inbound_nonce");
const STORED_PAYLOADS: Map<(u16, &[u8]), StoredPayload> = Map::new("stored_payloads");
const BLOCK_NEXT: Item<bool> = Item::new("block_next");
const IN_FLIGHT: Item<InFlight> = Item::new("in_flight");

// ============================================================================
// Entry Points
// ============================================================================

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, EndpointError> {
    CONFIG.save(
        deps.storage,
        &EndpointConfig {
            chain_id: msg.chain_id,
            fee_denom: msg.fee_denom,
            base_fee: msg.base_fee,
            fee_per_byte: msg.fee_per_byte,
        },
    )?;
    BLOCK_NEXT.save(deps.storage, &false)?;
    Ok(Response::new().add_attribute("method", "instantiate"))
}

pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, EndpointError> {
    match msg {
        ExecuteMsg::SetDestEndpoint {
            user_application,
            endpoint,
        } => {
            let endpoint = deps.api.addr_validate(&endpoint)?;
            DEST_ENDPOINTS.save(deps.storage, &user_application, &endpoint)?;
            Ok(Response::new().add_attribute("method", "set_dest_endpoint"))
        }
        ExecuteMsg::Send {
            dst_chain_id,
            destination,
            payload,
            refund_address,
            ..
        } => execute_send(deps, info, dst_chain_id, destination, payload, refund_address),
        ExecuteMsg::ReceivePayload {
            src_chain_id,
            src_address,
            dst_address,
            nonce,
            payload,
        } => execute_receive_payload(deps, src_chain_id, src_address, dst_address, nonce, payload),
        ExecuteMsg::BlockNextMsg {} => {
            BLOCK_NEXT.save(deps.storage, &true)?;
            Ok(Response::new().add_attribute("method", "block_next_msg"))
        }
        ExecuteMsg::RetryPayload {
            src_chain_id,
            src_address,
            payload,
        } => execute_retry_payload(deps, src_chain_id, src_address, payload),
    }
}

fn quote(config: &EndpointConfig, payload_len: usize) -> StdResult<Uint128> {
    let per_byte = config
        .fee_per_byte
        .checked_mul(Uint128::from(payload_len as u128))?;
    Ok(config.base_fee.checked_add(per_byte)?)
}

fn execute_send(
    deps: DepsMut,
    info: MessageInfo,
    dst_chain_id: u16,
    destination: Binary,
    payload: Binary,
    refund_address: String,
) -> Result<Response, EndpointError> {
    let config = CONFIG.load(deps.storage)?;

    let required = quote(&config, payload.len())?;
    let provided = info
        .funds
        .iter()
        .filter(|c| c.denom == config.fee_denom)
        .map(|c| c.amount)
        .sum::<Uint128>();
    if provided < required {
        return Err(EndpointError::InsufficientFee { required, provided });
    }

    let application = String::from_utf8(destination.to_vec())
        .map_err(|_| StdError::generic_err("destination is not utf-8"))?;
    let dest_endpoint = DEST_ENDPOINTS
        .may_load(deps.storage, &application)?
        .ok_or(EndpointError::UnknownDestination {
            application: application.clone(),
        })?;

    let nonce = OUTBOUND_NONCE
        .may_load(deps.storage, (dst_chain_id, &info.sender))?
        .unwrap_or_default()
        + 1;
    OUTBOUND_NONCE.save(deps.storage, (dst_chain_id, &info.sender), &nonce)?;

    let mut messages: Vec<CosmosMsg> = vec![];
    let refund = provided - required;
    if !refund.is_zero() {
        messages.push(CosmosMsg::Bank(BankMsg::Send {
            to_address: deps.api.addr_validate(&refund_address)?.into_string(),
            amount: vec![Coin {
                denom: config.fee_denom.clone(),
                amount: refund,
            }],
        }));
    }
    messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: dest_endpoint.into_string(),
        msg: to_json_binary(&ExecuteMsg::ReceivePayload {
            src_chain_id: config.chain_id,
            src_address: Binary::from(info.sender.as_bytes()),
            dst_address: application,
            nonce,
            payload,
        })?,
        funds: vec![],
    }));

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "send")
        .add_attribute("dst_chain_id", dst_chain_id.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("fee", required))
}

fn execute_receive_payload(
    deps: DepsMut,
    src_chain_id: u16,
    src_address: Binary,
    dst_address: String,
    nonce: u64,
    payload: Binary,
) -> Result<Response, EndpointError> {
    let path = (src_chain_id, src_address.as_slice());
    if STORED_PAYLOADS.has(deps.storage, path) {
        return Err(EndpointError::PathBlocked);
    }

    let expected = INBOUND_NONCE.may_load(deps.storage, path)?.unwrap_or_default() + 1;
    if nonce != expected {
        return Err(EndpointError::WrongNonce {
            expected,
            got: nonce,
        });
    }
    INBOUND_NONCE.save(deps.storage, path, &nonce)?;

    let dst_address = deps.api.addr_validate(&dst_address)?;

    if BLOCK_NEXT.load(deps.storage)? {
        BLOCK_NEXT.save(deps.storage, &false)?;
        let stored = StoredPayload {
            dst_address,
            nonce,
            payload,
            reason: "blocked".to_string(),
        };
        STORED_PAYLOADS.save(deps.storage, path, &stored)?;
        return Ok(Response::new()
            .add_event(payload_stored_event(src_chain_id, &src_address, &stored))
            .add_attribute("method", "receive_payload"));
    }

    IN_FLIGHT.save(
        deps.storage,
        &InFlight {
            src_chain_id,
            src_address: src_address.clone(),
            dst_address: dst_address.clone(),
            nonce,
            payload: payload.clone(),
        },
    )?;

    let deliver = WasmMsg::Execute {
        contract_addr: dst_address.into_string(),
        msg: to_json_binary(&ReceiverExecuteMsg::LzReceive {
            src_chain_id,
            src_address,
            nonce,
            payload,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_always(deliver, RECEIVE_REPLY_ID))
        .add_attribute("method", "receive_payload")
        .add_attribute("nonce", nonce.to_string()))
}

fn execute_retry_payload(
    deps: DepsMut,
    src_chain_id: u16,
    src_address: Binary,
    payload: Binary,
) -> Result<Response, EndpointError> {
    let path = (src_chain_id, src_address.as_slice());
    let stored = STORED_PAYLOADS
        .may_load(deps.storage, path)?
        .ok_or(EndpointError::NoStoredPayload)?;
    if stored.payload != payload {
        return Err(EndpointError::InvalidPayload);
    }
    STORED_PAYLOADS.remove(deps.storage, path);

    let deliver = WasmMsg::Execute {
        contract_addr: stored.dst_address.into_string(),
        msg: to_json_binary(&ReceiverExecuteMsg::LzReceive {
            src_chain_id,
            src_address,
            nonce: stored.nonce,
            payload,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(deliver)
        .add_attribute("method", "retry_payload"))
}

fn payload_stored_event(src_chain_id: u16, src_address: &Binary, stored: &StoredPayload) -> Event {
    Event::new("payload_stored")
        .add_attribute("src_chain_id", src_chain_id.to_string())
        .add_attribute("src_address", src_address.to_base64())
        .add_attribute("nonce", stored.nonce.to_string())
        .add_attribute("reason", stored.reason.clone())
}

pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, EndpointError> {
    if msg.id != RECEIVE_REPLY_ID {
        return Err(StdError::generic_err(format!("unknown reply id {}", msg.id)).into());
    }
    let in_flight = IN_FLIGHT.load(deps.storage)?;
    IN_FLIGHT.remove(deps.storage);

    match msg.result {
        SubMsgResult::Ok(_) => Ok(Response::new()),
        SubMsgResult::Err(reason) => {
            let stored = StoredPayload {
                dst_address: in_flight.dst_address,
                nonce: in_flight.nonce,
                payload: in_flight.payload,
                reason,
            };
            STORED_PAYLOADS.save(
                deps.storage,
                (in_flight.src_chain_id, in_flight.src_address.as_slice()),
                &stored,
            )?;
            Ok(Response::new().add_event(payload_stored_event(
                in_flight.src_chain_id,
                &in_flight.src_address,
                &stored,
            )))
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::EstimateFees { payload, .. } => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&FeeResponse {
                native_fee: quote(&config, payload.len())?,
                zro_fee: Uint128::zero(),
            })
        }
        QueryMsg::StoredPayload {
            src_chain_id,
            src_address,
        } => to_json_binary(
            &STORED_PAYLOADS.may_load(deps.storage, (src_chain_id, src_address.as_slice()))?,
        ),
        QueryMsg::OutboundNonce {
            dst_chain_id,
            src_address,
        } => {
            let src = deps.api.addr_validate(&src_address)?;
            to_json_binary(
                &OUTBOUND_NONCE
                    .may_load(deps.storage, (dst_chain_id, &src))?
                    .unwrap_or_default(),
            )
        }
        QueryMsg::InboundNonce {
            src_chain_id,
            src_address,
        } => to_json_binary(
            &INBOUND_NONCE
                .may_load(deps.storage, (src_chain_id, src_address.as_slice()))?
                .unwrap_or_default(),
        ),
    }
}
