//! Cross-chain transport boundary.
//!
//! Outbound: a bridge calls `Send` on its endpoint, attaching the fee as
//! native funds. Inbound: the endpoint calls `LzReceive` on the destination
//! bridge. Remote addresses travel as raw bytes.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

#[cw_serde]
pub enum EndpointExecuteMsg {
    Send {
        dst_chain_id: u16,
        /// Trusted remote of the destination route
        destination: Binary,
        payload: Binary,
        /// Receives any fee in excess of the quote
        refund_address: String,
        zro_payment_address: Option<String>,
        adapter_params: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum EndpointQueryMsg {
    #[returns(FeeResponse)]
    EstimateFees {
        dst_chain_id: u16,
        user_application: String,
        payload: Binary,
        pay_in_zro: bool,
        adapter_params: Binary,
    },
}

#[cw_serde]
pub struct FeeResponse {
    pub native_fee: Uint128,
    pub zro_fee: Uint128,
}

/// Delivered by the transport into the receiving application.
#[cw_serde]
pub enum ReceiverExecuteMsg {
    LzReceive {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        payload: Binary,
    },
}

/// Downstream call made on a contract recipient after a send-and-call credit.
#[cw_serde]
pub enum OftReceiverMsg {
    OnOftReceived {
        src_chain_id: u16,
        src_address: Binary,
        nonce: u64,
        from: Binary,
        amount: Uint128,
        payload: Binary,
    },
}
