//! Wire format of bridge messages and shared-decimal conversion.
//!
//! # Payload Layout
//! - `PT_SEND`:          `[0][u8 len][to][u64 amount_sd]`
//! - `PT_SEND_AND_CALL`: `[1][u8 len][to][u64 amount_sd][u8 len][from][u64 dst_gas][call payload...]`
//!
//! Integers are big-endian. Amounts travel in shared decimals so that chains
//! with different local precision agree on the value; the local amount is
//! `amount_sd * ld2sd_rate`.
//!
//! # Adapter Params
//! - version 1: `[u16 version][u256 gas]` (34 bytes)
//! - version 2: `[u16 version][u256 gas][u256 native for dst][address]`

use cosmwasm_std::{Binary, Uint128, Uint256};

use crate::error::ContractError;

pub const PT_SEND: u8 = 0;
pub const PT_SEND_AND_CALL: u8 = 1;

const ADAPTER_PARAMS_V1_LEN: usize = 34;
const ADAPTER_PARAMS_V2_MIN_LEN: usize = 67;

// ============================================================================
// Payload
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Send {
        to: Vec<u8>,
        amount_sd: u64,
    },
    SendAndCall {
        to: Vec<u8>,
        amount_sd: u64,
        from: Vec<u8>,
        dst_gas_for_call: u64,
        call_payload: Vec<u8>,
    },
}

impl Payload {
    pub fn packet_type(&self) -> u8 {
        match self {
            Payload::Send { .. } => PT_SEND,
            Payload::SendAndCall { .. } => PT_SEND_AND_CALL,
        }
    }

    pub fn to(&self) -> &[u8] {
        match self {
            Payload::Send { to, .. } | Payload::SendAndCall { to, .. } => to,
        }
    }

    pub fn amount_sd(&self) -> u64 {
        match self {
            Payload::Send { amount_sd, .. } | Payload::SendAndCall { amount_sd, .. } => *amount_sd,
        }
    }

    pub fn encode(&self) -> Result<Binary, ContractError> {
        let mut out = vec![self.packet_type()];
        match self {
            Payload::Send { to, amount_sd } => {
                write_bytes(&mut out, to)?;
                out.extend_from_slice(&amount_sd.to_be_bytes());
            }
            Payload::SendAndCall {
                to,
                amount_sd,
                from,
                dst_gas_for_call,
                call_payload,
            } => {
                write_bytes(&mut out, to)?;
                out.extend_from_slice(&amount_sd.to_be_bytes());
                write_bytes(&mut out, from)?;
                out.extend_from_slice(&dst_gas_for_call.to_be_bytes());
                out.extend_from_slice(call_payload);
            }
        }
        Ok(Binary::from(out))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ContractError> {
        let (&packet_type, rest) = bytes
            .split_first()
            .ok_or(ContractError::UnrecognizedPayloadType)?;
        let mut reader = Reader { buf: rest };

        match packet_type {
            PT_SEND => {
                let to = reader.bytes()?;
                let amount_sd = reader.u64()?;
                if !reader.buf.is_empty() {
                    return Err(malformed("trailing bytes"));
                }
                Ok(Payload::Send { to, amount_sd })
            }
            PT_SEND_AND_CALL => {
                let to = reader.bytes()?;
                let amount_sd = reader.u64()?;
                let from = reader.bytes()?;
                let dst_gas_for_call = reader.u64()?;
                Ok(Payload::SendAndCall {
                    to,
                    amount_sd,
                    from,
                    dst_gas_for_call,
                    call_payload: reader.buf.to_vec(),
                })
            }
            _ => Err(ContractError::UnrecognizedPayloadType),
        }
    }
}

fn malformed(reason: &str) -> ContractError {
    ContractError::MalformedPayload {
        reason: reason.to_string(),
    }
}

fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) -> Result<(), ContractError> {
    let len = u8::try_from(bytes.len()).map_err(|_| malformed("address longer than 255 bytes"))?;
    out.push(len);
    out.extend_from_slice(bytes);
    Ok(())
}

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], ContractError> {
        if self.buf.len() < n {
            return Err(malformed("truncated"));
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    fn bytes(&mut self) -> Result<Vec<u8>, ContractError> {
        let len = self.take(1)?[0] as usize;
        Ok(self.take(len)?.to_vec())
    }

    fn u64(&mut self) -> Result<u64, ContractError> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.take(8)?);
        Ok(u64::from_be_bytes(raw))
    }
}

// ============================================================================
// Decimal Conversion
// ============================================================================

pub fn ld2sd_rate(local_decimals: u8, shared_decimals: u8) -> Result<Uint128, ContractError> {
    if shared_decimals > local_decimals {
        return Err(ContractError::InvalidSharedDecimals {
            shared: shared_decimals,
            local: local_decimals,
        });
    }
    Ok(Uint128::new(10).checked_pow((local_decimals - shared_decimals) as u32)?)
}

/// Split `amount` into its transferable part and the dust below shared precision.
pub fn remove_dust(amount: Uint128, rate: Uint128) -> (Uint128, Uint128) {
    let dust = amount.checked_rem(rate).unwrap_or_default();
    (amount - dust, dust)
}

pub fn ld2sd(amount: Uint128, rate: Uint128) -> Result<u64, ContractError> {
    let amount_sd = amount.checked_div(rate).map_err(|_| ContractError::AmountOverflow)?;
    u64::try_from(amount_sd.u128()).map_err(|_| ContractError::AmountOverflow)
}

pub fn sd2ld(amount_sd: u64, rate: Uint128) -> Result<Uint128, ContractError> {
    Ok(Uint128::from(amount_sd).checked_mul(rate)?)
}

// ============================================================================
// Adapter Params
// ============================================================================

/// Destination gas requested by the sender.
pub fn adapter_params_gas(params: &[u8]) -> Result<Uint256, ContractError> {
    if params.len() < ADAPTER_PARAMS_V1_LEN {
        return Err(ContractError::InvalidAdapterParams);
    }
    let version = u16::from_be_bytes([params[0], params[1]]);
    let well_formed = match version {
        1 => params.len() == ADAPTER_PARAMS_V1_LEN,
        2 => params.len() >= ADAPTER_PARAMS_V2_MIN_LEN,
        _ => false,
    };
    if !well_formed {
        return Err(ContractError::InvalidAdapterParams);
    }
    let mut gas = [0u8; 32];
    gas.copy_from_slice(&params[2..ADAPTER_PARAMS_V1_LEN]);
    Ok(Uint256::from_be_bytes(gas))
}

/// Version 1 adapter params requesting `gas` on the destination.
pub fn adapter_params_v1(gas: u64) -> Binary {
    let mut out = Vec::with_capacity(ADAPTER_PARAMS_V1_LEN);
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&[0u8; 24]);
    out.extend_from_slice(&gas.to_be_bytes());
    Binary::from(out)
}
