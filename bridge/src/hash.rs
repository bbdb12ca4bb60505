//! Payload hashing for failed message records.

use cosmwasm_std::Binary;
use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Content hash stored for an undelivered payload
pub fn payload_hash(payload: &[u8]) -> Binary {
    Binary::from(keccak256(payload).to_vec())
}

/// 0x-prefixed hex rendering for event attributes
pub fn to_hex(hash: &[u8]) -> String {
    format!("0x{}", hex::encode(hash))
}
