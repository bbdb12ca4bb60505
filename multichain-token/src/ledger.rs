//! Per-minter issuance accounting.
//!
//! Every function either fully applies or leaves storage untouched.

use cosmwasm_std::{Addr, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{MinterInfo, MINTERS};

pub fn load_minter(storage: &dyn Storage, minter: &Addr) -> Result<MinterInfo, ContractError> {
    Ok(MINTERS.may_load(storage, minter)?.unwrap_or_default())
}

/// Charge `amount` against the minter's cap.
pub fn consume(
    storage: &mut dyn Storage,
    minter: &Addr,
    amount: Uint128,
) -> Result<MinterInfo, ContractError> {
    let mut info = load_minter(storage, minter)?;
    let minted = info.minted.checked_add(amount)?;
    if minted > info.cap {
        return Err(ContractError::MintLimitExceeded {
            requested: amount,
            available: info.available(),
        });
    }
    info.minted = minted;
    MINTERS.save(storage, minter, &info)?;
    Ok(info)
}

/// Give back `amount` of capacity. Minted floors at zero, so burning more
/// than a minter issued is allowed.
pub fn restore(
    storage: &mut dyn Storage,
    minter: &Addr,
    amount: Uint128,
) -> Result<MinterInfo, ContractError> {
    let mut info = load_minter(storage, minter)?;
    info.minted = info.minted.saturating_sub(amount);
    MINTERS.save(storage, minter, &info)?;
    Ok(info)
}

pub fn set_cap(
    storage: &mut dyn Storage,
    minter: &Addr,
    cap: Uint128,
) -> Result<MinterInfo, ContractError> {
    let mut info = load_minter(storage, minter)?;
    if cap < info.minted {
        return Err(ContractError::NewCapBelowMinted {
            cap,
            minted: info.minted,
        });
    }
    info.cap = cap;
    MINTERS.save(storage, minter, &info)?;
    Ok(info)
}

/// Move the whole minted balance of `source` onto `destination`.
/// Returns the moved amount and both updated records.
pub fn migrate(
    storage: &mut dyn Storage,
    source: &Addr,
    destination: &Addr,
) -> Result<(Uint128, MinterInfo, MinterInfo), ContractError> {
    if source == destination {
        return Err(ContractError::AddressesMustDiffer);
    }
    let mut src = load_minter(storage, source)?;
    let mut dst = load_minter(storage, destination)?;

    let moved = src.minted;
    let total = dst.minted.checked_add(moved)?;
    if total > dst.cap {
        return Err(ContractError::MintLimitExceeded {
            requested: moved,
            available: dst.available(),
        });
    }
    dst.minted = total;
    src.minted = Uint128::zero();

    MINTERS.save(storage, source, &src)?;
    MINTERS.save(storage, destination, &dst)?;
    Ok((moved, src, dst))
}
