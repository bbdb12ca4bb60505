//! USD-denominated rate limiting per route and direction.
//!
//! Each route has a single-transfer limit and a daily limit for each
//! direction. Daily usage accumulates in a fixed 24-hour window that resets
//! wholesale on the first transfer after it expires. Whitelisted accounts
//! are not checked and do not consume the window.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, QuerierWrapper, StdError, Storage, Timestamp, Uint128};

use common::query_price;

use crate::error::ContractError;
use crate::state::{RateWindow, Route, RATE_LIMIT_PERIOD, RATE_WINDOWS};

#[cw_serde]
#[derive(Copy)]
pub enum Direction {
    Send,
    Receive,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Send => "send",
            Direction::Receive => "receive",
        }
    }
}

/// (single, daily) limits of `route` for `direction`
pub fn limits(route: &Route, direction: Direction) -> (Uint128, Uint128) {
    match direction {
        Direction::Send => (route.max_single_send, route.max_daily_send),
        Direction::Receive => (route.max_single_receive, route.max_daily_receive),
    }
}

/// The window as it stands at `now`; an expired or missing window reads as
/// a fresh one starting now.
pub fn current_window(
    storage: &dyn Storage,
    chain_id: u16,
    direction: Direction,
    now: Timestamp,
) -> Result<RateWindow, ContractError> {
    let fresh = RateWindow {
        window_start: now,
        accumulated_usd: Uint128::zero(),
    };
    let window = match RATE_WINDOWS.may_load(storage, (chain_id, direction.as_str()))? {
        Some(w) if now.seconds() < w.window_start.seconds() + RATE_LIMIT_PERIOD => w,
        _ => fresh,
    };
    Ok(window)
}

/// Evaluate `amount_usd` against the limits and record it in the window.
pub fn check_and_consume(
    storage: &mut dyn Storage,
    chain_id: u16,
    route: &Route,
    direction: Direction,
    amount_usd: Uint128,
    now: Timestamp,
    whitelisted: bool,
) -> Result<(), ContractError> {
    if whitelisted {
        return Ok(());
    }

    let (single, daily) = limits(route, direction);
    if amount_usd > single {
        return Err(ContractError::SingleTransactionLimitExceeded {
            amount_usd,
            limit: single,
        });
    }

    let mut window = current_window(storage, chain_id, direction, now)?;
    let accumulated = window.accumulated_usd.checked_add(amount_usd)?;
    if accumulated > daily {
        return Err(ContractError::DailyTransactionLimitExceeded {
            requested: amount_usd,
            remaining: daily.saturating_sub(window.accumulated_usd),
        });
    }

    window.accumulated_usd = accumulated;
    RATE_WINDOWS.save(storage, (chain_id, direction.as_str()), &window)?;
    Ok(())
}

/// `amount * price / 10^decimals`, with the price scaled by 1e18
pub fn usd_value(amount: Uint128, price: Uint128, decimals: u8) -> Result<Uint128, ContractError> {
    let scale = Uint128::new(10).checked_pow(decimals as u32)?;
    amount
        .checked_multiply_ratio(price, scale)
        .map_err(|e| StdError::generic_err(e.to_string()).into())
}

/// Oracle-priced USD value of `amount` of `token`.
pub fn token_usd_value(
    querier: &QuerierWrapper,
    oracle: &Addr,
    token: &Addr,
    amount: Uint128,
    decimals: u8,
) -> Result<Uint128, ContractError> {
    let price = query_price(querier, oracle, token.as_str())?;
    usd_value(amount, price, decimals)
}

/// Read-only evaluation of a prospective transfer, reported as if it had
/// been consumed.
#[cw_serde]
pub struct Eligibility {
    pub eligible: bool,
    pub max_single_transaction_limit: Uint128,
    pub max_daily_limit: Uint128,
    pub amount_in_usd: Uint128,
    pub transferred_in_window: Uint128,
    pub last_24_hour_window_start: Timestamp,
    pub is_whitelisted: bool,
}

pub fn eligibility(
    storage: &dyn Storage,
    chain_id: u16,
    route: &Route,
    direction: Direction,
    amount_usd: Uint128,
    now: Timestamp,
    whitelisted: bool,
) -> Result<Eligibility, ContractError> {
    let (single, daily) = limits(route, direction);
    let window = current_window(storage, chain_id, direction, now)?;
    let transferred = window.accumulated_usd.checked_add(amount_usd)?;

    Ok(Eligibility {
        eligible: whitelisted || (amount_usd <= single && transferred <= daily),
        max_single_transaction_limit: single,
        max_daily_limit: daily,
        amount_in_usd: amount_usd,
        transferred_in_window: transferred,
        last_24_hour_window_start: window.window_start,
        is_whitelisted: whitelisted,
    })
}
