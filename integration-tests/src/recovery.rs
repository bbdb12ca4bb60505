use cosmwasm_std::{Binary, Uint128};

use multichain_token::msg::ExecuteMsg as TokenExecuteMsg;
use token_bridge::msg::{ExecuteMsg as BridgeExecuteMsg, QueryMsg as BridgeQueryMsg, StatsResponse};
use token_bridge::payload_hash;

use crate::utils::{
    attr, event, outcome, parked_nonce, send_payload, Network, Side, ALICE, BOB, TOKEN_A, TOKEN_B,
    TOKEN_SD,
};

/// Send 10 tokens A -> B and assert the delivery was parked on B.
fn send_parked(net: &mut Network) -> (u64, Binary) {
    let res = net.send(Side::A, ALICE, BOB, 10 * TOKEN_A).unwrap();
    assert_eq!(outcome(&res), Some("parked".to_string()));
    (parked_nonce(&res), send_payload(BOB, 10 * TOKEN_SD))
}

#[test]
fn test_mint_cap_exhausted_then_retried() {
    let mut net = Network::new();
    net.set_mint_cap(9 * TOKEN_B);

    let res = net.send(Side::A, ALICE, BOB, 10 * TOKEN_A).unwrap();
    assert_eq!(outcome(&res), Some("parked".to_string()));
    let failed = event(&res, "message_failed").unwrap();
    assert_eq!(attr(failed, "src_chain_id"), "101");
    assert_eq!(attr(failed, "nonce"), "1");

    let payload = send_payload(BOB, 10 * TOKEN_SD);
    assert_eq!(net.failed_message(Side::B, 1), Some(payload_hash(&payload)));
    assert_eq!(net.balance(Side::A, ALICE), 990 * TOKEN_A);
    assert_eq!(net.balance(Side::B, BOB), 0);

    // Still capped: the retry reverts and the entry stays
    assert!(net.retry(Side::B, 1, &payload).is_err());
    assert!(net.failed_message(Side::B, 1).is_some());

    net.set_mint_cap(100 * TOKEN_B);
    let res = net.retry(Side::B, 1, &payload).unwrap();
    let retried = event(&res, "retry_message_success").unwrap();
    assert_eq!(attr(retried, "nonce"), "1");

    assert_eq!(net.balance(Side::B, BOB), 10 * TOKEN_B);
    assert_eq!(net.failed_message(Side::B, 1), None);
    let stats: StatsResponse = net.bridge_query(Side::B, &BridgeQueryMsg::Stats {});
    assert_eq!(stats.total_failed, 1);
    assert_eq!(stats.total_retried, 1);
    assert_eq!(stats.total_received, 1);

    // A second retry finds nothing
    let err = net.retry(Side::B, 1, &payload).unwrap_err();
    assert_eq!(err.root_cause().to_string(), "No stored message");
}

#[test]
fn test_retry_requires_the_original_payload() {
    let mut net = Network::new();
    net.set_mint_cap(0);
    let (nonce, _) = send_parked(&mut net);
    net.set_mint_cap(1_000 * TOKEN_B);

    let forged = send_payload(BOB, 20 * TOKEN_SD);
    let err = net.retry(Side::B, nonce, &forged).unwrap_err();
    assert_eq!(err.root_cause().to_string(), "Invalid payload");

    let err = net
        .retry(Side::B, nonce + 1, &send_payload(BOB, 10 * TOKEN_SD))
        .unwrap_err();
    assert_eq!(err.root_cause().to_string(), "No stored message");
    assert_eq!(net.balance(Side::B, BOB), 0);
}

#[test]
fn test_blacklisted_recipient_parks_until_cleared() {
    let mut net = Network::new();
    net.token_b_exec(&TokenExecuteMsg::UpdateBlacklist {
        user: BOB.to_string(),
        value: true,
    })
    .unwrap();

    let (nonce, payload) = send_parked(&mut net);
    assert!(net.retry(Side::B, nonce, &payload).is_err());

    net.token_b_exec(&TokenExecuteMsg::UpdateBlacklist {
        user: BOB.to_string(),
        value: false,
    })
    .unwrap();
    net.retry(Side::B, nonce, &payload).unwrap();
    assert_eq!(net.balance(Side::B, BOB), 10 * TOKEN_B);
}

#[test]
fn test_paused_token_parks_delivery() {
    let mut net = Network::new();
    net.token_b_exec(&TokenExecuteMsg::Pause {}).unwrap();

    let (nonce, payload) = send_parked(&mut net);

    net.token_b_exec(&TokenExecuteMsg::Unpause {}).unwrap();
    net.retry(Side::B, nonce, &payload).unwrap();
    assert_eq!(net.balance(Side::B, BOB), 10 * TOKEN_B);
}

#[test]
fn test_paused_bridge_parks_delivery_and_blocks_retry() {
    let mut net = Network::new();
    net.forward(Side::B, BridgeExecuteMsg::Pause {}).unwrap();

    let (nonce, payload) = send_parked(&mut net);
    let err = net.retry(Side::B, nonce, &payload).unwrap_err();
    assert_eq!(err.root_cause().to_string(), "Bridge is paused");
    assert!(net.failed_message(Side::B, nonce).is_some());

    // Later deliveries on the same path are not held up by the parked one
    net.forward(Side::B, BridgeExecuteMsg::Unpause {}).unwrap();
    let res = net.send(Side::A, ALICE, BOB, TOKEN_A).unwrap();
    assert_eq!(outcome(&res), Some("delivered".to_string()));
    assert_eq!(net.balance(Side::B, BOB), TOKEN_B);

    net.retry(Side::B, nonce, &payload).unwrap();
    assert_eq!(net.balance(Side::B, BOB), 11 * TOKEN_B);
}

#[test]
fn test_drop_then_force_mint() {
    let mut net = Network::new();
    net.set_mint_cap(0);
    let (nonce, payload) = send_parked(&mut net);

    let res = net
        .forward(
            Side::B,
            BridgeExecuteMsg::DropFailedMessage {
                src_chain_id: Side::A.chain_id(),
                src_address: net.remote_of(Side::B),
                nonce,
            },
        )
        .unwrap();
    let dropped = event(&res, "drop_failed_message").unwrap();
    assert_eq!(attr(dropped, "nonce"), nonce.to_string());
    assert_eq!(net.failed_message(Side::B, nonce), None);

    net.set_mint_cap(100 * TOKEN_B);
    let err = net.retry(Side::B, nonce, &payload).unwrap_err();
    assert_eq!(err.root_cause().to_string(), "No stored message");

    // The operator makes the recipient whole by hand
    let res = net
        .forward(
            Side::B,
            BridgeExecuteMsg::ForceMint {
                src_chain_id: Side::A.chain_id(),
                to: BOB.to_string(),
                amount: Uint128::new(10 * TOKEN_B),
            },
        )
        .unwrap();
    let minted = event(&res, "force_mint").unwrap();
    assert_eq!(attr(minted, "to"), BOB);
    assert_eq!(net.balance(Side::B, BOB), 10 * TOKEN_B);
}

#[test]
fn test_force_mint_disabled_on_lock_side() {
    let mut net = Network::new();
    let err = net
        .forward(
            Side::A,
            BridgeExecuteMsg::ForceMint {
                src_chain_id: Side::B.chain_id(),
                to: BOB.to_string(),
                amount: Uint128::new(TOKEN_A),
            },
        )
        .unwrap_err();
    assert_eq!(err.root_cause().to_string(), "Force mint is not active");
}
