use cosmwasm_std::{coins, Addr, Uint128};
use cw20::Cw20ExecuteMsg;
use cw_multi_test::Executor;

use bridge_admin::msg::ExecuteMsg as GatewayExecuteMsg;
use common::AssetInfo;
use token_bridge::msg::{ConfigResponse, ExecuteMsg as BridgeExecuteMsg, QueryMsg as BridgeQueryMsg};

use crate::utils::{attr, event, Network, Side, ADMIN, ALICE, BOB, OPERATOR, TOKEN_A};

fn gateway_exec(
    net: &mut Network,
    side: Side,
    sender: &str,
    msg: &GatewayExecuteMsg,
) -> anyhow::Result<cw_multi_test::AppResponse> {
    let gateway = net.chain(side).gateway.clone();
    net.app
        .execute_contract(Addr::unchecked(sender), gateway, msg, &[])
}

#[test]
fn test_deactivated_operation_is_refused_despite_grant() {
    let mut net = Network::new();

    net.forward(Side::A, BridgeExecuteMsg::Pause {}).unwrap();
    net.forward(Side::A, BridgeExecuteMsg::Unpause {}).unwrap();

    let res = gateway_exec(
        &mut net,
        Side::A,
        ADMIN,
        &GatewayExecuteMsg::UpsertSignature {
            signatures: vec!["pause".to_string()],
            active: vec![false],
        },
    )
    .unwrap();
    let changed = event(&res, "function_registry_changed").unwrap();
    assert_eq!(attr(changed, "signature"), "pause");
    assert_eq!(attr(changed, "active"), "false");

    let err = net.forward(Side::A, BridgeExecuteMsg::Pause {}).unwrap_err();
    assert_eq!(err.root_cause().to_string(), "Operation not found: pause");

    let config: ConfigResponse = net.bridge_query(Side::A, &BridgeQueryMsg::Config {});
    assert!(!config.paused);
}

#[test]
fn test_forward_requires_permission() {
    let mut net = Network::new();

    let err = gateway_exec(
        &mut net,
        Side::A,
        "terra1mallory",
        &GatewayExecuteMsg::Forward {
            msg: BridgeExecuteMsg::SetWhitelist {
                user: "terra1mallory".to_string(),
                val: true,
            },
        },
    )
    .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        "Unauthorized: caller is not allowed to call set_whitelist"
    );

    // The operator goes through and the gateway records who called what
    let res = net
        .forward(
            Side::A,
            BridgeExecuteMsg::SetWhitelist {
                user: BOB.to_string(),
                val: true,
            },
        )
        .unwrap();
    let forwarded = res
        .events
        .iter()
        .find(|e| e.ty == "wasm" && e.attributes.iter().any(|a| a.key == "operation"))
        .unwrap();
    assert_eq!(attr(forwarded, "operation"), "set_whitelist");
    assert_eq!(attr(forwarded, "caller"), OPERATOR);

    let whitelisted: bool = net.bridge_query(
        Side::A,
        &BridgeQueryMsg::IsWhitelisted {
            account: BOB.to_string(),
        },
    );
    assert!(whitelisted);
}

#[test]
fn test_bridge_only_accepts_its_gateway() {
    let mut net = Network::new();

    let err = net
        .bridge_exec(Side::A, ADMIN, &BridgeExecuteMsg::Pause {})
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        "Unauthorized: only owner can perform this action"
    );

    // Ownership moves only through the dedicated gateway operation
    let err = net
        .forward(
            Side::A,
            BridgeExecuteMsg::TransferOwnership {
                new_owner: OPERATOR.to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        "Operation not found: transfer_ownership"
    );
}

#[test]
fn test_transfer_bridge_ownership_out_of_gateway() {
    let mut net = Network::new();

    gateway_exec(
        &mut net,
        Side::A,
        OPERATOR,
        &GatewayExecuteMsg::TransferBridgeOwnership {
            new_owner: ADMIN.to_string(),
        },
    )
    .unwrap();

    let owner: Addr = net.bridge_query(Side::A, &BridgeQueryMsg::Owner {});
    assert_eq!(owner, Addr::unchecked(ADMIN));

    // The old gateway still authorizes, but the bridge no longer listens to it
    let err = net.forward(Side::A, BridgeExecuteMsg::Pause {}).unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        "Unauthorized: only owner can perform this action"
    );
    net.bridge_exec(Side::A, ADMIN, &BridgeExecuteMsg::Pause {})
        .unwrap();
}

#[test]
fn test_sweep_native_funds() {
    let mut net = Network::new();
    let bridge = net.a.bridge.clone();
    net.app
        .send_tokens(Addr::unchecked(ALICE), bridge.clone(), &coins(5_000, "uluna"))
        .unwrap();

    let res = net
        .forward(
            Side::A,
            BridgeExecuteMsg::SweepToken {
                token: AssetInfo::Native {
                    denom: "uluna".to_string(),
                },
                to: ADMIN.to_string(),
                amount: Uint128::new(5_000),
            },
        )
        .unwrap();
    let swept = event(&res, "sweep_token").unwrap();
    assert_eq!(attr(swept, "amount"), "5000");

    let balance = net.app.wrap().query_balance(ADMIN, "uluna").unwrap();
    assert_eq!(balance.amount.u128(), 5_000);
    let balance = net.app.wrap().query_balance(bridge, "uluna").unwrap();
    assert!(balance.amount.is_zero());
}

#[test]
fn test_sweep_cannot_touch_locked_tokens() {
    let mut net = Network::new();
    net.send(Side::A, ALICE, BOB, 10 * TOKEN_A).unwrap();

    // Tokens sent straight to the bridge are not locked
    let (token, bridge) = (net.a.token.clone(), net.a.bridge.clone());
    net.app
        .execute_contract(
            Addr::unchecked(ALICE),
            token.clone(),
            &Cw20ExecuteMsg::Transfer {
                recipient: bridge.to_string(),
                amount: Uint128::new(5 * TOKEN_A),
            },
            &[],
        )
        .unwrap();

    let sweep = |amount: u128| BridgeExecuteMsg::SweepToken {
        token: AssetInfo::Cw20 {
            contract_addr: token.to_string(),
        },
        to: ALICE.to_string(),
        amount: Uint128::new(amount),
    };

    let err = net.forward(Side::A, sweep(5 * TOKEN_A + 1)).unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        format!(
            "Insufficient balance: {} available, {} requested",
            5 * TOKEN_A,
            5 * TOKEN_A + 1
        )
    );

    net.forward(Side::A, sweep(5 * TOKEN_A)).unwrap();
    assert_eq!(net.balance(Side::A, ALICE), 990 * TOKEN_A);
    assert_eq!(net.balance(Side::A, bridge.as_str()), 10 * TOKEN_A);
}

#[test]
fn test_authority_revocation_takes_effect_immediately() {
    let mut net = Network::new();
    let (acm, gateway) = (net.a.acm.clone(), net.a.gateway.clone());

    net.app
        .execute_contract(
            Addr::unchecked(ADMIN),
            acm,
            &access_control::msg::ExecuteMsg::RevokeCallPermission {
                contract: gateway.to_string(),
                function_sig: "set_oracle".to_string(),
                account: OPERATOR.to_string(),
            },
            &[],
        )
        .unwrap();

    let err = net
        .forward(
            Side::A,
            BridgeExecuteMsg::SetOracle {
                oracle: "terra1neworacle".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        "Unauthorized: caller is not allowed to call set_oracle"
    );

    // Other grants are untouched
    net.forward(Side::A, BridgeExecuteMsg::Pause {}).unwrap();
}
