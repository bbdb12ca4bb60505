use cosmwasm_std::{coins, Addr, Binary, Empty, Event, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use token_bridge::msg::{ExecuteMsg as BridgeExecuteMsg, QueryMsg as BridgeQueryMsg, TokenMode};
use token_bridge::{adapter_params_v1, Payload};

pub(crate) const CHAIN_A: u16 = 101;
pub(crate) const CHAIN_B: u16 = 102;
pub(crate) const MIN_GAS: u64 = 200_000;
pub(crate) const FEE: u128 = 10_000;

/// One whole token on chain A (6 decimals)
pub(crate) const TOKEN_A: u128 = 1_000_000;
/// One whole token on chain B (18 decimals)
pub(crate) const TOKEN_B: u128 = 1_000_000_000_000_000_000;
/// One whole token in shared decimals (6)
pub(crate) const TOKEN_SD: u64 = 1_000_000;
/// One USD at 18 decimals
pub(crate) const USD: u128 = 1_000_000_000_000_000_000;

pub(crate) const ADMIN: &str = "terra1admin";
pub(crate) const OPERATOR: &str = "terra1operator";
pub(crate) const ALICE: &str = "terra1alice";
pub(crate) const BOB: &str = "terra1bob";

/// Every operation a gateway relays, plus its own bridge ownership transfer
const OPERATIONS: &[&str] = &[
    "drop_failed_message",
    "force_mint",
    "set_oracle",
    "set_max_single_transaction_limit",
    "set_max_daily_limit",
    "set_max_single_receive_transaction_limit",
    "set_max_daily_receive_limit",
    "set_trusted_remote_address",
    "remove_trusted_remote",
    "set_min_dst_gas",
    "set_payload_size_limit",
    "pause",
    "unpause",
    "set_whitelist",
    "update_send_and_call_enabled",
    "sweep_token",
    "transfer_bridge_ownership",
];

// ============================================================================
// Contracts
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        token_bridge::contract::execute,
        token_bridge::contract::instantiate,
        token_bridge::contract::query,
    )
    .with_reply(token_bridge::contract::reply);
    Box::new(contract)
}

fn contract_gateway() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        bridge_admin::contract::execute,
        bridge_admin::contract::instantiate,
        bridge_admin::contract::query,
    )
    .with_reply(bridge_admin::contract::reply);
    Box::new(contract)
}

fn contract_token() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        multichain_token::contract::execute,
        multichain_token::contract::instantiate,
        multichain_token::contract::query,
    );
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn contract_access_control() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        access_control::contract::execute,
        access_control::contract::instantiate,
        access_control::contract::query,
    );
    Box::new(contract)
}

fn contract_endpoint() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        mocks::endpoint::execute,
        mocks::endpoint::instantiate,
        mocks::endpoint::query,
    )
    .with_reply(mocks::endpoint::reply);
    Box::new(contract)
}

fn contract_oracle() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        mocks::oracle::execute,
        mocks::oracle::instantiate,
        mocks::oracle::query,
    );
    Box::new(contract)
}

fn contract_receiver() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        mocks::receiver::execute,
        mocks::receiver::instantiate,
        mocks::receiver::query,
    );
    Box::new(contract)
}

// ============================================================================
// Network
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    A,
    B,
}

impl Side {
    pub(crate) fn chain_id(self) -> u16 {
        match self {
            Side::A => CHAIN_A,
            Side::B => CHAIN_B,
        }
    }

    pub(crate) fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

pub(crate) struct Chain {
    pub acm: Addr,
    pub token: Addr,
    pub endpoint: Addr,
    pub bridge: Addr,
    pub gateway: Addr,
}

pub(crate) struct Network {
    pub app: App,
    pub oracle: Addr,
    pub a: Chain,
    pub b: Chain,
}

fn instantiate<T: serde::Serialize>(
    app: &mut App,
    code_id: u64,
    msg: &T,
    label: &str,
) -> Addr {
    app.instantiate_contract(code_id, Addr::unchecked(ADMIN), msg, &[], label, None)
        .unwrap()
}

fn grant(app: &mut App, acm: &Addr, contract: &Addr, op: &str, account: &str) {
    app.execute_contract(
        Addr::unchecked(ADMIN),
        acm.clone(),
        &access_control::msg::ExecuteMsg::GiveCallPermission {
            contract: contract.to_string(),
            function_sig: op.to_string(),
            account: account.to_string(),
        },
        &[],
    )
    .unwrap();
}

impl Network {
    /// Both chains deployed, linked and configured through their gateways.
    /// Routes allow 100 USD per transfer and 1000 USD per day each way.
    pub(crate) fn new() -> Self {
        let mut app = App::default();
        app.init_modules(|router, _, storage| {
            for account in [ALICE, BOB] {
                router
                    .bank
                    .init_balance(storage, &Addr::unchecked(account), coins(10_000_000, "uluna"))
                    .unwrap();
            }
        });

        let acm_code = app.store_code(contract_access_control());
        let cw20_code = app.store_code(contract_cw20());
        let token_code = app.store_code(contract_token());
        let endpoint_code = app.store_code(contract_endpoint());
        let oracle_code = app.store_code(contract_oracle());
        let bridge_code = app.store_code(contract_bridge());
        let gateway_code = app.store_code(contract_gateway());

        let oracle = instantiate(&mut app, oracle_code, &Empty {}, "oracle");

        let acm_msg = access_control::msg::InstantiateMsg { owner: None };
        let acm_a = instantiate(&mut app, acm_code, &acm_msg, "access-control-a");
        let acm_b = instantiate(&mut app, acm_code, &acm_msg, "access-control-b");

        let token_a = instantiate(
            &mut app,
            cw20_code,
            &cw20_base::msg::InstantiateMsg {
                name: "Native Token".to_string(),
                symbol: "NTV".to_string(),
                decimals: 6,
                initial_balances: vec![Cw20Coin {
                    address: ALICE.to_string(),
                    amount: Uint128::new(1_000 * TOKEN_A),
                }],
                mint: None,
                marketing: None,
            },
            "token-a",
        );
        let token_b = instantiate(
            &mut app,
            token_code,
            &multichain_token::msg::InstantiateMsg {
                name: "Wrapped Native Token".to_string(),
                symbol: "wNTV".to_string(),
                decimals: 18,
                permission_authority: acm_b.to_string(),
                initial_balances: vec![],
            },
            "token-b",
        );

        let endpoint = |app: &mut App, chain_id: u16, label: &str| {
            instantiate(
                app,
                endpoint_code,
                &mocks::endpoint::InstantiateMsg {
                    chain_id,
                    fee_denom: "uluna".to_string(),
                    base_fee: Uint128::new(1_000),
                    fee_per_byte: Uint128::new(10),
                },
                label,
            )
        };
        let endpoint_a = endpoint(&mut app, CHAIN_A, "endpoint-a");
        let endpoint_b = endpoint(&mut app, CHAIN_B, "endpoint-b");

        let bridge_a = instantiate(
            &mut app,
            bridge_code,
            &token_bridge::msg::InstantiateMsg {
                token: token_a.to_string(),
                mode: TokenMode::LockUnlock,
                shared_decimals: 6,
                endpoint: endpoint_a.to_string(),
                oracle: oracle.to_string(),
                force_mint_active: false,
                owner: None,
            },
            "bridge-a",
        );
        let bridge_b = instantiate(
            &mut app,
            bridge_code,
            &token_bridge::msg::InstantiateMsg {
                token: token_b.to_string(),
                mode: TokenMode::MintBurn,
                shared_decimals: 6,
                endpoint: endpoint_b.to_string(),
                oracle: oracle.to_string(),
                force_mint_active: true,
                owner: None,
            },
            "bridge-b",
        );

        let gateway_a = instantiate(
            &mut app,
            gateway_code,
            &bridge_admin::msg::InstantiateMsg {
                bridge: bridge_a.to_string(),
                permission_authority: acm_a.to_string(),
            },
            "gateway-a",
        );
        let gateway_b = instantiate(
            &mut app,
            gateway_code,
            &bridge_admin::msg::InstantiateMsg {
                bridge: bridge_b.to_string(),
                permission_authority: acm_b.to_string(),
            },
            "gateway-b",
        );

        let mut net = Network {
            app,
            oracle,
            a: Chain {
                acm: acm_a,
                token: token_a,
                endpoint: endpoint_a,
                bridge: bridge_a,
                gateway: gateway_a,
            },
            b: Chain {
                acm: acm_b,
                token: token_b,
                endpoint: endpoint_b,
                bridge: bridge_b,
                gateway: gateway_b,
            },
        };

        // Bridge B issues token B
        let (acm_b, token_b, bridge_b) = (
            net.b.acm.clone(),
            net.b.token.clone(),
            net.b.bridge.clone(),
        );
        for op in ["mint", "burn"] {
            grant(&mut net.app, &acm_b, &token_b, op, bridge_b.as_str());
        }
        for op in ["set_mint_cap", "update_blacklist", "pause", "unpause"] {
            grant(&mut net.app, &acm_b, &token_b, op, ADMIN);
        }
        net.set_mint_cap(1_000_000 * TOKEN_B);

        for side in [Side::A, Side::B] {
            net.deploy_route(side);
        }

        net.app
            .execute_contract(
                Addr::unchecked(ALICE),
                net.a.token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: net.a.bridge.to_string(),
                    amount: Uint128::new(1_000 * TOKEN_A),
                    expires: None,
                },
                &[],
            )
            .unwrap();

        net.set_price(Side::A, USD);
        net.set_price(Side::B, USD);
        net
    }

    /// Hand the bridge to its gateway, authorize the operator and configure
    /// the route to the other chain through the gateway.
    fn deploy_route(&mut self, side: Side) {
        let (bridge, gateway, acm, endpoint) = {
            let chain = self.chain(side);
            (
                chain.bridge.clone(),
                chain.gateway.clone(),
                chain.acm.clone(),
                chain.endpoint.clone(),
            )
        };
        let remote = self.chain(side.other()).bridge.clone();
        let remote_endpoint = self.chain(side.other()).endpoint.clone();
        let admin = Addr::unchecked(ADMIN);

        self.app
            .execute_contract(
                admin.clone(),
                bridge,
                &BridgeExecuteMsg::TransferOwnership {
                    new_owner: gateway.to_string(),
                },
                &[],
            )
            .unwrap();
        self.app
            .execute_contract(
                admin.clone(),
                gateway.clone(),
                &bridge_admin::msg::ExecuteMsg::UpsertSignature {
                    signatures: OPERATIONS.iter().map(|op| op.to_string()).collect(),
                    active: vec![true; OPERATIONS.len()],
                },
                &[],
            )
            .unwrap();
        for op in OPERATIONS {
            grant(&mut self.app, &acm, &gateway, op, OPERATOR);
        }
        self.app
            .execute_contract(
                admin,
                endpoint,
                &mocks::endpoint::ExecuteMsg::SetDestEndpoint {
                    user_application: remote.to_string(),
                    endpoint: remote_endpoint.to_string(),
                },
                &[],
            )
            .unwrap();

        let remote_chain = side.other().chain_id();
        let config = [
            BridgeExecuteMsg::SetTrustedRemoteAddress {
                remote_chain_id: remote_chain,
                remote_address: Binary::from(remote.as_bytes()),
            },
            BridgeExecuteMsg::SetMinDstGas {
                dst_chain_id: remote_chain,
                packet_type: 0,
                min_gas: MIN_GAS,
            },
            BridgeExecuteMsg::SetMinDstGas {
                dst_chain_id: remote_chain,
                packet_type: 1,
                min_gas: MIN_GAS,
            },
            BridgeExecuteMsg::SetMaxDailyLimit {
                chain_id: remote_chain,
                limit: Uint128::new(1_000 * USD),
            },
            BridgeExecuteMsg::SetMaxSingleTransactionLimit {
                chain_id: remote_chain,
                limit: Uint128::new(100 * USD),
            },
            BridgeExecuteMsg::SetMaxDailyReceiveLimit {
                chain_id: remote_chain,
                limit: Uint128::new(1_000 * USD),
            },
            BridgeExecuteMsg::SetMaxSingleReceiveTransactionLimit {
                chain_id: remote_chain,
                limit: Uint128::new(100 * USD),
            },
        ];
        for msg in config {
            self.forward(side, msg).unwrap();
        }
    }

    pub(crate) fn chain(&self, side: Side) -> &Chain {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    /// Relay a bridge operation through the gateway as the operator
    pub(crate) fn forward(
        &mut self,
        side: Side,
        msg: BridgeExecuteMsg,
    ) -> anyhow::Result<AppResponse> {
        let gateway = self.chain(side).gateway.clone();
        self.app.execute_contract(
            Addr::unchecked(OPERATOR),
            gateway,
            &bridge_admin::msg::ExecuteMsg::Forward { msg },
            &[],
        )
    }

    /// Bridge call from any account
    pub(crate) fn bridge_exec(
        &mut self,
        side: Side,
        sender: &str,
        msg: &BridgeExecuteMsg,
    ) -> anyhow::Result<AppResponse> {
        let bridge = self.chain(side).bridge.clone();
        self.app
            .execute_contract(Addr::unchecked(sender), bridge, msg, &[])
    }

    pub(crate) fn send_msg(side: Side, from: &str, to: &[u8], amount: u128) -> BridgeExecuteMsg {
        BridgeExecuteMsg::SendFrom {
            from: from.to_string(),
            dst_chain_id: side.other().chain_id(),
            to_address: Binary::from(to),
            amount: Uint128::new(amount),
            refund_address: from.to_string(),
            zro_payment_address: None,
            adapter_params: adapter_params_v1(MIN_GAS),
        }
    }

    /// Send with the transport fee attached
    pub(crate) fn send_with(
        &mut self,
        side: Side,
        sender: &str,
        msg: &BridgeExecuteMsg,
    ) -> anyhow::Result<AppResponse> {
        let bridge = self.chain(side).bridge.clone();
        self.app.execute_contract(
            Addr::unchecked(sender),
            bridge,
            msg,
            &coins(FEE, "uluna"),
        )
    }

    /// Send from `side` to `to` on the other chain
    pub(crate) fn send(
        &mut self,
        side: Side,
        from: &str,
        to: &str,
        amount: u128,
    ) -> anyhow::Result<AppResponse> {
        self.send_with(side, from, &Self::send_msg(side, from, to.as_bytes(), amount))
    }

    /// Retry on `side` a message that came from the other chain
    pub(crate) fn retry(
        &mut self,
        side: Side,
        nonce: u64,
        payload: &Binary,
    ) -> anyhow::Result<AppResponse> {
        let msg = BridgeExecuteMsg::RetryMessage {
            src_chain_id: side.other().chain_id(),
            src_address: self.remote_of(side),
            nonce,
            payload: payload.clone(),
        };
        self.bridge_exec(side, "terra1relayer", &msg)
    }

    pub(crate) fn set_price(&mut self, side: Side, price: u128) {
        let token = self.chain(side).token.clone();
        self.app
            .execute_contract(
                Addr::unchecked(ADMIN),
                self.oracle.clone(),
                &mocks::oracle::ExecuteMsg::SetPrice {
                    asset: token.to_string(),
                    price: Uint128::new(price),
                },
                &[],
            )
            .unwrap();
    }

    /// Chain B issuance admin call
    pub(crate) fn token_b_exec(
        &mut self,
        msg: &multichain_token::msg::ExecuteMsg,
    ) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(Addr::unchecked(ADMIN), self.b.token.clone(), msg, &[])
    }

    pub(crate) fn set_mint_cap(&mut self, cap: u128) {
        let minter = self.b.bridge.to_string();
        self.token_b_exec(&multichain_token::msg::ExecuteMsg::SetMintCap {
            minter,
            amount: Uint128::new(cap),
        })
        .unwrap();
    }

    pub(crate) fn instantiate_receiver(&mut self, reject: bool) -> Addr {
        let code = self.app.store_code(contract_receiver());
        instantiate(
            &mut self.app,
            code,
            &mocks::receiver::InstantiateMsg { reject },
            "receiver",
        )
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Trusted remote of `side`: the other chain's bridge
    pub(crate) fn remote_of(&self, side: Side) -> Binary {
        Binary::from(self.chain(side.other()).bridge.as_bytes())
    }

    pub(crate) fn balance(&self, side: Side, account: &str) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                self.chain(side).token.clone(),
                &Cw20QueryMsg::Balance {
                    address: account.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub(crate) fn bridge_query<T: serde::de::DeserializeOwned>(
        &self,
        side: Side,
        msg: &BridgeQueryMsg,
    ) -> T {
        self.app
            .wrap()
            .query_wasm_smart(self.chain(side).bridge.clone(), msg)
            .unwrap()
    }

    pub(crate) fn failed_message(&self, side: Side, nonce: u64) -> Option<Binary> {
        self.bridge_query(
            side,
            &BridgeQueryMsg::FailedMessage {
                src_chain_id: side.other().chain_id(),
                src_address: self.remote_of(side),
                nonce,
            },
        )
    }

    pub(crate) fn circulating(&self, side: Side) -> u128 {
        self.bridge_query::<Uint128>(side, &BridgeQueryMsg::CirculatingSupply {})
            .u128()
    }

    pub(crate) fn minted_by_bridge_b(&self) -> multichain_token::msg::MinterResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                self.b.token.clone(),
                &multichain_token::msg::QueryMsg::Minter {
                    minter: self.b.bridge.to_string(),
                },
            )
            .unwrap()
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub(crate) fn send_payload(to: &str, amount_sd: u64) -> Binary {
    Payload::Send {
        to: to.as_bytes().to_vec(),
        amount_sd,
    }
    .encode()
    .unwrap()
}

pub(crate) fn event<'a>(res: &'a AppResponse, ty: &str) -> Option<&'a Event> {
    res.events.iter().find(|e| e.ty == format!("wasm-{ty}"))
}

pub(crate) fn attr(event: &Event, key: &str) -> String {
    event
        .attributes
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
        .unwrap_or_default()
}

/// Outcome of the delivery triggered by `res`
pub(crate) fn outcome(res: &AppResponse) -> Option<String> {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm")
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == "outcome")
        .map(|a| a.value.clone())
}

/// Nonce of the message parked by `res`
pub(crate) fn parked_nonce(res: &AppResponse) -> u64 {
    let failed = event(res, "message_failed").expect("message was not parked");
    attr(failed, "nonce").parse().unwrap()
}
