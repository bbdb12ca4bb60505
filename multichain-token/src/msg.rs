use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::{
    AllAccountsResponse, AllowanceResponse, BalanceResponse, Cw20Coin, Expiration,
    TokenInfoResponse,
};

// ============================================================================
// Instantiate / Migrate
// ============================================================================

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub permission_authority: String,
    pub initial_balances: Vec<Cw20Coin>,
}

#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Execute
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ------------------------------------------------------------------------
    // Issuance (gated by the permission authority)
    // ------------------------------------------------------------------------
    /// Mint against the caller's cap
    Mint { recipient: String, amount: Uint128 },
    /// Burn from `account` and give the caller back that much capacity
    Burn { account: String, amount: Uint128 },
    SetMintCap { minter: String, amount: Uint128 },
    /// Move the whole minted balance of `source` onto `destination`
    MigrateMinterTokens { source: String, destination: String },
    UpdateBlacklist { user: String, value: bool },
    Pause {},
    Unpause {},

    // ------------------------------------------------------------------------
    // Owner
    // ------------------------------------------------------------------------
    SetPermissionAuthority { authority: String },

    // ------------------------------------------------------------------------
    // cw20
    // ------------------------------------------------------------------------
    Transfer {
        recipient: String,
        amount: Uint128,
    },
    Send {
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
    IncreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    DecreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    SendFrom {
        owner: String,
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
    BurnFrom { owner: String, amount: Uint128 },
}

impl ExecuteMsg {
    /// Name under which the permission authority grants this operation,
    /// `None` for ungated messages.
    pub fn gated_operation(&self) -> Option<&'static str> {
        match self {
            ExecuteMsg::Mint { .. } => Some("mint"),
            ExecuteMsg::Burn { .. } => Some("burn"),
            ExecuteMsg::SetMintCap { .. } => Some("set_mint_cap"),
            ExecuteMsg::MigrateMinterTokens { .. } => Some("migrate_minter_tokens"),
            ExecuteMsg::UpdateBlacklist { .. } => Some("update_blacklist"),
            ExecuteMsg::Pause {} => Some("pause"),
            ExecuteMsg::Unpause {} => Some("unpause"),
            _ => None,
        }
    }
}

// ============================================================================
// Query
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(BalanceResponse)]
    Balance { address: String },

    #[returns(TokenInfoResponse)]
    TokenInfo {},

    #[returns(AllowanceResponse)]
    Allowance { owner: String, spender: String },

    #[returns(AllAccountsResponse)]
    AllAccounts {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(MinterResponse)]
    Minter { minter: String },

    #[returns(bool)]
    IsBlacklisted { account: String },

    #[returns(bool)]
    Paused {},

    #[returns(ConfigResponse)]
    Config {},
}

#[cw_serde]
pub struct MinterResponse {
    pub minter: Addr,
    pub cap: Uint128,
    pub minted: Uint128,
    pub available: Uint128,
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub permission_authority: Addr,
    pub paused: bool,
}
