//! Shared setup for token channel integration tests.

#![allow(dead_code)]

use common::{bytes_to_hex, compute_message_hash, eth_signed_message_digest, signer_address, AssetInfo};
use cosmwasm_std::{coins, Addr, Binary, Empty, Uint128};
use cw20::{Cw20Coin, Cw20ExecuteMsg};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use k256::ecdsa::SigningKey;

use token_channels::msg::{
    ChannelIdResponse, ChannelResponse, ExecuteMsg, InstantiateMsg, QueryMsg, SignedMessage,
    TokenStatsResponse,
};

pub const SENDER: &str = "terra1sender";
pub const RECIPIENT: &str = "terra1recipient";
pub const STRANGER: &str = "terra1stranger";
pub const DENOM: &str = "uluna";

pub const DAY: u64 = 86_400;
/// 5 tokens at 6 decimals
pub const DEPOSIT: u128 = 5_000_000;
pub const INITIAL_BALANCE: u128 = 100_000_000;

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_channels() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        token_channels::contract::execute,
        token_channels::contract::instantiate,
        token_channels::contract::query,
    );
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

/// Funded sender/recipient/stranger and an instantiated channels contract
pub fn setup() -> (App, Addr) {
    let mut app = App::default();

    app.init_modules(|router, _, storage| {
        for account in [SENDER, RECIPIENT, STRANGER] {
            router
                .bank
                .init_balance(storage, &Addr::unchecked(account), coins(INITIAL_BALANCE, DENOM))
                .unwrap();
        }
    });

    let code_id = app.store_code(contract_channels());
    let contract_addr = app
        .instantiate_contract(
            code_id,
            Addr::unchecked(SENDER),
            &InstantiateMsg {
                max_challenge_period: None,
            },
            &[],
            "token-channels",
            None,
        )
        .unwrap();

    (app, contract_addr)
}

/// CW20 token with `INITIAL_BALANCE` minted to the sender
pub fn setup_cw20(app: &mut App) -> Addr {
    let code_id = app.store_code(contract_cw20());
    app.instantiate_contract(
        code_id,
        Addr::unchecked(SENDER),
        &cw20_base::msg::InstantiateMsg {
            name: "Channel Token".to_string(),
            symbol: "CHT".to_string(),
            decimals: 6,
            initial_balances: vec![Cw20Coin {
                address: SENDER.to_string(),
                amount: Uint128::new(INITIAL_BALANCE),
            }],
            mint: None,
            marketing: None,
        },
        &[],
        "cw20-channel-token",
        None,
    )
    .unwrap()
}

// ============================================================================
// Off-channel signing
// ============================================================================

/// secp256k1 key signing payment messages off-channel
pub struct Signer {
    key: SigningKey,
}

impl Signer {
    pub fn new(seed: u8) -> Self {
        Signer {
            key: SigningKey::from_slice(&[seed; 32]).unwrap(),
        }
    }

    pub fn address(&self) -> String {
        let point = self.key.verifying_key().to_encoded_point(false);
        bytes_to_hex(&signer_address(point.as_bytes()).unwrap())
    }

    pub fn sign(&self, channel_id: &Binary, value: u128) -> SignedMessage {
        let id: [u8; 32] = channel_id.to_vec().try_into().unwrap();
        let message_hash = compute_message_hash(&id, value);
        let digest = eth_signed_message_digest(&message_hash);
        let (signature, recovery_id) = self.key.sign_prehash_recoverable(&digest).unwrap();
        let bytes = signature.to_bytes();

        SignedMessage {
            channel_id: channel_id.clone(),
            message_hash: Binary::from(message_hash.to_vec()),
            r: Binary::from(bytes[..32].to_vec()),
            s: Binary::from(bytes[32..].to_vec()),
            v: recovery_id.to_byte() + 27,
        }
    }
}

/// Key the sender signs with in most tests
pub fn sender_signer() -> Signer {
    Signer::new(0x11)
}

// ============================================================================
// Actions
// ============================================================================

/// Open a native-token channel SENDER -> RECIPIENT and return its id
pub fn open_native(
    app: &mut App,
    contract_addr: &Addr,
    challenge_period: u64,
    signer: &Signer,
) -> Binary {
    app.execute_contract(
        Addr::unchecked(SENDER),
        contract_addr.clone(),
        &ExecuteMsg::Open {
            token: AssetInfo::native(DENOM),
            recipient: RECIPIENT.to_string(),
            deposit: Uint128::new(DEPOSIT),
            challenge_period,
            signer: signer.address(),
        },
        &coins(DEPOSIT, DENOM),
    )
    .unwrap();

    channel_id(app, contract_addr, AssetInfo::native(DENOM))
}

/// Open a CW20 channel SENDER -> RECIPIENT through an allowance and return its id
pub fn open_cw20(
    app: &mut App,
    contract_addr: &Addr,
    token: &Addr,
    challenge_period: u64,
    signer: &Signer,
) -> Binary {
    app.execute_contract(
        Addr::unchecked(SENDER),
        token.clone(),
        &Cw20ExecuteMsg::IncreaseAllowance {
            spender: contract_addr.to_string(),
            amount: Uint128::new(DEPOSIT),
            expires: None,
        },
        &[],
    )
    .unwrap();

    app.execute_contract(
        Addr::unchecked(SENDER),
        contract_addr.clone(),
        &ExecuteMsg::Open {
            token: AssetInfo::cw20(token.to_string()),
            recipient: RECIPIENT.to_string(),
            deposit: Uint128::new(DEPOSIT),
            challenge_period,
            signer: signer.address(),
        },
        &[],
    )
    .unwrap();

    channel_id(app, contract_addr, AssetInfo::cw20(token.to_string()))
}

pub fn close(
    app: &mut App,
    caller: &str,
    contract_addr: &Addr,
    message: SignedMessage,
    value: u128,
    nonce: u64,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        Addr::unchecked(caller),
        contract_addr.clone(),
        &ExecuteMsg::Close {
            message,
            value: Uint128::new(value),
            nonce,
        },
        &[],
    )
}

pub fn challenge(
    app: &mut App,
    caller: &str,
    contract_addr: &Addr,
    message: SignedMessage,
    value: u128,
    nonce: u64,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        Addr::unchecked(caller),
        contract_addr.clone(),
        &ExecuteMsg::Challenge {
            message,
            value: Uint128::new(value),
            nonce,
        },
        &[],
    )
}

pub fn finalize(
    app: &mut App,
    caller: &str,
    contract_addr: &Addr,
    channel_id: &Binary,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        Addr::unchecked(caller),
        contract_addr.clone(),
        &ExecuteMsg::Finalize {
            channel_id: channel_id.clone(),
        },
        &[],
    )
}

pub fn advance_time(app: &mut App, seconds: u64) {
    app.update_block(|block| {
        block.time = block.time.plus_seconds(seconds);
        block.height += seconds / 5;
    });
}

// ============================================================================
// Queries
// ============================================================================

pub fn channel_id(app: &App, contract_addr: &Addr, token: AssetInfo) -> Binary {
    let res: ChannelIdResponse = app
        .wrap()
        .query_wasm_smart(
            contract_addr,
            &QueryMsg::ChannelId {
                sender: SENDER.to_string(),
                recipient: RECIPIENT.to_string(),
                token,
            },
        )
        .unwrap();
    res.channel_id
}

pub fn query_channel(app: &App, contract_addr: &Addr, channel_id: &Binary) -> ChannelResponse {
    app.wrap()
        .query_wasm_smart(
            contract_addr,
            &QueryMsg::Channel {
                channel_id: channel_id.clone(),
            },
        )
        .unwrap()
}

pub fn token_stats(app: &App, contract_addr: &Addr, token: AssetInfo) -> TokenStatsResponse {
    app.wrap()
        .query_wasm_smart(contract_addr, &QueryMsg::TokenStats { token })
        .unwrap()
}

pub fn native_balance(app: &App, account: &str) -> u128 {
    app.wrap()
        .query_balance(account, DENOM)
        .unwrap()
        .amount
        .u128()
}

pub fn cw20_balance(app: &App, token: &Addr, account: &str) -> u128 {
    let res: cw20::BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &cw20::Cw20QueryMsg::Balance {
                address: account.to_string(),
            },
        )
        .unwrap();
    res.balance.u128()
}

/// Innermost error message of a failed execution
pub fn err_string(res: anyhow::Result<AppResponse>) -> String {
    res.unwrap_err().root_cause().to_string()
}
