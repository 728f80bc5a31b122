//! Channel opening handlers (Open and Receive).

use common::{bytes_to_hex, hex_to_bytes20, AssetInfo};
use cosmwasm_std::{
    from_json, Addr, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response, StdError, Uint128,
};
use cw20::Cw20ReceiveMsg;

use crate::error::ContractError;
use crate::escrow::{check_pushed_deposit, collect_deposit};
use crate::msg::ReceiveMsg;
use crate::state::{channel_key, Channel, ChannelStatus, CHANNELS, CONFIG, STATS, TOKEN_TOTALS};

/// Execute handler for opening a channel funded by attached coins or a CW20 allowance
#[allow(clippy::too_many_arguments)]
pub fn execute_open(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: AssetInfo,
    recipient: String,
    deposit: Uint128,
    challenge_period: u64,
    signer: String,
) -> Result<Response, ContractError> {
    let token = validate_asset(deps.as_ref(), token)?;
    let (channel_id, channel) = prepare_channel(
        deps.as_ref(),
        &env,
        info.sender.clone(),
        token,
        &recipient,
        deposit,
        challenge_period,
        &signer,
    )?;

    let messages = collect_deposit(
        deps.as_ref(),
        &env,
        &info.sender,
        &channel.token,
        deposit,
        &info.funds,
    )?;

    commit_open(deps, channel_id, channel, messages, "open")
}

/// Execute handler for opening a channel with CW20 tokens pushed via `Send`
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let sender = deps.api.addr_validate(&cw20_msg.sender)?;
    let token = AssetInfo::cw20(info.sender.to_string());

    let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;

    match receive_msg {
        ReceiveMsg::Open {
            recipient,
            deposit,
            challenge_period,
            signer,
        } => {
            let (channel_id, channel) = prepare_channel(
                deps.as_ref(),
                &env,
                sender,
                token,
                &recipient,
                deposit,
                challenge_period,
                &signer,
            )?;

            check_pushed_deposit(deposit, cw20_msg.amount)?;

            commit_open(deps, channel_id, channel, vec![], "open_cw20")
        }
    }
}

/// Validate everything about a new channel that does not involve moving funds.
#[allow(clippy::too_many_arguments)]
fn prepare_channel(
    deps: Deps,
    env: &Env,
    sender: Addr,
    token: AssetInfo,
    recipient: &str,
    deposit: Uint128,
    challenge_period: u64,
    signer: &str,
) -> Result<([u8; 32], Channel), ContractError> {
    let recipient = deps.api.addr_validate(recipient)?;
    if recipient == sender {
        return Err(ContractError::InvalidParties);
    }

    if deposit.is_zero() {
        return Err(ContractError::ZeroDeposit);
    }

    let config = CONFIG.load(deps.storage)?;
    if challenge_period > config.max_challenge_period {
        return Err(ContractError::InvalidChallengePeriod {
            period: challenge_period,
            max: config.max_challenge_period,
        });
    }

    let signer = hex_to_bytes20(signer).map_err(|e| ContractError::InvalidSigner {
        reason: e.to_string(),
    })?;
    if signer == [0u8; 20] {
        return Err(ContractError::InvalidSigner {
            reason: "zero address".to_string(),
        });
    }

    let channel_id = channel_key(&sender, &recipient, &token);
    if CHANNELS.has(deps.storage, &channel_id) {
        return Err(ContractError::ChannelAlreadyOpen {
            channel_id: bytes_to_hex(&channel_id),
        });
    }

    let channel = Channel {
        sender,
        recipient,
        signer,
        token,
        deposit,
        value: Uint128::zero(),
        nonce: 0,
        status: ChannelStatus::Open,
        challenge_period,
        closing_time: None,
        opened_at: env.block.time,
    };

    Ok((channel_id, channel))
}

fn commit_open(
    deps: DepsMut,
    channel_id: [u8; 32],
    channel: Channel,
    messages: Vec<CosmosMsg>,
    method: &str,
) -> Result<Response, ContractError> {
    CHANNELS.save(deps.storage, &channel_id, &channel)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.channels_opened += 1;
    STATS.save(deps.storage, &stats)?;

    let token_key = channel.token.key();
    let mut totals = TOKEN_TOTALS
        .may_load(deps.storage, token_key)?
        .unwrap_or_default();
    totals.deposited = totals
        .deposited
        .checked_add(channel.deposit)
        .map_err(StdError::from)?;
    TOKEN_TOTALS.save(deps.storage, token_key, &totals)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", method)
        .add_attribute("channel_id", bytes_to_hex(&channel_id))
        .add_attribute("sender", channel.sender)
        .add_attribute("recipient", channel.recipient)
        .add_attribute("token", channel.token.to_string())
        .add_attribute("deposit", channel.deposit)
        .add_attribute("challenge_period", channel.challenge_period.to_string())
        .add_attribute("signer", bytes_to_hex(&channel.signer))
        .add_attribute("status", channel.status.as_str()))
}

/// Normalize a CW20 contract address; native denoms pass through.
fn validate_asset(deps: Deps, token: AssetInfo) -> Result<AssetInfo, ContractError> {
    match token {
        AssetInfo::Native { denom } => Ok(AssetInfo::Native { denom }),
        AssetInfo::Cw20 { contract_addr } => {
            let addr = deps.api.addr_validate(&contract_addr)?;
            Ok(AssetInfo::cw20(addr.to_string()))
        }
    }
}
