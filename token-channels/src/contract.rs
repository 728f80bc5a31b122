//! Token Channels Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_challenge, execute_close, execute_finalize, execute_open, execute_receive,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query::{
    query_channel, query_channel_id, query_channel_status, query_channels,
    query_compute_message_hash, query_config, query_remaining_challenge_period, query_stats,
    query_token_stats, query_verify_message,
};
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_MAX_CHALLENGE_PERIOD, STATS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let max_challenge_period = msg
        .max_challenge_period
        .unwrap_or(DEFAULT_MAX_CHALLENGE_PERIOD);
    if max_challenge_period == 0 {
        return Err(ContractError::InvalidChallengePeriod { period: 0, max: 0 });
    }

    CONFIG.save(
        deps.storage,
        &Config {
            max_challenge_period,
        },
    )?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("max_challenge_period", max_challenge_period.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Open {
            token,
            recipient,
            deposit,
            challenge_period,
            signer,
        } => execute_open(
            deps,
            env,
            info,
            token,
            recipient,
            deposit,
            challenge_period,
            signer,
        ),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),

        // Settlement
        ExecuteMsg::Close {
            message,
            value,
            nonce,
        } => execute_close(deps, env, info, message, value, nonce),
        ExecuteMsg::Challenge {
            message,
            value,
            nonce,
        } => execute_challenge(deps, env, info, message, value, nonce),
        ExecuteMsg::Finalize { channel_id } => execute_finalize(deps, env, info, channel_id),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::TokenStats { token } => to_json_binary(&query_token_stats(deps, token)?),

        // Channel queries
        QueryMsg::ChannelId {
            sender,
            recipient,
            token,
        } => to_json_binary(&query_channel_id(deps, sender, recipient, token)?),
        QueryMsg::Channel { channel_id } => to_json_binary(&query_channel(deps, channel_id)?),
        QueryMsg::ChannelStatus { channel_id } => {
            to_json_binary(&query_channel_status(deps, channel_id)?)
        }
        QueryMsg::RemainingChallengePeriod { channel_id } => {
            to_json_binary(&query_remaining_challenge_period(deps, env, channel_id)?)
        }
        QueryMsg::Channels { start_after, limit } => {
            to_json_binary(&query_channels(deps, start_after, limit)?)
        }

        // Message queries
        QueryMsg::VerifyMessage { message, value } => {
            to_json_binary(&query_verify_message(deps, message, value)?)
        }
        QueryMsg::ComputeMessageHash { channel_id, value } => {
            to_json_binary(&query_compute_message_hash(channel_id, value)?)
        }
    }
}
