//! Query handlers for the token channels contract.
//!
//! Read accessors never mutate state. Unknown channel ids fail with the
//! `ChannelNotFound` message.

use common::{bytes_to_hex, compute_message_hash, AssetInfo};
use cosmwasm_std::{Binary, Deps, Env, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::clock::remaining_challenge_period;
use crate::error::ContractError;
use crate::msg::{
    ChannelIdResponse, ChannelResponse, ChannelStatusResponse, ChannelsResponse, ConfigResponse,
    MessageHashResponse, RemainingChallengePeriodResponse, SignedMessage, StatsResponse,
    TokenStatsResponse, VerifyMessageResponse,
};
use crate::signature::{parse_bytes32, verify_message};
use crate::state::{channel_key, Channel, CHANNELS, CONFIG, STATS, TOKEN_TOTALS};

/// Default pagination limit
const DEFAULT_LIMIT: u32 = 10;
/// Maximum pagination limit
const MAX_LIMIT: u32 = 30;

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        max_challenge_period: config.max_challenge_period,
    })
}

/// Query lifetime statistics.
pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        channels_opened: stats.channels_opened,
        channels_settled: stats.channels_settled,
        challenges_accepted: stats.challenges_accepted,
    })
}

/// Query cumulative amounts for one token; zero for tokens never used.
pub fn query_token_stats(deps: Deps, token: AssetInfo) -> StdResult<TokenStatsResponse> {
    let totals = TOKEN_TOTALS
        .may_load(deps.storage, token.key())?
        .unwrap_or_default();
    Ok(TokenStatsResponse {
        token,
        total_deposited: totals.deposited,
        total_paid_to_recipients: totals.paid_to_recipients,
    })
}

// ============================================================================
// Channel Queries
// ============================================================================

/// Derive the channel id for `(sender, recipient, token)`; no record needs to exist.
pub fn query_channel_id(
    deps: Deps,
    sender: String,
    recipient: String,
    token: AssetInfo,
) -> StdResult<ChannelIdResponse> {
    let sender = deps.api.addr_validate(&sender)?;
    let recipient = deps.api.addr_validate(&recipient)?;
    let channel_id = channel_key(&sender, &recipient, &token);
    Ok(ChannelIdResponse {
        channel_id: Binary::from(channel_id.to_vec()),
    })
}

/// Query a live channel record.
pub fn query_channel(deps: Deps, channel_id: Binary) -> StdResult<ChannelResponse> {
    let (key, channel) = load_channel(deps, &channel_id)?;
    Ok(channel_response(&key, channel))
}

/// Query a live channel's status.
pub fn query_channel_status(deps: Deps, channel_id: Binary) -> StdResult<ChannelStatusResponse> {
    let (_, channel) = load_channel(deps, &channel_id)?;
    Ok(ChannelStatusResponse {
        status: channel.status,
    })
}

/// Query the seconds left in a channel's challenge window.
pub fn query_remaining_challenge_period(
    deps: Deps,
    env: Env,
    channel_id: Binary,
) -> StdResult<RemainingChallengePeriodResponse> {
    let (_, channel) = load_channel(deps, &channel_id)?;
    Ok(RemainingChallengePeriodResponse {
        remaining_seconds: remaining_challenge_period(&channel, env.block.time),
    })
}

/// List live channels ordered by id.
pub fn query_channels(
    deps: Deps,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<ChannelsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_ref().map(|s| Bound::exclusive(s.as_slice()));

    let channels = CHANNELS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (key, channel) = item?;
            Ok(channel_response(&key, channel))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ChannelsResponse { channels })
}

// ============================================================================
// Message Queries
// ============================================================================

/// Check a signed message against the channel's signer.
pub fn query_verify_message(
    deps: Deps,
    message: SignedMessage,
    value: Uint128,
) -> StdResult<VerifyMessageResponse> {
    let (key, channel) = load_channel(deps, &message.channel_id)?;
    Ok(VerifyMessageResponse {
        valid: verify_message(deps.api, &key, &message, value, &channel.signer),
    })
}

/// Compute the canonical message hash for `(channel_id, value)`.
pub fn query_compute_message_hash(
    channel_id: Binary,
    value: Uint128,
) -> StdResult<MessageHashResponse> {
    let channel_id = parse_bytes32(&channel_id).map_err(to_std_error)?;
    Ok(MessageHashResponse {
        message_hash: Binary::from(compute_message_hash(&channel_id, value.u128()).to_vec()),
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn load_channel(deps: Deps, channel_id: &Binary) -> StdResult<([u8; 32], Channel)> {
    let key = parse_bytes32(channel_id).map_err(to_std_error)?;
    let channel = CHANNELS
        .may_load(deps.storage, &key)?
        .ok_or_else(|| to_std_error(ContractError::ChannelNotFound))?;
    Ok((key, channel))
}

fn channel_response(key: &[u8], channel: Channel) -> ChannelResponse {
    ChannelResponse {
        channel_id: Binary::from(key.to_vec()),
        sender: channel.sender,
        recipient: channel.recipient,
        signer: bytes_to_hex(&channel.signer),
        token: channel.token,
        deposit: channel.deposit,
        value: channel.value,
        nonce: channel.nonce,
        status: channel.status,
        challenge_period: channel.challenge_period,
        closing_time: channel.closing_time,
        opened_at: channel.opened_at,
    }
}

fn to_std_error(err: ContractError) -> StdError {
    StdError::generic_err(err.to_string())
}
