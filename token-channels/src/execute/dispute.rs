//! Settlement handlers.
//!
//! - `Close` - Recipient submits the latest signed claim (settles at once without a window)
//! - `Challenge` - Either party replaces the claim with a higher-nonce message
//! - `Finalize` - Anyone settles once the window has elapsed
//!
//! The window always runs from the first close; challenges never extend it.

use common::bytes_to_hex;
use cosmwasm_std::{Binary, DepsMut, Env, Event, MessageInfo, Response, StdError, Uint128};

use crate::clock::remaining_challenge_period;
use crate::error::ContractError;
use crate::escrow::settlement_messages;
use crate::msg::SignedMessage;
use crate::signature::{parse_bytes32, verify_message};
use crate::state::{Channel, ChannelStatus, CHANNELS, STATS, TOKEN_TOTALS};

/// Execute handler for closing a channel (recipient only).
pub fn execute_close(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message: SignedMessage,
    value: Uint128,
    nonce: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info, "close")?;
    let channel_id = parse_bytes32(&message.channel_id)?;
    let mut channel = CHANNELS
        .may_load(deps.storage, &channel_id)?
        .ok_or(ContractError::ChannelNotFound)?;

    if info.sender != channel.recipient {
        return Err(ContractError::NotRecipient);
    }
    if channel.status != ChannelStatus::Open {
        return Err(ContractError::ChannelNotOpen);
    }
    if !verify_message(deps.api, &channel_id, &message, value, &channel.signer) {
        return Err(ContractError::BadSignature);
    }
    if nonce <= channel.nonce {
        return Err(ContractError::StaleNonce {
            got: nonce,
            current: channel.nonce,
        });
    }
    if value > channel.deposit {
        return Err(ContractError::ValueExceedsDeposit {
            value,
            deposit: channel.deposit,
        });
    }

    channel.value = value;
    channel.nonce = nonce;

    if channel.challenge_period == 0 {
        return settle(deps, &env, channel_id, channel, "close");
    }

    channel.status = ChannelStatus::Closing;
    channel.closing_time = Some(env.block.time);
    CHANNELS.save(deps.storage, &channel_id, &channel)?;

    Ok(Response::new()
        .add_attribute("method", "close")
        .add_attribute("channel_id", bytes_to_hex(&channel_id))
        .add_attribute("value", value)
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("status", channel.status.as_str())
        .add_attribute("closing_time", env.block.time.seconds().to_string())
        .add_attribute("challenge_period", channel.challenge_period.to_string()))
}

/// Execute handler for challenging a closing channel (sender or recipient).
pub fn execute_challenge(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message: SignedMessage,
    value: Uint128,
    nonce: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info, "challenge")?;
    let channel_id = parse_bytes32(&message.channel_id)?;
    let mut channel = CHANNELS
        .may_load(deps.storage, &channel_id)?
        .ok_or(ContractError::ChannelNotFound)?;

    if info.sender != channel.sender && info.sender != channel.recipient {
        return Err(ContractError::NotChannelParty);
    }
    if channel.status != ChannelStatus::Closing {
        return Err(ContractError::ChannelNotClosing);
    }
    let remaining = remaining_challenge_period(&channel, env.block.time);
    if remaining == 0 {
        return Err(ContractError::ChallengePeriodExpired);
    }
    if !verify_message(deps.api, &channel_id, &message, value, &channel.signer) {
        return Err(ContractError::BadSignature);
    }
    if nonce <= channel.nonce {
        return Err(ContractError::NonceNotIncreasing {
            got: nonce,
            current: channel.nonce,
        });
    }
    if value > channel.deposit {
        return Err(ContractError::ValueExceedsDeposit {
            value,
            deposit: channel.deposit,
        });
    }

    // closing_time stays put
    channel.value = value;
    channel.nonce = nonce;
    CHANNELS.save(deps.storage, &channel_id, &channel)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.challenges_accepted += 1;
    STATS.save(deps.storage, &stats)?;

    let channel_id_hex = bytes_to_hex(&channel_id);
    let event = Event::new("channel_challenged")
        .add_attribute("channel_id", channel_id_hex.clone())
        .add_attribute("value", value)
        .add_attribute("nonce", nonce.to_string());

    Ok(Response::new()
        .add_event(event)
        .add_attribute("method", "challenge")
        .add_attribute("channel_id", channel_id_hex)
        .add_attribute("challenger", info.sender)
        .add_attribute("value", value)
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("remaining_seconds", remaining.to_string()))
}

/// Execute handler for finalizing a channel after its window (anyone).
pub fn execute_finalize(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    channel_id: Binary,
) -> Result<Response, ContractError> {
    reject_funds(&info, "finalize")?;
    let channel_id = parse_bytes32(&channel_id)?;
    let channel = CHANNELS
        .may_load(deps.storage, &channel_id)?
        .ok_or(ContractError::ChannelNotFound)?;

    if channel.status != ChannelStatus::Closing {
        return Err(ContractError::ChannelNotClosing);
    }
    let remaining = remaining_challenge_period(&channel, env.block.time);
    if remaining > 0 {
        return Err(ContractError::ChallengePeriodNotElapsed {
            remaining_seconds: remaining,
        });
    }

    settle(deps, &env, channel_id, channel, "finalize")
}

/// Settlement calls only move funds out of custody.
fn reject_funds(info: &MessageInfo, method: &str) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::FundsNotAccepted {
            method: method.to_string(),
        });
    }
    Ok(())
}

/// Pay out a channel and remove its record.
///
/// Custody is checked before the record is touched; the payout messages and
/// the removal then commit together.
fn settle(
    deps: DepsMut,
    env: &Env,
    channel_id: [u8; 32],
    mut channel: Channel,
    method: &str,
) -> Result<Response, ContractError> {
    let messages = settlement_messages(deps.as_ref(), env, &channel)?;
    let (to_recipient, to_sender) = channel.settlement();

    CHANNELS.remove(deps.storage, &channel_id);
    channel.status = ChannelStatus::Closed;

    let mut stats = STATS.load(deps.storage)?;
    stats.channels_settled += 1;
    STATS.save(deps.storage, &stats)?;

    let token_key = channel.token.key();
    let mut totals = TOKEN_TOTALS
        .may_load(deps.storage, token_key)?
        .unwrap_or_default();
    totals.paid_to_recipients = totals
        .paid_to_recipients
        .checked_add(to_recipient)
        .map_err(StdError::from)?;
    TOKEN_TOTALS.save(deps.storage, token_key, &totals)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", method)
        .add_attribute("channel_id", bytes_to_hex(&channel_id))
        .add_attribute("value", channel.value)
        .add_attribute("nonce", channel.nonce.to_string())
        .add_attribute("status", channel.status.as_str())
        .add_attribute("payout_recipient", to_recipient)
        .add_attribute("refund_sender", to_sender))
}
