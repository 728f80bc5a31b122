//! Message types for the token channels contract
//!
//! This module defines all messages for instantiation, execution, and queries.

use common::AssetInfo;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};

use crate::state::ChannelStatus;

// ============================================================================
// Instantiate
// ============================================================================

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Upper bound for per-channel challenge periods in seconds (default: 30 days)
    pub max_challenge_period: Option<u64>,
}

// ============================================================================
// Signed Messages
// ============================================================================

/// Off-channel payment message signed by the channel's sender.
///
/// `message_hash` must equal `keccak256(abi.encode(channel_id, value))`;
/// the signature is over the Ethereum signed-message digest of that hash.
#[cw_serde]
pub struct SignedMessage {
    /// 32-byte channel id
    pub channel_id: Binary,
    /// 32-byte message hash
    pub message_hash: Binary,
    /// 32-byte signature `r`
    pub r: Binary,
    /// 32-byte signature `s`
    pub s: Binary,
    /// Recovery id (27/28, or 0/1)
    pub v: u8,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    /// Open a channel from the caller to `recipient`.
    ///
    /// Native tokens: attach exactly `deposit` of the denom.
    /// CW20 tokens: approve this contract for `deposit` beforehand, attach nothing.
    Open {
        token: AssetInfo,
        recipient: String,
        deposit: Uint128,
        /// Dispute window in seconds (0 = close settles immediately)
        challenge_period: u64,
        /// Hex address of the key that signs payment messages for the caller.
        ///
        /// Message hashes bind only `(channel_id, value)`, and a channel id is
        /// reused when the same parties reopen over the same token. Use a
        /// fresh signer for every reopen so messages signed for an earlier
        /// lifetime of the channel no longer verify.
        signer: String,
    },

    /// Open a channel with CW20 tokens pushed via `Send`
    /// Implements CW20 Receiver interface
    Receive(cw20::Cw20ReceiveMsg),

    /// Close with the latest signed message.
    ///
    /// Authorization: recipient only
    Close {
        message: SignedMessage,
        value: Uint128,
        nonce: u64,
    },

    /// Replace the closing claim with a higher-nonce signed message.
    ///
    /// Authorization: sender or recipient, while the window is running
    Challenge {
        message: SignedMessage,
        value: Uint128,
        nonce: u64,
    },

    /// Settle a closing channel once its window has elapsed.
    ///
    /// Authorization: anyone
    Finalize { channel_id: Binary },
}

/// CW20 receive hook payloads
#[cw_serde]
pub enum ReceiveMsg {
    /// Open a channel using the sent tokens as deposit
    Open {
        recipient: String,
        deposit: Uint128,
        challenge_period: u64,
        /// Same rules as `ExecuteMsg::Open::signer`; rotate on reopen
        signer: String,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns lifetime statistics
    #[returns(StatsResponse)]
    Stats {},

    /// Returns cumulative deposit and payout amounts for one token
    #[returns(TokenStatsResponse)]
    TokenStats { token: AssetInfo },

    /// Derives the channel id for `(sender, recipient, token)`
    #[returns(ChannelIdResponse)]
    ChannelId {
        sender: String,
        recipient: String,
        token: AssetInfo,
    },

    /// Returns a live channel record
    #[returns(ChannelResponse)]
    Channel { channel_id: Binary },

    /// Returns a live channel's status
    #[returns(ChannelStatusResponse)]
    ChannelStatus { channel_id: Binary },

    /// Returns seconds left in a channel's challenge window
    #[returns(RemainingChallengePeriodResponse)]
    RemainingChallengePeriod { channel_id: Binary },

    /// Lists live channels ordered by id
    #[returns(ChannelsResponse)]
    Channels {
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    /// Checks a signed message against the channel's signer
    #[returns(VerifyMessageResponse)]
    VerifyMessage {
        message: SignedMessage,
        value: Uint128,
    },

    /// Computes the canonical message hash for `(channel_id, value)`
    #[returns(MessageHashResponse)]
    ComputeMessageHash { channel_id: Binary, value: Uint128 },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub max_challenge_period: u64,
}

#[cw_serde]
pub struct StatsResponse {
    pub channels_opened: u64,
    pub channels_settled: u64,
    pub challenges_accepted: u64,
}

#[cw_serde]
pub struct TokenStatsResponse {
    pub token: AssetInfo,
    pub total_deposited: Uint128,
    pub total_paid_to_recipients: Uint128,
}

#[cw_serde]
pub struct ChannelIdResponse {
    pub channel_id: Binary,
}

#[cw_serde]
pub struct ChannelResponse {
    pub channel_id: Binary,
    pub sender: Addr,
    pub recipient: Addr,
    /// Hex address of the sender's signing key
    pub signer: String,
    pub token: AssetInfo,
    pub deposit: Uint128,
    pub value: Uint128,
    pub nonce: u64,
    pub status: ChannelStatus,
    pub challenge_period: u64,
    pub closing_time: Option<Timestamp>,
    pub opened_at: Timestamp,
}

#[cw_serde]
pub struct ChannelStatusResponse {
    pub status: ChannelStatus,
}

#[cw_serde]
pub struct RemainingChallengePeriodResponse {
    pub remaining_seconds: u64,
}

#[cw_serde]
pub struct ChannelsResponse {
    pub channels: Vec<ChannelResponse>,
}

#[cw_serde]
pub struct VerifyMessageResponse {
    pub valid: bool,
}

#[cw_serde]
pub struct MessageHashResponse {
    pub message_hash: Binary,
}
