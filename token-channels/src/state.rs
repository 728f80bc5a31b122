//! State definitions for the token channels contract
//!
//! The channel registry owns every channel record. Closed channels are
//! removed rather than tombstoned, so the `(sender, recipient, token)`
//! identity can be opened again.

use common::{compute_channel_id, AssetInfo};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Upper bound accepted for a channel's challenge period (seconds)
    pub max_challenge_period: u64,
}

/// Lifetime counters
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub channels_opened: u64,
    pub channels_settled: u64,
    pub challenges_accepted: u64,
}

/// Cumulative amounts for a single token.
///
/// Kept apart per token: amounts of different assets are not comparable, and
/// an arbitrary CW20 supply must not affect the totals of any other token.
#[cw_serde]
#[derive(Default)]
pub struct TokenTotals {
    /// Sum of all deposits ever taken into custody
    pub deposited: Uint128,
    /// Sum of all values paid out to recipients
    pub paid_to_recipients: Uint128,
}

// ============================================================================
// Channel Record
// ============================================================================

#[cw_serde]
pub enum ChannelStatus {
    Open,
    Closing,
    /// Terminal. Never persisted: reaching it removes the record.
    Closed,
}

impl ChannelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelStatus::Open => "open",
            ChannelStatus::Closing => "closing",
            ChannelStatus::Closed => "closed",
        }
    }
}

/// Escrow record for a directional value claim from `sender` to `recipient`
#[cw_serde]
pub struct Channel {
    /// Party that deposited the funds
    pub sender: Addr,
    /// Counterparty receiving value
    pub recipient: Addr,
    /// Ethereum-style address of the secp256k1 key signing for `sender`
    pub signer: [u8; 20],
    /// Escrowed asset
    pub token: AssetInfo,
    /// Amount locked at open, immutable afterwards
    pub deposit: Uint128,
    /// Latest accepted claim, always `<= deposit`
    pub value: Uint128,
    /// Nonce of the latest accepted signed message (0 at open)
    pub nonce: u64,
    pub status: ChannelStatus,
    /// Dispute window in seconds; 0 settles on close
    pub challenge_period: u64,
    /// Set when the channel enters `Closing`
    pub closing_time: Option<Timestamp>,
    pub opened_at: Timestamp,
}

impl Channel {
    /// Split of the deposit as `(to_recipient, to_sender)`.
    pub fn settlement(&self) -> (Uint128, Uint128) {
        (self.value, self.deposit - self.value)
    }
}

/// Channel id for the ordered pair `(sender, recipient)` over `token`
pub fn channel_key(sender: &Addr, recipient: &Addr, token: &AssetInfo) -> [u8; 32] {
    compute_channel_id(sender.as_str(), recipient.as_str(), token.key())
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 info
pub const CONTRACT_NAME: &str = "crates.io:token-channels";

pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 30 days in seconds
pub const DEFAULT_MAX_CHALLENGE_PERIOD: u64 = 2_592_000;

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const STATS: Item<Stats> = Item::new("stats");

/// Per-token totals
/// Key: `AssetInfo::key()` (denom or CW20 address), Value: TokenTotals
pub const TOKEN_TOTALS: Map<&str, TokenTotals> = Map::new("token_totals");

/// Live channels indexed by channel id
/// Key: 32-byte channel id as &[u8], Value: Channel
pub const CHANNELS: Map<&[u8], Channel> = Map::new("channels");
