//! Challenge window timing.
//!
//! Every expiry decision in `challenge` and `finalize` goes through
//! [`remaining_challenge_period`], so both agree on the boundary: the window
//! is over exactly when the remaining period reaches zero.

use cosmwasm_std::Timestamp;

use crate::state::{Channel, ChannelStatus};

/// Seconds left before a closing channel can be finalized.
///
/// - `Open`: the configured period (the window has not started)
/// - `Closing`: `max(0, challenge_period - (now - closing_time))`
/// - `Closed`: 0
pub fn remaining_challenge_period(channel: &Channel, now: Timestamp) -> u64 {
    match channel.status {
        ChannelStatus::Open => channel.challenge_period,
        ChannelStatus::Closing => {
            let started = channel.closing_time.unwrap_or(now);
            let elapsed = now.seconds().saturating_sub(started.seconds());
            channel.challenge_period.saturating_sub(elapsed)
        }
        ChannelStatus::Closed => 0,
    }
}
