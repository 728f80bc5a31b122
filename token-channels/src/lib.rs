//! Token Channels - Two-Party Payment Channels for CosmWasm
//!
//! A sender escrows tokens for a recipient, pays off-channel by signing
//! increasing claims, and either party settles on chain.
//!
//! # Lifecycle
//! 1. Sender calls `Open`, locking a deposit (native coins, a CW20 allowance,
//!    or a CW20 `Send`)
//! 2. Off-channel, the sender signs `(channel_id, value)` messages
//! 3. Recipient calls `Close` with the latest message and a nonce
//! 4. Without a challenge period the channel settles immediately; otherwise
//!    either party may `Challenge` with a higher nonce until the window ends
//! 5. After the window, anyone calls `Finalize` to pay out
//!
//! # Security
//! - Claims are authorized by secp256k1 signature recovery, not by the caller
//! - Higher nonce always wins; the window is fixed from the first close
//! - Payouts check custody before the record is removed
//! - Closed channels are deleted, freeing the identity for reuse

pub mod clock;
pub mod contract;
pub mod error;
pub mod escrow;
mod execute;
pub mod msg;
mod query;
pub mod signature;
pub mod state;

pub use crate::error::ContractError;
pub use crate::signature::verify_message;
pub use crate::state::{Channel, ChannelStatus};
