//! Error types for the token channels contract
//!
//! Every variant is a rejection of the requested operation. Handlers detect
//! them before touching storage or dispatching token messages.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Open Errors
    // ========================================================================

    #[error("Invalid parties: sender and recipient must differ")]
    InvalidParties,

    #[error("Deposit must be greater than zero")]
    ZeroDeposit,

    #[error("Deposit mismatch: declared {declared}, transferred {transferred}")]
    DepositMismatch {
        declared: Uint128,
        transferred: Uint128,
    },

    #[error("Allowance insufficient: need {required}, allowance {allowance}, balance {balance}")]
    AllowanceInsufficient {
        required: Uint128,
        allowance: Uint128,
        balance: Uint128,
    },

    #[error("Channel already open: {channel_id}")]
    ChannelAlreadyOpen { channel_id: String },

    #[error("Invalid signer: {reason}")]
    InvalidSigner { reason: String },

    #[error("Invalid challenge period: {period} seconds exceeds maximum {max}")]
    InvalidChallengePeriod { period: u64, max: u64 },

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================

    #[error("Channel not found")]
    ChannelNotFound,

    #[error("Channel not open")]
    ChannelNotOpen,

    #[error("Channel not closing")]
    ChannelNotClosing,

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only the recipient can close the channel")]
    NotRecipient,

    #[error("Unauthorized: caller is not a party to the channel")]
    NotChannelParty,

    #[error("Funds not accepted: {method} does not take attached coins")]
    FundsNotAccepted { method: String },

    #[error("Bad signature")]
    BadSignature,

    // ========================================================================
    // Nonce & Value Errors
    // ========================================================================

    #[error("Stale nonce: got {got}, current {current}")]
    StaleNonce { got: u64, current: u64 },

    #[error("Nonce not increasing: got {got}, current {current}")]
    NonceNotIncreasing { got: u64, current: u64 },

    #[error("Value {value} exceeds deposit {deposit}")]
    ValueExceedsDeposit { value: Uint128, deposit: Uint128 },

    // ========================================================================
    // Challenge Window Errors
    // ========================================================================

    #[error("Challenge period expired")]
    ChallengePeriodExpired,

    #[error("Challenge period not elapsed: {remaining_seconds} seconds remaining")]
    ChallengePeriodNotElapsed { remaining_seconds: u64 },

    // ========================================================================
    // Custody Errors
    // ========================================================================

    #[error("Transfer failed: custody holds {available} {token}, need {required}")]
    TransferFailed {
        token: String,
        available: Uint128,
        required: Uint128,
    },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },
}
