//! Common - Shared Types and Utilities for Token Channels
//!
//! This package provides the asset model and the canonical hashing used by
//! both the on-chain arbiter and off-chain signers, so a client preparing a
//! payment message computes exactly the digest the contract recovers against.

pub mod asset;
pub mod hash;

pub use asset::AssetInfo;
pub use hash::{
    bytes_to_hex, compute_channel_id, compute_message_hash, eth_signed_message_digest,
    hex_to_bytes20, hex_to_bytes32, keccak256, signer_address,
};
