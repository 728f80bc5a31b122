//! Canonical hashing for channel identities and payment messages
//!
//! Both the arbiter and off-chain signers must agree on these encodings
//! byte for byte. Layouts follow Solidity's `abi.encode` so signatures made
//! with standard Ethereum tooling verify on chain.
//!
//! # Channel id (96 bytes hashed)
//! - Bytes 0-31:  keccak256(sender)
//! - Bytes 32-63: keccak256(recipient)
//! - Bytes 64-95: keccak256(token key)
//!
//! # Message hash (64 bytes hashed)
//! - Bytes 0-31:  channel id
//! - Bytes 32-63: value (uint256, big-endian, left-padded)

use tiny_keccak::{Hasher, Keccak};

/// Prefix applied by `eth_sign` / `personal_sign` to a 32-byte payload
pub const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Deterministic channel identity for the ordered pair `(sender, recipient)` over `token`.
///
/// Each component is hashed into its own 32-byte slot, so no two distinct
/// triples share an encoding.
pub fn compute_channel_id(sender: &str, recipient: &str, token: &str) -> [u8; 32] {
    let mut data = [0u8; 96];
    data[0..32].copy_from_slice(&keccak256(sender.as_bytes()));
    data[32..64].copy_from_slice(&keccak256(recipient.as_bytes()));
    data[64..96].copy_from_slice(&keccak256(token.as_bytes()));
    keccak256(&data)
}

/// Hash binding a claimed `value` to a channel.
///
/// Matches `keccak256(abi.encode(bytes32 channelId, uint256 value))`.
pub fn compute_message_hash(channel_id: &[u8; 32], value: u128) -> [u8; 32] {
    let mut data = [0u8; 64];
    data[0..32].copy_from_slice(channel_id);

    // u128 (16 bytes) goes into bytes 48-63, bytes 32-47 remain zero
    data[32 + 16..64].copy_from_slice(&value.to_be_bytes());

    keccak256(&data)
}

/// Digest actually signed by wallets for a 32-byte message hash.
pub fn eth_signed_message_digest(message_hash: &[u8; 32]) -> [u8; 32] {
    let mut data = [0u8; 60];
    data[0..28].copy_from_slice(ETH_SIGNED_MESSAGE_PREFIX);
    data[28..60].copy_from_slice(message_hash);
    keccak256(&data)
}

/// Ethereum-style address of an uncompressed secp256k1 public key.
///
/// Returns `None` unless `pubkey` is 65 bytes starting with `0x04`.
pub fn signer_address(pubkey: &[u8]) -> Option<[u8; 20]> {
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return None;
    }
    let hash = keccak256(&pubkey[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Some(address)
}

/// Hex string with `0x` prefix (for attributes and responses)
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex string (with or without 0x prefix) to a 20-byte address
pub fn hex_to_bytes20(input: &str) -> Result<[u8; 20], &'static str> {
    let mut result = [0u8; 20];
    decode_fixed(input, &mut result)?;
    Ok(result)
}

/// Parse hex string (with or without 0x prefix) to a 32-byte array
pub fn hex_to_bytes32(input: &str) -> Result<[u8; 32], &'static str> {
    let mut result = [0u8; 32];
    decode_fixed(input, &mut result)?;
    Ok(result)
}

fn decode_fixed(input: &str, out: &mut [u8]) -> Result<(), &'static str> {
    let input = input.strip_prefix("0x").unwrap_or(input);
    if input.len() != out.len() * 2 {
        return Err("Invalid hex length");
    }
    hex::decode_to_slice(input, out).map_err(|_| "Invalid hex character")
}
