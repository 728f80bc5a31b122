//! Signature verification for off-channel payment messages.
//!
//! Authority to move the sender's funds comes from the recovered signer, never
//! from the transaction caller: close and challenge are routinely submitted by
//! the counterparty.

use common::{compute_message_hash, eth_signed_message_digest, signer_address};
use cosmwasm_std::{Api, Binary, Uint128};

use crate::error::ContractError;
use crate::msg::SignedMessage;

/// Parse a 32-byte value (channel id, hash, signature half) from `Binary`
pub fn parse_bytes32(input: &Binary) -> Result<[u8; 32], ContractError> {
    input
        .to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength { got: input.len() })
}

/// Map a recovery id to the secp256k1 parity bit.
///
/// Accepts the Ethereum encoding (27/28) and the raw one (0/1).
pub fn normalize_v(v: u8) -> Option<u8> {
    match v {
        0 | 1 => Some(v),
        27 | 28 => Some(v - 27),
        _ => None,
    }
}

/// Recover the Ethereum-style address that signed `message_hash`.
///
/// Returns `None` for malformed signatures or failed recovery.
pub fn recover_signer(
    api: &dyn Api,
    message_hash: &[u8; 32],
    message: &SignedMessage,
) -> Option<[u8; 20]> {
    let recovery_param = normalize_v(message.v)?;
    if message.r.len() != 32 || message.s.len() != 32 {
        return None;
    }

    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(message.r.as_slice());
    signature[32..].copy_from_slice(message.s.as_slice());

    let digest = eth_signed_message_digest(message_hash);
    let pubkey = api
        .secp256k1_recover_pubkey(&digest, &signature, recovery_param)
        .ok()?;
    signer_address(&pubkey)
}

/// Check that `message` authorizes `value` on `channel_id` and was signed by `expected_signer`.
///
/// The supplied hash must equal the canonical hash of `(channel_id, value)`,
/// so a valid signature over some other claim cannot be replayed.
pub fn verify_message(
    api: &dyn Api,
    channel_id: &[u8; 32],
    message: &SignedMessage,
    value: Uint128,
    expected_signer: &[u8; 20],
) -> bool {
    let expected_hash = compute_message_hash(channel_id, value.u128());
    if message.message_hash.as_slice() != expected_hash.as_slice() {
        return false;
    }

    recover_signer(api, &expected_hash, message).as_ref() == Some(expected_signer)
}
