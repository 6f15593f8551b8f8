// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! EIP-191 `personal_sign` messages: the requester's proof that they own
//! the withdrawal destination.

use alloy::primitives::Signature;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use hc_types::{Address, HexError};

use crate::error::ChainError;

/// `r ‖ s ‖ v` with `v = 27 + y parity`, as wallets return it.
pub fn sign_personal(signer: &PrivateKeySigner, message: &[u8]) -> Result<[u8; 65], ChainError> {
    let sig = signer
        .sign_message_sync(message)
        .map_err(|e| ChainError::Signing(e.to_string()))?;
    let mut out = sig.as_bytes();
    out[64] = 27 + u8::from(sig.v());
    Ok(out)
}

/// Address whose key produced `signature` over `message`, or `None` when the
/// signature does not recover to any key. `v` may be 27/28 or 0/1.
pub fn recover_signer(message: &[u8], signature: &[u8; 65]) -> Option<Address> {
    let sig = Signature::from_raw_array(signature).ok()?;
    sig.recover_address_from_msg(message).ok()
}

/// Parse a `0x`-optional 65-byte hex signature.
pub fn parse_signature(s: &str) -> Result<[u8; 65], HexError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| HexError::Invalid(e.to_string()))?;
    bytes.as_slice().try_into().map_err(|_| HexError::Length {
        expected: 65,
        got: bytes.len(),
    })
}
