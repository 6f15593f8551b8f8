// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Calldata for the pool calls the relay makes, and decoding of what they
//! return.

use alloy_sol_types::{sol, Revert, SolCall, SolError, SolValue};
use hc_types::{BucketId, EncodedPoint, EncodedScalar, RingHash, WithdrawCall, U256};

use crate::error::ChainError;

sol! {
    function withdraw(
        address receiver,
        uint256 amount,
        uint256 ring_index,
        uint256 c0,
        uint256[2] key_image,
        uint256[] s
    ) external;

    function getRingHash(uint256 amount, uint256 ring_index) external view returns (bytes32);

    /// Returns the bucket's fixed-capacity `bytes32[2][N]` slot array.
    function getPublicKeys(uint256 amount, uint256 ring_index) external view;
}

fn word(bytes: &[u8; 32]) -> U256 {
    U256::from_be_bytes(*bytes)
}

fn scalar(s: &EncodedScalar) -> U256 {
    word(&s.0)
}

pub fn encode_withdraw(call: &WithdrawCall) -> Vec<u8> {
    let sig = &call.signature;
    withdrawCall {
        receiver: call.receiver,
        amount: call.bucket.amount,
        ring_index: U256::from(call.bucket.ring_index),
        c0: scalar(&sig.c0),
        key_image: [word(&sig.key_image.x), word(&sig.key_image.y)],
        s: sig.responses.iter().map(scalar).collect(),
    }
    .abi_encode()
}

pub fn encode_ring_hash_query(bucket: &BucketId) -> Vec<u8> {
    getRingHashCall {
        amount: bucket.amount,
        ring_index: U256::from(bucket.ring_index),
    }
    .abi_encode()
}

pub fn encode_public_keys_query(bucket: &BucketId) -> Vec<u8> {
    getPublicKeysCall {
        amount: bucket.amount,
        ring_index: U256::from(bucket.ring_index),
    }
    .abi_encode()
}

pub fn decode_ring_hash(data: &[u8]) -> Result<RingHash, ChainError> {
    let hash = <alloy::primitives::B256 as SolValue>::abi_decode(data)
        .map_err(|e| ChainError::Decode(format!("getRingHash: {e}")))?;
    Ok(RingHash(hash.0))
}

/// Split a static `bytes32[2][N]` return value into its slots.
pub fn decode_slots(data: &[u8]) -> Result<Vec<EncodedPoint>, ChainError> {
    if data.is_empty() || data.len() % 64 != 0 {
        return Err(ChainError::Decode(format!(
            "slot array length {} is not a multiple of 64",
            data.len()
        )));
    }
    Ok(data
        .chunks_exact(64)
        .map(|pair| {
            let mut p = EncodedPoint::UNUSED_SLOT;
            p.x.copy_from_slice(&pair[..32]);
            p.y.copy_from_slice(&pair[32..]);
            p
        })
        .collect())
}

/// Reason string of an `Error(string)` revert payload, if that is what
/// `data` holds.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    Revert::abi_decode(data).ok().map(|r| r.reason)
}
