// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! `POST /` body decoding.
//!
//! Field names follow the wallet clients already in use: `signedMessage`,
//! `ethAmount`, `ringIdx`, `keyImage`. Amount and ring index arrive as
//! either JSON numbers or strings.

use hc_chain::personal::parse_signature;
use hc_types::{
    Address, BucketId, EncodedPoint, EncodedRingSignature, EncodedScalar, WithdrawCall, U256,
};
use serde::Deserialize;
use serde_json::Number;

use crate::error::RelayError;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(Number),
    Text(String),
}

impl NumberOrString {
    fn digits(&self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::Text(s) => s.trim().to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    message: String,
    signed_message: String,
    receiver: String,
    eth_amount: NumberOrString,
    ring_idx: NumberOrString,
    c0: String,
    key_image: [String; 2],
    s: Vec<String>,
}

/// A withdrawal request with every field parsed into its wire type.
#[derive(Clone, Debug)]
pub struct WithdrawRequest {
    pub message: String,
    pub signature: [u8; 65],
    pub call: WithdrawCall,
}

impl WithdrawRequest {
    pub fn receiver(&self) -> Address {
        self.call.receiver
    }

    /// Lowercase hex of the key image's x coordinate; the journal key.
    pub fn key_image_x(&self) -> String {
        self.call.signature.key_image.x_hex()
    }
}

pub fn parse(body: &[u8]) -> Result<WithdrawRequest, RelayError> {
    let raw: RawRequest = serde_json::from_slice(body).map_err(|_| RelayError::INVALID_PAYLOAD)?;

    let signature = parse_signature(&raw.signed_message).map_err(|_| RelayError::INVALID_PAYLOAD)?;
    let receiver = raw
        .receiver
        .parse::<Address>().map_err(|_| RelayError::INVALID_PAYLOAD)?;
    let amount = parse_amount(&raw.eth_amount.digits()).ok_or(RelayError::INVALID_PAYLOAD)?;
    let ring_index = raw
        .ring_idx
        .digits()
        .parse::<u64>()
        .map_err(|_| RelayError::INVALID_PAYLOAD)?;

    // words that cannot be ABI-encoded as uint256
    let c0 = EncodedScalar::from_hex(&raw.c0).map_err(|_| RelayError::INVALID_FORMAT)?;
    let key_image = EncodedPoint::from_hex_pair(&raw.key_image[0], &raw.key_image[1])
        .map_err(|_| RelayError::INVALID_FORMAT)?;
    let responses = raw
        .s
        .iter()
        .map(|s| EncodedScalar::from_hex(s))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| RelayError::INVALID_FORMAT)?;

    Ok(WithdrawRequest {
        message: raw.message,
        signature,
        call: WithdrawCall {
            receiver,
            bucket: BucketId::new(amount, ring_index),
            signature: EncodedRingSignature {
                c0,
                responses,
                key_image,
            },
        },
    })
}

/// Decimal, or `0x` hex. Fractions and negatives are refused.
fn parse_amount(s: &str) -> Option<U256> {
    match s.strip_prefix("0x") {
        Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16).ok(),
        Some(_) => None,
        None if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => U256::from_str_radix(s, 10).ok(),
        None => None,
    }
}
