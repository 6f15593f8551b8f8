// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Raw 32-byte words as they travel over JSON and the EVM ABI.
//!
//! Nothing here checks field membership; that happens in `hc-curve`
//! when a word is decoded into a scalar or a point.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexError {
    #[error("invalid hex: {0}")]
    Invalid(String),

    #[error("expected at most {max} bytes, got {got}")]
    TooLong { max: usize, got: usize },

    #[error("expected exactly {expected} bytes, got {got}")]
    Length { expected: usize, got: usize },
}

/// Decode `0x`-optional hex into a left-zero-padded 32-byte word.
pub fn hex_to_word(s: &str) -> Result<[u8; 32], HexError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    // odd-length values like "0x1" are legal wallet output
    let owned;
    let s = if s.len() % 2 == 1 {
        owned = format!("0{s}");
        owned.as_str()
    } else {
        s
    };
    let bytes = hex::decode(s).map_err(|e| HexError::Invalid(e.to_string()))?;
    if bytes.len() > 32 {
        return Err(HexError::TooLong {
            max: 32,
            got: bytes.len(),
        });
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}

pub fn word_to_hex(word: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(word))
}

/// A big-endian 32-byte scalar, not yet range-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EncodedScalar(pub [u8; 32]);

impl EncodedScalar {
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        hex_to_word(s).map(Self)
    }

    pub fn to_hex(&self) -> String {
        word_to_hex(&self.0)
    }
}

/// An `(x, y)` pair of big-endian words, i.e. an EVM `uint256[2]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EncodedPoint {
    pub x: [u8; 32],
    pub y: [u8; 32],
}

impl EncodedPoint {
    /// The `(0, 0)` marker the pool contract leaves in empty ring slots.
    pub const UNUSED_SLOT: EncodedPoint = EncodedPoint {
        x: [0u8; 32],
        y: [0u8; 32],
    };

    pub fn from_hex_pair(x: &str, y: &str) -> Result<Self, HexError> {
        Ok(Self {
            x: hex_to_word(x)?,
            y: hex_to_word(y)?,
        })
    }

    pub fn is_unused_slot(&self) -> bool {
        *self == Self::UNUSED_SLOT
    }

    /// `x ‖ y`, 64 bytes.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.x);
        out[32..].copy_from_slice(&self.y);
        out
    }

    pub fn x_hex(&self) -> String {
        word_to_hex(&self.x)
    }

    pub fn y_hex(&self) -> String {
        word_to_hex(&self.y)
    }
}
