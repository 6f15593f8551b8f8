// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # hc-ring
//!
//! Linkable (AOS-style) ring signatures over alt_bn128 G1, as used to
//! authorize withdrawals from a Hurricash pool bucket.
//!
//! A signature `(c0, s[], I)` over ring `P[]` verifies when the challenge
//! chain closes:
//!
//! ```text
//! c = c0
//! for i in 0..n:
//!     L = s[i]·G    + c·P[i]
//!     R = s[i]·Hp(P[i]) + c·I
//!     c = Hs(m ‖ P[i] ‖ L ‖ R)
//! valid  <=>  c == c0
//! ```
//!
//! `I = x·Hp(x·G)` is the key image. It is the same for every signature made
//! with secret `x`, whatever the ring, so the contract can refuse a second
//! withdrawal without learning which member signed.
//!
//! | Item | Purpose |
//! |---|---|
//! | [`verify`] / [`check`] | verification over decoded values |
//! | [`verify_encoded`] | decode wire words, drop unused slots, verify |
//! | [`sign`] / [`key_image`] | signer side, for wallets and test vectors |

mod error;
mod sign;
mod verify;

pub use error::RingError;
pub use sign::{key_image, sign};
pub use verify::{check, decode_ring, decode_signature, verify, verify_encoded};

use hc_curve::{encode_point, encode_scalar};
use hc_types::{EncodedRingSignature, RingSignature};

pub fn encode_signature(sig: &RingSignature) -> EncodedRingSignature {
    EncodedRingSignature {
        c0: encode_scalar(&sig.c0),
        responses: sig.responses.iter().map(encode_scalar).collect(),
        key_image: encode_point(&sig.key_image.0),
    }
}
