// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_bn254::{Fq, Fr, G1Affine};
use ark_ec::CurveGroup;
use ark_ff::{AdditiveGroup, PrimeField};
use hc_types::EncodedPoint;

use crate::{field_to_word, word_to_bigint, CurveError};

/// Decode an EVM `uint256[2]` into a G1 point.
///
/// Rejects coordinates `>= p`, points off the curve and the identity
/// (which the EVM precompiles, and the pool contract, write as `(0, 0)`).
pub fn decode_point(p: &EncodedPoint) -> Result<G1Affine, CurveError> {
    let x = Fq::from_bigint(word_to_bigint(&p.x)).ok_or(CurveError::CoordinateOutOfRange)?;
    let y = Fq::from_bigint(word_to_bigint(&p.y)).ok_or(CurveError::CoordinateOutOfRange)?;
    if x == Fq::ZERO && y == Fq::ZERO {
        return Err(CurveError::Identity);
    }
    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(CurveError::NotOnCurve);
    }
    Ok(point)
}

pub fn encode_point(p: &G1Affine) -> EncodedPoint {
    if p.infinity {
        return EncodedPoint::UNUSED_SLOT;
    }
    EncodedPoint {
        x: field_to_word(&p.x),
        y: field_to_word(&p.y),
    }
}

/// `x ‖ y` as hashed into challenges; the identity hashes as 64 zero bytes.
pub fn point_bytes(p: &G1Affine) -> [u8; 64] {
    encode_point(p).to_bytes()
}

/// `a·P + b·Q`
pub fn lincomb(a: &Fr, p: &G1Affine, b: &Fr, q: &G1Affine) -> G1Affine {
    (*p * a + *q * b).into_affine()
}
