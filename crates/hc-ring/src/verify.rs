// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_ec::AffineRepr;
use hc_curve::{
    decode_point, decode_scalar, hash_to_point, hash_to_scalar, lincomb, point_bytes, Fr, G1Affine,
};
use hc_types::{EncodedPoint, EncodedRingSignature, KeyImage, PublicKey, RingSignature};

use crate::RingError;

/// `Hs(m ‖ P ‖ L ‖ R)`
pub(crate) fn challenge(message: &[u8], member: &G1Affine, l: &G1Affine, r: &G1Affine) -> Fr {
    let mut buf = Vec::with_capacity(message.len() + 3 * 64);
    buf.extend_from_slice(message);
    buf.extend_from_slice(&point_bytes(member));
    buf.extend_from_slice(&point_bytes(l));
    buf.extend_from_slice(&point_bytes(r));
    hash_to_scalar(&buf)
}

/// `Hp(P)`, the per-member base the key image is checked against.
pub(crate) fn member_base(member: &G1Affine) -> G1Affine {
    hash_to_point(&point_bytes(member))
}

fn is_valid_point(p: &G1Affine) -> bool {
    !p.is_zero() && p.is_on_curve() && p.is_in_correct_subgroup_assuming_on_curve()
}

/// Run the ring equation, reporting why a signature fails.
pub fn check(message: &[u8], ring: &[PublicKey], sig: &RingSignature) -> Result<(), RingError> {
    if ring.is_empty() {
        return Err(RingError::EmptyRing);
    }
    if sig.responses.len() != ring.len() {
        return Err(RingError::LengthMismatch {
            ring: ring.len(),
            responses: sig.responses.len(),
        });
    }
    // decoded types can still be built by hand around the identity
    if !ring.iter().all(|p| is_valid_point(&p.0)) || !is_valid_point(&sig.key_image.0) {
        return Err(RingError::BadPoint);
    }

    let g = G1Affine::generator();
    let image = sig.key_image.0;

    let mut c = sig.c0;
    for (member, s) in ring.iter().zip(&sig.responses) {
        let l = lincomb(s, &g, &c, &member.0);
        let r = lincomb(s, &member_base(&member.0), &c, &image);
        c = challenge(message, &member.0, &l, &r);
    }

    if c == sig.c0 {
        Ok(())
    } else {
        Err(RingError::ChallengeMismatch)
    }
}

pub fn verify(message: &[u8], ring: &[PublicKey], sig: &RingSignature) -> bool {
    check(message, ring, sig).is_ok()
}

/// Drop unused `(0, 0)` slots, then decode what is left.
pub fn decode_ring(slots: &[EncodedPoint]) -> Result<Vec<PublicKey>, RingError> {
    slots
        .iter()
        .filter(|p| !p.is_unused_slot())
        .map(|p| decode_point(p).map(PublicKey).map_err(RingError::from))
        .collect()
}

pub fn decode_signature(sig: &EncodedRingSignature) -> Result<RingSignature, RingError> {
    let c0 = decode_scalar(&sig.c0)?;
    let responses = sig
        .responses
        .iter()
        .map(decode_scalar)
        .collect::<Result<Vec<_>, _>>()?;
    let key_image = KeyImage(decode_point(&sig.key_image)?);
    Ok(RingSignature {
        c0,
        responses,
        key_image,
    })
}

/// Verify a signature straight off the wire against a contract slot array.
/// Returns the key image on success.
pub fn verify_encoded(
    message: &[u8],
    slots: &[EncodedPoint],
    sig: &EncodedRingSignature,
) -> Result<KeyImage, RingError> {
    let ring = decode_ring(slots)?;
    let sig = decode_signature(sig)?;
    check(message, &ring, &sig)?;
    Ok(sig.key_image)
}
