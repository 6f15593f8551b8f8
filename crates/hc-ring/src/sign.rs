// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{AdditiveGroup, UniformRand};
use ark_std::rand::Rng;
use hc_curve::{lincomb, Fr, G1Affine};
use hc_types::{KeyImage, PublicKey, RingSignature, SecretKey};

use crate::verify::{challenge, member_base};
use crate::RingError;

pub fn key_image(secret: &SecretKey) -> KeyImage {
    let pk = secret.public_key();
    KeyImage((member_base(&pk.0) * secret.0).into_affine())
}

/// Sign `message` as member `index` of `ring`.
///
/// Walks the ring from `index + 1` with random responses, then closes the
/// chain at `index` with `s = α - c·x`.
pub fn sign<R: Rng>(
    message: &[u8],
    ring: &[PublicKey],
    secret: &SecretKey,
    index: usize,
    rng: &mut R,
) -> Result<RingSignature, RingError> {
    let n = ring.len();
    if n == 0 {
        return Err(RingError::EmptyRing);
    }
    if index >= n {
        return Err(RingError::SignerOutOfRange { index, ring: n });
    }
    if ring[index] != secret.public_key() {
        return Err(RingError::SignerNotInRing);
    }

    let g = G1Affine::generator();
    let image = key_image(secret);
    let signer = ring[index].0;

    let alpha = Fr::rand(rng);
    let l = (g * alpha).into_affine();
    let r = (member_base(&signer) * alpha).into_affine();

    let mut challenges = vec![Fr::ZERO; n];
    let mut responses = vec![Fr::ZERO; n];

    let mut c = challenge(message, &signer, &l, &r);
    let mut i = (index + 1) % n;
    while i != index {
        challenges[i] = c;
        let s = Fr::rand(rng);
        responses[i] = s;
        let member = ring[i].0;
        let l = lincomb(&s, &g, &c, &member);
        let r = lincomb(&s, &member_base(&member), &c, &image.0);
        c = challenge(message, &member, &l, &r);
        i = (i + 1) % n;
    }
    challenges[index] = c;
    responses[index] = alpha - c * secret.0;

    Ok(RingSignature {
        c0: challenges[0],
        responses,
        key_image: image,
    })
}
