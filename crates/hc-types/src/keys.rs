// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_bn254::{Fr, G1Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::UniformRand;
use ark_std::rand::Rng;

#[derive(Clone, Debug)]
pub struct SecretKey(pub Fr);

/// A ring member's public key, `x·G`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey(pub G1Affine);

/// Linkability tag `x·H_p(x·G)`; identical for every signature made with
/// the same secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyImage(pub G1Affine);

impl SecretKey {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(Fr::rand(rng))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey((G1Affine::generator() * self.0).into_affine())
    }
}
