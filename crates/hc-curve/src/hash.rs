// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_bn254::{Fq, Fr, G1Affine};
use ark_ff::{Field, PrimeField};
use sha3::{Digest, Keccak256};

// y^2 = x^3 + 3
const COEFF_B: u64 = 3;

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// `keccak256(data) mod n`
pub fn hash_to_scalar(data: &[u8]) -> Fr {
    Fr::from_be_bytes_mod_order(&keccak256(data))
}

/// Try-and-increment: start from `keccak256(data) mod p` and walk x
/// upward until `x^3 + 3` has a square root. Of the two roots the one
/// with the smaller canonical value is taken, so the result does not
/// depend on the sqrt implementation. G1 has cofactor 1, so any point
/// found is in the prime-order group.
pub fn hash_to_point(data: &[u8]) -> G1Affine {
    let b = Fq::from(COEFF_B);
    let mut x = Fq::from_be_bytes_mod_order(&keccak256(data));
    loop {
        let rhs = x.square() * x + b;
        if let Some(y) = rhs.sqrt() {
            let neg = -y;
            let y = if y.into_bigint() <= neg.into_bigint() { y } else { neg };
            return G1Affine::new_unchecked(x, y);
        }
        x += Fq::ONE;
    }
}
