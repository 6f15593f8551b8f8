// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Arithmetic substrate for ring verification on alt_bn128 (BN254) G1.
//!
//! Scalars live in `Fr` (the group order n), coordinates in `Fq` (the
//! field modulus p). Every decoder here rejects out-of-range words instead
//! of reducing them, so a malformed signature fails verification rather
//! than verifying as some other value.

mod hash;
mod point;

pub use ark_bn254::{Fq, Fr, G1Affine, G1Projective};
pub use hash::{hash_to_point, hash_to_scalar, keccak256};
pub use point::{decode_point, encode_point, lincomb, point_bytes};

use ark_ff::{BigInt, BigInteger, PrimeField};
use hc_types::EncodedScalar;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    #[error("scalar is not below the group order")]
    ScalarOutOfRange,

    #[error("coordinate is not below the field modulus")]
    CoordinateOutOfRange,

    #[error("point is not on the curve")]
    NotOnCurve,

    #[error("point is the identity")]
    Identity,
}

/// Big-endian word -> little-endian limbs.
pub(crate) fn word_to_bigint(word: &[u8; 32]) -> BigInt<4> {
    let mut limbs = [0u64; 4];
    for (i, chunk) in word.rchunks(8).enumerate() {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        limbs[i] = u64::from_be_bytes(buf);
    }
    BigInt::new(limbs)
}

pub(crate) fn field_to_word<F: PrimeField>(f: &F) -> [u8; 32] {
    let bytes = f.into_bigint().to_bytes_be();
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    word
}

pub fn decode_scalar(s: &EncodedScalar) -> Result<Fr, CurveError> {
    Fr::from_bigint(word_to_bigint(&s.0)).ok_or(CurveError::ScalarOutOfRange)
}

pub fn encode_scalar(s: &Fr) -> EncodedScalar {
    EncodedScalar(field_to_word(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::UniformRand;
    use ark_std::test_rng;

    fn modulus_word() -> [u8; 32] {
        let bytes = Fr::MODULUS.to_bytes_be();
        let mut w = [0u8; 32];
        w.copy_from_slice(&bytes);
        w
    }

    #[test]
    fn scalar_roundtrip() {
        let mut rng = test_rng();
        for _ in 0..10 {
            let s = Fr::rand(&mut rng);
            assert_eq!(decode_scalar(&encode_scalar(&s)).unwrap(), s);
        }
    }

    #[test]
    fn scalar_equal_to_order_rejected() {
        let w = modulus_word();
        assert_eq!(
            decode_scalar(&EncodedScalar(w)),
            Err(CurveError::ScalarOutOfRange)
        );
    }

    #[test]
    fn scalar_just_below_order_accepted() {
        let mut w = modulus_word();
        // n is odd, so decrementing the last byte never borrows
        w[31] -= 1;
        let s = decode_scalar(&EncodedScalar(w)).unwrap();
        assert_eq!(s, -Fr::from(1u64));
    }

    #[test]
    fn max_word_rejected() {
        assert_eq!(
            decode_scalar(&EncodedScalar([0xff; 32])),
            Err(CurveError::ScalarOutOfRange)
        );
    }

    #[test]
    fn limb_order() {
        let mut w = [0u8; 32];
        w[31] = 1;
        w[23] = 2;
        let b = word_to_bigint(&w);
        assert_eq!(b.0, [1, 2, 0, 0]);
    }
}
