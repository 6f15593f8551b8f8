// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_bn254::Fr;

use crate::encoding::{EncodedPoint, EncodedScalar};
use crate::keys::KeyImage;

/// A ring signature exactly as the requester sent it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedRingSignature {
    pub c0: EncodedScalar,
    pub responses: Vec<EncodedScalar>,
    pub key_image: EncodedPoint,
}

/// A ring signature whose scalars are known to be below the group order
/// and whose key image is a valid curve point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingSignature {
    pub c0: Fr,
    pub responses: Vec<Fr>,
    pub key_image: KeyImage,
}
