// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use hc_curve::CurveError;
use thiserror::Error;

/// Why a ring signature was rejected. Callers facing untrusted clients
/// should collapse every variant into a single "invalid signature".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    #[error("bad scalar")]
    BadScalar,

    #[error("bad point")]
    BadPoint,

    #[error("ring is empty")]
    EmptyRing,

    #[error("ring has {ring} members but {responses} responses")]
    LengthMismatch { ring: usize, responses: usize },

    #[error("challenge mismatch")]
    ChallengeMismatch,

    #[error("signer index {index} outside ring of {ring}")]
    SignerOutOfRange { index: usize, ring: usize },

    #[error("secret key does not match the ring member at the signer index")]
    SignerNotInRing,
}

impl From<CurveError> for RingError {
    fn from(e: CurveError) -> Self {
        match e {
            CurveError::ScalarOutOfRange => RingError::BadScalar,
            CurveError::CoordinateOutOfRange | CurveError::NotOnCurve | CurveError::Identity => {
                RingError::BadPoint
            }
        }
    }
}
