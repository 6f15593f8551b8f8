// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

pub mod bucket;
pub mod call;
pub mod encoding;
pub mod keys;
pub mod signature;

pub use alloy_primitives::{Address, TxHash, U256};
pub use bucket::{BucketId, RingHash, RingSnapshot};
pub use call::WithdrawCall;
pub use encoding::{EncodedPoint, EncodedScalar, HexError};
pub use keys::{KeyImage, PublicKey, SecretKey};
pub use signature::{EncodedRingSignature, RingSignature};
