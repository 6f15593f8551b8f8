// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use alloy_primitives::Address;
use crate::bucket::BucketId;
use crate::signature::EncodedRingSignature;

/// Arguments of the pool contract's
/// `withdraw(address,uint256,uint256,uint256,uint256[2],uint256[])`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawCall {
    pub receiver: Address,
    pub bucket: BucketId,
    pub signature: EncodedRingSignature,
}
