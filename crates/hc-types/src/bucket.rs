// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::fmt;

use alloy_primitives::{Address, U256};

use crate::encoding::{word_to_hex, EncodedPoint};

/// One (denomination, ring-index) partition of the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BucketId {
    pub amount: U256,
    pub ring_index: u64,
}

impl BucketId {
    pub fn new(amount: U256, ring_index: u64) -> Self {
        Self { amount, ring_index }
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.amount, self.ring_index)
    }
}

/// Commitment to a bucket's membership at the time it was read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingHash(pub [u8; 32]);

impl RingHash {
    pub fn to_hex(&self) -> String {
        word_to_hex(&self.0)
    }
}

/// What the pool contract reports for a bucket: its ring hash and the
/// fixed-capacity slot array, unused slots still in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingSnapshot {
    pub ring_hash: RingHash,
    pub slots: Vec<EncodedPoint>,
}

impl RingSnapshot {
    /// Filled slots, in ring order. The snapshot itself is left untouched.
    pub fn occupied(&self) -> Vec<EncodedPoint> {
        self.slots
            .iter()
            .filter(|p| !p.is_unused_slot())
            .copied()
            .collect()
    }

    /// `ring_hash ‖ destination`: the byte string a withdrawal signature
    /// commits to.
    pub fn bind_message(&self, destination: &Address) -> Vec<u8> {
        let mut msg = Vec::with_capacity(32 + 20);
        msg.extend_from_slice(&self.ring_hash.0);
        msg.extend_from_slice(destination.as_slice());
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(b: u8) -> EncodedPoint {
        EncodedPoint {
            x: [b; 32],
            y: [b; 32],
        }
    }

    #[test]
    fn occupied_skips_unused_slots_in_order() {
        let snap = RingSnapshot {
            ring_hash: RingHash([0xaa; 32]),
            slots: vec![
                point(1),
                EncodedPoint::UNUSED_SLOT,
                point(2),
                EncodedPoint::UNUSED_SLOT,
            ],
        };
        assert_eq!(snap.occupied(), vec![point(1), point(2)]);
        assert_eq!(snap.slots.len(), 4);
    }

    #[test]
    fn message_is_hash_then_address() {
        let snap = RingSnapshot {
            ring_hash: RingHash([0xaa; 32]),
            slots: vec![],
        };
        let msg = snap.bind_message(&Address::repeat_byte(0xbb));
        assert_eq!(msg.len(), 52);
        assert!(msg[..32].iter().all(|b| *b == 0xaa));
        assert!(msg[32..].iter().all(|b| *b == 0xbb));
    }

    #[test]
    fn bucket_display() {
        let b = BucketId::new(U256::from(2u64), 7);
        assert_eq!(b.to_string(), "2/7");
    }
}
