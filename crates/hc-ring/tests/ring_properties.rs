// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Property tests for linkable ring signatures, driven only through the
//! public `hc_ring` surface.

use ark_std::rand::{rngs::StdRng, SeedableRng};
use hc_curve::{encode_point, G1Affine};
use hc_ring::{check, encode_signature, key_image, sign, verify, verify_encoded, RingError};
use hc_types::{Address, EncodedPoint, PublicKey, RingHash, RingSnapshot, SecretKey};
use proptest::prelude::*;

fn keys(seed: u64, n: usize) -> Vec<SecretKey> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| SecretKey::random(&mut rng)).collect()
}

fn publics(sks: &[SecretKey]) -> Vec<PublicKey> {
    sks.iter().map(|s| s.public_key()).collect()
}

fn slots(ring: &[PublicKey]) -> Vec<EncodedPoint> {
    ring.iter().map(|p| encode_point(&p.0)).collect()
}

// ── completeness + linkability ──

#[test]
fn every_position_in_every_ring_size_verifies() {
    let sks = keys(1, 6);
    let mut rng = StdRng::seed_from_u64(2);
    for n in 1..=6 {
        let ring = publics(&sks[..n]);
        for k in 0..n {
            let sig = sign(b"withdraw", &ring, &sks[k], k, &mut rng).unwrap();
            assert!(verify(b"withdraw", &ring, &sig), "n={n} k={k}");
        }
    }
}

#[test]
fn key_image_independent_of_position_and_ring() {
    let sks = keys(3, 5);
    let mut rng = StdRng::seed_from_u64(4);
    let signer = &sks[0];

    // signer at the front of a 3-ring
    let ring_a = publics(&sks[..3]);
    let sig_a = sign(b"m", &ring_a, signer, 0, &mut rng).unwrap();

    // signer at the back of a different 4-ring
    let mut ring_b = publics(&sks[2..5]);
    ring_b.push(signer.public_key());
    let sig_b = sign(b"m", &ring_b, signer, 3, &mut rng).unwrap();

    assert!(verify(b"m", &ring_a, &sig_a));
    assert!(verify(b"m", &ring_b, &sig_b));
    assert_eq!(sig_a.key_image, sig_b.key_image);
    assert_eq!(sig_a.key_image, key_image(signer));
}

#[test]
fn different_secrets_different_images() {
    let sks = keys(5, 3);
    let ring = publics(&sks);
    let mut rng = StdRng::seed_from_u64(6);
    let a = sign(b"m", &ring, &sks[0], 0, &mut rng).unwrap();
    let b = sign(b"m", &ring, &sks[1], 1, &mut rng).unwrap();
    assert!(verify(b"m", &ring, &a));
    assert!(verify(b"m", &ring, &b));
    assert_ne!(a.key_image, b.key_image);
}

#[test]
fn same_secret_two_messages_same_image() {
    let sks = keys(7, 3);
    let ring = publics(&sks);
    let mut rng = StdRng::seed_from_u64(8);
    let a = sign(b"first", &ring, &sks[2], 2, &mut rng).unwrap();
    let b = sign(b"second", &ring, &sks[2], 2, &mut rng).unwrap();
    assert!(verify(b"first", &ring, &a));
    assert!(verify(b"second", &ring, &b));
    assert_eq!(a.key_image, b.key_image);
    // not transferable between messages
    assert!(!verify(b"second", &ring, &a));
}

// ── structural rejects ──

#[test]
fn identity_in_ring_rejected() {
    let sks = keys(9, 3);
    let mut ring = publics(&sks);
    let mut rng = StdRng::seed_from_u64(10);
    let sig = sign(b"m", &ring, &sks[0], 0, &mut rng).unwrap();
    ring[2] = PublicKey(G1Affine::identity());
    assert!(!verify(b"m", &ring, &sig));
}

#[test]
fn off_curve_slot_rejected() {
    let sks = keys(11, 2);
    let ring = publics(&sks);
    let mut rng = StdRng::seed_from_u64(12);
    let sig = encode_signature(&sign(b"m", &ring, &sks[0], 0, &mut rng).unwrap());
    let mut s = slots(&ring);
    s[1].y[31] ^= 1;
    assert_eq!(verify_encoded(b"m", &s, &sig), Err(RingError::BadPoint));
}

#[test]
fn response_count_must_match_ring() {
    let sks = keys(13, 3);
    let ring = publics(&sks);
    let mut rng = StdRng::seed_from_u64(14);
    let mut sig = sign(b"m", &ring, &sks[1], 1, &mut rng).unwrap();
    sig.responses.pop();
    assert_eq!(
        check(b"m", &ring, &sig),
        Err(RingError::LengthMismatch {
            ring: 3,
            responses: 2
        })
    );
}

#[test]
fn all_unused_slots_is_an_empty_ring() {
    let sks = keys(15, 1);
    let ring = publics(&sks);
    let mut rng = StdRng::seed_from_u64(16);
    let sig = encode_signature(&sign(b"m", &ring, &sks[0], 0, &mut rng).unwrap());
    let s = vec![EncodedPoint::UNUSED_SLOT; 4];
    assert_eq!(verify_encoded(b"m", &s, &sig), Err(RingError::EmptyRing));
}

// ── withdrawal message binding ──

#[test]
fn three_ring_signer_one_bound_to_ring_hash_and_destination() {
    let sks = keys(17, 3);
    let ring = publics(&sks);
    let snapshot = RingSnapshot {
        ring_hash: RingHash([0xaa; 32]),
        slots: slots(&ring),
    };
    let destination = Address::repeat_byte(0xbb);
    let message = snapshot.bind_message(&destination);

    let mut rng = StdRng::seed_from_u64(18);
    let sig = encode_signature(&sign(&message, &ring, &sks[1], 1, &mut rng).unwrap());
    assert!(verify_encoded(&message, &snapshot.slots, &sig).is_ok());

    let elsewhere = snapshot.bind_message(&Address::repeat_byte(0xcc));
    assert_eq!(
        verify_encoded(&elsewhere, &snapshot.slots, &sig),
        Err(RingError::ChallengeMismatch)
    );

    let stale = RingSnapshot {
        ring_hash: RingHash([0xab; 32]),
        slots: snapshot.slots.clone(),
    };
    assert!(verify_encoded(&stale.bind_message(&destination), &stale.slots, &sig).is_err());
}

// ── near-miss inputs ──

#[derive(Debug, Clone)]
enum Target {
    C0,
    Response(usize),
    KeyImageX,
    KeyImageY,
    Message,
}

fn target(ring_size: usize) -> impl Strategy<Value = Target> {
    prop_oneof![
        Just(Target::C0),
        (0..ring_size).prop_map(Target::Response),
        Just(Target::KeyImageX),
        Just(Target::KeyImageY),
        Just(Target::Message),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn any_single_bit_flip_rejects(
        (n, k, t) in (1usize..=4).prop_flat_map(|n| (Just(n), 0..n, target(n))),
        bit in 0usize..256,
        seed in any::<u64>(),
        message in proptest::collection::vec(any::<u8>(), 52),
    ) {
        let sks = keys(seed, n);
        let ring = publics(&sks);
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
        let sig = encode_signature(&sign(&message, &ring, &sks[k], k, &mut rng).unwrap());
        let s = slots(&ring);
        prop_assert!(verify_encoded(&message, &s, &sig).is_ok());

        let (byte, mask) = (bit / 8, 1u8 << (bit % 8));
        let mut tampered = sig.clone();
        let mut msg = message.clone();
        match t {
            Target::C0 => tampered.c0.0[byte] ^= mask,
            Target::Response(i) => tampered.responses[i].0[byte] ^= mask,
            Target::KeyImageX => tampered.key_image.x[byte] ^= mask,
            Target::KeyImageY => tampered.key_image.y[byte] ^= mask,
            Target::Message => {
                let idx = byte % msg.len();
                msg[idx] ^= mask;
            }
        }
        prop_assert!(verify_encoded(&msg, &s, &tampered).is_err());
    }
}
