// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Bytes, TxKind};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use hc_types::{Address, TxHash, U256};

use crate::error::ChainError;

/// Raw bytes for `eth_sendRawTransaction` and the hash the node will
/// report for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub raw: Vec<u8>,
    pub hash: TxHash,
}

/// A zero-value legacy call to `to` carrying `input`, replay-protected for
/// `chain_id` (EIP-155).
pub fn legacy_call(
    chain_id: u64,
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    to: Address,
    input: Vec<u8>,
) -> TxLegacy {
    TxLegacy {
        chain_id: Some(chain_id),
        nonce,
        gas_price,
        gas_limit,
        to: TxKind::Call(to),
        value: U256::ZERO,
        input: Bytes::from(input),
    }
}

pub fn sign(tx: TxLegacy, signer: &PrivateKeySigner) -> Result<SignedTransaction, ChainError> {
    let signature = signer
        .sign_hash_sync(&tx.signature_hash())
        .map_err(|e| ChainError::Signing(e.to_string()))?;
    let signed = tx.into_signed(signature);
    let hash = *signed.hash();
    let raw = TxEnvelope::from(signed).encoded_2718();
    Ok(SignedTransaction { raw, hash })
}

#[cfg(test)]
mod tests {
    use super::*;

    // EIP-155 worked example
    fn eip155_example() -> (TxLegacy, PrivateKeySigner) {
        let tx = TxLegacy {
            chain_id: Some(1),
            nonce: 9,
            gas_price: 20_000_000_000,
            gas_limit: 21_000,
            to: TxKind::Call(Address::repeat_byte(0x35)),
            value: U256::from(1_000_000_000_000_000_000u128),
            input: Bytes::new(),
        };
        let key = PrivateKeySigner::from_slice(&[0x46; 32]).unwrap();
        (tx, key)
    }

    #[test]
    fn eip155_signing_hash() {
        let (tx, _) = eip155_example();
        assert_eq!(
            hex::encode(tx.signature_hash()),
            "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
        );
    }

    #[test]
    fn eip155_signed_raw() {
        let (tx, key) = eip155_example();
        let signed = sign(tx, &key).unwrap();
        assert_eq!(
            hex::encode(&signed.raw),
            "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a7640000\
             8025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d899\
             7f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
        );
        assert_eq!(
            signed.hash.to_string(),
            "0x33469b22e9f636356c4160a87eb19df52b7412e8eac32a4a55ffe88ea8350788"
        );
    }

    #[test]
    fn legacy_call_targets_the_pool_without_value() {
        let tx = legacy_call(943, 3, 7, 21_000, Address::repeat_byte(0xee), vec![0x62, 0x23]);
        assert_eq!(tx.chain_id, Some(943));
        assert_eq!(tx.to, TxKind::Call(Address::repeat_byte(0xee)));
        assert_eq!(tx.value, U256::ZERO);
        assert_eq!(tx.input.as_ref(), &[0x62, 0x23]);
    }

    #[test]
    fn chain_id_changes_hash() {
        let (tx, key) = eip155_example();
        let mainnet = sign(tx.clone(), &key).unwrap();
        let other = sign(TxLegacy { chain_id: Some(943), ..tx }, &key).unwrap();
        assert_ne!(mainnet.hash, other.hash);
    }
}
