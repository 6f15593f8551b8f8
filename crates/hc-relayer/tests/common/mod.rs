// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use alloy::consensus::{Transaction, TxEnvelope};
use alloy::eips::eip2718::Decodable2718;
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use hc_chain::abi::withdrawCall;
use hc_chain::{ChainError, PoolContract, Receipt};
use hc_relayer::ServiceSettings;
use hc_types::{Address, BucketId, RingSnapshot, TxHash, WithdrawCall};

pub const BASE_NONCE: u64 = 5;
pub const POOL: Address = Address::new([0xee; 20]);

/// What the mock node does, keyed by withdrawal receiver.
#[derive(Default)]
pub struct Script {
    pub snapshot_down: bool,
    pub revert_estimate: HashSet<Address>,
    pub reject_submit: HashSet<Address>,
    pub lose_submit: HashSet<Address>,
    /// Accepted by the node, then silently dropped from its mempool.
    pub drop_submit: HashSet<Address>,
    pub revert_on_chain: HashSet<Address>,
    pub hold_receipts: bool,
    pub estimate_delay: Option<Duration>,
}

#[derive(Default)]
pub struct Log {
    pub snapshot_calls: usize,
    pub estimate_calls: usize,
    pub pending: u64,
    /// (nonce, receiver) of every transaction the node accepted, in order.
    pub accepted: Vec<(u64, Address)>,
    pub nonce_errors: usize,
    mined: HashMap<TxHash, Address>,
}

pub struct MockPool {
    pub snapshot: RingSnapshot,
    pub script: Mutex<Script>,
    pub log: Mutex<Log>,
}

impl MockPool {
    pub fn new(snapshot: RingSnapshot) -> Self {
        Self {
            snapshot,
            script: Mutex::new(Script::default()),
            log: Mutex::new(Log {
                pending: BASE_NONCE,
                ..Log::default()
            }),
        }
    }

    pub fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    pub fn log(&self) -> std::sync::MutexGuard<'_, Log> {
        self.log.lock().unwrap()
    }
}

#[async_trait]
impl PoolContract for MockPool {
    fn address(&self) -> Address {
        POOL
    }

    async fn ring_snapshot(&self, _bucket: &BucketId) -> Result<RingSnapshot, ChainError> {
        self.log().snapshot_calls += 1;
        if self.script().snapshot_down {
            return Err(ChainError::Transport("connection refused".into()));
        }
        Ok(self.snapshot.clone())
    }

    async fn estimate_withdraw(&self, _from: &Address, call: &WithdrawCall) -> Result<u64, ChainError> {
        self.log().estimate_calls += 1;
        let delay = self.script().estimate_delay;
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        if self.script().revert_estimate.contains(&call.receiver) {
            return Err(ChainError::Reverted {
                reason: "Invalid signature".into(),
            });
        }
        Ok(200_000)
    }

    async fn pending_nonce(&self, _account: &Address) -> Result<u64, ChainError> {
        Ok(self.log().pending)
    }

    async fn gas_price(&self) -> Result<u128, ChainError> {
        Ok(1_000_000_000)
    }

    async fn submit(&self, raw_tx: &[u8]) -> Result<TxHash, ChainError> {
        let (nonce, receiver) = decode_tx(raw_tx);
        let script = self.script();
        let mut log = self.log();
        if nonce != log.pending {
            log.nonce_errors += 1;
            return Err(ChainError::Rpc {
                code: -32000,
                message: format!("nonce {nonce} but account is at {}", log.pending),
                data: None,
            });
        }
        if script.reject_submit.contains(&receiver) {
            return Err(ChainError::Rpc {
                code: -32000,
                message: "insufficient funds for gas * price + value".into(),
                data: None,
            });
        }
        if script.lose_submit.contains(&receiver) {
            return Err(ChainError::Transport("connection reset".into()));
        }
        let hash = tx_hash(nonce, &receiver);
        if script.drop_submit.contains(&receiver) {
            return Ok(hash);
        }
        log.pending += 1;
        log.accepted.push((nonce, receiver));
        log.mined.insert(hash, receiver);
        Ok(hash)
    }

    async fn receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, ChainError> {
        let script = self.script();
        if script.hold_receipts {
            return Ok(None);
        }
        let Some(receiver) = self.log().mined.get(hash).copied() else {
            return Ok(None);
        };
        Ok(Some(Receipt {
            success: !script.revert_on_chain.contains(&receiver),
            block_number: 100,
            gas_used: 180_000,
        }))
    }

    async fn revert_reason(
        &self,
        _from: &Address,
        _call: &WithdrawCall,
        _block: u64,
    ) -> Result<Option<String>, ChainError> {
        Ok(Some("Signature has been used!".into()))
    }
}

pub fn settings() -> ServiceSettings {
    ServiceSettings {
        receipt_poll: Duration::from_millis(10),
        request_timeout: Duration::from_secs(10),
        ..ServiceSettings::new(943)
    }
}

pub fn tx_hash(nonce: u64, receiver: &Address) -> TxHash {
    let mut h = [0u8; 32];
    h[..20].copy_from_slice(receiver.as_slice());
    h[24..].copy_from_slice(&nonce.to_be_bytes());
    TxHash::from(h)
}

/// Nonce and `withdraw` receiver of a signed legacy transaction.
pub fn decode_tx(raw: &[u8]) -> (u64, Address) {
    let tx = TxEnvelope::decode_2718(&mut &raw[..]).expect("signed transaction");
    assert_eq!(tx.chain_id(), Some(943));
    let call = withdrawCall::abi_decode(tx.input()).expect("withdraw calldata");
    (tx.nonce(), call.receiver)
}
