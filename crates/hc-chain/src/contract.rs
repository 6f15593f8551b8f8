// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use async_trait::async_trait;
use hc_types::{Address, BucketId, RingSnapshot, TxHash, WithdrawCall};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::abi;
use crate::error::ChainError;
use crate::rpc::{data_hex, parse_data, parse_quantity, parse_quantity_u64, quantity, RpcClient};

/// Outcome of a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub success: bool,
    pub block_number: u64,
    pub gas_used: u64,
}

/// The pool contract as the relay sees it.
///
/// `estimate_withdraw` reports a would-be revert as [`ChainError::Reverted`]
/// and any other node error as [`ChainError::Rpc`]; `submit` reports a node-side rejection as [`ChainError::Rpc`] and an
/// unknown outcome as [`ChainError::Transport`].
#[async_trait]
pub trait PoolContract: Send + Sync {
    /// Address the withdrawal transaction is sent to.
    fn address(&self) -> Address;

    async fn ring_snapshot(&self, bucket: &BucketId) -> Result<RingSnapshot, ChainError>;

    async fn estimate_withdraw(&self, from: &Address, call: &WithdrawCall) -> Result<u64, ChainError>;

    async fn pending_nonce(&self, account: &Address) -> Result<u64, ChainError>;

    async fn gas_price(&self) -> Result<u128, ChainError>;

    async fn submit(&self, raw_tx: &[u8]) -> Result<TxHash, ChainError>;

    async fn receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, ChainError>;

    /// Replay `call` at `block` and return its revert reason, if it reverts.
    async fn revert_reason(
        &self,
        from: &Address,
        call: &WithdrawCall,
        block: u64,
    ) -> Result<Option<String>, ChainError>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    status: Option<String>,
    block_number: Option<String>,
    gas_used: String,
}

/// [`PoolContract`] backed by an Ethereum JSON-RPC node.
pub struct EvmPool {
    rpc: RpcClient,
    address: Address,
}

impl EvmPool {
    pub fn new(rpc: RpcClient, address: Address) -> Self {
        Self { rpc, address }
    }

    pub async fn chain_id(&self) -> Result<u64, ChainError> {
        let id: String = self.rpc.call("eth_chainId", json!([])).await?;
        parse_quantity_u64(&id)
    }

    fn call_object(&self, from: Option<&Address>, data: &[u8]) -> Value {
        let mut obj = json!({
            "to": self.address,
            "data": data_hex(data),
        });
        if let Some(from) = from {
            obj["from"] = json!(from);
        }
        obj
    }

    async fn eth_call(&self, from: Option<&Address>, data: &[u8], block: Value) -> Result<Vec<u8>, ChainError> {
        let out: String = self
            .rpc
            .call("eth_call", json!([self.call_object(from, data), block]))
            .await?;
        parse_data(&out)
    }
}

/// Whether a node error means the call itself reverted, as opposed to the
/// node failing to evaluate it (funds, fee caps, overload).
fn is_execution_revert(code: i64, message: &str, data: Option<&str>) -> bool {
    code == 3
        || message.starts_with("execution reverted")
        || data
            .and_then(|d| parse_data(d).ok())
            .is_some_and(|bytes| bytes.len() >= 4)
}

/// Human-readable reason carried by a node's error object.
fn reason_from_rpc(message: String, data: Option<String>) -> String {
    data.and_then(|d| parse_data(&d).ok())
        .and_then(|bytes| abi::decode_revert_reason(&bytes))
        .unwrap_or(message)
}

#[async_trait]
impl PoolContract for EvmPool {
    fn address(&self) -> Address {
        self.address
    }

    async fn ring_snapshot(&self, bucket: &BucketId) -> Result<RingSnapshot, ChainError> {
        let hash = self
            .eth_call(None, &abi::encode_ring_hash_query(bucket), json!("latest"))
            .await?;
        let keys = self
            .eth_call(None, &abi::encode_public_keys_query(bucket), json!("latest"))
            .await?;
        Ok(RingSnapshot {
            ring_hash: abi::decode_ring_hash(&hash)?,
            slots: abi::decode_slots(&keys)?,
        })
    }

    async fn estimate_withdraw(&self, from: &Address, call: &WithdrawCall) -> Result<u64, ChainError> {
        let data = abi::encode_withdraw(call);
        let gas: Result<String, ChainError> = self
            .rpc
            .call("eth_estimateGas", json!([self.call_object(Some(from), &data)]))
            .await;
        match gas {
            Ok(gas) => parse_quantity_u64(&gas),
            Err(ChainError::Rpc { code, message, data })
                if is_execution_revert(code, &message, data.as_deref()) =>
            {
                Err(ChainError::Reverted {
                    reason: reason_from_rpc(message, data),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn pending_nonce(&self, account: &Address) -> Result<u64, ChainError> {
        let n: String = self
            .rpc
            .call("eth_getTransactionCount", json!([account, "pending"]))
            .await?;
        parse_quantity_u64(&n)
    }

    async fn gas_price(&self) -> Result<u128, ChainError> {
        let p: String = self.rpc.call("eth_gasPrice", json!([])).await?;
        parse_quantity(&p)
    }

    async fn submit(&self, raw_tx: &[u8]) -> Result<TxHash, ChainError> {
        self.rpc
            .call("eth_sendRawTransaction", json!([data_hex(raw_tx)]))
            .await
    }

    async fn receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, ChainError> {
        let raw: Option<RawReceipt> = self
            .rpc
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        // some nodes return pending receipts with a null block
        let Some(block) = raw.block_number else {
            return Ok(None);
        };
        Ok(Some(Receipt {
            success: raw.status.as_deref() == Some("0x1"),
            block_number: parse_quantity_u64(&block)?,
            gas_used: parse_quantity_u64(&raw.gas_used)?,
        }))
    }

    async fn revert_reason(
        &self,
        from: &Address,
        call: &WithdrawCall,
        block: u64,
    ) -> Result<Option<String>, ChainError> {
        let data = abi::encode_withdraw(call);
        match self.eth_call(Some(from), &data, json!(quantity(block))).await {
            Ok(_) => Ok(None),
            Err(ChainError::Rpc { message, data, .. }) => Ok(Some(reason_from_rpc(message, data))),
            Err(e) => Err(e),
        }
    }
}
