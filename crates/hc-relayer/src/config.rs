// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use hc_chain::PrivateKeySigner;
use hc_types::Address;

#[derive(Parser, Clone)]
#[command(name = "hc-relayer", about = "Relays Hurricash withdrawals from a fee-paying account")]
pub struct RelayConfig {
    /// Ethereum JSON-RPC endpoint
    #[arg(long, env = "HC_RPC_URL")]
    pub rpc_url: String,

    /// Pool contract address
    #[arg(long, env = "HC_POOL_ADDRESS")]
    pub pool: Address,

    /// Hex secret key of the account that pays for withdrawals
    #[arg(long, env = "ETH_SK", hide_env_values = true)]
    pub relay_key: String,

    #[arg(long, env = "HC_LISTEN_ADDR", default_value = "0.0.0.0:3001")]
    pub listen: SocketAddr,

    /// SQLite file recording every broadcast withdrawal
    #[arg(long, env = "HC_JOURNAL_PATH", default_value = "hc-relayer.db")]
    pub journal: PathBuf,

    /// Skip `eth_chainId` and sign for this chain
    #[arg(long, env = "HC_CHAIN_ID")]
    pub chain_id: Option<u64>,

    #[arg(long, env = "HC_REQUEST_TIMEOUT_SECS", default_value_t = 600)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "HC_RECEIPT_POLL_MS", default_value_t = 2_000)]
    pub receipt_poll_ms: u64,

    /// Give up on a broadcast transaction that has no receipt after this long
    #[arg(long, env = "HC_RECEIPT_TIMEOUT_SECS", default_value_t = 900)]
    pub receipt_timeout_secs: u64,

    /// Added on top of the node's gas estimate
    #[arg(long, env = "HC_GAS_HEADROOM_PERCENT", default_value_t = 20)]
    pub gas_headroom_percent: u64,

    /// Rejected authorizations or ring signatures allowed per IP per minute
    #[arg(long, env = "HC_BAD_PER_MIN", default_value_t = 6)]
    pub bad_per_min: u64,

    #[arg(long, env = "HC_THROTTLE_MAX_ENTRIES", default_value_t = 20_000)]
    pub throttle_max_entries: usize,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("rpc_url", &self.rpc_url)
            .field("pool", &self.pool)
            .field("relay_key", &"***")
            .field("listen", &self.listen)
            .field("journal", &self.journal)
            .field("chain_id", &self.chain_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("receipt_poll_ms", &self.receipt_poll_ms)
            .field("receipt_timeout_secs", &self.receipt_timeout_secs)
            .field("gas_headroom_percent", &self.gas_headroom_percent)
            .field("bad_per_min", &self.bad_per_min)
            .finish()
    }
}

/// Runtime knobs shared by the sequencer and the HTTP layer, resolved once
/// from [`RelayConfig`] after the chain id is known.
#[derive(Clone, Debug)]
pub struct ServiceSettings {
    pub chain_id: u64,
    pub request_timeout: Duration,
    pub receipt_poll: Duration,
    pub receipt_timeout: Duration,
    pub gas_headroom_percent: u64,
    pub bad_per_min: u64,
    pub throttle_max_entries: usize,
    pub queue_capacity: usize,
}

impl ServiceSettings {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            request_timeout: Duration::from_secs(600),
            receipt_poll: Duration::from_secs(2),
            receipt_timeout: Duration::from_secs(900),
            gas_headroom_percent: 20,
            bad_per_min: 6,
            throttle_max_entries: 20_000,
            queue_capacity: 256,
        }
    }

    pub fn from_config(config: &RelayConfig, chain_id: u64) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            receipt_poll: Duration::from_millis(config.receipt_poll_ms),
            receipt_timeout: Duration::from_secs(config.receipt_timeout_secs),
            gas_headroom_percent: config.gas_headroom_percent,
            bad_per_min: config.bad_per_min,
            throttle_max_entries: config.throttle_max_entries,
            ..Self::new(chain_id)
        }
    }
}

/// The fee-paying account. Its key never appears in `Debug` output.
#[derive(Clone)]
pub struct RelayAccount {
    signer: PrivateKeySigner,
}

impl RelayAccount {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    pub fn from_hex(secret: &str) -> anyhow::Result<Self> {
        let secret = secret.trim();
        if secret.is_empty() {
            bail!("relay key is empty");
        }
        let bytes = hex::decode(secret.strip_prefix("0x").unwrap_or(secret)).context("relay key is not hex")?;
        let signer =
            PrivateKeySigner::from_slice(&bytes).context("relay key is not a valid secp256k1 scalar")?;
        Ok(Self::new(signer))
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

impl fmt::Debug for RelayAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayAccount")
            .field("address", &self.address())
            .field("key", &"***")
            .finish()
    }
}
