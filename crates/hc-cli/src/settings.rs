// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hc_chain::{EvmPool, RpcClient};
use hc_types::Address;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub pool_address: String,
    pub relayer_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".into(),
            pool_address: String::new(),
            relayer_url: "http://127.0.0.1:3001".into(),
        }
    }
}

impl ClientConfig {
    pub fn pool(&self) -> Result<EvmPool> {
        if self.pool_address.is_empty() {
            return Err(crate::output::fail_with_hint(
                "pool address not configured",
                "run `hc config set pool_address 0x...`",
            ));
        }
        let address = self
            .pool_address
            .parse::<Address>()
            .with_context(|| format!("invalid pool address {}", self.pool_address))?;
        Ok(EvmPool::new(RpcClient::new(self.rpc_url.clone()), address))
    }

    pub fn relayer(&self, path: &str) -> String {
        format!("{}{}", self.relayer_url.trim_end_matches('/'), path)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".hurricash").join("config.json"))
}

/// Missing file means defaults.
pub fn load_from(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("cannot read config at {}", path.display()))?;
    serde_json::from_str(&data).context("invalid config JSON")
}

pub fn save_to(path: &Path, config: &ClientConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}

pub fn load() -> Result<ClientConfig> {
    load_from(&config_path()?)
}

pub fn save(config: &ClientConfig) -> Result<()> {
    save_to(&config_path()?, config)
}
