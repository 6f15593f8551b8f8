// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hc_chain::{EvmPool, RpcClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hc_relayer::{router, AppState, Journal, RelayAccount, RelayConfig, ServiceSettings};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RelayConfig::parse();
    let account = RelayAccount::from_hex(&config.relay_key).context("invalid ETH_SK")?;

    let pool = EvmPool::new(RpcClient::new(config.rpc_url.clone()), config.pool);
    let chain_id = match config.chain_id {
        Some(id) => id,
        None => pool
            .chain_id()
            .await
            .with_context(|| format!("failed to read chain id from {}", config.rpc_url))?,
    };

    let journal = Journal::open(&config.journal)
        .with_context(|| format!("failed to open journal {}", config.journal.display()))?;

    info!(
        relayer = %account.address(),
        pool = %config.pool,
        chain_id,
        rpc = %config.rpc_url,
        journal = %config.journal.display(),
        "hc-relayer starting"
    );

    let settings = ServiceSettings::from_config(&config, chain_id);
    let state = AppState::new(Arc::new(pool), Arc::new(journal), account, &settings);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    info!(listen = %config.listen, "listening");
    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;
    Ok(())
}
