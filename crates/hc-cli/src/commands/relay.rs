// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::output;
use crate::settings;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelayReply {
    tx_hash: Option<String>,
    error_message: Option<String>,
}

pub async fn run(path: &Path) -> Result<()> {
    let body = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_slice::<serde_json::Value>(&body)
        .with_context(|| format!("{} is not JSON", path.display()))?;
    let url = settings::load()?.relayer("/");

    // the relayer answers only once the transaction is mined
    let pb = output::waiting("waiting for the relayer...");
    let resp = reqwest::Client::new()
        .post(&url)
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await;
    pb.finish_and_clear();
    let resp = resp.with_context(|| format!("relayer unreachable at {url}"))?;
    let status = resp.status();
    let reply: RelayReply = resp.json().await.context("unexpected relayer response")?;

    output::report(
        serde_json::json!({
            "status": status.as_u16(),
            "txHash": reply.tx_hash,
            "errorMessage": reply.error_message,
        }),
        || {
            if let Some(hash) = &reply.tx_hash {
                output::label("tx", hash);
            }
        },
    );

    match reply.error_message {
        None => {
            output::outcome(true, "withdrawal mined");
            Ok(())
        }
        Some(e) => {
            output::outcome(false, &e);
            bail!("relay failed with HTTP {status}")
        }
    }
}
