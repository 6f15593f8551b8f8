// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::time::Duration;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::Value;

use crate::output;
use crate::settings;

pub async fn run(key_image: Option<&str>) -> Result<()> {
    match key_image {
        Some(k) => submission(k).await,
        None => health().await,
    }
}

async fn health() -> Result<()> {
    let config = settings::load()?;
    let url = config.relayer("/v1/health");

    let health: Option<Value> = match reqwest::Client::new()
        .get(&url)
        .timeout(Duration::from_secs(3))
        .send()
        .await
    {
        Ok(r) if r.status().is_success() => r.json().await.ok(),
        _ => None,
    };
    let relayer = health
        .as_ref()
        .and_then(|h| h["relayer"].as_str())
        .map(str::to_string);

    output::report(
        serde_json::json!({
            "relayer_url": config.relayer_url,
            "relayer_reachable": health.is_some(),
            "relayer_account": relayer,
        }),
        || {
            let reach = if health.is_some() {
                "reachable".green()
            } else {
                "unreachable".red()
            };
            output::label("relayer", &format!("{reach} ({})", config.relayer_url));
            if let Some(account) = &relayer {
                output::label("relay account", account);
            }
        },
    );
    Ok(())
}

async fn submission(key_image: &str) -> Result<()> {
    let url = settings::load()?.relayer(&format!("/v1/submissions/{key_image}"));
    let resp = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .with_context(|| format!("relayer unreachable at {url}"))?;
    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        bail!("relayer has no submission for {key_image}");
    }
    let resp = resp.error_for_status().context("relayer refused the lookup")?;
    let row: Value = resp.json().await.context("unexpected relayer response")?;

    output::report(row.clone(), || {
        if let Some(status) = row["status"].as_str() {
            output::label("status", &output::submission_status(status).to_string());
        }
        for key in ["txHash", "destination", "amount", "ringIndex", "nonce", "reason"] {
            match &row[key] {
                Value::Null => {}
                Value::String(s) => output::label(key, s),
                other => output::label(key, &other.to_string()),
            }
        }
    });
    Ok(())
}
