// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use hc_types::Address;

use crate::output;
use crate::settings::{config_path, load, save};

const ALLOWED_KEYS: &[&str] = &["rpc_url", "pool_address", "relayer_url"];

pub fn set(key: &str, value: &str) -> Result<()> {
    let mut config = load()?;
    let stored = match key {
        "rpc_url" => {
            config.rpc_url = value.to_string();
            value.to_string()
        }
        "pool_address" => {
            let address = value.parse::<Address>().map_err(|e| {
                output::fail_with_hint(&format!("invalid address: {e}"), "expected 20 bytes of hex")
            })?;
            config.pool_address = address.to_string();
            config.pool_address.clone()
        }
        "relayer_url" => {
            config.relayer_url = value.to_string();
            value.to_string()
        }
        _ => {
            return Err(output::fail_with_hint(
                &format!("unknown config key: {key}"),
                &format!("allowed keys: {}", ALLOWED_KEYS.join(", ")),
            ))
        }
    };
    save(&config)?;

    output::report(serde_json::json!({ "key": key, "value": stored }), || {
        output::label(key, &stored);
    });
    output::outcome(true, &format!("{key} updated"));
    Ok(())
}

pub fn show() -> Result<()> {
    let config = load()?;
    let path = config_path()?.display().to_string();

    output::report(
        serde_json::json!({
            "path": path,
            "rpc_url": config.rpc_url,
            "pool_address": config.pool_address,
            "relayer_url": config.relayer_url,
        }),
        || {
            output::label("path", &path);
            output::label("rpc_url", &config.rpc_url);
            output::label("pool_address", &config.pool_address);
            output::label("relayer_url", &config.relayer_url);
        },
    );
    Ok(())
}
