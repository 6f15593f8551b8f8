// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use hc_chain::PoolContract;
use hc_relayer::pipeline::authorize;
use hc_relayer::request;

use crate::output;
use crate::settings;

/// Run a withdrawal request through every relay check that needs no gas.
pub async fn run(path: &Path) -> Result<()> {
    let body = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let req = request::parse(&body)
        .with_context(|| format!("{} is not a withdrawal request", path.display()))?;
    let authorized = authorize(&req).is_ok();

    let pool = settings::load()?.pool()?;
    let pb = output::waiting(&format!("reading ring {}...", req.call.bucket));
    let snapshot = pool.ring_snapshot(&req.call.bucket).await;
    pb.finish_and_clear();
    let snapshot = snapshot.context("failed to read ring")?;

    let message = snapshot.bind_message(&req.receiver());
    let ring = hc_ring::verify_encoded(&message, &snapshot.occupied(), &req.call.signature);

    output::report(
        serde_json::json!({
            "receiver": req.receiver().to_string(),
            "key_image": req.key_image_x(),
            "ring_hash": snapshot.ring_hash.to_hex(),
            "authorized": authorized,
            "ring_valid": ring.is_ok(),
            "ring_error": ring.as_ref().err().map(|e| e.to_string()),
        }),
        || {
            output::label("receiver", &req.receiver().to_string());
            output::label("key_image", &req.key_image_x());
            output::label("ring_hash", &snapshot.ring_hash.to_hex());
            output::check(
                "authorization",
                if authorized {
                    Ok(())
                } else {
                    Err("message not signed by receiver".into())
                },
            );
            output::check(
                "ring signature",
                ring.as_ref().map(|_| ()).map_err(|e| format!("invalid ({e})")),
            );
        },
    );

    if !authorized || ring.is_err() {
        bail!("request would be rejected by the relayer");
    }
    output::outcome(true, "request passes all pre-chain checks");
    Ok(())
}
