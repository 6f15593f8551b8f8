// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use hc_chain::PoolContract;
use hc_types::{BucketId, U256};

use crate::output;
use crate::settings;

pub async fn run(amount: &str, ring_index: u64) -> Result<()> {
    let amount = U256::from_str_radix(amount, 10)
        .map_err(|_| output::fail_with_hint("invalid amount", "amount is in wei, as a decimal integer"))?;
    let bucket = BucketId::new(amount, ring_index);
    let pool = settings::load()?.pool()?;

    let pb = output::waiting(&format!("reading ring {bucket}..."));
    let snapshot = pool.ring_snapshot(&bucket).await;
    pb.finish_and_clear();
    let snapshot = snapshot.with_context(|| format!("failed to read ring {bucket}"))?;
    let members = snapshot.occupied();

    output::report(
        serde_json::json!({
            "amount": amount.to_string(),
            "ring_index": ring_index,
            "ring_hash": snapshot.ring_hash.to_hex(),
            "capacity": snapshot.slots.len(),
            "members": members
                .iter()
                .map(|p| [p.x_hex(), p.y_hex()])
                .collect::<Vec<_>>(),
        }),
        || {
            output::label("ring", &bucket.to_string());
            output::label("ring_hash", &snapshot.ring_hash.to_hex());
            output::label("members", &format!("{}/{}", members.len(), snapshot.slots.len()));
            for (i, p) in members.iter().enumerate() {
                output::label(&format!("  [{i}]"), &format!("({}, {})", p.x_hex(), p.y_hex()));
            }
        },
    );
    Ok(())
}
