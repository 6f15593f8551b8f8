// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! One withdrawal request, from raw body to mined transaction.
//!
//! Stages run in order and each one gates the next:
//! parse, authorization, ring fetch, message binding, ring verification,
//! sequencing, receipt.

use std::sync::Arc;

use hc_chain::{recover_signer, PoolContract};
use hc_types::TxHash;
use tracing::{debug, field, warn, Span};

use crate::error::{RelayError, RelayResult};
use crate::request::{self, WithdrawRequest};
use crate::sequencer::{SequencerHandle, Verdict};

/// How far a request got, so a caller that stops waiting can still report
/// what was put on the wire.
#[derive(Debug, Default)]
pub struct Progress {
    pub key_image: Option<String>,
    pub tx_hash: Option<TxHash>,
}

pub struct Pipeline {
    pool: Arc<dyn PoolContract>,
    sequencer: SequencerHandle,
}

impl Pipeline {
    pub fn new(pool: Arc<dyn PoolContract>, sequencer: SequencerHandle) -> Self {
        Self { pool, sequencer }
    }

    /// Run `body` through every stage, noting the key image once it is
    /// known and the hash once the transaction is on the wire.
    pub async fn process(&self, body: &[u8], progress: &mut Progress) -> RelayResult<TxHash> {
        let span = Span::current();

        let req = request::parse(body)?;
        span.record("receiver", field::display(req.receiver()));
        span.record("bucket", field::display(req.call.bucket));
        debug!(stage = "received");

        authorize(&req)?;
        debug!(stage = "auth_checked");

        let snapshot = self
            .pool
            .ring_snapshot(&req.call.bucket)
            .await
            .map_err(|e| {
                warn!(error = %e, "ring snapshot failed");
                RelayError::UpstreamUnavailable(e.to_string())
            })?;
        let ring = snapshot.occupied();
        debug!(stage = "ring_fetched", members = ring.len(), ring_hash = %snapshot.ring_hash.to_hex());

        let message = snapshot.bind_message(&req.receiver());
        debug!(stage = "message_bound");

        let signature = req.call.signature.clone();
        let verified =
            tokio::task::spawn_blocking(move || hc_ring::verify_encoded(&message, &ring, &signature))
                .await
                .map_err(|e| RelayError::Internal(format!("verifier task: {e}")))?;
        if let Err(reason) = verified {
            debug!(%reason, "ring signature rejected");
            return Err(RelayError::InvalidRingSignature);
        }
        debug!(stage = "ring_verified");

        let key_image = req.key_image_x();
        progress.key_image = Some(key_image.clone());
        let sent = self.sequencer.submit(key_image, req.call).await?;
        progress.tx_hash = Some(sent.tx_hash);
        debug!(stage = "approved", tx_hash = %sent.tx_hash, nonce = sent.nonce);

        match sent.verdict.await {
            Ok(Verdict::Mined) => Ok(sent.tx_hash),
            Ok(Verdict::Reverted { reason }) => Err(RelayError::OnChainRevert {
                tx_hash: sent.tx_hash,
                reason,
            }),
            Ok(Verdict::Unconfirmed) | Err(_) => Err(RelayError::SubmissionUncertain {
                tx_hash: Some(sent.tx_hash),
            }),
        }
    }
}

/// The personal-message signature must come from the receiver, and the
/// message text must name the receiver.
pub fn authorize(req: &WithdrawRequest) -> RelayResult<()> {
    let receiver = req.receiver();
    let signer = recover_signer(req.message.as_bytes(), &req.signature);
    let named = req
        .message
        .to_lowercase()
        .contains(&receiver.to_string().to_lowercase());
    if signer != Some(receiver) || !named {
        debug!(?signer, named, "authorization mismatch");
        return Err(RelayError::AuthorizationMismatch);
    }
    Ok(())
}
