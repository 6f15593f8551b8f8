// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Single owner of the relay account's nonce.
//!
//! Approved withdrawals queue on an mpsc channel and are estimated, signed
//! and broadcast one at a time by one task. Nonces therefore never collide,
//! and a nonce is only consumed by a transaction the node accepted. Every
//! signed transaction is journaled before it is sent. After a broadcast a
//! detached watcher waits a bounded time for the receipt and journals the
//! final status, whether or not anyone is still waiting for it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hc_chain::{abi, tx, ChainError, PoolContract, Receipt};
use hc_types::{Address, TxHash, WithdrawCall};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::config::{RelayAccount, ServiceSettings};
use crate::error::{RelayError, RelayResult};
use crate::journal::{Journal, SubmissionStatus};

/// How a broadcast transaction ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Mined,
    Reverted { reason: String },
    /// No receipt before the deadline; the transaction may still land.
    Unconfirmed,
}

/// A transaction the node accepted, and where its verdict will arrive.
pub struct Broadcast {
    pub tx_hash: TxHash,
    pub nonce: u64,
    pub verdict: oneshot::Receiver<Verdict>,
}

struct Job {
    key_image: String,
    call: WithdrawCall,
    reply: oneshot::Sender<RelayResult<Broadcast>>,
}

#[derive(Clone)]
pub struct SequencerHandle {
    jobs: mpsc::Sender<Job>,
}

impl SequencerHandle {
    /// Queue a verified withdrawal. Dropping the returned future before the
    /// transaction is signed withdraws it without reserving a nonce.
    pub async fn submit(&self, key_image: String, call: WithdrawCall) -> RelayResult<Broadcast> {
        let (reply, rx) = oneshot::channel();
        self.jobs
            .send(Job {
                key_image,
                call,
                reply,
            })
            .await
            .map_err(|_| RelayError::Internal("sequencer stopped".into()))?;
        rx.await
            .map_err(|_| RelayError::Internal("sequencer dropped the job".into()))?
    }
}

pub struct Sequencer {
    pool: Arc<dyn PoolContract>,
    journal: Arc<Journal>,
    account: RelayAccount,
    settings: ServiceSettings,
    next_nonce: Option<u64>,
    /// Set by a watcher that gave up on a receipt; the cached nonce may
    /// point past a dropped transaction.
    nonce_stale: Arc<AtomicBool>,
}

impl Sequencer {
    pub fn new(
        pool: Arc<dyn PoolContract>,
        journal: Arc<Journal>,
        account: RelayAccount,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            pool,
            journal,
            account,
            settings,
            next_nonce: None,
            nonce_stale: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn spawn(self) -> SequencerHandle {
        let (tx, rx) = mpsc::channel(self.settings.queue_capacity.max(1));
        tokio::spawn(self.run(rx));
        SequencerHandle { jobs: tx }
    }

    async fn run(mut self, mut jobs: mpsc::Receiver<Job>) {
        while let Some(job) = jobs.recv().await {
            if job.reply.is_closed() {
                debug!(key_image = %job.key_image, "requester gone, job skipped");
                continue;
            }
            let result = self.process(&job).await;
            if job.reply.send(result).is_err() {
                debug!(key_image = %job.key_image, "requester gone before reply");
            }
        }
        debug!("sequencer queue closed");
    }

    async fn process(&mut self, job: &Job) -> RelayResult<Broadcast> {
        let (key_image, call) = (job.key_image.as_str(), &job.call);
        let previous = self.journal.find(key_image).map_err(journal_down)?;
        if let Some(prev) = previous.filter(|p| p.status.blocks_resubmission()) {
            debug!(key_image, status = prev.status.as_str(), "key image already submitted");
            return Err(RelayError::AlreadySubmitted {
                tx_hash: prev.tx_hash,
            });
        }

        let from = self.account.address();
        let gas = match self.pool.estimate_withdraw(&from, call).await {
            Ok(gas) => gas,
            Err(ChainError::Reverted { reason }) => {
                debug!(%reason, "gas estimation reverted");
                return Err(RelayError::WouldRevert(reason));
            }
            Err(e) => return Err(upstream(e)),
        };

        if self.nonce_stale.swap(false, Ordering::AcqRel) {
            debug!(cached = ?self.next_nonce, "dropping cached nonce");
            self.next_nonce = None;
        }
        let nonce = match self.next_nonce {
            Some(n) => n,
            None => self.pool.pending_nonce(&from).await.map_err(upstream)?,
        };
        let gas_price = self.pool.gas_price().await.map_err(upstream)?;
        let gas_limit = gas.saturating_mul(100 + self.settings.gas_headroom_percent) / 100;
        let signed = tx::sign(
            tx::legacy_call(
                self.settings.chain_id,
                nonce,
                gas_price,
                gas_limit,
                self.pool.address(),
                abi::encode_withdraw(call),
            ),
            self.account.signer(),
        )
        .map_err(|e| RelayError::Internal(e.to_string()))?;

        // last point where nothing is on the wire yet
        if job.reply.is_closed() {
            debug!(key_image, "requester gone before broadcast, job dropped");
            return Err(RelayError::Timeout { tx_hash: None });
        }
        self.journal
            .record(key_image, call, nonce, Some(&signed.hash), SubmissionStatus::Uncertain)
            .map_err(journal_down)?;

        match self.pool.submit(&signed.raw).await {
            Ok(tx_hash) => {
                self.next_nonce = Some(nonce + 1);
                if let Err(e) =
                    self.journal
                        .record(key_image, call, nonce, Some(&tx_hash), SubmissionStatus::Broadcast)
                {
                    error!(%tx_hash, error = %e, "failed to journal broadcast, row left uncertain");
                }
                info!(%tx_hash, nonce, gas_limit, "withdrawal broadcast");

                let (verdict_tx, verdict) = oneshot::channel();
                tokio::spawn(watch_receipt(
                    Watch {
                        pool: self.pool.clone(),
                        journal: self.journal.clone(),
                        from,
                        key_image: key_image.to_string(),
                        call: call.clone(),
                        tx_hash,
                        poll: self.settings.receipt_poll,
                        deadline: self.settings.receipt_timeout,
                        nonce_stale: self.nonce_stale.clone(),
                    },
                    verdict_tx,
                ));
                Ok(Broadcast {
                    tx_hash,
                    nonce,
                    verdict,
                })
            }
            Err(ChainError::Rpc { message, .. }) | Err(ChainError::Reverted { reason: message }) => {
                // definitely not in the mempool; re-read the nonce next time
                self.next_nonce = None;
                warn!(nonce, %message, "node rejected withdrawal");
                if let Err(e) = self.journal.forget(key_image) {
                    error!(key_image, error = %e, "failed to clear rejected submission");
                }
                Err(RelayError::SubmissionRejected(message))
            }
            Err(e) => {
                self.next_nonce = None;
                warn!(nonce, tx_hash = %signed.hash, error = %e, "submission outcome unknown");
                Err(RelayError::SubmissionUncertain {
                    tx_hash: Some(signed.hash),
                })
            }
        }
    }
}

fn upstream(e: ChainError) -> RelayError {
    warn!(error = %e, "chain node call failed");
    RelayError::UpstreamUnavailable(e.to_string())
}

fn journal_down(e: rusqlite::Error) -> RelayError {
    error!(error = %e, "journal unavailable");
    RelayError::Internal(format!("journal: {e}"))
}

struct Watch {
    pool: Arc<dyn PoolContract>,
    journal: Arc<Journal>,
    from: Address,
    key_image: String,
    call: WithdrawCall,
    tx_hash: TxHash,
    poll: Duration,
    deadline: Duration,
    nonce_stale: Arc<AtomicBool>,
}

async fn poll_receipt(w: &Watch) -> Receipt {
    loop {
        match w.pool.receipt(&w.tx_hash).await {
            Ok(Some(r)) => return r,
            Ok(None) => {}
            Err(e) => warn!(tx_hash = %w.tx_hash, error = %e, "receipt poll failed"),
        }
        tokio::time::sleep(w.poll).await;
    }
}

async fn watch_receipt(w: Watch, verdict: oneshot::Sender<Verdict>) {
    let Ok(receipt) = tokio::time::timeout(w.deadline, poll_receipt(&w)).await else {
        warn!(tx_hash = %w.tx_hash, deadline = ?w.deadline, "no receipt, giving up");
        w.nonce_stale.store(true, Ordering::Release);
        let reason = format!("no receipt after {}s", w.deadline.as_secs());
        if let Err(e) = w
            .journal
            .resolve(&w.key_image, SubmissionStatus::Uncertain, Some(&reason))
        {
            error!(tx_hash = %w.tx_hash, error = %e, "failed to journal missing receipt");
        }
        let _ = verdict.send(Verdict::Unconfirmed);
        return;
    };

    let outcome = if receipt.success {
        Verdict::Mined
    } else {
        let reason = match w.pool.revert_reason(&w.from, &w.call, receipt.block_number).await {
            Ok(Some(reason)) => reason,
            Ok(None) => "execution reverted".to_string(),
            Err(e) => {
                warn!(tx_hash = %w.tx_hash, error = %e, "could not replay reverted withdrawal");
                "execution reverted".to_string()
            }
        };
        Verdict::Reverted { reason }
    };

    let journaled = match &outcome {
        Verdict::Reverted { reason } => {
            w.journal
                .resolve(&w.key_image, SubmissionStatus::Reverted, Some(reason))
        }
        _ => w.journal.resolve(&w.key_image, SubmissionStatus::Mined, None),
    };
    if let Err(e) = journaled {
        error!(tx_hash = %w.tx_hash, error = %e, "failed to journal receipt");
    }
    info!(
        tx_hash = %w.tx_hash,
        block = receipt.block_number,
        gas_used = receipt.gas_used,
        ?outcome,
        "withdrawal resolved"
    );
    let _ = verdict.send(outcome);
}
