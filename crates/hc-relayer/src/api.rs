// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, DefaultBodyLimit, Path, State},
    http::{Extensions, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hc_chain::PoolContract;
use hc_types::encoding::{hex_to_word, word_to_hex};
use hc_types::{Address, TxHash};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{field, info, info_span, warn, Instrument};

use crate::config::{RelayAccount, ServiceSettings};
use crate::error::{RelayError, RelayResponse};
use crate::journal::Journal;
use crate::pipeline::{Pipeline, Progress};
use crate::rate_limit::{now_ms, FailureThrottle};
use crate::sequencer::Sequencer;

const MAX_BODY_BYTES: usize = 64 * 1024;

pub struct AppState {
    pub pipeline: Pipeline,
    pub journal: Arc<Journal>,
    pub throttle: Mutex<FailureThrottle>,
    pub relayer: Address,
    pub request_timeout: Duration,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire the pipeline to a freshly spawned sequencer. Must be called
    /// inside a tokio runtime.
    pub fn new(
        pool: Arc<dyn PoolContract>,
        journal: Arc<Journal>,
        account: RelayAccount,
        settings: &ServiceSettings,
    ) -> SharedState {
        let relayer = account.address();
        let sequencer =
            Sequencer::new(pool.clone(), journal.clone(), account, settings.clone()).spawn();
        Arc::new(Self {
            pipeline: Pipeline::new(pool, sequencer),
            journal,
            throttle: Mutex::new(FailureThrottle::new(
                settings.bad_per_min,
                settings.throttle_max_entries,
            )),
            relayer,
            request_timeout: settings.request_timeout,
        })
    }

    /// Hash of the transaction a timed-out request put on the wire, if the
    /// sequencer got that far before the caller stopped waiting.
    fn sent_for(&self, progress: Progress) -> Option<TxHash> {
        if progress.tx_hash.is_some() {
            return progress.tx_hash;
        }
        let key_image = progress.key_image?;
        match self.journal.find(&key_image) {
            Ok(row) => row
                .filter(|r| r.status.blocks_resubmission())
                .and_then(|r| r.tx_hash),
            Err(e) => {
                warn!(error = %e, "journal lookup after timeout failed");
                None
            }
        }
    }

    fn throttle(&self) -> MutexGuard<'_, FailureThrottle> {
        self.throttle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", post(withdraw))
        .route("/v1/health", get(health))
        .route("/v1/submissions/{key_image_x}", get(get_submission))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "relayer": state.relayer }))
}

fn client_ip(extensions: &Extensions) -> IpAddr {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

async fn withdraw(State(state): State<SharedState>, extensions: Extensions, body: Bytes) -> Response {
    let ip = client_ip(&extensions);
    let span = info_span!("withdraw", %ip, receiver = field::Empty, bucket = field::Empty);

    async move {
        if state.throttle().is_throttled(ip, now_ms()) {
            warn!("client throttled");
            return RelayError::Throttled.into_response();
        }

        let mut progress = Progress::default();
        let outcome =
            tokio::time::timeout(state.request_timeout, state.pipeline.process(&body, &mut progress))
                .await;
        let result = match outcome {
            Ok(result) => result,
            Err(_) => Err(RelayError::Timeout {
                tx_hash: state.sent_for(progress),
            }),
        };

        match result {
            Ok(tx_hash) => {
                info!(%tx_hash, "withdrawal mined");
                (StatusCode::OK, Json(RelayResponse::sent(tx_hash))).into_response()
            }
            Err(e) => {
                if e.counts_against_client() {
                    state.throttle().record_failure(ip, now_ms());
                }
                info!(error = %e, status = e.status().as_u16(), "withdrawal refused");
                e.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

async fn get_submission(
    State(state): State<SharedState>,
    Path(key_image_x): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let word = hex_to_word(&key_image_x).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid key image" })),
        )
    })?;
    match state.journal.find(&word_to_hex(&word)) {
        Ok(Some(row)) => Ok(Json(row)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "key image not found" })),
        )),
        Err(e) => {
            tracing::error!(error = %e, "journal lookup failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "journal unavailable" })),
            ))
        }
    }
}
