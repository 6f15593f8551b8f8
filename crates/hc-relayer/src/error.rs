// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hc_types::TxHash;
use serde::Serialize;
use thiserror::Error;

/// Every way a withdrawal request can end other than a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("{0}")]
    MalformedPayload(&'static str),

    #[error("Invalid Message Signature")]
    AuthorizationMismatch,

    #[error("Invalid Ring Signature")]
    InvalidRingSignature,

    #[error("Chain node unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("EVM revert on gas estimation: {0}")]
    WouldRevert(String),

    #[error("Transaction reverted: {reason}")]
    OnChainRevert { tx_hash: TxHash, reason: String },

    #[error("Request timed out")]
    Timeout { tx_hash: Option<TxHash> },

    #[error("Key image already submitted")]
    AlreadySubmitted { tx_hash: Option<TxHash> },

    #[error("Transaction rejected by node: {0}")]
    SubmissionRejected(String),

    #[error("Submission state unknown, check /v1/submissions before retrying")]
    SubmissionUncertain { tx_hash: Option<TxHash> },

    #[error("Too many rejected requests")]
    Throttled,

    #[error("Internal error")]
    Internal(String),
}

impl RelayError {
    pub const INVALID_PAYLOAD: RelayError = RelayError::MalformedPayload("Invalid payload");
    pub const INVALID_FORMAT: RelayError = RelayError::MalformedPayload("Payload invalid format");

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MalformedPayload(_)
            | RelayError::AuthorizationMismatch
            | RelayError::InvalidRingSignature => StatusCode::BAD_REQUEST,
            RelayError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Throttled => StatusCode::TOO_MANY_REQUESTS,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::WouldRevert(_)
            | RelayError::OnChainRevert { .. }
            | RelayError::AlreadySubmitted { .. }
            | RelayError::SubmissionRejected(_)
            | RelayError::SubmissionUncertain { .. } => StatusCode::OK,
        }
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            RelayError::OnChainRevert { tx_hash, .. } => Some(*tx_hash),
            RelayError::Timeout { tx_hash }
            | RelayError::AlreadySubmitted { tx_hash }
            | RelayError::SubmissionUncertain { tx_hash } => *tx_hash,
            _ => None,
        }
    }

    /// Failures a client can produce at will without paying gas.
    pub fn counts_against_client(&self) -> bool {
        matches!(
            self,
            RelayError::AuthorizationMismatch | RelayError::InvalidRingSignature
        )
    }
}

/// Body of every `POST /` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub tx_hash: Option<TxHash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RelayResponse {
    pub fn sent(tx_hash: TxHash) -> Self {
        Self {
            tx_hash: Some(tx_hash),
            error_message: None,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        if let RelayError::Internal(detail) = &self {
            tracing::error!(%detail, "internal error");
        }
        let body = RelayResponse {
            tx_hash: self.tx_hash(),
            error_message: Some(self.to_string()),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_chain_failures_are_400() {
        for e in [
            RelayError::INVALID_PAYLOAD,
            RelayError::INVALID_FORMAT,
            RelayError::AuthorizationMismatch,
            RelayError::InvalidRingSignature,
        ] {
            assert_eq!(e.status(), StatusCode::BAD_REQUEST, "{e}");
            assert_eq!(e.tx_hash(), None);
        }
    }

    #[test]
    fn chain_outcomes_are_200() {
        let h = TxHash::repeat_byte(1);
        for e in [
            RelayError::WouldRevert("x".into()),
            RelayError::OnChainRevert {
                tx_hash: h,
                reason: "x".into(),
            },
            RelayError::AlreadySubmitted { tx_hash: Some(h) },
            RelayError::SubmissionRejected("nonce too low".into()),
            RelayError::SubmissionUncertain { tx_hash: Some(h) },
        ] {
            assert_eq!(e.status(), StatusCode::OK, "{e}");
        }
    }

    #[test]
    fn timeout_carries_broadcast_hash() {
        let e = RelayError::Timeout {
            tx_hash: Some(TxHash::repeat_byte(2)),
        };
        assert_eq!(e.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(e.tx_hash(), Some(TxHash::repeat_byte(2)));
    }

    #[test]
    fn internal_detail_not_shown() {
        let e = RelayError::Internal("journal: disk I/O error".into());
        assert_eq!(e.to_string(), "Internal error");
    }

    #[test]
    fn response_shape() {
        let ok = serde_json::to_value(RelayResponse::sent(TxHash::repeat_byte(0xab))).unwrap();
        assert_eq!(ok, serde_json::json!({ "txHash": format!("0x{}", "ab".repeat(32)) }));

        let err = RelayResponse {
            tx_hash: None,
            error_message: Some("Invalid payload".into()),
        };
        assert_eq!(
            serde_json::to_value(err).unwrap(),
            serde_json::json!({ "txHash": null, "errorMessage": "Invalid payload" })
        );
    }
}
