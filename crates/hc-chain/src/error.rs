// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// The request may or may not have reached the node.
    #[error("transport: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<String>,
    },

    #[error("execution reverted: {reason}")]
    Reverted { reason: String },

    #[error("decode: {0}")]
    Decode(String),

    #[error("signing: {0}")]
    Signing(String),
}

impl From<reqwest::Error> for ChainError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ChainError::Decode(e.to_string())
        } else {
            ChainError::Transport(e.to_string())
        }
    }
}
