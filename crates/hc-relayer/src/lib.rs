// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! HTTP relay that pays gas for Hurricash withdrawals.
//!
//! A requester proves ring membership off-chain; the relay checks that proof,
//! then submits `withdraw` from its own account so the destination address
//! never needs funds of its own.

pub mod api;
pub mod config;
pub mod error;
pub mod journal;
pub mod pipeline;
pub mod rate_limit;
pub mod request;
pub mod sequencer;

pub use api::{router, AppState, SharedState};
pub use config::{RelayAccount, RelayConfig, ServiceSettings};
pub use error::{RelayError, RelayResponse, RelayResult};
pub use journal::{Journal, Submission, SubmissionStatus};
