// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # hc-chain
//!
//! Everything the relay needs to talk to an EVM node about a Hurricash pool:
//!
//! - [`abi`]: calldata for `withdraw`, `getRingHash`, `getPublicKeys` and
//!   decoding of their results and of `Error(string)` reverts
//! - [`tx`]: EIP-155 legacy transactions built and signed with alloy
//! - [`personal`]: EIP-191 personal-message signing and signer recovery
//! - [`rpc`]: a minimal JSON-RPC 2.0 client over reqwest
//! - [`contract`]: the [`PoolContract`] seam and its JSON-RPC implementation
//!
//! Node failures surface as a structured [`ChainError`], so callers can tell
//! a transport failure (state unknown) from a node-side rejection.

pub mod abi;
pub mod contract;
pub mod error;
pub mod personal;
pub mod rpc;
pub mod tx;

pub use contract::{EvmPool, PoolContract, Receipt};
pub use error::ChainError;
pub use alloy::signers::local::PrivateKeySigner;
pub use personal::{recover_signer, sign_personal};
pub use rpc::RpcClient;
pub use tx::SignedTransaction;
