//! Error types for the PRT sale SDK
//!
//! Uses `eyre` for ergonomic error handling with context. Errors that callers
//! need to tell apart (waiting on a transaction) get a typed `thiserror` enum.

use alloy::primitives::TxHash;

pub use eyre::{eyre, Context, Report, Result};

/// Why waiting for a transaction stopped before a receipt was available
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    /// The poll budget ran out before the transaction was mined
    #[error("transaction {tx_hash:#x} not mined after {attempts} polls")]
    Timeout { tx_hash: TxHash, attempts: u32 },

    /// The caller cancelled the wait
    #[error("stopped waiting for transaction {tx_hash:#x}")]
    Cancelled { tx_hash: TxHash },

    /// The chain-data API failed while polling
    #[error("chain data request failed: {0:#}")]
    Chain(Report),
}
