//! Structured result of a purchase or mint

use alloy::primitives::{TxHash, U256};
use serde::Serialize;

/// Why a request was refused before anything was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precondition {
    /// The wallet has no selected account
    WalletNotConnected,
    /// The wallet's selected account is not the connected one
    WrongAccount,
}

/// Category of a failure caught after submission started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The transaction reverted and reading its reason failed
    Reverted,
    /// The transaction was not mined within the poll budget
    Timeout,
    /// Waiting was cancelled by the caller
    Cancelled,
    /// Any other provider, wallet or decoding error
    Other,
}

/// Values decoded from a successful transaction's events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SaleDetail {
    /// PRT purchase; ids are `None` when no distribution event was found
    Purchase { token_ids: Option<Vec<U256>> },
    /// NFT mint; fields are `None` when no mint event was found
    Mint {
        token_id: Option<U256>,
        price: Option<U256>,
    },
}

/// Outcome of a single purchase or mint request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TxOutcome {
    /// Refused before submission
    Rejected { reason: Precondition },
    /// Mined with a failed status
    Reverted { tx_hash: TxHash, reason: String },
    /// Mined successfully
    Confirmed { tx_hash: TxHash, detail: SaleDetail },
    /// Any error raised while building, sending, waiting or interpreting
    Failed {
        tx_hash: Option<TxHash>,
        kind: FailureKind,
        message: String,
    },
}

impl TxOutcome {
    pub fn success(&self) -> bool {
        matches!(self, TxOutcome::Confirmed { .. })
    }

    /// Hash of the submitted transaction, if one was sent
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            TxOutcome::Rejected { .. } => None,
            TxOutcome::Reverted { tx_hash, .. } | TxOutcome::Confirmed { tx_hash, .. } => {
                Some(*tx_hash)
            }
            TxOutcome::Failed { tx_hash, .. } => *tx_hash,
        }
    }
}
