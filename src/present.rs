//! Presentation of transaction outcomes as user-facing status messages

use crate::config::Network;
use crate::constants::{CONNECT_WALLET_MESSAGE, SELECT_ACCOUNT_MESSAGE};
use crate::types::{FailureKind, Precondition, SaleDetail, TxOutcome};
use alloy::primitives::{TxHash, U256};
use serde::Serialize;

/// What a UI shows after a purchase or mint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub success: bool,
    pub status: String,
    /// Explorer page of the transaction, when one was sent
    pub link: Option<String>,
}

/// Etherscan URL of a transaction
pub fn explorer_tx_url(network: Network, tx_hash: TxHash) -> String {
    format!("https://{}/tx/{:#x}", network.explorer_host(), tx_hash)
}

/// Render an outcome for display
pub fn render(outcome: &TxOutcome, network: Network) -> StatusMessage {
    let link = outcome.tx_hash().map(|hash| explorer_tx_url(network, hash));

    let status = match outcome {
        TxOutcome::Rejected { reason } => match reason {
            Precondition::WalletNotConnected => CONNECT_WALLET_MESSAGE.to_string(),
            Precondition::WrongAccount => SELECT_ACCOUNT_MESSAGE.to_string(),
        },
        TxOutcome::Reverted { reason, .. } => {
            format!("😞 Transaction is reverted: {}{}", reason, link_suffix(&link))
        }
        TxOutcome::Failed { kind, message, .. } => {
            let prefix = match kind {
                FailureKind::Reverted => "😞 Transaction is reverted: ",
                _ => "😞 Something went wrong: ",
            };
            format!("{}{}{}", prefix, message, link_suffix(&link))
        }
        TxOutcome::Confirmed { detail, .. } => {
            let mut lines = vec!["✅ Success, check out your transaction on Etherscan:".to_string()];
            lines.extend(link.clone());
            lines.push(detail_line(detail));
            lines.join("\n")
        }
    };

    StatusMessage {
        success: outcome.success(),
        status,
        link,
    }
}

fn link_suffix(link: &Option<String>) -> String {
    link.as_ref().map(|url| format!(". {url}")).unwrap_or_default()
}

fn detail_line(detail: &SaleDetail) -> String {
    match detail {
        SaleDetail::Purchase { token_ids } => {
            let ids = token_ids
                .as_ref()
                .map(|ids| ids.iter().map(U256::to_string).collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            format!("PRT tokens owned: {ids}")
        }
        SaleDetail::Mint { token_id, price } => format!(
            "Minted NFT ID: {}, price of NFT: {}",
            display_or_empty(token_id),
            display_or_empty(price)
        ),
    }
}

fn display_or_empty(value: &Option<U256>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
