//! Revert reason lookup for failed transactions

use crate::config::Network;
use alloy::eips::BlockId;
use alloy::network::Ethereum;
use alloy::primitives::TxHash;
use alloy::providers::{Provider, RootProvider};
use alloy::sol_types::decode_revert_reason;
use eyre::{Context, Result};
use std::sync::Arc;

/// Trait for services that explain why a mined transaction reverted
pub trait RevertReasonSource: Send + Sync {
    /// Human-readable revert reason for `tx_hash`, mined in `block_number` on `network`
    fn revert_reason(
        &self,
        tx_hash: TxHash,
        network: Network,
        block_number: Option<u64>,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Recovers revert reasons by replaying the transaction with `eth_call`
/// against the state of the block it was mined in
#[derive(Clone)]
pub struct ReplayRevertReason {
    provider: Arc<RootProvider<Ethereum>>,
    network: Network,
}

impl ReplayRevertReason {
    pub fn new(provider: RootProvider<Ethereum>, network: Network) -> Self {
        Self {
            provider: Arc::new(provider),
            network,
        }
    }
}

impl RevertReasonSource for ReplayRevertReason {
    async fn revert_reason(
        &self,
        tx_hash: TxHash,
        network: Network,
        block_number: Option<u64>,
    ) -> Result<String> {
        eyre::ensure!(
            network == self.network,
            "Revert lookup is connected to {}, not {}",
            self.network,
            network
        );

        let tx = self
            .provider
            .get_transaction_by_hash(tx_hash)
            .await
            .context("Failed to get reverted transaction")?
            .ok_or_else(|| eyre::eyre!("Transaction {:#x} not found", tx_hash))?;

        let block = block_number.map(BlockId::number).unwrap_or_else(BlockId::latest);

        match self.provider.call(tx.into_request()).block(block).await {
            // Replay succeeded, so the revert depended on state we cannot reproduce
            Ok(_) => Ok(String::new()),
            Err(err) => {
                if let Some(data) = err.as_error_resp().and_then(|payload| payload.as_revert_data()) {
                    return Ok(decode_revert_reason(&data).unwrap_or_else(|| data.to_string()));
                }

                // Node reported a revert without returning the revert data
                if let Some(payload) = err
                    .as_error_resp()
                    .filter(|payload| payload.message.contains("revert"))
                {
                    return Ok(payload.message.to_string());
                }

                Err(err).context("Failed to replay reverted transaction")
            }
        }
    }
}
