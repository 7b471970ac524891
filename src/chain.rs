//! Chain access: JSON-RPC reads plus transaction and receipt lookups

use alloy::eips::BlockId;
use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::{Address, Bytes, Log, TxHash, B256};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::rpc::types::{Transaction, TransactionReceipt, TransactionRequest};
use alloy::transports::http::reqwest::Url;
use eyre::{Context, Result};
use std::sync::Arc;

/// Where a transaction sits in the chain, as reported by the node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxInclusion {
    pub block_hash: Option<B256>,
    pub block_number: Option<u64>,
    pub transaction_index: Option<u64>,
}

impl TxInclusion {
    /// A transaction is mined once block hash, number and index are all known
    pub fn is_mined(&self) -> bool {
        self.block_hash.is_some() && self.block_number.is_some() && self.transaction_index.is_some()
    }
}

impl From<&Transaction> for TxInclusion {
    fn from(tx: &Transaction) -> Self {
        Self {
            block_hash: tx.block_hash,
            block_number: tx.block_number,
            transaction_index: tx.transaction_index,
        }
    }
}

/// Receipt of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// true if execution succeeded, false if it reverted
    pub status: bool,
    pub tx_hash: TxHash,
    pub block_hash: Option<B256>,
    pub block_number: Option<u64>,
    pub transaction_index: Option<u64>,
    pub logs: Vec<Log>,
}

impl From<&TransactionReceipt> for Receipt {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            status: receipt.status(),
            tx_hash: receipt.transaction_hash,
            block_hash: receipt.block_hash,
            block_number: receipt.block_number,
            transaction_index: receipt.transaction_index,
            logs: receipt.inner.logs().iter().map(|log| log.inner.clone()).collect(),
        }
    }
}

/// Trait for the JSON-RPC provider and chain-data API the SDK reads from
pub trait ChainApi: Send + Sync {
    /// Transaction count of `address` at the latest block (the next nonce)
    fn transaction_count(
        &self,
        address: Address,
    ) -> impl std::future::Future<Output = Result<u64>> + Send;

    /// Read-only contract call
    fn call(&self, to: Address, data: Bytes) -> impl std::future::Future<Output = Result<Bytes>> + Send;

    /// Inclusion fields of a transaction, `None` if the node does not know it yet
    fn transaction_inclusion(
        &self,
        tx_hash: TxHash,
    ) -> impl std::future::Future<Output = Result<Option<TxInclusion>>> + Send;

    /// Receipt of a transaction, `None` while it is pending
    fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl std::future::Future<Output = Result<Option<Receipt>>> + Send;
}

/// `ChainApi` backed by an HTTP JSON-RPC endpoint (Alchemy or any node)
#[derive(Clone)]
pub struct RpcChain {
    provider: Arc<RootProvider<Ethereum>>,
}

impl RpcChain {
    /// Connect to an RPC URL
    pub fn connect(rpc_url: &str) -> Result<Self> {
        let url: Url = rpc_url.parse().context("Invalid RPC URL")?;
        // Read-only provider without fillers
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url);

        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    pub fn provider(&self) -> &RootProvider<Ethereum> {
        &self.provider
    }
}

impl ChainApi for RpcChain {
    async fn transaction_count(&self, address: Address) -> Result<u64> {
        self.provider
            .get_transaction_count(address)
            .block_id(BlockId::latest())
            .await
            .context("Failed to get transaction count")
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.provider
            .call(TransactionRequest::default().with_to(to).with_input(data))
            .await
            .context("Failed to call contract")
    }

    async fn transaction_inclusion(&self, tx_hash: TxHash) -> Result<Option<TxInclusion>> {
        let tx = self
            .provider
            .get_transaction_by_hash(tx_hash)
            .await
            .context("Failed to get transaction")?;

        Ok(tx.as_ref().map(TxInclusion::from))
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<Receipt>> {
        let receipt: Option<TransactionReceipt> = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .context("Failed to get transaction receipt")?;

        Ok(receipt.as_ref().map(Receipt::from))
    }
}
