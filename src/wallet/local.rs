//! Local private key wallet

use super::{TxRequest, WalletProvider};
use alloy::network::{Ethereum, EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use eyre::{Context, Result};
use std::sync::Arc;

/// Wallet that signs with a raw EVM private key
///
/// The key's address is always the selected account.
pub struct LocalWallet {
    /// Provider with wallet filler - fills gas and chain id and signs
    provider: Arc<dyn Provider<Ethereum>>,
    address: Address,
}

impl LocalWallet {
    /// Create a new LocalWallet from a private key hex string
    ///
    /// # Arguments
    ///
    /// * `private_key` - Hex-encoded private key (with or without 0x prefix)
    /// * `rpc_url` - RPC endpoint URL
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let wallet = LocalWallet::from_private_key(
    ///     "0x...",
    ///     "https://eth-goerli.g.alchemy.com/v2/<key>"
    /// )?;
    /// ```
    pub fn from_private_key(private_key: impl AsRef<str>, rpc_url: impl AsRef<str>) -> Result<Self> {
        let key = private_key.as_ref();
        let key = key.strip_prefix("0x").unwrap_or(key);

        let signer: PrivateKeySigner = key.parse().context("Failed to parse private key")?;

        let address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let url: Url = rpc_url.as_ref().parse().context("Invalid RPC URL")?;

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

        Ok(Self {
            provider: Arc::new(provider),
            address,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl WalletProvider for LocalWallet {
    async fn selected_address(&self) -> Result<Option<Address>> {
        Ok(Some(self.address))
    }

    async fn send_transaction(&self, tx: &TxRequest) -> Result<TxHash> {
        // Nonce is set explicitly, so the nonce filler leaves it alone
        let tx_request = alloy::rpc::types::TransactionRequest::default()
            .with_from(tx.from())
            .with_to(tx.to())
            .with_value(tx.value())
            .with_input(tx.data().clone())
            .with_nonce(tx.nonce());

        let pending_tx = self
            .provider
            .send_transaction(tx_request)
            .await
            .context("Failed to send transaction")?;

        Ok(*pending_tx.tx_hash())
    }
}
