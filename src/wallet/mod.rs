//! Wallet provider abstraction for the PRT sale SDK
//!
//! A wallet provider knows which account the user selected and can sign and
//! broadcast a prepared transaction (the `eth_sendTransaction` boundary).
//! Two implementations ship with the SDK:
//! - `LocalWallet`: signs locally with a private key
//! - `RpcWallet`: forwards requests to a JSON-RPC endpoint that holds the keys

mod local;
mod rpc;

pub use local::LocalWallet;
pub use rpc::RpcWallet;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use eyre::Result;
use serde::{Deserialize, Serialize};

/// A prepared transaction, ready to be handed to a wallet provider
///
/// Built fresh for every submission and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRequest {
    from: Address,
    to: Address,
    value: U256,
    data: Bytes,
    nonce: u64,
}

impl TxRequest {
    /// Create a zero-value transaction request
    pub fn new(from: Address, to: Address, data: impl Into<Bytes>, nonce: u64) -> Self {
        Self {
            from,
            to,
            value: U256::ZERO,
            data: data.into(),
            nonce,
        }
    }

    /// Set transaction value (wei)
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn from(&self) -> Address {
        self.from
    }

    pub fn to(&self) -> Address {
        self.to
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Parameters for an `eth_sendTransaction` request
    pub fn to_rpc_params(&self) -> SendTransactionParams {
        SendTransactionParams {
            from: self.from,
            to: self.to,
            value: format!("{:#x}", self.value),
            data: self.data.clone(),
            nonce: format!("{:#x}", self.nonce),
        }
    }
}

/// Wire shape of an `eth_sendTransaction` parameter (quantities as hex strings)
#[derive(Debug, Clone, Serialize)]
pub struct SendTransactionParams {
    pub from: Address,
    pub to: Address,
    pub value: String,
    pub data: Bytes,
    pub nonce: String,
}

/// Accounts the user connected to the dApp; only the first one is used
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    pub accounts: Vec<Address>,
}

impl WalletState {
    pub fn new(accounts: Vec<Address>) -> Self {
        Self { accounts }
    }

    /// A wallet with a single connected account
    pub fn single(account: Address) -> Self {
        Self::new(vec![account])
    }

    /// The account operations act on
    pub fn primary(&self) -> Option<Address> {
        self.accounts.first().copied()
    }
}

/// Trait for wallet providers that sign and broadcast transactions
pub trait WalletProvider: Send + Sync {
    /// The account currently selected in the wallet, if any
    fn selected_address(&self) -> impl std::future::Future<Output = Result<Option<Address>>> + Send;

    /// Signs and broadcasts a transaction, returning its hash
    fn send_transaction(
        &self,
        tx: &TxRequest,
    ) -> impl std::future::Future<Output = Result<TxHash>> + Send;
}
