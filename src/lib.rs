//! PRT Sale SDK for Rust
//!
//! A Rust SDK for buying PRT and minting NFTs from the PRT sale contract.
//!
//! # Features
//!
//! - Read sale counters, prices and per-account state
//! - Buy PRT and mint NFTs through any wallet provider
//! - Wait for inclusion with bounded, cancellable polling
//! - Decode sale events and revert reasons into structured outcomes
//!
//! # Example
//!
//! ```rust,ignore
//! use prt_sale_sdk::{
//!     CancelToken, LocalWallet, NetworkConfig, PrtClient, ReplayRevertReason, RpcChain, WalletState,
//! };
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let config = NetworkConfig::from_env()?;
//!     let chain = RpcChain::connect(&config.rpc_url)?;
//!     let reasons = ReplayRevertReason::new(chain.provider().clone(), config.network);
//!     let wallet = LocalWallet::from_private_key("0x...", &config.rpc_url)?;
//!     let account = WalletState::single(wallet.address());
//!     let client = PrtClient::new(wallet, chain, reasons, config);
//!
//!     let outcome = client.mint_nft(&account, &CancelToken::never()).await;
//!     println!("{}", client.present(&outcome).status);
//!
//!     Ok(())
//! }
//! ```

pub mod chain;
pub mod client;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod events;
pub mod present;
pub mod revert;
pub mod types;
pub mod waiter;
pub mod wallet;

// Re-export main types for convenience
pub use chain::{ChainApi, Receipt, RpcChain, TxInclusion};
pub use client::{PrtClient, SaleAction};
pub use config::{Network, NetworkConfig};
pub use error::{eyre, Context, Report, Result, WaitError};
pub use events::{decode_sale_events, SaleEvent};
pub use present::{explorer_tx_url, render, StatusMessage};
pub use revert::{ReplayRevertReason, RevertReasonSource};
pub use types::{FailureKind, Precondition, SaleDetail, SaleStatus, TxOutcome};
pub use waiter::{wait_for_receipt, CancelHandle, CancelToken, PollPolicy};
pub use wallet::{LocalWallet, RpcWallet, TxRequest, WalletProvider, WalletState};
