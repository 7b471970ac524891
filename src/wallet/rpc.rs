//! JSON-RPC wallet (EIP-1193 style requests over HTTP)
//!
//! Talks to an endpoint that manages accounts itself, such as a browser wallet
//! bridge or a development node with unlocked accounts.

use super::{TxRequest, WalletProvider};
use alloy::primitives::{Address, TxHash};
use eyre::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Wallet reached through `eth_accounts` / `eth_sendTransaction`
pub struct RpcWallet {
    url: String,
    client: Client,
    next_id: AtomicU64,
}

impl RpcWallet {
    /// Create a wallet client for a JSON-RPC endpoint
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .use_rustls_tls()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            url: url.into(),
            client,
            next_id: AtomicU64::new(1),
        })
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let resp = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to send {method} request"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            eyre::bail!("{} failed: {} - {}", method, status, body);
        }

        let response: JsonRpcResponse<T> = resp
            .json()
            .await
            .with_context(|| format!("Failed to parse {method} response"))?;

        if let Some(error) = response.error {
            eyre::bail!("{} rejected ({}): {}", method, error.code, error.message);
        }

        response
            .result
            .ok_or_else(|| eyre::eyre!("{} returned no result", method))
    }
}

impl WalletProvider for RpcWallet {
    async fn selected_address(&self) -> Result<Option<Address>> {
        let accounts: Vec<Address> = self.request("eth_accounts", serde_json::json!([])).await?;
        Ok(accounts.first().copied())
    }

    async fn send_transaction(&self, tx: &TxRequest) -> Result<TxHash> {
        let params = serde_json::json!([tx.to_rpc_params()]);
        let tx_hash: TxHash = self.request("eth_sendTransaction", params).await?;
        tracing::debug!("Wallet accepted transaction {:#x}", tx_hash);
        Ok(tx_hash)
    }
}
