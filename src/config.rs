//! Network configuration for the PRT sale SDK

use crate::constants::{ether_to_wei, DEFAULT_NFT_PRICE_ETH, DEFAULT_PRT_PRICE_ETH};
use crate::waiter::PollPolicy;
use alloy::primitives::{Address, U256};
use eyre::{eyre, Context, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Ethereum networks the sale contract can live on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Goerli,
    Sepolia,
}

impl Network {
    /// Network name as used by explorers and revert-reason lookups
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Goerli => "goerli",
            Network::Sepolia => "sepolia",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Goerli => 5,
            Network::Sepolia => 11155111,
        }
    }

    /// Alchemy JSON-RPC endpoint for this network
    pub fn alchemy_url(&self, api_key: &str) -> String {
        format!("https://eth-{}.g.alchemy.com/v2/{}", self.name(), api_key)
    }

    /// Etherscan host for this network (mainnet has no subdomain)
    pub fn explorer_host(&self) -> String {
        match self {
            Network::Mainnet => "etherscan.io".to_string(),
            other => format!("{}.etherscan.io", other.name()),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "homestead" => Ok(Network::Mainnet),
            "goerli" => Ok(Network::Goerli),
            "sepolia" => Ok(Network::Sepolia),
            other => Err(eyre!("Unknown network: {}", other)),
        }
    }
}

/// Network configuration containing the RPC URL, sale contract and prices
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network the contract is deployed on
    pub network: Network,
    /// RPC endpoint URL (also serves transaction and receipt lookups)
    pub rpc_url: String,
    /// PRT sale contract address
    pub contract: Address,
    /// Price of one PRT in wei
    pub prt_price: U256,
    /// Price of one NFT in wei once the free mints are used up
    pub nft_price: U256,
    /// How long to wait for a submitted transaction
    pub poll: PollPolicy,
}

impl NetworkConfig {
    /// Create a configuration for a contract on `network`, using the Alchemy endpoint
    pub fn new(network: Network, api_key: &str, contract: Address) -> Result<Self> {
        Ok(Self {
            network,
            rpc_url: network.alchemy_url(api_key),
            contract,
            prt_price: ether_to_wei(DEFAULT_PRT_PRICE_ETH)?,
            nft_price: ether_to_wei(DEFAULT_NFT_PRICE_ETH)?,
            poll: PollPolicy::default(),
        })
    }

    /// Build configuration from environment variables
    ///
    /// Required: `ALCHEMY_API_KEY`, `PRT_CONTRACT_ADDRESS`.
    /// Optional: `PRT_NETWORK` (default goerli), `PRT_PRICE_ETH`, `NFT_PRICE_ETH`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ALCHEMY_API_KEY").context("ALCHEMY_API_KEY must be set")?;
        let contract: Address = std::env::var("PRT_CONTRACT_ADDRESS")
            .context("PRT_CONTRACT_ADDRESS must be set")?
            .parse()
            .context("Invalid PRT_CONTRACT_ADDRESS")?;

        let network = match std::env::var("PRT_NETWORK") {
            Ok(name) => name.parse()?,
            Err(_) => Network::default(),
        };

        let mut config = Self::new(network, &api_key, contract)?;
        if let Ok(price) = std::env::var("PRT_PRICE_ETH") {
            config.prt_price = ether_to_wei(&price)?;
        }
        if let Ok(price) = std::env::var("NFT_PRICE_ETH") {
            config.nft_price = ether_to_wei(&price)?;
        }

        Ok(config)
    }

    /// Use a custom RPC URL
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    /// Set the PRT price (wei)
    pub fn with_prt_price(mut self, price: U256) -> Self {
        self.prt_price = price;
        self
    }

    /// Set the NFT price (wei)
    pub fn with_nft_price(mut self, price: U256) -> Self {
        self.nft_price = price;
        self
    }

    /// Set the confirmation poll policy
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }
}
