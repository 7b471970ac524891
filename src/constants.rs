//! Constants and unit helpers for the PRT sale SDK

use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::U256;
use eyre::{Context, Result};

/// Number of NFTs that can be minted without paying
pub const FREE_MINT_LIMIT: u64 = 1000;

/// Default PRT price in ether
pub const DEFAULT_PRT_PRICE_ETH: &str = "0.01";

/// Default NFT price in ether (paid once the free mints are gone)
pub const DEFAULT_NFT_PRICE_ETH: &str = "0.02";

/// Message shown when no wallet account is selected
pub const CONNECT_WALLET_MESSAGE: &str = "To be able to buy, you need to connect your wallet.";

/// Message shown when the wallet's selected account is not the connected one
pub const SELECT_ACCOUNT_MESSAGE: &str = "Select correct account in your wallet.";

/// Convert an ether amount given as a decimal string to wei
pub fn ether_to_wei(ether: &str) -> Result<U256> {
    parse_ether(ether.trim()).with_context(|| format!("Invalid ether amount: {ether}"))
}

/// Format a wei amount as an ether decimal string
pub fn wei_to_ether(wei: U256) -> String {
    format_ether(wei)
}

/// Whether a mint at the given counter value is still free
pub fn is_free_mint(total_minted: U256) -> bool {
    total_minted < U256::from(FREE_MINT_LIMIT)
}
