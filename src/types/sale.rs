//! Sale state snapshot

use alloy::primitives::U256;
use serde::Serialize;

/// Global sale counters and flags read from the contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleStatus {
    pub total_prt: U256,
    pub total_minted: U256,
    pub max_supply_prt: U256,
    pub max_supply_for_token: U256,
    pub presale_open: bool,
    pub mint_open: bool,
}

impl SaleStatus {
    /// PRT still available for sale
    pub fn remaining_prt(&self) -> U256 {
        self.max_supply_prt.saturating_sub(self.total_prt)
    }

    /// NFTs still available to mint
    pub fn remaining_tokens(&self) -> U256 {
        self.max_supply_for_token.saturating_sub(self.total_minted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_saturates() {
        let status = SaleStatus {
            total_prt: U256::from(120u64),
            total_minted: U256::from(10u64),
            max_supply_prt: U256::from(100u64),
            max_supply_for_token: U256::from(50u64),
            presale_open: false,
            mint_open: true,
        };
        assert_eq!(status.remaining_prt(), U256::ZERO);
        assert_eq!(status.remaining_tokens(), U256::from(40u64));
    }
}
