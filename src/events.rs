//! Decoding of PRT sale events from receipt logs

use crate::contracts::IPRT;
use alloy::primitives::{Address, Log, U256};
use alloy::sol_types::SolEventInterface;

/// Sale event emitted by the PRT contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleEvent {
    /// PRT token ids handed to the buyer
    Distributed { token_ids: Vec<U256> },
    /// NFT minted for `account`
    Minted {
        account: Address,
        token_id: U256,
        price: U256,
    },
}

/// Decode every log the PRT ABI knows about; anything else is skipped
pub fn decode_sale_events(logs: &[Log]) -> Vec<SaleEvent> {
    logs.iter()
        .filter_map(|log| match IPRT::IPRTEvents::decode_log(log) {
            Ok(decoded) => Some(decoded.data),
            Err(err) => {
                tracing::debug!("Skipping log from {}: {}", log.address, err);
                None
            }
        })
        .filter_map(|event| match event {
            IPRT::IPRTEvents::DitributePRTs(e) => Some(SaleEvent::Distributed { token_ids: e.list }),
            IPRT::IPRTEvents::Minter(e) => Some(SaleEvent::Minted {
                account: e.account,
                token_id: e.tokenID,
                price: e.price,
            }),
            IPRT::IPRTEvents::Transfer(_) => None,
        })
        .collect()
}

/// Token ids from the first distribution event
pub fn distributed_token_ids(events: &[SaleEvent]) -> Option<Vec<U256>> {
    events.iter().find_map(|event| match event {
        SaleEvent::Distributed { token_ids } => Some(token_ids.clone()),
        _ => None,
    })
}

/// Token id and price from the first mint event
pub fn minted_token(events: &[SaleEvent]) -> Option<(U256, U256)> {
    events.iter().find_map(|event| match event {
        SaleEvent::Minted {
            token_id, price, ..
        } => Some((*token_id, *price)),
        _ => None,
    })
}
