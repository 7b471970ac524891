//! In-memory doubles for the wallet, chain and revert-reason services

#![allow(dead_code)]

use alloy::primitives::{address, Address, Bytes, Log, LogData, TxHash, B256, U256};
use alloy::sol_types::{SolCall, SolEvent, SolValue};
use prt_sale_sdk::contracts::IPRT;
use prt_sale_sdk::{
    ChainApi, Network, NetworkConfig, PollPolicy, PrtClient, Receipt, RevertReasonSource,
    TxInclusion, TxRequest, WalletProvider,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const CONTRACT: Address = address!("0x5000000000000000000000000000000000000005");
pub const BUYER: Address = address!("0x1000000000000000000000000000000000000001");
pub const OTHER: Address = address!("0x2000000000000000000000000000000000000002");

pub fn tx_hash() -> TxHash {
    TxHash::repeat_byte(0x42)
}

pub fn test_config() -> NetworkConfig {
    NetworkConfig::new(Network::Goerli, "test-key", CONTRACT)
        .unwrap()
        .with_prt_price(U256::from(1_000u64))
        .with_nft_price(U256::from(5_000u64))
        .with_poll_policy(PollPolicy {
            max_attempts: 5,
            backoff_unit: Duration::from_millis(1),
            backoff_factor: 2,
            max_backoff: Duration::from_millis(4),
        })
}

// ========== Wallet ==========

pub struct FakeWallet {
    pub selected: Option<Address>,
    pub fail_send: bool,
    sent: Mutex<Vec<TxRequest>>,
}

impl FakeWallet {
    pub fn selecting(selected: Option<Address>) -> Self {
        Self {
            selected,
            fail_send: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<TxRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl WalletProvider for FakeWallet {
    async fn selected_address(&self) -> eyre::Result<Option<Address>> {
        Ok(self.selected)
    }

    async fn send_transaction(&self, tx: &TxRequest) -> eyre::Result<TxHash> {
        if self.fail_send {
            eyre::bail!("User denied transaction signature");
        }
        self.sent.lock().unwrap().push(tx.clone());
        Ok(tx_hash())
    }
}

// ========== Chain ==========

pub struct FakeChain {
    pub nonce: u64,
    responses: HashMap<[u8; 4], Bytes>,
    /// Number of polls that report the transaction as unknown
    pending_polls: u32,
    polls: AtomicU32,
    calls: AtomicU32,
    receipt_lookups: AtomicU32,
    /// `None` models a mined transaction whose receipt is not indexed yet
    receipt: Option<Receipt>,
}

impl FakeChain {
    pub fn new(receipt: Option<Receipt>) -> Self {
        Self {
            nonce: 7,
            responses: HashMap::new(),
            pending_polls: 0,
            polls: AtomicU32::new(0),
            calls: AtomicU32::new(0),
            receipt_lookups: AtomicU32::new(0),
            receipt,
        }
    }

    /// Answer calls to `C` with `value`
    pub fn respond<C: SolCall, V: SolValue>(mut self, value: V) -> Self {
        self.responses.insert(C::SELECTOR, value.abi_encode().into());
        self
    }

    pub fn with_total_minted(self, total: u64) -> Self {
        self.respond::<IPRT::getTotalMintedCall, _>(U256::from(total))
    }

    pub fn pending_for(mut self, polls: u32) -> Self {
        self.pending_polls = polls;
        self
    }

    pub fn polls(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn receipt_lookups(&self) -> u32 {
        self.receipt_lookups.load(Ordering::SeqCst)
    }
}

impl ChainApi for FakeChain {
    async fn transaction_count(&self, _address: Address) -> eyre::Result<u64> {
        Ok(self.nonce)
    }

    async fn call(&self, to: Address, data: Bytes) -> eyre::Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        eyre::ensure!(to == CONTRACT, "unexpected call target {}", to);

        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| eyre::eyre!("call data too short"))?;

        self.responses
            .get(&selector)
            .cloned()
            .ok_or_else(|| eyre::eyre!("execution reverted"))
    }

    async fn transaction_inclusion(&self, _tx_hash: TxHash) -> eyre::Result<Option<TxInclusion>> {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst);
        if poll < self.pending_polls {
            return Ok(None);
        }
        Ok(Some(TxInclusion {
            block_hash: Some(B256::repeat_byte(0xbb)),
            block_number: Some(100),
            transaction_index: Some(0),
        }))
    }

    async fn transaction_receipt(&self, _tx_hash: TxHash) -> eyre::Result<Option<Receipt>> {
        self.receipt_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.receipt.clone())
    }
}

// ========== Revert reasons ==========

pub struct FakeReasons {
    pub reason: Option<String>,
    lookups: Mutex<Vec<(TxHash, Network, Option<u64>)>>,
}

impl FakeReasons {
    pub fn answering(reason: &str) -> Self {
        Self {
            reason: Some(reason.to_string()),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reason: None,
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn lookups(&self) -> Vec<(TxHash, Network, Option<u64>)> {
        self.lookups.lock().unwrap().clone()
    }
}

impl RevertReasonSource for FakeReasons {
    async fn revert_reason(
        &self,
        tx_hash: TxHash,
        network: Network,
        block_number: Option<u64>,
    ) -> eyre::Result<String> {
        self.lookups
            .lock()
            .unwrap()
            .push((tx_hash, network, block_number));
        self.reason
            .clone()
            .ok_or_else(|| eyre::eyre!("revert reason service unavailable"))
    }
}

// ========== Receipts ==========

pub fn receipt(status: bool, logs: Vec<Log>) -> Receipt {
    Receipt {
        status,
        tx_hash: tx_hash(),
        block_hash: Some(B256::repeat_byte(0xbb)),
        block_number: Some(100),
        transaction_index: Some(0),
        logs,
    }
}

pub fn event_log<E: SolEvent>(event: &E) -> Log {
    let data: LogData = event.encode_log_data();
    Log {
        address: CONTRACT,
        data,
    }
}

pub type TestClient = PrtClient<FakeWallet, FakeChain, FakeReasons>;

pub fn client(wallet: FakeWallet, chain: FakeChain, reasons: FakeReasons) -> TestClient {
    PrtClient::new(wallet, chain, reasons, test_config())
}
