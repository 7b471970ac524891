//! PrtClient - main entry point for the SDK

use crate::chain::{ChainApi, Receipt};
use crate::config::NetworkConfig;
use crate::constants::is_free_mint;
use crate::contracts::IPRT;
use crate::error::WaitError;
use crate::events::{decode_sale_events, distributed_token_ids, minted_token};
use crate::present::{render, StatusMessage};
use crate::revert::RevertReasonSource;
use crate::types::{FailureKind, Precondition, SaleDetail, SaleStatus, TxOutcome};
use crate::waiter::{wait_for_receipt, CancelToken};
use crate::wallet::{TxRequest, WalletProvider, WalletState};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::SolCall;
use eyre::{eyre, Context, Report, Result};
use futures::future::{try_join, try_join4};
use std::fmt;

/// Write action performed against the sale contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleAction {
    /// Buy `amount` PRT
    Buy { amount: u8 },
    /// Mint one NFT
    Mint,
}

impl fmt::Display for SaleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleAction::Buy { amount } => write!(f, "buy {} PRT", amount),
            SaleAction::Mint => f.write_str("mint NFT"),
        }
    }
}

/// What is known about a submission when an error interrupts it
#[derive(Debug, Default)]
struct Progress {
    tx_hash: Option<TxHash>,
    reverted: bool,
}

/// Main client for interacting with the PRT sale contract
///
/// Every external service is passed in, so any of them can be replaced
/// (for example by in-memory doubles in tests).
pub struct PrtClient<W, C, R> {
    wallet: W,
    chain: C,
    reasons: R,
    config: NetworkConfig,
}

impl<W, C, R> PrtClient<W, C, R> {
    /// Create a new PrtClient
    pub fn new(wallet: W, chain: C, reasons: R, config: NetworkConfig) -> Self {
        Self {
            wallet,
            chain,
            reasons,
            config,
        }
    }

    /// Get the network configuration
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub fn reasons(&self) -> &R {
        &self.reasons
    }

    /// Render an outcome for display on this client's network
    pub fn present(&self, outcome: &TxOutcome) -> StatusMessage {
        render(outcome, self.config.network)
    }
}

impl<C: ChainApi> PrtClient<(), C, ()> {
    /// Client for sale reads only, without a wallet or revert lookup
    pub fn read_only(chain: C, config: NetworkConfig) -> Self {
        Self::new((), chain, (), config)
    }
}

impl<W, C: ChainApi, R> PrtClient<W, C, R> {
    // ========== Sale Reads ==========

    /// Call a view method on the sale contract
    async fn read<T: SolCall>(&self, call: T) -> Result<T::Return> {
        let result = self
            .chain
            .call(self.config.contract, Bytes::from(call.abi_encode()))
            .await
            .with_context(|| format!("Failed to call {}", T::SIGNATURE))?;

        T::abi_decode_returns(&result).with_context(|| format!("Failed to decode {}", T::SIGNATURE))
    }

    /// Total PRT sold
    pub async fn total_prt(&self) -> Result<U256> {
        self.read(IPRT::getTotalPRTCall {}).await
    }

    /// Total NFTs minted
    pub async fn total_minted(&self) -> Result<U256> {
        self.read(IPRT::getTotalMintedCall {}).await
    }

    pub async fn max_supply_prt(&self) -> Result<U256> {
        self.read(IPRT::MAX_SUPPLY_PRTCall {}).await
    }

    pub async fn max_supply_for_token(&self) -> Result<U256> {
        self.read(IPRT::MAX_SUPPLY_FOR_TOKENCall {}).await
    }

    /// Whether the PRT presale is running
    pub async fn is_presale_prt(&self) -> Result<bool> {
        self.read(IPRT::presalePRTCall {}).await
    }

    /// Whether public minting is open
    pub async fn is_mint_open(&self) -> Result<bool> {
        self.read(IPRT::mintIsOpenCall {}).await
    }

    /// PRT price stored in the contract (wei)
    pub async fn prt_price(&self) -> Result<U256> {
        self.read(IPRT::PRICE_PRTCall {}).await
    }

    /// PRT bought by the wallet's account; zero without an account
    pub async fn per_account_prt(&self, wallet: &WalletState) -> Result<U256> {
        let Some(account) = wallet.primary() else {
            return Ok(U256::ZERO);
        };
        self.read(IPRT::perAccountPRTCall { account }).await
    }

    /// Whether the wallet's account won the draw; false without an account
    pub async fn is_winner(&self, wallet: &WalletState) -> Result<bool> {
        let Some(account) = wallet.primary() else {
            return Ok(false);
        };
        self.read(IPRT::isWinnerCall { account }).await
    }

    /// Read all global sale counters and flags at once
    pub async fn sale_status(&self) -> Result<SaleStatus> {
        let ((total_prt, total_minted, max_supply_prt, max_supply_for_token), (presale_open, mint_open)) =
            try_join(
                try_join4(
                    self.total_prt(),
                    self.total_minted(),
                    self.max_supply_prt(),
                    self.max_supply_for_token(),
                ),
                try_join(self.is_presale_prt(), self.is_mint_open()),
            )
            .await?;

        Ok(SaleStatus {
            total_prt,
            total_minted,
            max_supply_prt,
            max_supply_for_token,
            presale_open,
            mint_open,
        })
    }

    // ========== Transaction Building ==========

    /// Build a PRT purchase for `from`
    ///
    /// Value is the configured PRT price times `amount`. The nonce is read at
    /// the latest block right before building, so two submissions racing from
    /// the same account can end up with the same nonce.
    pub async fn build_buy_tx(&self, from: Address, amount: u8) -> Result<TxRequest> {
        let nonce = self
            .chain
            .transaction_count(from)
            .await
            .context("Failed to read nonce")?;

        let value = self
            .config
            .prt_price
            .checked_mul(U256::from(amount))
            .ok_or_else(|| eyre!("Purchase value overflows"))?;

        let call = IPRT::buyPRTCall {
            account: from,
            amount,
        };

        Ok(TxRequest::new(from, self.config.contract, call.abi_encode(), nonce).with_value(value))
    }

    /// Build an NFT mint for `from`
    ///
    /// The first `FREE_MINT_LIMIT` mints are free; after that the configured
    /// NFT price is paid. Same nonce caveat as [`Self::build_buy_tx`].
    pub async fn build_mint_tx(&self, from: Address) -> Result<TxRequest> {
        let nonce = self
            .chain
            .transaction_count(from)
            .await
            .context("Failed to read nonce")?;

        let total_minted = self.total_minted().await?;
        let value = if is_free_mint(total_minted) {
            U256::ZERO
        } else {
            self.config.nft_price
        };

        let call = IPRT::publicSaleMintCall {};

        Ok(TxRequest::new(from, self.config.contract, call.abi_encode(), nonce).with_value(value))
    }

    /// Wait for a submitted transaction using the configured poll policy
    pub async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        cancel: &CancelToken,
    ) -> std::result::Result<Receipt, WaitError> {
        wait_for_receipt(&self.chain, tx_hash, &self.config.poll, cancel).await
    }
}

impl<W, C, R> PrtClient<W, C, R>
where
    W: WalletProvider,
    C: ChainApi,
    R: RevertReasonSource,
{
    // ========== Sale Operations ==========

    /// Buy `amount` PRT for the wallet's account
    pub async fn buy_prt(&self, amount: u8, wallet: &WalletState, cancel: &CancelToken) -> TxOutcome {
        self.execute(SaleAction::Buy { amount }, wallet, cancel).await
    }

    /// Mint one NFT for the wallet's account
    pub async fn mint_nft(&self, wallet: &WalletState, cancel: &CancelToken) -> TxOutcome {
        self.execute(SaleAction::Mint, wallet, cancel).await
    }

    /// Check preconditions, submit, wait and interpret a sale action
    ///
    /// Always returns exactly one outcome; errors become `TxOutcome::Failed`.
    pub async fn execute(
        &self,
        action: SaleAction,
        wallet: &WalletState,
        cancel: &CancelToken,
    ) -> TxOutcome {
        let from = match self.check_account(wallet).await {
            Ok(Ok(from)) => from,
            Ok(Err(reason)) => {
                tracing::info!("Refusing to {}: {:?}", action, reason);
                return TxOutcome::Rejected { reason };
            }
            Err(err) => return failure(err, Progress::default()),
        };

        let mut progress = Progress::default();
        match self.submit(action, from, cancel, &mut progress).await {
            Ok(outcome) => outcome,
            Err(err) => failure(err, progress),
        }
    }

    /// Selected wallet account, or the precondition it violates
    async fn check_account(
        &self,
        wallet: &WalletState,
    ) -> Result<std::result::Result<Address, Precondition>> {
        let selected = self
            .wallet
            .selected_address()
            .await
            .context("Failed to read selected wallet account")?;

        Ok(match selected {
            None => Err(Precondition::WalletNotConnected),
            Some(selected) if wallet.primary() != Some(selected) => Err(Precondition::WrongAccount),
            Some(selected) => Ok(selected),
        })
    }

    async fn submit(
        &self,
        action: SaleAction,
        from: Address,
        cancel: &CancelToken,
        progress: &mut Progress,
    ) -> Result<TxOutcome> {
        let tx = match action {
            SaleAction::Buy { amount } => self.build_buy_tx(from, amount).await?,
            SaleAction::Mint => self.build_mint_tx(from).await?,
        };

        let tx_hash = self
            .wallet
            .send_transaction(&tx)
            .await
            .context("Failed to send transaction")?;
        progress.tx_hash = Some(tx_hash);
        tracing::info!("Submitted {} transaction {:#x}", action, tx_hash);

        let receipt = self.wait_for_receipt(tx_hash, cancel).await?;

        if !receipt.status {
            progress.reverted = true;
            tracing::warn!("Transaction {:#x} reverted", tx_hash);

            let reason = self
                .reasons
                .revert_reason(tx_hash, self.config.network, receipt.block_number)
                .await
                .context("Failed to fetch revert reason")?;

            return Ok(TxOutcome::Reverted { tx_hash, reason });
        }

        let events = decode_sale_events(&receipt.logs);
        tracing::debug!(
            "Transaction {:#x} emitted {} sale events from {} logs",
            tx_hash,
            events.len(),
            receipt.logs.len()
        );

        let detail = match action {
            SaleAction::Buy { .. } => SaleDetail::Purchase {
                token_ids: distributed_token_ids(&events),
            },
            SaleAction::Mint => {
                let minted = minted_token(&events);
                SaleDetail::Mint {
                    token_id: minted.map(|(id, _)| id),
                    price: minted.map(|(_, price)| price),
                }
            }
        };

        Ok(TxOutcome::Confirmed { tx_hash, detail })
    }
}

/// Turn an error caught after the preconditions into a failure outcome
fn failure(err: Report, progress: Progress) -> TxOutcome {
    let kind = if progress.reverted {
        FailureKind::Reverted
    } else {
        match err.downcast_ref::<WaitError>() {
            Some(WaitError::Timeout { .. }) => FailureKind::Timeout,
            Some(WaitError::Cancelled { .. }) => FailureKind::Cancelled,
            _ => FailureKind::Other,
        }
    };

    tracing::warn!("Sale transaction failed ({:?}): {:#}", kind, err);

    TxOutcome::Failed {
        tx_hash: progress.tx_hash,
        kind,
        message: format!("{err:#}"),
    }
}
