//! Confirmation waiter: bounded, cancellable polling for transaction inclusion

use crate::chain::{ChainApi, Receipt};
use crate::error::WaitError;
use alloy::primitives::TxHash;
use std::time::Duration;
use tokio::sync::watch;

/// How often, and for how long, to poll for a submitted transaction
///
/// The delay before retry `n` is `backoff_unit * backoff_factor^n`, capped at `max_backoff`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub backoff_unit: Duration,
    pub backoff_factor: u32,
    pub max_backoff: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            backoff_unit: Duration::from_millis(500),
            backoff_factor: 2,
            max_backoff: Duration::from_secs(8),
        }
    }
}

impl PollPolicy {
    /// Delay to wait after the given (zero-based) attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let units = self.backoff_factor.saturating_pow(attempt);
        let backoff = self.backoff_unit.saturating_mul(units);
        core::cmp::min(backoff, self.max_backoff)
    }
}

/// Caller side of a cancellation signal
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Stop any wait observing the paired token
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Observed by the waiter between polls
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A cancellation handle and its token
    pub fn pair() -> (CancelHandle, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, CancelToken { rx })
    }

    /// A token that is never cancelled
    pub fn never() -> Self {
        let (_, token) = Self::pair();
        token
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancelled; never resolves if the handle is gone
    async fn cancelled(&mut self) {
        let observed = self.rx.wait_for(|cancelled| *cancelled).await.is_ok();
        if !observed {
            std::future::pending::<()>().await;
        }
    }
}

/// Poll until `tx_hash` is mined and return its receipt
///
/// Each round asks the chain-data API for the transaction; once block hash,
/// block number and transaction index are all set, the receipt is fetched.
/// Between rounds the waiter sleeps per `policy`, waking early on cancellation.
pub async fn wait_for_receipt<C: ChainApi>(
    chain: &C,
    tx_hash: TxHash,
    policy: &PollPolicy,
    cancel: &CancelToken,
) -> Result<Receipt, WaitError> {
    let mut cancel = cancel.clone();

    for attempt in 0..policy.max_attempts {
        if cancel.is_cancelled() {
            return Err(WaitError::Cancelled { tx_hash });
        }

        let inclusion = chain
            .transaction_inclusion(tx_hash)
            .await
            .map_err(WaitError::Chain)?;

        if inclusion.is_some_and(|inclusion| inclusion.is_mined()) {
            let receipt = chain
                .transaction_receipt(tx_hash)
                .await
                .map_err(WaitError::Chain)?;

            match receipt {
                Some(receipt) => return Ok(receipt),
                None => tracing::debug!("Transaction {:#x} mined, receipt not indexed yet", tx_hash),
            }
        }

        if attempt + 1 == policy.max_attempts {
            break;
        }

        let delay = policy.delay_for(attempt);
        tracing::debug!(
            "Transaction {:#x} pending (attempt {}/{}), next poll in {:?}",
            tx_hash,
            attempt + 1,
            policy.max_attempts,
            delay
        );

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = cancel.cancelled() => return Err(WaitError::Cancelled { tx_hash }),
        }
    }

    Err(WaitError::Timeout {
        tx_hash,
        attempts: policy.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::TxInclusion;
    use alloy::primitives::{Address, Bytes};
    use eyre::Result;

    /// Chain where the transaction never gets mined
    struct NeverMined;

    impl ChainApi for NeverMined {
        async fn transaction_count(&self, _address: Address) -> Result<u64> {
            Ok(0)
        }

        async fn call(&self, _to: Address, _data: Bytes) -> Result<Bytes> {
            Ok(Bytes::new())
        }

        async fn transaction_inclusion(&self, _tx_hash: TxHash) -> Result<Option<TxInclusion>> {
            Ok(None)
        }

        async fn transaction_receipt(&self, _tx_hash: TxHash) -> Result<Option<Receipt>> {
            Ok(None)
        }
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let policy = PollPolicy {
            max_attempts: 10,
            backoff_unit: Duration::from_millis(100),
            backoff_factor: 2,
            max_backoff: Duration::from_millis(1000),
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(800));
        assert_eq!(policy.delay_for(4), Duration::from_millis(1000));
        // Large exponents saturate instead of overflowing
        assert_eq!(policy.delay_for(200), Duration::from_millis(1000));
    }

    #[test]
    fn test_cancel_token() {
        let (handle, token) = CancelToken::pair();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(!CancelToken::never().is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_cancel() {
        let (handle, mut token) = CancelToken::pair();
        handle.cancel();
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("cancellation should be observed");
    }

    #[tokio::test]
    async fn test_timeout_without_trailing_sleep() {
        let policy = PollPolicy {
            max_attempts: 1,
            backoff_unit: Duration::from_secs(60),
            backoff_factor: 2,
            max_backoff: Duration::from_secs(60),
        };
        let hash = TxHash::repeat_byte(0x42);

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            wait_for_receipt(&NeverMined, hash, &policy, &CancelToken::never()),
        )
        .await
        .expect("timeout should be reported without sleeping");

        assert!(matches!(
            result,
            Err(WaitError::Timeout { attempts: 1, .. })
        ));
    }
}
