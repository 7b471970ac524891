//! Types for the user-facing API

pub mod outcome;
pub mod sale;

pub use outcome::{FailureKind, Precondition, SaleDetail, TxOutcome};
pub use sale::SaleStatus;
