//! Error types for ledger inputs.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LedgerError {
    #[error("Invalid client id: {0} (must be a positive integer)")]
    InvalidClientId(i64),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
