//! Session-local payment application.

use crate::error::{LedgerError, Result};
use crate::types::{LedgerSummary, FEE_MULTIPLIER};

/// Apply a payment to a session copy of a summary.
///
/// Rejects zero, negative and non-finite amounts and leaves `summary`
/// untouched. Whether the amount exceeds the outstanding balance is for the
/// caller to decide.
pub fn apply_payment(summary: &LedgerSummary, amount: f64) -> Result<LedgerSummary> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::InvalidAmount(amount));
    }

    let current_balance = summary.current_balance - amount;
    Ok(LedgerSummary {
        initial_balance: summary.initial_balance,
        payments_made: summary.payments_made + 1,
        per_payment_amount: summary.per_payment_amount,
        current_balance,
        fee_inclusive_balance: current_balance * FEE_MULTIPLIER,
    })
}
