//! Ledger summary builder.

use crate::seed::seeded_value;
use crate::types::{ClientId, LedgerSummary, FEE_MULTIPLIER, INSTALLMENTS};

const INITIAL_BALANCE_SEED: f64 = 1.5;
const PAYMENT_COUNT_SEED: f64 = 2.3;

const BALANCE_SPREAD: f64 = 50_000.0;
const BALANCE_FLOOR: f64 = 10_000.0;
const PAYMENT_SPREAD: f64 = 12.0;

/// Derive a client's balance figures from its id alone.
pub fn build_summary(client_id: ClientId) -> LedgerSummary {
    let id = client_id.as_seed();

    let initial_balance =
        (seeded_value(id * INITIAL_BALANCE_SEED) * BALANCE_SPREAD).floor() + BALANCE_FLOOR;
    let payments_made = (seeded_value(id * PAYMENT_COUNT_SEED) * PAYMENT_SPREAD).floor() as u32;
    let per_payment_amount = initial_balance / INSTALLMENTS;
    let current_balance = initial_balance - payments_made as f64 * per_payment_amount;

    LedgerSummary {
        initial_balance,
        payments_made,
        per_payment_amount,
        current_balance,
        fee_inclusive_balance: current_balance * FEE_MULTIPLIER,
    }
}
