#![allow(dead_code)]

//! Assertion helpers for ledger invariants, shared with downstream tests
//! through the `testutils` feature.

use crate::types::{LedgerSummary, PaymentRecord, FEE_MULTIPLIER, INSTALLMENTS, MAX_PAYMENTS};

const TOLERANCE: f64 = 1e-9;

/// Freshly built summaries stay inside the generator's ranges.
pub fn assert_summary_in_range(summary: &LedgerSummary) {
    assert!(
        (10_000.0..=59_999.0).contains(&summary.initial_balance),
        "initial balance {} out of range",
        summary.initial_balance
    );
    assert_eq!(
        summary.initial_balance.fract(),
        0.0,
        "initial balance {} is not integral",
        summary.initial_balance
    );
    assert!(
        summary.payments_made <= MAX_PAYMENTS,
        "payments made {} exceeds {MAX_PAYMENTS}",
        summary.payments_made
    );
}

/// The fee-inclusive balance is always 115% of the current balance.
pub fn assert_fee_inclusive(summary: &LedgerSummary) {
    let expected = summary.current_balance * FEE_MULTIPLIER;
    assert!(
        (summary.fee_inclusive_balance - expected).abs() < TOLERANCE,
        "fee-inclusive balance {} != {} * 1.15",
        summary.fee_inclusive_balance,
        summary.current_balance
    );
}

/// The installment size is the initial balance over 24.
pub fn assert_installment(summary: &LedgerSummary) {
    assert!(
        (summary.per_payment_amount - summary.initial_balance / INSTALLMENTS).abs() < TOLERANCE,
        "per-payment amount {} does not split {} into 24",
        summary.per_payment_amount,
        summary.initial_balance
    );
}

/// Payment application moves the balance by exactly `amount`.
pub fn assert_payment_applied(before: &LedgerSummary, after: &LedgerSummary, amount: f64) {
    assert!(
        (after.current_balance - (before.current_balance - amount)).abs() < TOLERANCE,
        "balance {} - {} != {}",
        before.current_balance,
        amount,
        after.current_balance
    );
    assert_eq!(after.payments_made, before.payments_made + 1);
    assert_fee_inclusive(after);
}

/// Histories are ordered oldest first with strictly increasing timestamps.
pub fn assert_history_ordered(history: &[PaymentRecord]) {
    for pair in history.windows(2) {
        assert!(
            pair[0].timestamp < pair[1].timestamp,
            "payment at {} is not older than {}",
            pair[0].timestamp,
            pair[1].timestamp
        );
    }
}

/// Every generated amount lies within ±20% of the installment (plus rounding).
pub fn assert_amounts_near_installment(history: &[PaymentRecord], per_payment_amount: f64) {
    let low = per_payment_amount * 0.8 - 0.005;
    let high = per_payment_amount * 1.2 + 0.005;
    for record in history {
        assert!(
            (low..=high).contains(&record.amount),
            "amount {} outside [{low}, {high}]",
            record.amount
        );
    }
}
