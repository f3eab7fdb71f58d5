//! Synthetic payment history.
//!
//! Record `i` draws its figures from seeds `client_id * i + offset`, one
//! offset per field. Index 0 is the oldest payment; each later index sits
//! roughly 30 days closer to `now`.

use chrono::{DateTime, Duration, Utc};

use crate::seed::{round2, seeded_value};
use crate::summary::build_summary;
use crate::types::{ClientId, PaymentMethod, PaymentRecord, NOTES};

const DATE_JITTER_SEED: f64 = 100.0;
const VARIATION_SEED: f64 = 50.0;
const METHOD_SEED: f64 = 200.0;
const REFERENCE_COIN_SEED: f64 = 300.0;
const NOTES_SEED: f64 = 400.0;
const REFERENCE_DIGITS_SEED: f64 = 500.0;

const DAYS_PER_PAYMENT: i64 = 30;
const DATE_JITTER_DAYS: f64 = 15.0;

/// Generate `payments_made` records for a client, oldest first.
///
/// `now` anchors the dates; everything else depends only on the other
/// arguments.
pub fn build_payment_history(
    client_id: ClientId,
    payments_made: u32,
    per_payment_amount: f64,
    now: DateTime<Utc>,
) -> Vec<PaymentRecord> {
    let id = client_id.as_seed();

    (0..payments_made)
        .map(|i| {
            let base = id * i as f64;

            let jitter = (seeded_value(base + DATE_JITTER_SEED) * DATE_JITTER_DAYS).floor() as i64;
            let days_ago = (payments_made - i) as i64 * DAYS_PER_PAYMENT + jitter;

            let variation = 0.8 + seeded_value(base + VARIATION_SEED) * 0.4;
            let amount = round2(per_payment_amount * variation);

            let reference = (seeded_value(base + REFERENCE_COIN_SEED) > 0.5)
                .then(|| format_reference(base));

            PaymentRecord {
                client_id,
                amount,
                method: pick(&PaymentMethod::ALL, seeded_value(base + METHOD_SEED)),
                reference,
                notes: Some(pick(NOTES, seeded_value(base + NOTES_SEED)).to_string()),
                timestamp: now - Duration::days(days_ago),
            }
        })
        .collect()
}

/// History for a client as derived from its pure summary.
pub fn history_for(client_id: ClientId, now: DateTime<Utc>) -> Vec<PaymentRecord> {
    let summary = build_summary(client_id);
    build_payment_history(
        client_id,
        summary.payments_made,
        summary.per_payment_amount,
        now,
    )
}

fn pick<T: Copy>(items: &[T], draw: f64) -> T {
    let idx = ((draw * items.len() as f64).floor() as usize).min(items.len() - 1);
    items[idx]
}

fn format_reference(base: f64) -> String {
    let digits = (seeded_value(base + REFERENCE_DIGITS_SEED) * 100_000_000.0).floor() as u64;
    format!("REF-{digits:08}")
}
