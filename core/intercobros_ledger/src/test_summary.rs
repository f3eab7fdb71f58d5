use crate::invariants::{assert_fee_inclusive, assert_installment, assert_summary_in_range};
use crate::{build_summary, seeded_value, ClientId, LedgerError, FEE_MULTIPLIER, FEE_RATE};

fn id(raw: i64) -> ClientId {
    ClientId::new(raw).unwrap()
}

#[test]
fn test_client_one_matches_reference_figures() {
    // frac(sin(1.5) * 10000) = 0.9498660405442934 in IEEE-754 doubles.
    let expected_initial = (seeded_value(1.5) * 50_000.0).floor() + 10_000.0;
    assert_eq!(expected_initial, 57_493.0);

    let summary = build_summary(id(1));
    assert_eq!(summary.initial_balance, 57_493.0);
    assert_eq!(summary.payments_made, 0);
    assert_eq!(summary.current_balance, 57_493.0);
    assert_eq!(summary.fee_inclusive_balance, 66_116.95);
}

#[test]
fn test_reference_figures_for_other_clients() {
    let two = build_summary(id(2));
    assert_eq!(two.initial_balance, 20_004.0);
    assert_eq!(two.payments_made, 1);
    assert_eq!(two.per_payment_amount, 833.5);
    assert_eq!(two.current_balance, 19_170.5);

    let three = build_summary(id(3));
    assert_eq!(three.initial_balance, 44_941.0);
    assert_eq!(three.payments_made, 4);

    let seven = build_summary(id(7));
    assert_eq!(seven.initial_balance, 12_120.0);
    assert_eq!(seven.payments_made, 3);
    assert_eq!(seven.per_payment_amount, 505.0);
    assert_eq!(seven.current_balance, 10_605.0);

    let forty_two = build_summary(id(42));
    assert_eq!(forty_two.initial_balance, 37_850.0);
    assert_eq!(forty_two.payments_made, 1);
}

#[test]
fn test_summaries_stay_in_range() {
    for raw in 1..=2_000 {
        let summary = build_summary(id(raw));
        assert_summary_in_range(&summary);
        assert_fee_inclusive(&summary);
        assert_installment(&summary);
    }
}

#[test]
fn test_recompute_is_idempotent() {
    for raw in [1, 2, 3, 99, 100, 12_345] {
        assert_eq!(build_summary(id(raw)), build_summary(id(raw)));
    }
}

#[test]
fn test_client_id_rejects_non_positive() {
    assert_eq!(ClientId::new(0), Err(LedgerError::InvalidClientId(0)));
    assert_eq!(ClientId::new(-4), Err(LedgerError::InvalidClientId(-4)));
    assert_eq!(ClientId::new(5).map(ClientId::get), Ok(5));
}

#[test]
fn test_client_id_serde() {
    let parsed: ClientId = serde_json::from_str("12").unwrap();
    assert_eq!(parsed.get(), 12);
    assert!(serde_json::from_str::<ClientId>("0").is_err());
    assert_eq!(serde_json::to_string(&parsed).unwrap(), "12");
}

#[test]
fn test_rounded_summary() {
    let rounded = build_summary(id(3)).rounded();
    assert_eq!(rounded.per_payment_amount, 1_872.54);
    assert_eq!(rounded.current_balance, 37_450.83);
    assert_eq!(rounded.fee_inclusive_balance, 43_068.46);
}

#[test]
fn test_fee_multiplier_is_the_literal_rate() {
    assert_eq!(FEE_RATE, 0.15);
    assert_eq!(FEE_MULTIPLIER.to_bits(), 1.15_f64.to_bits());
}
