use chrono::{Duration, TimeZone, Utc};

use crate::invariants::{assert_amounts_near_installment, assert_history_ordered};
use crate::{build_payment_history, build_summary, history_for, ClientId, PaymentMethod, NOTES};

fn anchor() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_history_length_matches_payments_made() {
    for raw in 1..=200 {
        let id = ClientId::new(raw).unwrap();
        let summary = build_summary(id);
        let history = history_for(id, anchor());
        assert_eq!(history.len(), summary.payments_made as usize);
    }
}

#[test]
fn test_client_with_no_payments_has_empty_history() {
    let id = ClientId::new(1).unwrap();
    assert!(history_for(id, anchor()).is_empty());
}

#[test]
fn test_history_reference_values_client_three() {
    let id = ClientId::new(3).unwrap();
    let history = history_for(id, anchor());

    let days: Vec<i64> = history
        .iter()
        .map(|r| (anchor() - r.timestamp).num_days())
        .collect();
    assert_eq!(days, vec![125, 103, 68, 36]);

    let amounts: Vec<f64> = history.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![1_686.38, 1_686.41, 1_865.04, 1_782.71]);

    let methods: Vec<PaymentMethod> = history.iter().map(|r| r.method).collect();
    assert_eq!(
        methods,
        vec![
            PaymentMethod::Efectivo,
            PaymentMethod::Efectivo,
            PaymentMethod::Deposito,
            PaymentMethod::Tarjeta,
        ]
    );

    let notes: Vec<&str> = history.iter().filter_map(|r| r.notes.as_deref()).collect();
    assert_eq!(notes, vec![NOTES[4], NOTES[4], NOTES[2], NOTES[0]]);

    assert!(history.iter().all(|r| r.reference.is_none()));
    assert!(history.iter().all(|r| r.client_id == id));
}

#[test]
fn test_oldest_payment_comes_first() {
    for raw in 1..=300 {
        let id = ClientId::new(raw).unwrap();
        let summary = build_summary(id);
        let history = history_for(id, anchor());
        assert_history_ordered(&history);
        assert_amounts_near_installment(&history, summary.per_payment_amount);

        if let Some(first) = history.first() {
            let oldest = anchor() - first.timestamp;
            assert!(history.iter().all(|r| anchor() - r.timestamp <= oldest));
        }
    }
}

#[test]
fn test_history_is_pure() {
    let id = ClientId::new(58).unwrap();
    let a = build_payment_history(id, 9, 1_234.5, anchor());
    let b = build_payment_history(id, 9, 1_234.5, anchor());
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_history_dates_shift_with_now() {
    let id = ClientId::new(3).unwrap();
    let later = anchor() + Duration::days(10);
    let a = history_for(id, anchor());
    let b = history_for(id, later);

    for (x, y) in a.iter().zip(&b) {
        assert_eq!(y.timestamp - x.timestamp, Duration::days(10));
        assert_eq!(x.amount, y.amount);
        assert_eq!(x.method, y.method);
    }
}

#[test]
fn test_references_are_formatted() {
    let mut seen = 0;
    for raw in 1..=100 {
        let id = ClientId::new(raw).unwrap();
        for record in history_for(id, anchor()) {
            if let Some(reference) = record.reference {
                seen += 1;
                assert!(reference.starts_with("REF-"));
                assert_eq!(reference.len(), 12);
                assert!(reference[4..].chars().all(|c| c.is_ascii_digit()));
            }
        }
    }
    assert!(seen > 0, "no generated payment carried a reference");
}

#[test]
fn test_payment_method_serializes_display_name() {
    let json = serde_json::to_string(&PaymentMethod::Deposito).unwrap();
    assert_eq!(json, r#""Depósito""#);
    assert_eq!(PaymentMethod::Deposito.to_string(), "Depósito");
}
