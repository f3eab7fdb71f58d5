//! In-memory store — clients, avales, session payments and ledger overlays.
//!
//! Created once in `main` and shared with every handler through
//! [`crate::api::AppState`]. Nothing survives a restart.
//!
//! Payment ids, the payment list and the per-client session summaries sit
//! behind a single mutex so that taking an id, appending the record and
//! moving the balance happen as one step.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use intercobros_ledger::{
    apply_payment, build_summary, history_for, round2, ClientId, LedgerError, LedgerSummary,
    PaymentMethod, PaymentRecord,
};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{ApiError, Result};
use crate::records::{Person, PersonInput, RecordKind};

pub struct Store {
    clients: RwLock<Registry>,
    avales: RwLock<Registry>,
    payments: Mutex<PaymentBook>,
}

struct Registry {
    next_id: u64,
    records: Vec<Person>,
}

#[derive(Default)]
struct PaymentBook {
    next_id: u64,
    entries: Vec<PaymentEntry>,
    sessions: HashMap<ClientId, LedgerSummary>,
}

/// Where a payment entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSource {
    /// Derived from the client's seed; carries no storage id.
    Generated,
    /// Recorded during the running session.
    Session,
}

/// A payment as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub source: PaymentSource,
    #[serde(flatten)]
    pub record: PaymentRecord,
}

/// A validated request to record a payment.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub client_id: ClientId,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

impl Registry {
    fn seeded(kind: RecordKind, count: u32) -> Self {
        let records: Vec<Person> = (1..=count as u64).map(|id| Person::mock(kind, id)).collect();
        Self {
            next_id: count as u64 + 1,
            records,
        }
    }
}

impl Store {
    /// Build a store pre-populated with mock clients and avales.
    pub fn new(seed_clients: u32, seed_avales: u32) -> Self {
        info!("Seeding store with {seed_clients} clients and {seed_avales} avales");
        Self {
            clients: RwLock::new(Registry::seeded(RecordKind::Client, seed_clients)),
            avales: RwLock::new(Registry::seeded(RecordKind::Aval, seed_avales)),
            payments: Mutex::new(PaymentBook {
                next_id: 1,
                ..Default::default()
            }),
        }
    }

    fn registry(&self, kind: RecordKind) -> &RwLock<Registry> {
        match kind {
            RecordKind::Client => &self.clients,
            RecordKind::Aval => &self.avales,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Person records
    // ─────────────────────────────────────────────────────────

    /// Records matching `term` (all when `None`), in insertion order.
    pub fn list(&self, kind: RecordKind, term: Option<&str>) -> Vec<Person> {
        let registry = self.registry(kind).read();
        registry
            .records
            .iter()
            .filter(|p| term.map_or(true, |t| p.matches(t)))
            .cloned()
            .collect()
    }

    pub fn get(&self, kind: RecordKind, id: u64) -> Option<Person> {
        let registry = self.registry(kind).read();
        registry.records.iter().find(|p| p.id == id).cloned()
    }

    pub fn create(&self, kind: RecordKind, input: PersonInput) -> Person {
        let mut registry = self.registry(kind).write();
        let person = Person::from_input(registry.next_id, input);
        registry.next_id += 1;
        registry.records.push(person.clone());
        info!("{} {} created", kind.label(), person.id);
        person
    }

    pub fn update(&self, kind: RecordKind, id: u64, input: PersonInput) -> Result<Person> {
        let mut registry = self.registry(kind).write();
        let person = registry
            .records
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ApiError::NotFound(kind.label()))?;
        person.apply(input);
        debug!("{} {id} updated", kind.label());
        Ok(person.clone())
    }

    /// Remove a record. Deleting a client also forgets its session ledger
    /// and the payments recorded for it.
    ///
    /// Lock order is registry, then payment book, as in
    /// [`Store::record_payment`].
    pub fn delete(&self, kind: RecordKind, id: u64) -> Result<()> {
        let mut registry = self.registry(kind).write();
        let index = registry
            .records
            .iter()
            .position(|p| p.id == id)
            .ok_or(ApiError::NotFound(kind.label()))?;
        registry.records.remove(index);

        if kind == RecordKind::Client {
            if let Ok(client_id) = ClientId::new(id as i64) {
                let mut book = self.payments.lock();
                book.sessions.remove(&client_id);
                book.entries.retain(|e| e.record.client_id != client_id);
            }
        }
        info!("{} {id} deleted", kind.label());
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Ledgers and payments
    // ─────────────────────────────────────────────────────────

    /// The client's session summary, or the pure one if no payment has been
    /// recorded this session.
    pub fn summary_for(&self, client_id: ClientId) -> LedgerSummary {
        self.payments
            .lock()
            .sessions
            .get(&client_id)
            .copied()
            .unwrap_or_else(|| build_summary(client_id))
    }

    /// Generated history followed by the payments recorded this session.
    pub fn payments_for(&self, client_id: ClientId, now: DateTime<Utc>) -> Vec<PaymentEntry> {
        let mut entries: Vec<PaymentEntry> = history_for(client_id, now)
            .into_iter()
            .map(|record| PaymentEntry {
                id: None,
                source: PaymentSource::Generated,
                record,
            })
            .collect();

        let book = self.payments.lock();
        entries.extend(
            book.entries
                .iter()
                .filter(|e| e.record.client_id == client_id)
                .cloned(),
        );
        entries
    }

    /// Record a payment against an existing client and move its session
    /// balance. The amount is rounded to cents first; the rounded value is
    /// what gets validated, applied and stored. On any error nothing changes.
    pub fn record_payment(
        &self,
        payment: NewPayment,
        now: DateTime<Utc>,
    ) -> Result<(PaymentEntry, LedgerSummary)> {
        let client_id = payment.client_id;
        // Held until the entry is stored; `delete` takes it before the book.
        let clients = self.clients.read();
        if !clients.records.iter().any(|p| p.id == client_id.get()) {
            return Err(ApiError::NotFound(RecordKind::Client.label()));
        }

        let amount = round2(payment.amount);
        if amount.is_nan() || amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(payment.amount).into());
        }

        let mut book = self.payments.lock();
        let current = book
            .sessions
            .get(&client_id)
            .copied()
            .unwrap_or_else(|| build_summary(client_id));

        let updated = apply_payment(&current, amount)?;
        if amount > round2(current.current_balance) {
            return Err(ApiError::Validation(format!(
                "Amount {amount:.2} exceeds current balance {:.2}",
                current.current_balance
            )));
        }

        let entry = PaymentEntry {
            id: Some(book.next_id),
            source: PaymentSource::Session,
            record: PaymentRecord {
                client_id,
                amount,
                method: payment.method,
                reference: payment.reference,
                notes: payment.notes,
                timestamp: now,
            },
        };
        book.next_id += 1;
        book.entries.push(entry.clone());
        book.sessions.insert(client_id, updated);

        info!(
            "Payment {} of {amount:.2} recorded for client {client_id}; balance now {:.2}",
            book.next_id - 1,
            updated.current_balance
        );
        Ok((entry, updated))
    }
}
