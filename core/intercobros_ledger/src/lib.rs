//! # Intercobros Ledger
//!
//! Deterministic synthetic ledgers for collection accounts. Every figure is
//! derived from the client identifier through [`seed::seeded_value`], so two
//! independent callers always agree on a client's balances without sharing
//! any state.
//!
//! | Stage        | Entry Point(s)                                   |
//! |--------------|--------------------------------------------------|
//! | Seed         | [`seeded_value`]                                 |
//! | Summary      | [`build_summary`]                                |
//! | History      | [`build_payment_history`], [`history_for`]       |
//! | Session      | [`apply_payment`]                                |
//!
//! ## Architecture
//!
//! Everything here is a pure function over plain values. The only mutation
//! in the model, applying a payment, returns a new [`LedgerSummary`] and
//! leaves the seed formula untouched: recomputing a summary from the client
//! id always yields the pre-payment figures. Keeping the mutated copy alive
//! is the caller's job.

mod error;
mod history;
mod payment;
mod seed;
mod summary;
mod types;

#[cfg(any(test, feature = "testutils"))]
pub mod invariants;

#[cfg(test)]
mod test_history;
#[cfg(test)]
mod test_summary;

pub use error::{LedgerError, Result};
pub use history::{build_payment_history, history_for};
pub use payment::apply_payment;
pub use seed::{round2, seeded_value};
pub use summary::build_summary;
pub use types::{
    ClientId, LedgerSummary, PaymentMethod, PaymentRecord, FEE_MULTIPLIER, FEE_RATE, INSTALLMENTS,
    MAX_PAYMENTS, NOTES,
};
