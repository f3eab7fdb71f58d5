//! # Types
//!
//! Value types shared by the generator modules.
//!
//! ## Pure figures vs. session figures
//!
//! A [`LedgerSummary`] built by [`crate::build_summary`] is a pure function of
//! the client id. A summary returned by [`crate::apply_payment`] is a session
//! copy: same shape, different numbers, and nothing in this crate remembers
//! it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Surcharge applied on top of the outstanding balance.
pub const FEE_RATE: f64 = 0.15;

/// Factor turning a balance into its fee-inclusive figure. Rounds to the
/// same double as the literal `1.15`.
pub const FEE_MULTIPLIER: f64 = 1.0 + FEE_RATE;

/// Number of installments the initial balance is split into.
pub const INSTALLMENTS: f64 = 24.0;

/// Upper bound (inclusive) of a freshly generated `payments_made`.
pub const MAX_PAYMENTS: u32 = 11;

/// Notes attached to generated payments.
pub const NOTES: &[&str] = &[
    "Pago puntual",
    "Pago parcial",
    "Abono a capital",
    "Pago en ventanilla",
    "Pago por banca en línea",
    "Sin observaciones",
];

/// A validated client identifier (always `>= 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct ClientId(u64);

impl ClientId {
    pub fn new(raw: i64) -> Result<Self> {
        if raw < 1 {
            return Err(LedgerError::InvalidClientId(raw));
        }
        Ok(Self(raw as u64))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The id as a seed operand.
    pub(crate) fn as_seed(self) -> f64 {
        self.0 as f64
    }
}

impl TryFrom<i64> for ClientId {
    type Error = LedgerError;

    fn try_from(raw: i64) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<ClientId> for u64 {
    fn from(id: ClientId) -> Self {
        id.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Balance figures for one client at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    /// Integral amount in `[10000, 59999]`.
    pub initial_balance: f64,
    /// Installments paid so far.
    pub payments_made: u32,
    /// `initial_balance / 24`.
    pub per_payment_amount: f64,
    /// Outstanding balance.
    pub current_balance: f64,
    /// `current_balance * 1.15`.
    pub fee_inclusive_balance: f64,
}

impl LedgerSummary {
    /// Copy with every monetary field rounded to two decimals, for display.
    pub fn rounded(&self) -> Self {
        use crate::seed::round2;

        Self {
            initial_balance: round2(self.initial_balance),
            payments_made: self.payments_made,
            per_payment_amount: round2(self.per_payment_amount),
            current_balance: round2(self.current_balance),
            fee_inclusive_balance: round2(self.fee_inclusive_balance),
        }
    }
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Efectivo,
    Transferencia,
    #[serde(rename = "Depósito")]
    Deposito,
    Tarjeta,
    Cheque,
}

impl PaymentMethod {
    /// Every method, in the order seeded draws index into.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Efectivo,
        PaymentMethod::Transferencia,
        PaymentMethod::Deposito,
        PaymentMethod::Tarjeta,
        PaymentMethod::Cheque,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Efectivo => "Efectivo",
            Self::Transferencia => "Transferencia",
            Self::Deposito => "Depósito",
            Self::Tarjeta => "Tarjeta",
            Self::Cheque => "Cheque",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single payment against a client's balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub client_id: ClientId,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}
