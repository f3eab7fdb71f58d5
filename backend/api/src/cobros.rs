//! Collection cases ("cobros"): one per client, built from its ledger.

use chrono::NaiveDate;
use intercobros_ledger::LedgerSummary;
use serde::Serialize;

use crate::records::Person;

const LOAN_TYPES: &[&str] = &[
    "Préstamo Personal",
    "Tarjeta de Crédito",
    "Préstamo Vehicular",
    "Crédito Hipotecario",
];

const BANKS: &[&str] = &[
    "Banco Atlantida",
    "BAC Honduras",
    "Banco Ficohsa",
    "Banco Occidente",
    "Banpais",
    "Banco Lafise",
];

/// Accounts with more installments paid than this are up to date.
const UP_TO_DATE_AFTER: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cobro {
    pub id: u64,
    pub nombre_cliente: String,
    pub dni: String,
    /// Loan type.
    pub descriptivo1: &'static str,
    /// Payment status.
    pub descriptivo2: &'static str,
    pub empresa: &'static str,
    pub fecha_asignacion: NaiveDate,
    pub numero_afiliado: String,
    pub numero_prestamo: String,
    pub saldo_inicial: f64,
    pub pagos_realizados: u32,
    pub saldo_actual: f64,
    pub saldo_con_honorario: f64,
    pub fecha_proximo_pago: NaiveDate,
}

impl Cobro {
    pub fn build(client: &Person, summary: &LedgerSummary) -> Self {
        let id = client.id;
        let figures = summary.rounded();

        Self {
            id,
            nombre_cliente: client.name.clone(),
            dni: client.dni.clone().unwrap_or_else(|| synthetic_dni(id)),
            descriptivo1: LOAN_TYPES[(id % LOAN_TYPES.len() as u64) as usize],
            descriptivo2: if summary.payments_made > UP_TO_DATE_AFTER {
                "Al día"
            } else {
                "Atrasado"
            },
            empresa: BANKS[(id % BANKS.len() as u64) as usize],
            fecha_asignacion: calendar_date(
                2024,
                ((id / 3) % 12) as u32 + 1,
                ((id * 5) % 28) as u32 + 1,
            ),
            numero_afiliado: affiliate_code(id),
            numero_prestamo: loan_code(id),
            saldo_inicial: figures.initial_balance,
            pagos_realizados: summary.payments_made,
            saldo_actual: figures.current_balance,
            saldo_con_honorario: figures.fee_inclusive_balance,
            fecha_proximo_pago: calendar_date(2026, 2, ((id * 7) % 28) as u32 + 1),
        }
    }

    /// Matches on client name, DNI, bank and loan number, ignoring case.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.nombre_cliente.to_lowercase().contains(&needle)
            || self.dni.contains(term)
            || self.empresa.to_lowercase().contains(&needle)
            || self.numero_prestamo.to_lowercase().contains(&needle)
    }
}

/// `AF-010042` for client 42.
pub fn affiliate_code(id: u64) -> String {
    format!("AF-{:06}", 10_000 + id)
}

/// `PR-00020126` for client 42.
pub fn loan_code(id: u64) -> String {
    format!("PR-{:08}", 20_000 + id * 3)
}

fn synthetic_dni(id: u64) -> String {
    let mut dni = (300_000_000 + id * 123_456).to_string();
    dni.truncate(13);
    dni
}

fn calendar_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
