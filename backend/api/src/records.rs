//! Person records (clients and avales) and list pagination.
//!
//! Clients and avales share one shape; [`RecordKind`] only changes labels
//! and seeded names.

use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, Result};

/// Which registry a person record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Client,
    Aval,
}

impl RecordKind {
    /// Singular label used in messages (`Client not found`).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Aval => "Aval",
        }
    }

    /// Display name prefix for seeded records.
    fn seed_name(&self) -> &'static str {
        match self {
            Self::Client => "Cliente",
            Self::Aval => "Aval",
        }
    }

    fn seed_email(&self) -> &'static str {
        match self {
            Self::Client => "cliente",
            Self::Aval => "aval",
        }
    }
}

/// A stored client or aval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_home: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_work: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_home: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_work: Option<String>,
}

impl Person {
    /// Mock record number `id` of the given kind (`Cliente 7`, `cliente7@example.com`, `555-0007`).
    pub fn mock(kind: RecordKind, id: u64) -> Self {
        Self {
            id,
            name: format!("{} {id}", kind.seed_name()),
            email: format!("{}{id}@example.com", kind.seed_email()),
            phone: format!("555-{id:04}"),
            dni: None,
            phone_home: None,
            phone_work: None,
            address_home: None,
            address_work: None,
        }
    }

    pub fn from_input(id: u64, input: PersonInput) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            dni: non_empty(input.dni),
            phone_home: non_empty(input.phone_home),
            phone_work: non_empty(input.phone_work),
            address_home: non_empty(input.address_home),
            address_work: non_empty(input.address_work),
        }
    }

    /// Overwrite every editable field.
    pub fn apply(&mut self, input: PersonInput) {
        *self = Self::from_input(self.id, input);
    }

    /// Search filter: names, emails and addresses match case-insensitively,
    /// phone numbers and DNI by plain substring.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        let contains_ci = |s: &str| s.to_lowercase().contains(&needle);
        let opt_contains = |s: &Option<String>| s.as_deref().is_some_and(|v| v.contains(term));
        let opt_contains_ci = |s: &Option<String>| s.as_deref().is_some_and(contains_ci);

        contains_ci(self.name.as_str())
            || contains_ci(self.email.as_str())
            || self.phone.contains(term)
            || opt_contains(&self.dni)
            || opt_contains(&self.phone_home)
            || opt_contains(&self.phone_work)
            || opt_contains_ci(&self.address_home)
            || opt_contains_ci(&self.address_work)
    }
}

/// Request body for create and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub dni: Option<String>,
    pub phone_home: Option<String>,
    pub phone_work: Option<String>,
    pub address_home: Option<String>,
    pub address_work: Option<String>,
}

impl PersonInput {
    pub fn validate(self) -> Result<Self> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required".to_string()));
        }
        Ok(self)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ─────────────────────────────────────────────────────────
// Pagination
// ─────────────────────────────────────────────────────────

/// Raw `?page=&limit=&search=` parameters. Numbers are parsed leniently:
/// anything missing, unparsable or below 1 falls back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl ListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: positive_or(self.page.as_deref(), 1),
            limit: positive_or(self.limit.as_deref(), 10),
        }
    }

    /// The search term, if one was given and is not blank.
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

impl Pagination {
    /// Slice out the requested page; pages past the end are empty.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = (self.page - 1).saturating_mul(self.limit);
        items
            .iter()
            .skip(start)
            .take(self.limit)
            .cloned()
            .collect()
    }
}

fn positive_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}
