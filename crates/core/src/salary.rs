//! Salary domain types, the persistence trait, and the salary service.
//!
//! [`SalaryService`] owns the two salary pipelines:
//!
//! - import ([`crate::salary_import`]): CSV bytes -> validated records ->
//!   full replace of the stored set, plus an [`UploadReport`];
//! - filter ([`crate::salary_filter`]): sparse [`FilterCondition`] ->
//!   store query -> USD-normalised [`SalaryResponse`] list.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::currency::CurrencyRates;

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// One employee compensation entry as parsed from an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Numeric amount kept as text, exactly as it appeared in the file.
    pub amount: String,
    /// Three-letter currency code.
    pub currency: String,
    pub seniority: String,
    pub years_total: String,
    pub country: String,
    pub english_level: String,
}

/// Summary of one import call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    /// Data rows read, header excluded.
    pub total_records: usize,
    /// Data rows rejected by validation.
    pub skipped_records: usize,
    /// One message per skipped row, in input order.
    pub errors: Vec<String>,
}

impl UploadReport {
    /// Record a skipped row together with its reason.
    pub fn skip(&mut self, reason: impl Into<String>) {
        self.errors.push(reason.into());
        self.skipped_records += 1;
    }

    /// Number of rows that made it into the stored set.
    pub fn accepted_records(&self) -> usize {
        self.total_records - self.skipped_records
    }
}

/// Sparse salary query. A blank field (after trimming) places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCondition {
    #[serde(alias = "salary")]
    pub amount: String,
    #[serde(alias = "levelOfSeniority")]
    pub seniority: String,
    #[serde(alias = "yearsTotal")]
    pub years: String,
    pub country: String,
}

impl FilterCondition {
    /// Non-blank constraints as `(field, value)` pairs, values untrimmed.
    pub fn constraints(&self) -> Vec<(FilterField, &str)> {
        [
            (FilterField::Amount, self.amount.as_str()),
            (FilterField::Seniority, self.seniority.as_str()),
            (FilterField::Years, self.years.as_str()),
            (FilterField::Country, self.country.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }

    /// True when no field constrains the query.
    pub fn is_unconstrained(&self) -> bool {
        self.constraints().is_empty()
    }

    /// Whether `record` satisfies every non-blank constraint (exact match).
    pub fn matches(&self, record: &SalaryRecord) -> bool {
        self.constraints()
            .into_iter()
            .all(|(field, value)| field.value_of(record) == value)
    }
}

/// Record attributes a [`FilterCondition`] can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Amount,
    Seniority,
    Years,
    Country,
}

impl FilterField {
    /// Storage column backing this field.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Seniority => "seniority",
            Self::Years => "years_total",
            Self::Country => "country",
        }
    }

    fn value_of<'a>(&self, record: &'a SalaryRecord) -> &'a str {
        match self {
            Self::Amount => &record.amount,
            Self::Seniority => &record.seniority,
            Self::Years => &record.years_total,
            Self::Country => &record.country,
        }
    }
}

/// Filter result row. Amounts are always expressed in USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResponse {
    pub amount: String,
    pub seniority: String,
    pub years: String,
    pub country: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error returned by a [`SalaryStore`] implementation.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Failures that abort a whole salary operation.
#[derive(Debug, thiserror::Error)]
pub enum SalaryError {
    /// The upload is not a well-formed CSV document.
    #[error("Failed to parse salary file: {0}")]
    Parse(#[from] csv::Error),

    /// A data row is too short to read the fixed salary columns from.
    #[error("Line {line} has {found} columns, expected at least {expected}")]
    MalformedRow {
        line: usize,
        found: usize,
        expected: usize,
    },

    /// The salary store failed.
    #[error("Salary store error: {0}")]
    Store(#[source] StoreError),
}

// ---------------------------------------------------------------------------
// Persistence trait
// ---------------------------------------------------------------------------

/// Persistence collaborator holding the salary set.
#[async_trait]
pub trait SalaryStore: Send + Sync {
    /// Remove every stored salary record.
    async fn delete_all(&self) -> Result<(), StoreError>;

    /// Persist `records` in one batch.
    async fn create_batch(&self, records: Vec<SalaryRecord>) -> Result<(), StoreError>;

    /// Return the stored records matching `condition`.
    async fn query(&self, condition: &FilterCondition) -> Result<Vec<SalaryRecord>, StoreError>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Entry point for salary import and filtering.
#[derive(Clone)]
pub struct SalaryService {
    pub(crate) store: Arc<dyn SalaryStore>,
    pub(crate) rates: CurrencyRates,
}

impl SalaryService {
    pub fn new(store: Arc<dyn SalaryStore>, rates: CurrencyRates) -> Self {
        Self { store, rates }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
