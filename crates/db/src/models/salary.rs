//! Salary row model.

use hrdesk_core::salary::SalaryRecord;
use hrdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full row from the `salaries` table.
#[derive(Debug, Clone, FromRow)]
pub struct SalaryRow {
    pub id: DbId,
    pub amount: String,
    pub currency: String,
    pub seniority: String,
    pub years_total: String,
    pub country: String,
    pub english_level: String,
    pub created_at: Timestamp,
}

impl From<SalaryRow> for SalaryRecord {
    fn from(row: SalaryRow) -> Self {
        Self {
            amount: row.amount,
            currency: row.currency,
            seniority: row.seniority,
            years_total: row.years_total,
            country: row.country,
            english_level: row.english_level,
        }
    }
}
