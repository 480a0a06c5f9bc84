//! Salary filtering and USD normalisation.
//!
//! Matching is delegated to the [`SalaryStore`](crate::salary::SalaryStore);
//! this module post-processes the matches. Records in a currency without a
//! configured rate, or whose amount cannot be read as a number, are dropped
//! from the result and logged. Neither case is an error.

use crate::currency::{convert_amount, Currency, CurrencyRates};
use crate::salary::{FilterCondition, SalaryError, SalaryRecord, SalaryResponse, SalaryService};

/// Express `record` in USD and project it to the response shape.
///
/// Returns `None` when the record has to be dropped.
pub fn normalize_record(record: SalaryRecord, rates: &CurrencyRates) -> Option<SalaryResponse> {
    let Some(currency) = Currency::from_code(&record.currency) else {
        tracing::warn!(
            currency = %record.currency,
            amount = %record.amount,
            country = %record.country,
            "No conversion rate for currency, dropping salary record"
        );
        return None;
    };

    let amount = match rates.coefficient(currency) {
        None => record.amount,
        Some(coefficient) => match convert_amount(&record.amount, coefficient) {
            Some(converted) => converted,
            None => {
                tracing::warn!(
                    currency = %record.currency,
                    amount = %record.amount,
                    "Salary amount cannot be converted, dropping salary record"
                );
                return None;
            }
        },
    };

    Some(SalaryResponse {
        amount,
        seniority: record.seniority,
        years: record.years_total,
        country: record.country,
    })
}

impl SalaryService {
    /// Query stored salaries and return them normalised to USD.
    ///
    /// A store failure aborts the call. Unconvertible records are omitted.
    pub async fn filter(
        &self,
        condition: &FilterCondition,
    ) -> Result<Vec<SalaryResponse>, SalaryError> {
        let matched = self.store.query(condition).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to query salaries");
            SalaryError::Store(e)
        })?;

        let matched_count = matched.len();
        let normalized: Vec<SalaryResponse> = matched
            .into_iter()
            .filter_map(|record| normalize_record(record, &self.rates))
            .collect();

        tracing::debug!(
            unconstrained = condition.is_unconstrained(),
            matched = matched_count,
            returned = normalized.len(),
            "Salary filter completed"
        );
        Ok(normalized)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
