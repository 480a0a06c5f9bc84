//! Repository for the `salaries` table and the Postgres-backed
//! [`SalaryStore`].

use async_trait::async_trait;
use hrdesk_core::salary::{FilterCondition, SalaryRecord, SalaryStore, StoreError};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::salary::SalaryRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, amount, currency, seniority, years_total, country, english_level, created_at";

/// Rows per `INSERT` statement. Six binds per row keeps each statement well
/// under the Postgres limit of 65535 bind parameters.
const INSERT_CHUNK_ROWS: usize = 5000;

/// Provides bulk replace and filtered reads for salary records.
pub struct SalaryRepo;

impl SalaryRepo {
    /// Delete every salary row. Returns the number of rows removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM salaries").execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Insert `records` inside a single transaction.
    pub async fn insert_batch(pool: &PgPool, records: &[SalaryRecord]) -> Result<(), sqlx::Error> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = pool.begin().await?;
        for chunk in records.chunks(INSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO salaries \
                 (amount, currency, seniority, years_total, country, english_level) ",
            );
            builder.push_values(chunk, |mut row, record| {
                row.push_bind(&record.amount)
                    .push_bind(&record.currency)
                    .push_bind(&record.seniority)
                    .push_bind(&record.years_total)
                    .push_bind(&record.country)
                    .push_bind(&record.english_level);
            });
            builder.build().execute(&mut *tx).await?;
        }
        tx.commit().await
    }

    /// List salary rows matching every non-blank field of `condition`,
    /// in insertion order.
    pub async fn find_matching(
        pool: &PgPool,
        condition: &FilterCondition,
    ) -> Result<Vec<SalaryRow>, sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM salaries"));

        for (index, (field, value)) in condition.constraints().into_iter().enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });
            builder.push(field.column());
            builder.push(" = ");
            builder.push_bind(value.to_string());
        }
        builder.push(" ORDER BY id");

        builder.build_query_as::<SalaryRow>().fetch_all(pool).await
    }

    /// Count stored salary rows.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM salaries")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

/// [`SalaryStore`] backed by the `salaries` table.
#[derive(Clone)]
pub struct PgSalaryStore {
    pool: PgPool,
}

impl PgSalaryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalaryStore for PgSalaryStore {
    async fn delete_all(&self) -> Result<(), StoreError> {
        let removed = SalaryRepo::delete_all(&self.pool).await?;
        tracing::debug!(removed, "Cleared salaries table");
        Ok(())
    }

    async fn create_batch(&self, records: Vec<SalaryRecord>) -> Result<(), StoreError> {
        SalaryRepo::insert_batch(&self.pool, &records).await?;
        tracing::debug!(inserted = records.len(), "Inserted salary batch");
        Ok(())
    }

    async fn query(&self, condition: &FilterCondition) -> Result<Vec<SalaryRecord>, StoreError> {
        let rows = SalaryRepo::find_matching(&self.pool, condition).await?;
        Ok(rows.into_iter().map(SalaryRecord::from).collect())
    }
}
