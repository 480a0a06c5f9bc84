//! Salary spreadsheet import: CSV parsing, row validation, and the
//! full-replace import flow.
//!
//! The upload is the HR survey export, so salary attributes live at fixed
//! column positions (see [`SalaryColumns`]). Row 0 is the header. Rows that
//! fail validation are skipped and reported; a document that is not valid
//! CSV, or a row too short to hold the salary columns, fails the import.

use csv::{ByteRecord, ReaderBuilder};

use crate::salary::{SalaryError, SalaryRecord, SalaryService, UploadReport};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Error recorded when the amount field does not hold `<value> <currency>`.
pub const AMOUNT_SHAPE_ERROR: &str = "the amount field has more elements than expected";

/// Number of space-separated tokens in a well-formed amount field.
const AMOUNT_TOKENS: usize = 2;

/// Zero-based column positions of the salary attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryColumns {
    pub amount: usize,
    pub english_level: usize,
    pub seniority: usize,
    pub years_total: usize,
    pub country: usize,
}

/// Column layout of the HR survey export.
pub const SALARY_COLUMNS: SalaryColumns = SalaryColumns {
    amount: 23,
    english_level: 25,
    seniority: 27,
    years_total: 29,
    country: 37,
};

impl SalaryColumns {
    /// Minimum number of fields a data row must have.
    pub fn min_width(&self) -> usize {
        [
            self.amount,
            self.english_level,
            self.seniority,
            self.years_total,
            self.country,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Outcome of parsing one upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUpload {
    pub records: Vec<SalaryRecord>,
    pub report: UploadReport,
}

/// Why a single data row was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    /// A required field is blank.
    MissingField,
    /// The amount field is not exactly `<value> <currency>`.
    AmountShape,
}

impl RowRejection {
    /// Report message for the data row at `line`.
    pub fn message(&self, line: usize) -> String {
        match self {
            Self::MissingField => format!("Line {line} is not valid"),
            Self::AmountShape => AMOUNT_SHAPE_ERROR.to_string(),
        }
    }
}

/// Parse and validate an uploaded salary file.
///
/// Every data row counts toward `total_records`. Rows with a blank required
/// field or a malformed amount are skipped and explained in the report.
pub fn parse_salary_file(
    bytes: &[u8],
    columns: &SalaryColumns,
) -> Result<ParsedUpload, SalaryError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(bytes);

    let mut parsed = ParsedUpload::default();
    let min_width = columns.min_width();

    for (line, result) in reader.byte_records().enumerate() {
        let row = result?;
        if line == 0 {
            continue;
        }

        parsed.report.total_records += 1;

        if row.len() < min_width {
            return Err(SalaryError::MalformedRow {
                line,
                found: row.len(),
                expected: min_width,
            });
        }

        match validate_row(&row, columns) {
            Ok(record) => parsed.records.push(record),
            Err(rejection) => {
                tracing::debug!(line, ?rejection, "Skipping salary row");
                parsed.report.skip(rejection.message(line));
            }
        }
    }

    Ok(parsed)
}

/// Validate one data row and map it into a [`SalaryRecord`].
///
/// `row` must be at least [`SalaryColumns::min_width`] fields wide. Only the
/// salary columns are decoded; invalid UTF-8 in them is replaced with
/// U+FFFD and other columns are never inspected.
pub fn validate_row(
    row: &ByteRecord,
    columns: &SalaryColumns,
) -> Result<SalaryRecord, RowRejection> {
    let field = |index: usize| String::from_utf8_lossy(row.get(index).unwrap_or_default());
    let is_blank = |index: usize| field(index).trim().is_empty();

    if is_blank(columns.amount)
        || is_blank(columns.seniority)
        || is_blank(columns.years_total)
        || is_blank(columns.country)
        || is_blank(columns.english_level)
    {
        return Err(RowRejection::MissingField);
    }

    let raw_amount = field(columns.amount);
    let (amount, currency) = split_amount(&raw_amount)?;

    Ok(SalaryRecord {
        amount: amount.to_string(),
        currency: currency.to_string(),
        seniority: field(columns.seniority).to_string(),
        years_total: field(columns.years_total).to_string(),
        country: field(columns.country).to_string(),
        english_level: field(columns.english_level).to_string(),
    })
}

/// Split `"<value> <currency>"` on single spaces.
fn split_amount(raw: &str) -> Result<(&str, &str), RowRejection> {
    let tokens: Vec<&str> = raw.split(' ').collect();
    if tokens.len() != AMOUNT_TOKENS {
        return Err(RowRejection::AmountShape);
    }
    Ok((tokens[0], tokens[1]))
}

// ---------------------------------------------------------------------------
// Import flow
// ---------------------------------------------------------------------------

impl SalaryService {
    /// Replace the stored salary set with the contents of `bytes`.
    ///
    /// Steps: clear the store, parse and validate the upload, persist the
    /// valid records in one batch. Any store failure or structural parse
    /// error aborts the call and no report is returned.
    pub async fn import(&self, bytes: &[u8]) -> Result<UploadReport, SalaryError> {
        self.store.delete_all().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to clear stored salaries");
            SalaryError::Store(e)
        })?;
        tracing::info!("Previously stored salaries deleted");

        let ParsedUpload { records, report } = parse_salary_file(bytes, &SALARY_COLUMNS)
            .inspect_err(|e| tracing::error!(error = %e, "Salary upload rejected"))?;

        self.store.create_batch(records).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to store salaries");
            SalaryError::Store(e)
        })?;

        tracing::info!(
            total = report.total_records,
            skipped = report.skipped_records,
            stored = report.accepted_records(),
            "Salary import completed"
        );
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
