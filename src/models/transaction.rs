//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing an income/expense record
//! - `TransactionType`: credit (income) vs expense
//! - Request types for the add/get/update/delete endpoints
//! - `DateWindow`: the parsed date filter for the list and analytics endpoints

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Whether a transaction adds to or draws from the user's money.
///
/// Stored as lowercase text in `transactions.transaction_type` (CHECK
/// constraint) and serialized the same way on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TransactionType {
    /// Income
    Credit,
    /// Spending
    Expense,
}

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction belongs to exactly one
/// user via `user_id`; deleting the user deletes their transactions.
///
/// `date` is the user-facing transaction date (what the dashboard filters
/// on); `created_at`/`updated_at` are row timestamps.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier for this transaction
    pub id: Uuid,

    /// Short label shown in the dashboard table
    pub title: String,

    /// Amount of money moved
    pub amount: f64,

    /// Free-form description
    pub description: String,

    /// Spending/income category (e.g., "Groceries", "Salary")
    pub category: String,

    /// The day the transaction happened
    pub date: NaiveDate,

    /// Income or expense
    pub transaction_type: TransactionType,

    /// Owning user
    pub user_id: Uuid,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last edit
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/v1/transactions/addTransaction`.
///
/// # JSON Example
///
/// ```json
/// {
///   "title": "Weekly shop",
///   "amount": 54.2,
///   "description": "Groceries for the week",
///   "date": "2026-07-10",
///   "category": "Groceries",
///   "transactionType": "expense",
///   "userId": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTransactionRequest {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub user_id: Option<Uuid>,
}

/// Request body for `PUT /api/v1/transactions/updateTransaction/{id}`.
///
/// Only fields present in the body are changed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub transaction_type: Option<TransactionType>,
}

/// Type filter for the transaction list.
///
/// `all` disables the filter; the other values match `transactionType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Credit,
    Expense,
}

impl TypeFilter {
    /// The concrete type to match, or `None` for no filtering.
    pub fn as_transaction_type(self) -> Option<TransactionType> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Credit => Some(TransactionType::Credit),
            TypeFilter::Expense => Some(TransactionType::Expense),
        }
    }
}

/// Request body for `POST /api/v1/transactions/getTransaction` and
/// `POST /api/v1/transactions/analytics`.
///
/// # Date window
///
/// - `frequency` holds a number of days as a string (the client sends `"7"`,
///   `"30"`, `"365"`): only transactions strictly newer than today minus that
///   many days match.
/// - `frequency` of `"custom"` uses the inclusive `[startDate, endDate]`
///   range; if either bound is missing, no date filter is applied.
/// - Absent `frequency` applies no date filter.
///
/// # JSON Example
///
/// ```json
/// {
///   "userId": "550e8400-e29b-41d4-a716-446655440000",
///   "type": "expense",
///   "frequency": "custom",
///   "startDate": "2026-06-01",
///   "endDate": "2026-06-30"
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQueryRequest {
    pub user_id: Option<Uuid>,

    #[serde(rename = "type", default)]
    pub type_filter: TypeFilter,

    pub frequency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Parsed date filter for the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// No date filtering
    All,
    /// Transactions strictly newer than this day
    Since(NaiveDate),
    /// Inclusive range
    Between(NaiveDate, NaiveDate),
}

impl TransactionQueryRequest {
    /// Resolve the `frequency`/`startDate`/`endDate` trio into a [`DateWindow`].
    ///
    /// `today` is passed in rather than read from the clock so the resolution
    /// is deterministic under test.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRequest`] when `frequency` is neither
    /// `"custom"` nor a whole number of days.
    pub fn date_window(&self, today: NaiveDate) -> Result<DateWindow, AppError> {
        match self.frequency.as_deref() {
            None => Ok(DateWindow::All),
            Some("custom") => match (self.start_date, self.end_date) {
                (Some(start), Some(end)) => Ok(DateWindow::Between(start, end)),
                // Matches the client behavior: a custom window is only
                // applied once both bounds have been picked.
                _ => Ok(DateWindow::All),
            },
            Some(days) => {
                let days: i64 = days.trim().parse().map_err(|_| {
                    AppError::InvalidRequest(format!("Invalid frequency: {days}"))
                })?;
                Ok(DateWindow::Since(today - Duration::days(days)))
            }
        }
    }
}

/// Envelope for endpoints returning a single transaction.
#[derive(Debug, Serialize)]
pub struct TransactionEnvelope {
    pub success: bool,
    pub message: String,
    pub transaction: Transaction,
}

/// Envelope for the filtered transaction listing.
#[derive(Debug, Serialize)]
pub struct TransactionListEnvelope {
    pub success: bool,
    pub transactions: Vec<Transaction>,
}

#[cfg(test)]
mod date_window_tests {
    use super::*;

    fn query(frequency: Option<&str>, start: Option<&str>, end: Option<&str>) -> TransactionQueryRequest {
        TransactionQueryRequest {
            user_id: None,
            type_filter: TypeFilter::All,
            frequency: frequency.map(str::to_string),
            start_date: start.map(|d| d.parse().unwrap()),
            end_date: end.map(|d| d.parse().unwrap()),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn absent_frequency_means_no_filter() {
        let window = query(None, None, None).date_window(date("2026-07-12")).unwrap();
        assert_eq!(window, DateWindow::All);
    }

    #[test]
    fn numeric_frequency_counts_back_from_today() {
        let window = query(Some("7"), None, None)
            .date_window(date("2026-07-12"))
            .unwrap();
        assert_eq!(window, DateWindow::Since(date("2026-07-05")));
    }

    #[test]
    fn custom_frequency_uses_both_bounds() {
        let window = query(Some("custom"), Some("2026-06-01"), Some("2026-06-30"))
            .date_window(date("2026-07-12"))
            .unwrap();
        assert_eq!(
            window,
            DateWindow::Between(date("2026-06-01"), date("2026-06-30"))
        );
    }

    #[test]
    fn custom_frequency_without_a_bound_applies_no_filter() {
        let window = query(Some("custom"), Some("2026-06-01"), None)
            .date_window(date("2026-07-12"))
            .unwrap();
        assert_eq!(window, DateWindow::All);
    }

    #[test]
    fn garbage_frequency_is_rejected() {
        let result = query(Some("fortnight"), None, None).date_window(date("2026-07-12"));
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn type_field_deserializes_from_wire_name() {
        let request: TransactionQueryRequest =
            serde_json::from_str(r#"{"userId": null, "type": "credit"}"#).unwrap();
        assert_eq!(request.type_filter, TypeFilter::Credit);

        let request: TransactionQueryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.type_filter, TypeFilter::All);
    }
}
