//! Stock data models and API request/response types.
//!
//! This module defines:
//! - `Stock`: Database entity representing one portfolio holding
//! - Request types for the add/update endpoints
//! - Envelope response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a stock holding record from the database.
///
/// # Database Table
///
/// Maps to the `stocks` table. Each holding belongs to exactly one user via
/// `user_id`; deleting the user deletes their holdings.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    /// Unique identifier for this holding
    pub id: Uuid,

    /// Money invested in this position
    pub amount: f64,

    /// Company the position is in
    pub company: String,

    /// Free-form note (empty string when the user leaves it out)
    pub description: String,

    /// The day the position was recorded
    pub date: NaiveDate,

    /// Owning user
    pub user_id: Uuid,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last edit
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/v1/stocks/addStock`.
///
/// `description` defaults to an empty string and `date` to today when the
/// client leaves them out.
///
/// # JSON Example
///
/// ```json
/// {
///   "amount": 1200.0,
///   "company": "Initech",
///   "description": "Long-term",
///   "date": "2026-07-10",
///   "userId": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStockRequest {
    pub amount: Option<f64>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub user_id: Option<Uuid>,
}

/// Request body for `PUT /api/v1/stocks/updateStock/{id}`.
///
/// Only fields present in the body are changed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockRequest {
    pub amount: Option<f64>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Envelope for endpoints returning a single stock.
#[derive(Debug, Serialize)]
pub struct StockEnvelope {
    pub success: bool,
    pub message: String,
    pub stock: Stock,
}

/// Envelope for a user's holdings listing.
#[derive(Debug, Serialize)]
pub struct StockListEnvelope {
    pub success: bool,
    pub stocks: Vec<Stock>,
}
