//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request/response types for each resource's endpoints.

/// Stock holding model
pub mod stock;
/// Income/expense transaction model
pub mod transaction;
/// User account model
pub mod user;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for endpoints that confirm an action without returning a resource
/// (e.g., deletes).
///
/// # JSON Example
///
/// ```json
/// {
///   "success": true,
///   "message": "Transaction successfully deleted"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Always `true`; failures are reported through the error envelope
    pub success: bool,

    /// Human-readable confirmation
    pub message: String,
}

impl MessageResponse {
    /// Build a success confirmation with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Request body carrying only the owning user, used by the delete endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRequest {
    pub user_id: Option<Uuid>,
}
