//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code; every error body is the
/// same envelope the success responses use, with `success` set to `false`:
///
/// ```json
/// {
///   "success": false,
///   "message": "Human-readable error message"
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    ///
    /// Returns HTTP 500 Internal Server Error with the underlying message.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification failed.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("{0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// A required request field is missing or empty.
    ///
    /// Returns HTTP 400 Bad Request. The message names the expected fields
    /// and varies per resource.
    #[error("{0}")]
    MissingFields(&'static str),

    /// Login failed: either the email is unknown or the password is wrong.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("{0}")]
    InvalidCredentials(&'static str),

    /// Referenced user does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("User not found")]
    UserNotFound,

    /// Referenced transaction does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// Referenced stock does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Stock not found")]
    StockNotFound,

    /// The email is already registered to another user.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("User already exists")]
    EmailTaken,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("{0}")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Status Code Mapping
///
/// - `MissingFields`, `InvalidRequest` → 400 Bad Request
/// - `InvalidCredentials` → 401 Unauthorized
/// - `UserNotFound`, `TransactionNotFound`, `StockNotFound` → 404 Not Found
/// - `EmailTaken` → 409 Conflict
/// - `Database`, `PasswordHash` → 500 Internal Server Error
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingFields(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound | AppError::TransactionNotFound | AppError::StockNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::EmailTaken => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Build JSON response body
        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}

/// Fold a UNIQUE-constraint failure on `users.email` into [`AppError::EmailTaken`].
///
/// Registration and admin updates check for an existing email before writing,
/// but two concurrent requests can both pass that check. The database UNIQUE
/// constraint is the arbiter; this maps its violation to the same 409 the
/// pre-check produces.
pub fn map_unique_email(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::EmailTaken,
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::AppError;

    #[tokio::test]
    async fn error_body_uses_envelope_shape() {
        let response = AppError::EmailTaken.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body should be JSON");

        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["message"], serde_json::json!("User already exists"));
    }

    #[test]
    fn status_codes_match_contract() {
        let cases = [
            (
                AppError::MissingFields("Please enter all required fields"),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::InvalidCredentials("User not found"),
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::UserNotFound, StatusCode::NOT_FOUND),
            (AppError::TransactionNotFound, StatusCode::NOT_FOUND),
            (AppError::StockNotFound, StatusCode::NOT_FOUND),
            (AppError::EmailTaken, StatusCode::CONFLICT),
            (
                AppError::InvalidRequest("Invalid frequency: abc".to_string()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, want) in cases {
            assert_eq!(error.into_response().status(), want);
        }
    }
}
