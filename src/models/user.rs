//! User data models and API request/response types.
//!
//! This module defines:
//! - `User`: Database entity representing a registered user
//! - `Role`: The user's role within the application
//! - Request types for registration, login, avatar and admin updates
//! - `UserResponse` / `UserSummary`: Response bodies with the password stripped

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DbPool;

/// Role assigned to a user.
///
/// Stored as lowercase text in the `users.role` column (enforced by a CHECK
/// constraint) and serialized the same way on the wire.
///
/// - `User`: regular account, the default on registration
/// - `Admin`: may list, update, and delete other users
/// - `Investor`: regular account with the stock portfolio views enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    /// Regular account (registration default)
    #[default]
    User,
    /// May manage other users
    Admin,
    /// Regular account with portfolio views
    Investor,
}

/// Represents a user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. The `password` column holds a bcrypt hash;
/// this struct deliberately does not implement `Serialize` so the hash can
/// never end up in a response body. Convert to [`UserResponse`] or
/// [`UserSummary`] before returning a user to a client.
///
/// The user's transactions and stocks are not embedded here; they live in
/// their own tables keyed by `user_id` and are fetched by the respective
/// endpoints.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique identifier for this user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Login email, unique across all users
    pub email: String,

    /// bcrypt hash of the user's password
    pub password: String,

    /// Whether the user has picked an avatar yet
    pub is_avatar_image_set: bool,

    /// Avatar image data (empty string until one is set)
    pub avatar_image: String,

    /// The user's role
    pub role: Role,

    /// Timestamp when the user registered
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last profile update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether a user with the given id exists.
    ///
    /// Used by the transaction and stock endpoints, which receive the owning
    /// user's id in the request and must 404 when it is stale.
    pub async fn exists(pool: &DbPool, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}

/// Request body for `POST /api/auth/register`.
///
/// All fields arrive as `Option` so the handler can answer missing ones with
/// the contract's 400 message instead of a deserialization failure.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Asha",
///   "email": "asha@example.com",
///   "password": "hunter2hunter2",
///   "role": "investor"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name (required)
    pub name: Option<String>,

    /// Login email (required, must be unused)
    pub email: Option<String>,

    /// Plaintext password, hashed before storage (required)
    pub password: Option<String>,

    /// Role for the new account; defaults to `user`
    pub role: Option<Role>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email (required)
    pub email: Option<String>,

    /// Plaintext password (required)
    pub password: Option<String>,
}

/// Request body for `POST /api/auth/setAvatar/{id}`.
#[derive(Debug, Deserialize)]
pub struct SetAvatarRequest {
    /// Avatar image data (typically a base64 payload from the client)
    #[serde(default)]
    pub image: String,
}

/// Request body for `PUT /api/admin/updateUser/{id}`.
///
/// Only fields present in the body are changed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub is_avatar_image_set: Option<bool>,
    pub avatar_image: Option<String>,
}

/// Full user view returned to clients, without the password hash.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "name": "Asha",
///   "email": "asha@example.com",
///   "isAvatarImageSet": false,
///   "avatarImage": "",
///   "role": "user",
///   "createdAt": "2026-07-12T10:00:00Z",
///   "updatedAt": "2026-07-12T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_avatar_image_set: bool,
    pub avatar_image: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Convert database User to API UserResponse.
///
/// This transformation drops the password hash.
impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_avatar_image_set: user.is_avatar_image_set,
            avatar_image: user.avatar_image,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Trimmed user view for the "other users" listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_image: String,
    pub role: Role,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar_image: user.avatar_image,
            role: user.role,
        }
    }
}

/// Envelope for endpoints returning a single user (register, login,
/// admin update).
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

/// Envelope for the admin user listing.
#[derive(Debug, Serialize)]
pub struct UserListEnvelope {
    pub success: bool,
    pub users: Vec<UserResponse>,
}

/// Envelope for the trimmed "all other users" listing.
#[derive(Debug, Serialize)]
pub struct UserSummaryListEnvelope {
    pub success: bool,
    pub users: Vec<UserSummary>,
}

/// Response for `POST /api/auth/setAvatar/{id}`.
///
/// The one endpoint that does not use the `{success, ...}` envelope: clients
/// read the bare `{isSet, image}` pair.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    pub is_set: bool,
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Investor).unwrap(), "\"investor\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"admin\"").unwrap(),
            Role::Admin
        );
    }

    #[test]
    fn role_defaults_to_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn user_response_uses_camel_case_and_no_password() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "$2b$10$secret".to_string(),
            is_avatar_image_set: false,
            avatar_image: String::new(),
            role: Role::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(UserResponse::from(user)).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("isAvatarImageSet"));
        assert!(object.contains_key("avatarImage"));
        assert!(object.contains_key("createdAt"));
        assert!(!object.contains_key("password"));
    }
}
