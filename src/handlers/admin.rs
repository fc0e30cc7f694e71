//! Admin HTTP handlers for user management.
//!
//! This module implements the admin dashboard endpoints:
//! - GET /api/admin/getUsers - List every registered user
//! - PUT /api/admin/updateUser/{id} - Partial profile/role update
//! - DELETE /api/admin/deleteUser/{id} - Remove a user and their records

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::{AppError, map_unique_email},
    models::{
        MessageResponse,
        user::{UpdateUserRequest, User, UserEnvelope, UserListEnvelope},
    },
};

/// List every registered user.
///
/// # Endpoint
///
/// `GET /api/admin/getUsers`
///
/// # Response
///
/// - **Success (200)**: `{success, users}`, passwords omitted
pub async fn get_users(
    State(pool): State<DbPool>,
) -> Result<Json<UserListEnvelope>, AppError> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(&pool)
        .await?;

    Ok(Json(UserListEnvelope {
        success: true,
        users: users.into_iter().map(Into::into).collect(),
    }))
}

/// Update the provided fields of a user's profile.
///
/// # Endpoint
///
/// `PUT /api/admin/updateUser/{id}`
///
/// # Request Body
///
/// Any subset of:
///
/// ```json
/// {
///   "name": "Asha",
///   "email": "asha@example.com",
///   "role": "admin",
///   "isAvatarImageSet": false,
///   "avatarImage": ""
/// }
/// ```
///
/// # Response
///
/// - **Success (200)**: `{success, message, user}` with the new state
/// - **Error (404)**: no user with that id
/// - **Error (409)**: the new email belongs to another user
pub async fn update_user(
    State(pool): State<DbPool>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserEnvelope>, AppError> {
    let mut user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::UserNotFound)?;

    // Update only provided fields
    if let Some(name) = request.name {
        user.name = name;
    }
    if let Some(email) = request.email {
        user.email = email;
    }
    if let Some(role) = request.role {
        user.role = role;
    }
    if let Some(is_avatar_image_set) = request.is_avatar_image_set {
        user.is_avatar_image_set = is_avatar_image_set;
    }
    if let Some(avatar_image) = request.avatar_image {
        user.avatar_image = avatar_image;
    }
    user.updated_at = Utc::now();

    sqlx::query(
        r#"
        UPDATE users
        SET name = ?1, email = ?2, role = ?3, is_avatar_image_set = ?4,
            avatar_image = ?5, updated_at = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.role)
    .bind(user.is_avatar_image_set)
    .bind(&user.avatar_image)
    .bind(user.updated_at)
    .bind(user.id)
    .execute(&pool)
    .await
    .map_err(map_unique_email)?;

    Ok(Json(UserEnvelope {
        success: true,
        message: "User updated successfully".to_string(),
        user: user.into(),
    }))
}

/// Delete a user.
///
/// # Endpoint
///
/// `DELETE /api/admin/deleteUser/{id}`
///
/// Their transactions and stocks go with them via the `ON DELETE CASCADE`
/// foreign keys.
///
/// # Response
///
/// - **Success (200)**: `{success, message}`
/// - **Error (404)**: no user with that id
pub async fn delete_user(
    State(pool): State<DbPool>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = sqlx::query("DELETE FROM users WHERE id = ?1")
        .bind(user_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::UserNotFound);
    }

    tracing::info!(%user_id, "deleted user and owned records");

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
