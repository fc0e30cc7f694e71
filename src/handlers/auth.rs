//! Authentication HTTP handlers.
//!
//! This module implements the auth-related API endpoints:
//! - POST /api/auth/register - Create a new user
//! - POST /api/auth/login - Verify credentials and return the user
//! - POST /api/auth/setAvatar/{id} - Store the user's avatar image
//! - GET /api/auth/allUsers/{id} - List every user except the given one
//!
//! There are no sessions or tokens: clients hold on to the user object and
//! pass the user id with later requests. The endpoints here only gatekeep
//! the password itself.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::{AppError, map_unique_email},
    models::user::{
        AvatarResponse, LoginRequest, RegisterRequest, SetAvatarRequest, User, UserEnvelope,
        UserSummaryListEnvelope,
    },
};

/// bcrypt work factor for password hashing.
const BCRYPT_COST: u32 = 10;

/// Treat absent and empty-string fields alike.
fn required(field: Option<&str>) -> Option<&str> {
    field.filter(|value| !value.is_empty())
}

/// Register a new user.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Asha",
///   "email": "asha@example.com",
///   "password": "hunter2hunter2",
///   "role": "investor"  // optional, defaults to "user"
/// }
/// ```
///
/// # Response
///
/// - **Success (200)**: `{success, message, user}` with the password omitted
/// - **Error (400)**: name, email, or password missing
/// - **Error (409)**: email already registered
///
/// The duplicate check runs before the insert for the contract's message,
/// and the UNIQUE constraint on `users.email` catches the race where two
/// registrations pass the check together.
pub async fn register(
    State(pool): State<DbPool>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserEnvelope>, AppError> {
    let name = required(request.name.as_deref());
    let email = required(request.email.as_deref());
    let password = required(request.password.as_deref());

    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(AppError::MissingFields("Please enter all required fields"));
    };

    // Check if user already exists
    let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)")
        .bind(email)
        .fetch_one(&pool)
        .await?;
    if taken {
        return Err(AppError::EmailTaken);
    }

    let password_hash = bcrypt::hash(password, BCRYPT_COST)?;

    let now = Utc::now();
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password, role, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(request.role.unwrap_or_default())
    .bind(now)
    .bind(now)
    .fetch_one(&pool)
    .await
    .map_err(map_unique_email)?;

    tracing::info!(user_id = %user.id, "registered new user");

    Ok(Json(UserEnvelope {
        success: true,
        message: "User created successfully".to_string(),
        user: user.into(),
    }))
}

/// Log a user in.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Response
///
/// - **Success (200)**: `{success, message: "Welcome back, <name>", user}`
/// - **Error (400)**: email or password missing
/// - **Error (401)**: unknown email ("User not found") or wrong password
///   ("Incorrect email or password")
pub async fn login(
    State(pool): State<DbPool>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserEnvelope>, AppError> {
    let email = required(request.email.as_deref());
    let password = required(request.password.as_deref());

    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::MissingFields("Please enter all required fields"));
    };

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?1")
        .bind(email)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::InvalidCredentials("User not found"))?;

    if !bcrypt::verify(password, &user.password)? {
        tracing::warn!(user_id = %user.id, "failed login attempt");
        return Err(AppError::InvalidCredentials("Incorrect email or password"));
    }

    let message = format!("Welcome back, {}", user.name);

    Ok(Json(UserEnvelope {
        success: true,
        message,
        user: user.into(),
    }))
}

/// Store the user's avatar image.
///
/// # Endpoint
///
/// `POST /api/auth/setAvatar/{id}`
///
/// # Response
///
/// The bare `{"isSet": true, "image": "..."}` pair the avatar picker reads,
/// not the usual envelope.
///
/// - **Error (404)**: no user with that id
pub async fn set_avatar(
    State(pool): State<DbPool>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<SetAvatarRequest>,
) -> Result<Json<AvatarResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET is_avatar_image_set = ?1, avatar_image = ?2, updated_at = ?3
        WHERE id = ?4
        RETURNING *
        "#,
    )
    .bind(true)
    .bind(&request.image)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::UserNotFound)?;

    Ok(Json(AvatarResponse {
        is_set: user.is_avatar_image_set,
        image: user.avatar_image,
    }))
}

/// List every user except the requesting one.
///
/// # Endpoint
///
/// `GET /api/auth/allUsers/{id}`
///
/// # Response
///
/// - **Success (200)**: `{success, users}` where each entry is trimmed to
///   id, name, email, avatarImage, and role
pub async fn all_users(
    State(pool): State<DbPool>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserSummaryListEnvelope>, AppError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE id != ?1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(UserSummaryListEnvelope {
        success: true,
        users: users.into_iter().map(Into::into).collect(),
    }))
}
