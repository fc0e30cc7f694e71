//! Transaction HTTP handlers.
//!
//! This module implements the transaction-related API endpoints:
//! - POST /api/v1/transactions/addTransaction - Record an income/expense
//! - POST /api/v1/transactions/getTransaction - Filtered listing
//! - PUT /api/v1/transactions/updateTransaction/{id} - Partial update
//! - POST /api/v1/transactions/deleteTransaction/{id} - Delete one record
//! - POST /api/v1/transactions/analytics - Aggregated dashboard figures
//!
//! The list and analytics endpoints share one filter: owning user, optional
//! type, optional date window (last-N-days or a custom range).

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        MessageResponse, OwnerRequest,
        transaction::{
            AddTransactionRequest, DateWindow, Transaction, TransactionEnvelope,
            TransactionListEnvelope, TransactionQueryRequest, TypeFilter,
            UpdateTransactionRequest,
        },
        user::User,
    },
    services::analytics::{self, AnalyticsEnvelope},
};

/// Fetch a user's transactions under the given type and date filters,
/// newest first.
async fn fetch_filtered(
    pool: &DbPool,
    user_id: Uuid,
    type_filter: TypeFilter,
    window: DateWindow,
) -> Result<Vec<Transaction>, AppError> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, title, amount, description, category, date, transaction_type, \
         user_id, created_at, updated_at FROM transactions WHERE user_id = ",
    );
    query.push_bind(user_id);

    if let Some(kind) = type_filter.as_transaction_type() {
        query.push(" AND transaction_type = ");
        query.push_bind(kind);
    }

    match window {
        DateWindow::All => {}
        DateWindow::Since(cutoff) => {
            query.push(" AND date > ");
            query.push_bind(cutoff);
        }
        DateWindow::Between(start, end) => {
            query.push(" AND date >= ");
            query.push_bind(start);
            query.push(" AND date <= ");
            query.push_bind(end);
        }
    }

    query.push(" ORDER BY date DESC, created_at DESC");

    let transactions = query
        .build_query_as::<Transaction>()
        .fetch_all(pool)
        .await?;

    Ok(transactions)
}

/// Resolve the query request into owner + filters, checking the owner exists.
async fn filtered_transactions(
    pool: &DbPool,
    request: &TransactionQueryRequest,
) -> Result<Vec<Transaction>, AppError> {
    let user_id = request.user_id.ok_or(AppError::UserNotFound)?;
    if !User::exists(pool, user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let window = request.date_window(Utc::now().date_naive())?;
    fetch_filtered(pool, user_id, request.type_filter, window).await
}

/// Record a new transaction.
///
/// # Endpoint
///
/// `POST /api/v1/transactions/addTransaction`
///
/// # Request Body
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
///
/// # Response
///
/// - **Success (200)**: `{success, message, transaction}`
/// - **Error (400)**: any of title/amount/description/date/category/type missing
/// - **Error (404)**: the owning user does not exist
pub async fn add_transaction(
    State(pool): State<DbPool>,
    Json(request): Json<AddTransactionRequest>,
) -> Result<Json<TransactionEnvelope>, AppError> {
    let (
        Some(title),
        Some(amount),
        Some(description),
        Some(date),
        Some(category),
        Some(transaction_type),
    ) = (
        request.title,
        request.amount,
        request.description,
        request.date,
        request.category,
        request.transaction_type,
    )
    else {
        return Err(AppError::MissingFields("Please fill all required fields"));
    };

    // A stale or absent owner is a 404, not a validation error
    let user_id = request.user_id.ok_or(AppError::UserNotFound)?;
    if !User::exists(&pool, user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let now = Utc::now();
    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions
            (id, title, amount, description, category, date, transaction_type,
             user_id, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(amount)
    .bind(description)
    .bind(category)
    .bind(date)
    .bind(transaction_type)
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(&pool)
    .await?;

    Ok(Json(TransactionEnvelope {
        success: true,
        message: "Transaction added successfully".to_string(),
        transaction,
    }))
}

/// List a user's transactions under the requested filters.
///
/// # Endpoint
///
/// `POST /api/v1/transactions/getTransaction`
///
/// # Response
///
/// - **Success (200)**: `{success, transactions}` newest first
/// - **Error (400)**: unparsable `frequency`
/// - **Error (404)**: the owning user does not exist
pub async fn get_transactions(
    State(pool): State<DbPool>,
    Json(request): Json<TransactionQueryRequest>,
) -> Result<Json<TransactionListEnvelope>, AppError> {
    let transactions = filtered_transactions(&pool, &request).await?;

    Ok(Json(TransactionListEnvelope {
        success: true,
        transactions,
    }))
}

/// Update the provided fields of a transaction.
///
/// # Endpoint
///
/// `PUT /api/v1/transactions/updateTransaction/{id}`
///
/// # Response
///
/// - **Success (200)**: `{success, message, transaction}` with the new state
/// - **Error (404)**: no transaction with that id
pub async fn update_transaction(
    State(pool): State<DbPool>,
    Path(transaction_id): Path<Uuid>,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<Json<TransactionEnvelope>, AppError> {
    let mut transaction =
        sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = ?1")
            .bind(transaction_id)
            .fetch_optional(&pool)
            .await?
            .ok_or(AppError::TransactionNotFound)?;

    // Update only provided fields
    if let Some(title) = request.title {
        transaction.title = title;
    }
    if let Some(amount) = request.amount {
        transaction.amount = amount;
    }
    if let Some(description) = request.description {
        transaction.description = description;
    }
    if let Some(date) = request.date {
        transaction.date = date;
    }
    if let Some(category) = request.category {
        transaction.category = category;
    }
    if let Some(transaction_type) = request.transaction_type {
        transaction.transaction_type = transaction_type;
    }
    transaction.updated_at = Utc::now();

    sqlx::query(
        r#"
        UPDATE transactions
        SET title = ?1, amount = ?2, description = ?3, category = ?4, date = ?5,
            transaction_type = ?6, updated_at = ?7
        WHERE id = ?8
        "#,
    )
    .bind(&transaction.title)
    .bind(transaction.amount)
    .bind(&transaction.description)
    .bind(&transaction.category)
    .bind(transaction.date)
    .bind(transaction.transaction_type)
    .bind(transaction.updated_at)
    .bind(transaction.id)
    .execute(&pool)
    .await?;

    Ok(Json(TransactionEnvelope {
        success: true,
        message: "Transaction updated successfully".to_string(),
        transaction,
    }))
}

/// Delete a transaction.
///
/// # Endpoint
///
/// `POST /api/v1/transactions/deleteTransaction/{id}`
///
/// # Request Body
///
/// `{"userId": "..."}` — the owner, checked before the delete.
///
/// # Response
///
/// - **Success (200)**: `{success, message}`
/// - **Error (404)**: unknown user or unknown transaction
pub async fn delete_transaction(
    State(pool): State<DbPool>,
    Path(transaction_id): Path<Uuid>,
    Json(request): Json<OwnerRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = request.user_id.ok_or(AppError::UserNotFound)?;
    if !User::exists(&pool, user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let deleted = sqlx::query("DELETE FROM transactions WHERE id = ?1")
        .bind(transaction_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::TransactionNotFound);
    }

    Ok(Json(MessageResponse::new("Transaction successfully deleted")))
}

/// Aggregate a user's transactions for the dashboard.
///
/// # Endpoint
///
/// `POST /api/v1/transactions/analytics`
///
/// Takes the same body as `getTransaction`, applies the same filter, and
/// returns the rollup described in [`analytics::summarize`].
pub async fn get_analytics(
    State(pool): State<DbPool>,
    Json(request): Json<TransactionQueryRequest>,
) -> Result<Json<AnalyticsEnvelope>, AppError> {
    let transactions = filtered_transactions(&pool, &request).await?;

    Ok(Json(AnalyticsEnvelope {
        success: true,
        analytics: analytics::summarize(&transactions),
    }))
}
