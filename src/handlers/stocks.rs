//! Stock holding HTTP handlers.
//!
//! This module implements the portfolio-related API endpoints:
//! - POST /api/v1/stocks/addStock - Record a holding
//! - GET /api/v1/stocks/getStock/{userId} - List a user's holdings
//! - PUT /api/v1/stocks/updateStock/{id} - Partial update
//! - DELETE /api/v1/stocks/deleteStock/{id} - Delete one holding

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        MessageResponse, OwnerRequest,
        stock::{AddStockRequest, Stock, StockEnvelope, StockListEnvelope, UpdateStockRequest},
        user::User,
    },
};

/// Record a new stock holding.
///
/// # Endpoint
///
/// `POST /api/v1/stocks/addStock`
///
/// # Response
///
/// - **Success (200)**: `{success, message, stock}`
/// - **Error (400)**: amount, company, or userId missing
/// - **Error (404)**: the owning user does not exist
///
/// `description` defaults to an empty string and `date` to today.
pub async fn add_stock(
    State(pool): State<DbPool>,
    Json(request): Json<AddStockRequest>,
) -> Result<Json<StockEnvelope>, AppError> {
    let (Some(amount), Some(company), Some(user_id)) =
        (request.amount, request.company, request.user_id)
    else {
        return Err(AppError::MissingFields(
            "Please fill all required fields (amount, company, userId)",
        ));
    };

    if !User::exists(&pool, user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let now = Utc::now();
    let stock = sqlx::query_as::<_, Stock>(
        r#"
        INSERT INTO stocks (id, amount, company, description, date, user_id, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(amount)
    .bind(company)
    .bind(request.description.unwrap_or_default())
    .bind(request.date.unwrap_or_else(|| now.date_naive()))
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(&pool)
    .await?;

    Ok(Json(StockEnvelope {
        success: true,
        message: "Stock added successfully".to_string(),
        stock,
    }))
}

/// List a user's holdings, newest first.
///
/// # Endpoint
///
/// `GET /api/v1/stocks/getStock/{userId}`
///
/// # Response
///
/// - **Success (200)**: `{success, stocks}`
/// - **Error (404)**: the user does not exist
pub async fn get_stocks(
    State(pool): State<DbPool>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StockListEnvelope>, AppError> {
    if !User::exists(&pool, user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let stocks = sqlx::query_as::<_, Stock>(
        "SELECT * FROM stocks WHERE user_id = ?1 ORDER BY date DESC, created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(StockListEnvelope {
        success: true,
        stocks,
    }))
}

/// Update the provided fields of a holding.
///
/// # Endpoint
///
/// `PUT /api/v1/stocks/updateStock/{id}`
///
/// # Response
///
/// - **Success (200)**: `{success, message, stock}` with the new state
/// - **Error (404)**: no stock with that id
pub async fn update_stock(
    State(pool): State<DbPool>,
    Path(stock_id): Path<Uuid>,
    Json(request): Json<UpdateStockRequest>,
) -> Result<Json<StockEnvelope>, AppError> {
    let mut stock = sqlx::query_as::<_, Stock>("SELECT * FROM stocks WHERE id = ?1")
        .bind(stock_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::StockNotFound)?;

    // Update only provided fields
    if let Some(amount) = request.amount {
        stock.amount = amount;
    }
    if let Some(company) = request.company {
        stock.company = company;
    }
    if let Some(description) = request.description {
        stock.description = description;
    }
    if let Some(date) = request.date {
        stock.date = date;
    }
    stock.updated_at = Utc::now();

    sqlx::query(
        r#"
        UPDATE stocks
        SET amount = ?1, company = ?2, description = ?3, date = ?4, updated_at = ?5
        WHERE id = ?6
        "#,
    )
    .bind(stock.amount)
    .bind(&stock.company)
    .bind(&stock.description)
    .bind(stock.date)
    .bind(stock.updated_at)
    .bind(stock.id)
    .execute(&pool)
    .await?;

    Ok(Json(StockEnvelope {
        success: true,
        message: "Stock updated successfully".to_string(),
        stock,
    }))
}

/// Delete a holding.
///
/// # Endpoint
///
/// `DELETE /api/v1/stocks/deleteStock/{id}`
///
/// # Request Body
///
/// `{"userId": "..."}` — the owner, checked before the delete.
///
/// # Response
///
/// - **Success (200)**: `{success, message}`
/// - **Error (404)**: unknown user or unknown stock
pub async fn delete_stock(
    State(pool): State<DbPool>,
    Path(stock_id): Path<Uuid>,
    Json(request): Json<OwnerRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = request.user_id.ok_or(AppError::UserNotFound)?;
    if !User::exists(&pool, user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let deleted = sqlx::query("DELETE FROM stocks WHERE id = ?1")
        .bind(stock_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::StockNotFound);
    }

    Ok(Json(MessageResponse::new("Stock successfully deleted")))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::Utc;
    use serde_json::{Value, json};

    use crate::test_utils::{register_user, test_pool, test_server};

    #[tokio::test]
    async fn add_stock_applies_defaults() {
        let server = test_server(test_pool().await);
        let user_id = register_user(&server, "Iman", "iman@example.com", "hunter2hunter2").await;

        let response = server
            .post("/api/v1/stocks/addStock")
            .json(&json!({"amount": 1200.0, "company": "Initech", "userId": user_id}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], json!("Stock added successfully"));
        assert_eq!(body["stock"]["description"], json!(""));
        assert_eq!(
            body["stock"]["date"],
            json!(Utc::now().date_naive().to_string())
        );
    }

    #[tokio::test]
    async fn add_stock_with_missing_fields_is_bad_request() {
        let server = test_server(test_pool().await);
        let user_id = register_user(&server, "Iman", "iman@example.com", "hunter2hunter2").await;

        let response = server
            .post("/api/v1/stocks/addStock")
            .json(&json!({"company": "Initech", "userId": user_id}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            json!("Please fill all required fields (amount, company, userId)")
        );
    }

    #[tokio::test]
    async fn add_stock_for_unknown_user_is_not_found() {
        let server = test_server(test_pool().await);

        let response = server
            .post("/api/v1/stocks/addStock")
            .json(&json!({
                "amount": 1200.0,
                "company": "Initech",
                "userId": uuid::Uuid::new_v4(),
            }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_stocks_lists_only_the_owner() {
        let server = test_server(test_pool().await);
        let iman = register_user(&server, "Iman", "iman@example.com", "hunter2hunter2").await;
        let asha = register_user(&server, "Asha", "asha@example.com", "hunter2hunter2").await;

        server
            .post("/api/v1/stocks/addStock")
            .json(&json!({"amount": 1200.0, "company": "Initech", "userId": iman}))
            .await
            .assert_status_ok();
        server
            .post("/api/v1/stocks/addStock")
            .json(&json!({"amount": 300.0, "company": "Hooli", "userId": asha}))
            .await
            .assert_status_ok();

        let response = server.get(&format!("/api/v1/stocks/getStock/{iman}")).await;

        response.assert_status_ok();
        let body: Value = response.json();
        let stocks = body["stocks"].as_array().unwrap();
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0]["company"], json!("Initech"));
    }

    #[tokio::test]
    async fn get_stocks_for_unknown_user_is_not_found() {
        let server = test_server(test_pool().await);

        let response = server
            .get(&format!("/api/v1/stocks/getStock/{}", uuid::Uuid::new_v4()))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_stock_changes_only_provided_fields() {
        let server = test_server(test_pool().await);
        let user_id = register_user(&server, "Iman", "iman@example.com", "hunter2hunter2").await;

        let created = server
            .post("/api/v1/stocks/addStock")
            .json(&json!({
                "amount": 1200.0,
                "company": "Initech",
                "description": "Long-term",
                "userId": user_id,
            }))
            .await;
        created.assert_status_ok();
        let created: Value = created.json();
        let stock_id = created["stock"]["id"].as_str().unwrap();

        let response = server
            .put(&format!("/api/v1/stocks/updateStock/{stock_id}"))
            .json(&json!({"amount": 1500.0}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], json!("Stock updated successfully"));
        assert_eq!(body["stock"]["amount"], json!(1500.0));
        assert_eq!(body["stock"]["company"], json!("Initech"));
        assert_eq!(body["stock"]["description"], json!("Long-term"));
    }

    #[tokio::test]
    async fn update_of_unknown_stock_is_not_found() {
        let server = test_server(test_pool().await);

        let response = server
            .put(&format!("/api/v1/stocks/updateStock/{}", uuid::Uuid::new_v4()))
            .json(&json!({"amount": 1.0}))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["message"], json!("Stock not found"));
    }

    #[tokio::test]
    async fn delete_removes_the_stock() {
        let server = test_server(test_pool().await);
        let user_id = register_user(&server, "Iman", "iman@example.com", "hunter2hunter2").await;

        let created = server
            .post("/api/v1/stocks/addStock")
            .json(&json!({"amount": 1200.0, "company": "Initech", "userId": user_id}))
            .await;
        let created: Value = created.json();
        let stock_id = created["stock"]["id"].as_str().unwrap();

        let response = server
            .delete(&format!("/api/v1/stocks/deleteStock/{stock_id}"))
            .json(&json!({"userId": user_id}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], json!("Stock successfully deleted"));

        let listing = server.get(&format!("/api/v1/stocks/getStock/{user_id}")).await;
        let body: Value = listing.json();
        assert!(body["stocks"].as_array().unwrap().is_empty());
    }
}
