//! Personal finance tracker REST API.
//!
//! Users register, log in, record income/expense transactions and stock
//! holdings, and pull aggregated analytics for the dashboard; an admin role
//! manages users. Everything speaks the JSON envelope
//! `{success, message?, <resource>?}`.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: SQLite with sqlx (async queries, compile-time migrations)
//! - **Passwords**: bcrypt hashes; no sessions or tokens — clients pass the
//!   owning user's id with their requests
//! - **Format**: JSON requests/responses

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::db::DbPool;

/// Build the application router with every endpoint, tracing, and CORS.
///
/// Kept separate from `main` so tests can mount the exact router the binary
/// serves.
pub fn build_router(pool: DbPool) -> Router {
    // The SPA is served from a different origin; mirror its methods
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        // Public liveness probe
        .route("/health", get(handlers::health::health_check))
        // Auth routes
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/setAvatar/{id}", post(handlers::auth::set_avatar))
        .route("/api/auth/allUsers/{id}", get(handlers::auth::all_users))
        // Transaction routes
        .route(
            "/api/v1/transactions/addTransaction",
            post(handlers::transactions::add_transaction),
        )
        .route(
            "/api/v1/transactions/getTransaction",
            post(handlers::transactions::get_transactions),
        )
        .route(
            "/api/v1/transactions/updateTransaction/{id}",
            put(handlers::transactions::update_transaction),
        )
        .route(
            "/api/v1/transactions/deleteTransaction/{id}",
            post(handlers::transactions::delete_transaction),
        )
        .route(
            "/api/v1/transactions/analytics",
            post(handlers::transactions::get_analytics),
        )
        // Stock routes
        .route("/api/v1/stocks/addStock", post(handlers::stocks::add_stock))
        .route(
            "/api/v1/stocks/getStock/{userId}",
            get(handlers::stocks::get_stocks),
        )
        .route(
            "/api/v1/stocks/updateStock/{id}",
            put(handlers::stocks::update_stock),
        )
        .route(
            "/api/v1/stocks/deleteStock/{id}",
            delete(handlers::stocks::delete_stock),
        )
        // Admin routes
        .route("/api/admin/getUsers", get(handlers::admin::get_users))
        .route(
            "/api/admin/updateUser/{id}",
            put(handlers::admin::update_user),
        )
        .route(
            "/api/admin/deleteUser/{id}",
            delete(handlers::admin::delete_user),
        )
        // Add request tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Share database pool with all handlers via State extraction
        .with_state(pool)
}

#[cfg(test)]
pub(crate) mod test_utils {
    //! Shared scaffolding for the endpoint tests: an in-memory database with
    //! the real migrations applied, and a `TestServer` mounted on the real
    //! router.

    use axum_test::TestServer;
    use serde_json::{Value, json};
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::{build_router, db::DbPool};

    /// Fresh in-memory database with migrations applied.
    ///
    /// A single connection is required: each new `sqlite::memory:` connection
    /// would otherwise open its own empty database.
    pub async fn test_pool() -> DbPool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("could not open in-memory database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("could not run migrations");

        pool
    }

    /// Test server mounted on the real application router.
    pub fn test_server(pool: DbPool) -> TestServer {
        TestServer::try_new(build_router(pool)).expect("could not create test server")
    }

    /// Register a user through the API and return their id.
    pub async fn register_user(
        server: &TestServer,
        name: &str,
        email: &str,
        password: &str,
    ) -> String {
        let response = server
            .post("/api/auth/register")
            .json(&json!({"name": name, "email": email, "password": password}))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        body["user"]["id"]
            .as_str()
            .expect("registered user should have an id")
            .to_string()
    }
}
