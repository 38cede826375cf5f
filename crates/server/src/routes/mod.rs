//! HTTP route handlers for the Bookstall JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the database)
//!
//! # Accounts
//! POST /api/register           - Create an account
//! POST /api/login              - Email/password login
//! POST /api/profile            - Fetch the restricted user projection
//!
//! # Catalog
//! GET  /api/products           - List products, newest first
//! POST /api/addproducts        - Create a product (multipart, optional image)
//! GET  /api/products/export    - Download the catalog as CSV
//!
//! # Static
//! GET  /uploads/{file}         - Uploaded product images
//! ```

pub mod products;
pub mod users;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// The fixed `{success:true}` body returned by the create endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub(crate) const OK: Self = Self { success: true };
}

/// Create the JSON API router (mounted under `/api`).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/profile", post(users::profile))
        .route("/products", get(products::list))
        .route("/products/export", get(products::export))
        .route("/addproducts", post(products::add))
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let uploads_dir = state.config().upload_dir.clone();

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", api_routes())
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
