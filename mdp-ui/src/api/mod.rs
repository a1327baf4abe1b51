//! REST API for the platform front door

pub mod handlers;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::json;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::assistant::AssistantClient;
use mdp_common::auth::AuthService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database pool
    pub db: SqlitePool,
    /// Registration and login service
    pub auth: AuthService,
    /// Assistant backend, when configured
    pub assistant: Option<AssistantClient>,
    /// Server port
    pub port: u16,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no prefix for health endpoint)
        .route("/health", get(health_check))
        // API v1 routes
        .nest(
            "/api/v1",
            Router::new()
                // Authentication
                .route("/auth/register", post(handlers::register))
                .route("/auth/login", post(handlers::login))
                .route("/users", get(handlers::list_users))
                // Domain record repositories
                .route("/datasets", get(handlers::list_datasets))
                .route("/datasets", post(handlers::add_dataset))
                .route("/tickets", get(handlers::list_tickets))
                .route("/tickets", post(handlers::add_ticket))
                .route("/incidents", get(handlers::list_incidents))
                .route("/incidents", post(handlers::add_incident))
                // CSV staging
                .route("/csv", get(handlers::list_csv_data))
                .route("/csv", post(handlers::add_csv_data))
                // Assistant proxy
                .route("/assistant", post(handlers::assistant_generate)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "module": "mdp-ui",
        "version": env!("CARGO_PKG_VERSION"),
        "port": state.port,
        "assistant_configured": state.assistant.is_some()
    }))
}
