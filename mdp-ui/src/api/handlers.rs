//! HTTP request handlers
//!
//! Thin translation layer: deserialize, call into mdp-common, serialize.
//! Database failures map to 500; authentication failures map to 401 without
//! distinguishing unknown accounts from wrong passwords.

use crate::api::AppState;
use axum::{extract::State, http::StatusCode, Json};
use mdp_common::db::models::{
    CsvUpload, Dataset, Incident, NewCsvUpload, NewDataset, NewIncident, NewTicket, Role, Ticket,
    User,
};
use mdp_common::db;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    #[serde(default = "default_role")]
    role: Role,
}

fn default_role() -> Role {
    Role::User
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

/// Account view returned to clients; the stored digest never leaves the server
#[derive(Debug, Serialize)]
pub struct UserInfo {
    user_id: i64,
    username: String,
    email: String,
    role: Role,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    prompt: String,
}

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    text: String,
}

type HandlerError = (StatusCode, Json<StatusResponse>);

fn internal_error(e: impl std::fmt::Display) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(StatusResponse {
            status: format!("error: {}", e),
        }),
    )
}

// ============================================================================
// Authentication Endpoints
// ============================================================================

/// POST /auth/register - Create an account
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<StatusCode, HandlerError> {
    match state
        .auth
        .register(&req.username, &req.email, &req.password, req.role)
        .await
    {
        Ok(true) => {
            info!("Registered account: {}", req.username);
            Ok(StatusCode::CREATED)
        }
        Ok(false) => Err((
            StatusCode::CONFLICT,
            Json(StatusResponse {
                status: "username unavailable or credentials invalid".to_string(),
            }),
        )),
        Err(e) => {
            error!("Registration failed: {}", e);
            Err(internal_error(e))
        }
    }
}

/// POST /auth/login - Check credentials
///
/// Returns the account record on success; clients hold it as their session
/// state, the server keeps none.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserInfo>, HandlerError> {
    match state.auth.authenticate(&req.username, &req.password).await {
        Ok(Some(user)) => {
            info!("Login: {}", user.username);
            Ok(Json(user.into()))
        }
        Ok(None) => Err((
            StatusCode::UNAUTHORIZED,
            Json(StatusResponse {
                status: "invalid credentials".to_string(),
            }),
        )),
        Err(e) => {
            error!("Login failed: {}", e);
            Err(internal_error(e))
        }
    }
}

/// GET /users - List registered accounts
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserInfo>>, HandlerError> {
    match db::users::list_users(&state.db).await {
        Ok(users) => Ok(Json(users.into_iter().map(UserInfo::from).collect())),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(internal_error(e))
        }
    }
}

// ============================================================================
// Dataset Endpoints
// ============================================================================

/// GET /datasets - All dataset catalog entries
pub async fn list_datasets(
    State(state): State<AppState>,
) -> Result<Json<Vec<Dataset>>, HandlerError> {
    match db::datasets::list_datasets(&state.db).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            error!("Failed to list datasets: {}", e);
            Err(internal_error(e))
        }
    }
}

/// POST /datasets - Register a dataset
pub async fn add_dataset(
    State(state): State<AppState>,
    Json(req): Json<NewDataset>,
) -> Result<(StatusCode, Json<CreatedResponse>), HandlerError> {
    match db::datasets::add_dataset(&state.db, &req).await {
        Ok(id) => {
            info!("Added dataset {} ({})", id, req.name);
            Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
        }
        Err(e) => {
            error!("Failed to add dataset: {}", e);
            Err(internal_error(e))
        }
    }
}

// ============================================================================
// Ticket Endpoints
// ============================================================================

/// GET /tickets - All service desk tickets
pub async fn list_tickets(State(state): State<AppState>) -> Result<Json<Vec<Ticket>>, HandlerError> {
    match db::tickets::list_tickets(&state.db).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            error!("Failed to list tickets: {}", e);
            Err(internal_error(e))
        }
    }
}

/// POST /tickets - File a ticket
pub async fn add_ticket(
    State(state): State<AppState>,
    Json(req): Json<NewTicket>,
) -> Result<(StatusCode, Json<CreatedResponse>), HandlerError> {
    match db::tickets::add_ticket(&state.db, &req).await {
        Ok(id) => {
            info!("Added ticket {} ({})", id, req.title);
            Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
        }
        Err(e) => {
            error!("Failed to add ticket: {}", e);
            Err(internal_error(e))
        }
    }
}

// ============================================================================
// Incident Endpoints
// ============================================================================

/// GET /incidents - All security incidents
pub async fn list_incidents(
    State(state): State<AppState>,
) -> Result<Json<Vec<Incident>>, HandlerError> {
    match db::incidents::list_incidents(&state.db).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            error!("Failed to list incidents: {}", e);
            Err(internal_error(e))
        }
    }
}

/// POST /incidents - Record an incident
pub async fn add_incident(
    State(state): State<AppState>,
    Json(req): Json<NewIncident>,
) -> Result<(StatusCode, Json<CreatedResponse>), HandlerError> {
    match db::incidents::add_incident(&state.db, &req).await {
        Ok(id) => {
            info!("Added incident {} ({})", id, req.title);
            Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
        }
        Err(e) => {
            error!("Failed to add incident: {}", e);
            Err(internal_error(e))
        }
    }
}

// ============================================================================
// CSV Staging Endpoints
// ============================================================================

/// GET /csv - All staged extracts
pub async fn list_csv_data(
    State(state): State<AppState>,
) -> Result<Json<Vec<CsvUpload>>, HandlerError> {
    match db::csv_staging::list_csv_data(&state.db).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            error!("Failed to list CSV uploads: {}", e);
            Err(internal_error(e))
        }
    }
}

/// POST /csv - Stage an uploaded extract
pub async fn add_csv_data(
    State(state): State<AppState>,
    Json(req): Json<NewCsvUpload>,
) -> Result<(StatusCode, Json<CreatedResponse>), HandlerError> {
    match db::csv_staging::add_csv_data(&state.db, &req).await {
        Ok(id) => {
            info!("Staged CSV upload {} ({})", id, req.filename);
            Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
        }
        Err(e) => {
            error!("Failed to stage CSV upload: {}", e);
            Err(internal_error(e))
        }
    }
}

// ============================================================================
// Assistant Endpoint
// ============================================================================

/// POST /assistant - Proxy a prompt to the configured backend
pub async fn assistant_generate(
    State(state): State<AppState>,
    Json(req): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, HandlerError> {
    let client = state.assistant.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(StatusResponse {
            status: "no assistant backend configured".to_string(),
        }),
    ))?;

    match client.generate(&req.prompt).await {
        Ok(text) => Ok(Json(AssistantResponse { text })),
        Err(e) => {
            error!("Assistant request failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(StatusResponse {
                    status: format!("error: {}", e),
                }),
            ))
        }
    }
}
