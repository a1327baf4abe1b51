//! Database models
//!
//! Typed row structs for the five platform tables, plus the TEXT-backed
//! enumerations used by the dashboard domains. `New*` structs carry the
//! caller-supplied fields for inserts; identifiers are always generated by
//! the store.

use serde::{Deserialize, Serialize};

/// Account role, stored as lowercase TEXT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Analyst,
    Viewer,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Analyst => "analyst",
            Role::Viewer => "viewer",
            Role::User => "user",
        }
    }
}

/// Security incident severity, stored as TEXT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Dataset lifecycle status, stored as TEXT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum DatasetStatus {
    Active,
    Inactive,
    Archived,
}

/// Registered account. The full record doubles as the opaque session value
/// held by the presentation layer after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Dataset {
    pub dataset_id: i64,
    pub name: String,
    pub description: String,
    pub owner_department: String,
    pub data_source: String,
    pub row_count: i64,
    pub size_mb: f64,
    pub quality_score: f64,
    pub retention_policy: String,
    pub status: DatasetStatus,
    pub last_accessed: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Dataset fields supplied by the caller on insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDataset {
    pub name: String,
    pub description: String,
    pub owner_department: String,
    pub data_source: String,
    pub row_count: i64,
    pub size_mb: f64,
    pub quality_score: f64,
    pub retention_policy: String,
    pub status: DatasetStatus,
    pub last_accessed: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ticket {
    pub ticket_id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub stage: String,
    pub priority: String,
    pub created_at: String,
    pub updated_at: String,
    pub resolved_at: Option<String>,
    pub assigned_to: String,
    pub time_to_resolve_hours: f64,
    pub waiting_stage_hours: f64,
    pub customer_satisfaction: i64,
    pub channel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub status: String,
    pub stage: String,
    pub priority: String,
    pub created_at: String,
    pub updated_at: String,
    pub resolved_at: Option<String>,
    pub assigned_to: String,
    pub time_to_resolve_hours: f64,
    pub waiting_stage_hours: f64,
    pub customer_satisfaction: i64,
    pub channel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Incident {
    pub incident_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub threat_vector: String,
    pub severity: Severity,
    pub status: String,
    pub reported_by: String,
    pub assigned_to: String,
    pub detected_at: String,
    pub first_response_at: Option<String>,
    pub resolved_at: Option<String>,
    pub time_to_first_response_hours: f64,
    pub time_to_resolve_hours: f64,
    pub business_impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncident {
    pub title: String,
    pub description: String,
    pub category: String,
    pub threat_vector: String,
    pub severity: Severity,
    pub status: String,
    pub reported_by: String,
    pub assigned_to: String,
    pub detected_at: String,
    pub first_response_at: Option<String>,
    pub resolved_at: Option<String>,
    pub time_to_first_response_hours: f64,
    pub time_to_resolve_hours: f64,
    pub business_impact: String,
}

/// Staged CSV extract. `columns` is stored as comma-joined TEXT in the
/// database and exposed as an ordered list here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvUpload {
    pub csv_id: i64,
    pub filename: String,
    pub row_count: i64,
    pub columns: Vec<String>,
    pub upload_date: String,
    pub data_json: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCsvUpload {
    pub filename: String,
    pub row_count: i64,
    pub columns: Vec<String>,
    pub upload_date: String,
    pub data_json: String,
}
