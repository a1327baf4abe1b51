//! Database initialization
//!
//! Three-phase startup over the single file-backed SQLite store:
//! 1. CREATE TABLE IF NOT EXISTS for all five platform tables
//! 2. Additive column synchronization for legacy databases
//! 3. One-time baseline seeding
//!
//! Every phase is idempotent, so initialization runs at each process start.
//! Statement-level atomicity only; a failed statement aborts initialization
//! and propagates to the caller.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize the database connection and bring the schema up to date
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Run the three schema phases against an already-open pool
///
/// Split out from [`init_database`] so tests can run against in-memory
/// databases.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    // Phase 1: tables with the full target column set
    create_all_tables(pool).await?;

    // Phase 2: additive column sync for legacy databases
    crate::db::table_schemas::sync_all_table_schemas(pool).await?;

    // Phase 3: baseline seed rows, once
    crate::db::seed::seed_baseline_data(pool).await?;

    Ok(())
}

/// Phase 1: create every platform table if absent
pub async fn create_all_tables(pool: &SqlitePool) -> Result<()> {
    create_users_table(pool).await?;
    create_datasets_table(pool).await?;
    create_tickets_table(pool).await?;
    create_incidents_table(pool).await?;
    create_csv_data_table(pool).await?;
    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL DEFAULT '',
            role TEXT NOT NULL DEFAULT 'user',
            password_hash TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_datasets_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS datasets (
            dataset_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            owner_department TEXT NOT NULL DEFAULT '',
            data_source TEXT NOT NULL DEFAULT '',
            row_count INTEGER NOT NULL DEFAULT 0,
            size_mb REAL NOT NULL DEFAULT 0.0,
            quality_score REAL NOT NULL DEFAULT 0.0,
            retention_policy TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'Active',
            last_accessed TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT '',
            updated_at TEXT NOT NULL DEFAULT '',
            CHECK (row_count >= 0),
            CHECK (size_mb >= 0.0),
            CHECK (quality_score >= 0.0 AND quality_score <= 1.0),
            CHECK (status IN ('Active', 'Inactive', 'Archived'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_datasets_name ON datasets(name)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_tickets_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tickets (
            ticket_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'Open',
            stage TEXT NOT NULL DEFAULT '',
            priority TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT '',
            updated_at TEXT NOT NULL DEFAULT '',
            resolved_at TEXT,
            assigned_to TEXT NOT NULL DEFAULT '',
            time_to_resolve_hours REAL NOT NULL DEFAULT 0.0,
            waiting_stage_hours REAL NOT NULL DEFAULT 0.0,
            customer_satisfaction INTEGER NOT NULL DEFAULT 0,
            channel TEXT NOT NULL DEFAULT '',
            CHECK (time_to_resolve_hours >= 0.0),
            CHECK (waiting_stage_hours >= 0.0),
            CHECK (customer_satisfaction >= 0 AND customer_satisfaction <= 100)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_incidents_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS incidents (
            incident_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT '',
            threat_vector TEXT NOT NULL DEFAULT '',
            severity TEXT NOT NULL DEFAULT 'Low',
            status TEXT NOT NULL DEFAULT 'Open',
            reported_by TEXT NOT NULL DEFAULT '',
            assigned_to TEXT NOT NULL DEFAULT '',
            detected_at TEXT NOT NULL DEFAULT '',
            first_response_at TEXT,
            resolved_at TEXT,
            time_to_first_response_hours REAL NOT NULL DEFAULT 0.0,
            time_to_resolve_hours REAL NOT NULL DEFAULT 0.0,
            business_impact TEXT NOT NULL DEFAULT '',
            CHECK (severity IN ('Low', 'Medium', 'High', 'Critical')),
            CHECK (time_to_first_response_hours >= 0.0),
            CHECK (time_to_resolve_hours >= 0.0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_incidents_severity ON incidents(severity)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_csv_data_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS csv_data (
            csv_id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT NOT NULL,
            row_count INTEGER NOT NULL DEFAULT 0,
            columns TEXT NOT NULL DEFAULT '',
            upload_date TEXT NOT NULL DEFAULT '',
            data_json TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
