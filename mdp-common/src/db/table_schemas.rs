//! Table schema definitions
//!
//! Single source of truth for the expected column set of each platform
//! table. The create statements in `init.rs` carry the same columns; the
//! definitions here exist so that legacy databases created before the
//! analytic columns were introduced are upgraded additively on startup.

use crate::db::schema_sync::{self, ColumnDefinition, TableSchema};
use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

pub struct UsersTable;

impl TableSchema for UsersTable {
    fn table_name() -> &'static str {
        "users"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("user_id", "INTEGER"),
            ColumnDefinition::new("username", "TEXT").not_null().default("''"),
            ColumnDefinition::new("email", "TEXT").not_null().default("''"),
            ColumnDefinition::new("role", "TEXT").not_null().default("'user'"),
            ColumnDefinition::new("password_hash", "TEXT").not_null().default("''"),
        ]
    }
}

pub struct DatasetsTable;

impl TableSchema for DatasetsTable {
    fn table_name() -> &'static str {
        "datasets"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("dataset_id", "INTEGER"),
            ColumnDefinition::new("name", "TEXT").not_null().default("''"),
            ColumnDefinition::new("description", "TEXT").not_null().default("''"),
            // Governance columns absent from first-generation catalogs
            ColumnDefinition::new("owner_department", "TEXT").not_null().default("''"),
            ColumnDefinition::new("data_source", "TEXT").not_null().default("''"),
            ColumnDefinition::new("row_count", "INTEGER").not_null().default("0"),
            ColumnDefinition::new("size_mb", "REAL").not_null().default("0.0"),
            ColumnDefinition::new("quality_score", "REAL").not_null().default("0.0"),
            ColumnDefinition::new("retention_policy", "TEXT").not_null().default("''"),
            ColumnDefinition::new("status", "TEXT").not_null().default("'Active'"),
            ColumnDefinition::new("last_accessed", "TEXT").not_null().default("''"),
            ColumnDefinition::new("created_at", "TEXT").not_null().default("''"),
            ColumnDefinition::new("updated_at", "TEXT").not_null().default("''"),
        ]
    }
}

pub struct TicketsTable;

impl TableSchema for TicketsTable {
    fn table_name() -> &'static str {
        "tickets"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("ticket_id", "INTEGER"),
            ColumnDefinition::new("title", "TEXT").not_null().default("''"),
            ColumnDefinition::new("description", "TEXT").not_null().default("''"),
            ColumnDefinition::new("status", "TEXT").not_null().default("'Open'"),
            // Workflow columns absent from first-generation service desks
            ColumnDefinition::new("stage", "TEXT").not_null().default("''"),
            ColumnDefinition::new("priority", "TEXT").not_null().default("''"),
            ColumnDefinition::new("created_at", "TEXT").not_null().default("''"),
            ColumnDefinition::new("updated_at", "TEXT").not_null().default("''"),
            ColumnDefinition::new("resolved_at", "TEXT"),
            ColumnDefinition::new("assigned_to", "TEXT").not_null().default("''"),
            ColumnDefinition::new("time_to_resolve_hours", "REAL").not_null().default("0.0"),
            ColumnDefinition::new("waiting_stage_hours", "REAL").not_null().default("0.0"),
            ColumnDefinition::new("customer_satisfaction", "INTEGER").not_null().default("0"),
            ColumnDefinition::new("channel", "TEXT").not_null().default("''"),
        ]
    }
}

pub struct IncidentsTable;

impl TableSchema for IncidentsTable {
    fn table_name() -> &'static str {
        "incidents"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("incident_id", "INTEGER"),
            ColumnDefinition::new("title", "TEXT").not_null().default("''"),
            ColumnDefinition::new("description", "TEXT").not_null().default("''"),
            // Triage columns absent from first-generation incident logs
            ColumnDefinition::new("category", "TEXT").not_null().default("''"),
            ColumnDefinition::new("threat_vector", "TEXT").not_null().default("''"),
            ColumnDefinition::new("severity", "TEXT").not_null().default("'Low'"),
            ColumnDefinition::new("status", "TEXT").not_null().default("'Open'"),
            ColumnDefinition::new("reported_by", "TEXT").not_null().default("''"),
            ColumnDefinition::new("assigned_to", "TEXT").not_null().default("''"),
            ColumnDefinition::new("detected_at", "TEXT").not_null().default("''"),
            ColumnDefinition::new("first_response_at", "TEXT"),
            ColumnDefinition::new("resolved_at", "TEXT"),
            ColumnDefinition::new("time_to_first_response_hours", "REAL").not_null().default("0.0"),
            ColumnDefinition::new("time_to_resolve_hours", "REAL").not_null().default("0.0"),
            ColumnDefinition::new("business_impact", "TEXT").not_null().default("''"),
        ]
    }
}

pub struct CsvDataTable;

impl TableSchema for CsvDataTable {
    fn table_name() -> &'static str {
        "csv_data"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("csv_id", "INTEGER"),
            ColumnDefinition::new("filename", "TEXT").not_null().default("''"),
            ColumnDefinition::new("row_count", "INTEGER").not_null().default("0"),
            ColumnDefinition::new("columns", "TEXT").not_null().default("''"),
            ColumnDefinition::new("upload_date", "TEXT").not_null().default("''"),
            ColumnDefinition::new("data_json", "TEXT").not_null().default("''"),
        ]
    }
}

/// Synchronize all table schemas
///
/// Phase 2 of database initialization, after CREATE TABLE IF NOT EXISTS and
/// before seeding.
pub async fn sync_all_table_schemas(pool: &SqlitePool) -> Result<()> {
    info!("Schema sync: checking all platform tables");

    schema_sync::sync_table::<UsersTable>(pool).await?;
    schema_sync::sync_table::<DatasetsTable>(pool).await?;
    schema_sync::sync_table::<TicketsTable>(pool).await?;
    schema_sync::sync_table::<IncidentsTable>(pool).await?;
    schema_sync::sync_table::<CsvDataTable>(pool).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema_sync::{existing_columns, sync_table};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn legacy_datasets_table_gains_governance_columns() {
        let pool = setup_test_db().await;

        // First-generation catalog schema: no governance columns
        sqlx::query(
            r#"
            CREATE TABLE datasets (
                dataset_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                description TEXT,
                created_at TEXT,
                updated_at TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        sync_table::<DatasetsTable>(&pool).await.unwrap();

        let columns = existing_columns(&pool, "datasets").await.unwrap();
        for expected in [
            "owner_department",
            "data_source",
            "row_count",
            "size_mb",
            "quality_score",
            "retention_policy",
            "status",
            "last_accessed",
        ] {
            assert!(
                columns.contains(&expected.to_string()),
                "missing column {}",
                expected
            );
        }
    }

    #[tokio::test]
    async fn legacy_incidents_rows_survive_column_sync() {
        let pool = setup_test_db().await;

        sqlx::query(
            r#"
            CREATE TABLE incidents (
                incident_id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                description TEXT,
                severity TEXT,
                status TEXT,
                reported_by TEXT,
                assigned_to TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO incidents (title, description, severity, status, reported_by, assigned_to) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind("Legacy Alert")
        .bind("Pre-upgrade incident")
        .bind("High")
        .bind("Open")
        .bind("SOC")
        .bind("On call")
        .execute(&pool)
        .await
        .unwrap();

        sync_table::<IncidentsTable>(&pool).await.unwrap();

        // Existing row is preserved with defaults in the new columns
        let (title, hours): (String, f64) = sqlx::query_as(
            "SELECT title, time_to_resolve_hours FROM incidents WHERE incident_id = 1",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(title, "Legacy Alert");
        assert_eq!(hours, 0.0);
    }

    #[tokio::test]
    async fn sync_all_is_idempotent_on_current_schema() {
        let pool = setup_test_db().await;
        crate::db::init::create_all_tables(&pool).await.unwrap();

        sync_all_table_schemas(&pool).await.unwrap();
        sync_all_table_schemas(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info('tickets')")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(count, 14);
    }
}
