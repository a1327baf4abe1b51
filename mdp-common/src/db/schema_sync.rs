//! Additive schema synchronization
//!
//! Legacy databases predate the analytic columns added to the record tables
//! over time. On startup the expected schema (declared in
//! `table_schemas.rs`) is compared against `PRAGMA table_info` and every
//! missing column is added via `ALTER TABLE ... ADD COLUMN`. Columns are
//! never dropped or renamed, and a column that already exists is left
//! untouched, so the sync is safe to run on every process start.

use crate::Result;
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};

/// Column declaration for one expected table column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,
    /// SQL type ("TEXT", "INTEGER", "REAL")
    pub sql_type: String,
    /// NOT NULL constraint (requires a default to be addable)
    pub not_null: bool,
    /// DEFAULT value, as SQL source text
    pub default_value: Option<String>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            not_null: false,
            default_value: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Expected schema for one database table
pub trait TableSchema {
    /// Table name in the database
    fn table_name() -> &'static str;

    /// Full target column set, in creation order
    fn expected_columns() -> Vec<ColumnDefinition>;
}

/// Check if a table exists
pub async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name = ?
        )
        "#,
    )
    .bind(table_name)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Read the actual column names of a table via PRAGMA table_info
pub async fn existing_columns(pool: &SqlitePool, table_name: &str) -> Result<Vec<String>> {
    let query = format!("PRAGMA table_info({})", table_name);
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    Ok(rows.iter().map(|row| row.get("name")).collect())
}

/// Synchronize one table: add every expected column the database lacks
pub async fn sync_table<T: TableSchema>(pool: &SqlitePool) -> Result<()> {
    let table_name = T::table_name();

    if !table_exists(pool, table_name).await? {
        warn!(
            "Schema sync: table '{}' does not exist - expected CREATE TABLE IF NOT EXISTS to run first",
            table_name
        );
        return Ok(());
    }

    let actual = existing_columns(pool, table_name).await?;
    let mut added = 0;

    for column in T::expected_columns() {
        if !actual.iter().any(|name| name == &column.name) {
            add_column(pool, table_name, &column).await?;
            added += 1;
        }
    }

    if added > 0 {
        info!("Schema sync: added {} column(s) to '{}'", added, table_name);
    }

    Ok(())
}

/// Add one missing column via ALTER TABLE ADD COLUMN
async fn add_column(pool: &SqlitePool, table: &str, column: &ColumnDefinition) -> Result<()> {
    let mut sql = format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        table, column.name, column.sql_type
    );

    // SQLite only accepts NOT NULL on an added column when a default is given
    if column.not_null {
        if let Some(default) = &column.default_value {
            sql.push_str(&format!(" NOT NULL DEFAULT {}", default));
        } else {
            warn!(
                "Schema sync: cannot add NOT NULL column {}.{} without a DEFAULT - adding as nullable",
                table, column.name
            );
        }
    } else if let Some(default) = &column.default_value {
        sql.push_str(&format!(" DEFAULT {}", default));
    }

    info!("Schema sync: adding column {}.{} ({})", table, column.name, column.sql_type);

    match sqlx::query(&sql).execute(pool).await {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db_err)) if db_err.message().contains("duplicate column") => {
            // Concurrent initialization - column added by another process
            info!(
                "Schema sync: column {}.{} already added (concurrent initialization)",
                table, column.name
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
