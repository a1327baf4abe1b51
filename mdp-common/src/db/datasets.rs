//! Dataset catalog repository
//!
//! Append-only: rows are inserted and listed, never updated or deleted.
//! All values are positionally bound.

use crate::db::models::{Dataset, NewDataset};
use crate::Result;
use sqlx::SqlitePool;

/// Insert a catalog record, returning the generated dataset_id
pub async fn add_dataset(pool: &SqlitePool, dataset: &NewDataset) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO datasets (
            name, description, owner_department, data_source, row_count, size_mb,
            quality_score, retention_policy, status, last_accessed, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&dataset.name)
    .bind(&dataset.description)
    .bind(&dataset.owner_department)
    .bind(&dataset.data_source)
    .bind(dataset.row_count)
    .bind(dataset.size_mb)
    .bind(dataset.quality_score)
    .bind(&dataset.retention_policy)
    .bind(dataset.status)
    .bind(&dataset.last_accessed)
    .bind(&dataset.created_at)
    .bind(&dataset.updated_at)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All catalog records in insertion order
pub async fn list_datasets(pool: &SqlitePool) -> Result<Vec<Dataset>> {
    let rows = sqlx::query_as::<_, Dataset>(
        r#"
        SELECT dataset_id, name, description, owner_department, data_source, row_count,
               size_mb, quality_score, retention_policy, status, last_accessed,
               created_at, updated_at
        FROM datasets
        ORDER BY dataset_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::create_all_tables;
    use crate::db::models::DatasetStatus;
    use sqlx::sqlite::SqlitePoolOptions;

    fn sample_dataset() -> NewDataset {
        NewDataset {
            name: "Test".to_string(),
            description: "desc".to_string(),
            owner_department: "Security".to_string(),
            data_source: "S3".to_string(),
            row_count: 100,
            size_mb: 1.5,
            quality_score: 0.9,
            retention_policy: "policy".to_string(),
            status: DatasetStatus::Active,
            last_accessed: "2024-01-01".to_string(),
            created_at: "2024-01-01".to_string(),
            updated_at: "2024-01-01".to_string(),
        }
    }

    #[tokio::test]
    async fn add_then_list_round_trip() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_all_tables(&pool).await.unwrap();

        let id = add_dataset(&pool, &sample_dataset()).await.unwrap();
        assert!(id > 0);

        let rows = list_datasets(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dataset_id, id);
        assert_eq!(rows[0].name, "Test");
        assert_eq!(rows[0].row_count, 100);
        assert_eq!(rows[0].status, DatasetStatus::Active);
    }
}
