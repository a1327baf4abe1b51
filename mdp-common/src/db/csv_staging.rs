//! CSV staging repository
//!
//! Uploaded extracts are staged as-is: the parsed row data as a JSON blob
//! plus the ordered column names, stored comma-joined in a single TEXT
//! column. Parsing and validating the upload happens upstream.

use crate::db::models::{CsvUpload, NewCsvUpload};
use crate::Result;
use sqlx::SqlitePool;

/// Stage an uploaded extract, returning the generated csv_id
///
/// Column names are stored comma-joined, so a name containing a comma will
/// split into separate entries on read. CSV headers with embedded commas are
/// not supported.
pub async fn add_csv_data(pool: &SqlitePool, upload: &NewCsvUpload) -> Result<i64> {
    let columns = upload.columns.join(",");

    let result = sqlx::query(
        r#"
        INSERT INTO csv_data (filename, row_count, columns, upload_date, data_json)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&upload.filename)
    .bind(upload.row_count)
    .bind(columns)
    .bind(&upload.upload_date)
    .bind(&upload.data_json)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All staged extracts in insertion order
pub async fn list_csv_data(pool: &SqlitePool) -> Result<Vec<CsvUpload>> {
    let rows: Vec<(i64, String, i64, String, String, String)> = sqlx::query_as(
        r#"
        SELECT csv_id, filename, row_count, columns, upload_date, data_json
        FROM csv_data
        ORDER BY csv_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(csv_id, filename, row_count, columns, upload_date, data_json)| CsvUpload {
            csv_id,
            filename,
            row_count,
            columns: split_columns(&columns),
            upload_date,
            data_json,
        })
        .collect())
}

fn split_columns(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(',').map(|s| s.to_string()).collect()
}
