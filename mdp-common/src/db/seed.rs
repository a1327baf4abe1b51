//! Baseline seed data
//!
//! Phase 3 of database initialization. An empty store gets a fixed baseline
//! set per table so a fresh install is immediately demonstrable: two
//! accounts (`admin`/`analyst`) and five sample rows each for datasets,
//! tickets, and incidents. CSV staging is never seeded.
//!
//! A single leftover row from the pre-analytics schema versions is also
//! replaced: when a table holds exactly one row and its distinguishing text
//! field matches the known legacy placeholder ("Initial Logs",
//! "Reset Password", "Phishing Email"), the old rows are deleted and the
//! full baseline is inserted. This is a one-time migration shim, best
//! effort only; it never fires on tables with more than one row.
//!
//! Two processes seeding the same empty store at first boot can
//! double-insert baseline rows; that race is accepted, not locked around.

use crate::auth::password::hash_password;
use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Seed all baseline rows where the heuristics say the table needs them
pub async fn seed_baseline_data(pool: &SqlitePool) -> Result<()> {
    seed_users(pool).await?;
    seed_datasets(pool).await?;
    seed_tickets(pool).await?;
    seed_incidents(pool).await?;
    Ok(())
}

/// Empty-or-placeholder check for one record table
///
/// Returns true when the table is empty, or holds exactly one row whose
/// `text_column` value contains `placeholder`.
async fn needs_reseed(
    pool: &SqlitePool,
    table: &str,
    text_column: &str,
    placeholder: &str,
) -> Result<bool> {
    let query = format!(
        "SELECT COUNT(*), GROUP_CONCAT({}, '|') FROM {}",
        text_column, table
    );
    let (count, concat): (i64, Option<String>) =
        sqlx::query_as(&query).fetch_one(pool).await?;

    if count == 0 {
        return Ok(true);
    }

    Ok(count == 1 && concat.unwrap_or_default().contains(placeholder))
}

async fn seed_users(pool: &SqlitePool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        return Ok(());
    }

    // Baseline accounts carry freshly salted digests, never fixed hashes
    for (username, email, role) in [
        ("admin", "admin@example.com", "admin"),
        ("analyst", "analyst@example.com", "analyst"),
    ] {
        let digest = hash_password(username)?;
        sqlx::query("INSERT INTO users (username, email, role, password_hash) VALUES (?, ?, ?, ?)")
            .bind(username)
            .bind(email)
            .bind(role)
            .bind(digest)
            .execute(pool)
            .await?;
    }

    info!("Seeded baseline user accounts");
    Ok(())
}

async fn seed_datasets(pool: &SqlitePool) -> Result<()> {
    if !needs_reseed(pool, "datasets", "name", "Initial Logs").await? {
        return Ok(());
    }

    sqlx::query("DELETE FROM datasets").execute(pool).await?;

    let baseline = [
        ("Security Email Logs", "Phishing detection samples", "Security", "Exchange Gateway", 125_000_i64, 7.8, 0.82, "Archive after 12 months", "Active", "2024-06-01", "2024-01-04", "2024-05-27"),
        ("Endpoint Telemetry", "EDR events aggregated hourly", "Security", "CrowdStrike", 2_850_000, 25.4, 0.76, "Archive after 6 months", "Active", "2024-06-10", "2024-02-12", "2024-06-09"),
        ("Customer Support Tickets", "Historic IT tickets for reporting", "IT Operations", "ServiceNow", 54_000, 18.3, 0.91, "Archive after 18 months", "Active", "2024-04-14", "2023-12-01", "2024-04-12"),
        ("Data Science Sandbox", "Experimental ML datasets", "Data Science", "S3 Sandbox", 375_000, 42.6, 0.65, "Archive after 3 months", "Inactive", "2024-01-30", "2023-07-15", "2024-01-18"),
        ("Finance KPIs", "Financial dashboard extracts", "Finance", "ERP Warehouse", 8_200, 4.1, 0.94, "Archive after 24 months", "Active", "2024-05-01", "2023-11-21", "2024-04-28"),
    ];

    for row in baseline {
        sqlx::query(
            r#"
            INSERT INTO datasets (
                name, description, owner_department, data_source, row_count, size_mb,
                quality_score, retention_policy, status, last_accessed, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.0)
        .bind(row.1)
        .bind(row.2)
        .bind(row.3)
        .bind(row.4)
        .bind(row.5)
        .bind(row.6)
        .bind(row.7)
        .bind(row.8)
        .bind(row.9)
        .bind(row.10)
        .bind(row.11)
        .execute(pool)
        .await?;
    }

    info!("Seeded baseline dataset catalog");
    Ok(())
}

async fn seed_tickets(pool: &SqlitePool) -> Result<()> {
    if !needs_reseed(pool, "tickets", "title", "Reset Password").await? {
        return Ok(());
    }

    sqlx::query("DELETE FROM tickets").execute(pool).await?;

    let baseline: [(&str, &str, &str, &str, &str, &str, &str, Option<&str>, &str, f64, f64, i64, &str); 5] = [
        ("VPN Access Failure", "Remote engineer cannot connect", "Open", "Waiting for User", "High", "2024-06-01", "2024-06-10", None, "Morgan Lee", 0.0, 42.0, 68, "Portal"),
        ("HR Onboarding Laptop", "Provision device for new hire", "Resolved", "Fulfillment", "Medium", "2024-05-10", "2024-05-18", Some("2024-05-18"), "Priya Patel", 52.0, 12.0, 90, "Email"),
        ("Finance App Outage", "Finance cannot access ledger", "Resolved", "Major Incident", "Critical", "2024-05-28", "2024-05-29", Some("2024-05-29"), "Morgan Lee", 16.0, 8.0, 72, "Phone"),
        ("Printer Queue Delay", "Queue stuck on 1st floor", "Open", "Waiting for Vendor", "Low", "2024-05-15", "2024-06-11", None, "Adam Scott", 0.0, 96.0, 0, "Portal"),
        ("Password Reset Automation", "Workflow failing nightly", "Resolved", "Investigation", "High", "2024-05-03", "2024-05-06", Some("2024-05-06"), "Priya Patel", 32.0, 6.0, 88, "Portal"),
    ];

    for row in baseline {
        sqlx::query(
            r#"
            INSERT INTO tickets (
                title, description, status, stage, priority, created_at, updated_at, resolved_at,
                assigned_to, time_to_resolve_hours, waiting_stage_hours, customer_satisfaction, channel
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.0)
        .bind(row.1)
        .bind(row.2)
        .bind(row.3)
        .bind(row.4)
        .bind(row.5)
        .bind(row.6)
        .bind(row.7)
        .bind(row.8)
        .bind(row.9)
        .bind(row.10)
        .bind(row.11)
        .bind(row.12)
        .execute(pool)
        .await?;
    }

    info!("Seeded baseline service desk tickets");
    Ok(())
}

async fn seed_incidents(pool: &SqlitePool) -> Result<()> {
    if !needs_reseed(pool, "incidents", "title", "Phishing Email").await? {
        return Ok(());
    }

    sqlx::query("DELETE FROM incidents").execute(pool).await?;

    let baseline: [(&str, &str, &str, &str, &str, &str, &str, &str, &str, Option<&str>, Option<&str>, f64, f64, &str); 5] = [
        ("Credential Harvesting Campaign", "Targeted phishing against executives", "Phishing", "Email Link", "Critical", "Investigating", "SOC Level 1", "Jamie Fox", "2024-06-05T08:24:00", Some("2024-06-05T09:05:00"), None, 0.7, 0.0, "Executive email compromise risk"),
        ("Invoice Fraud Attempt", "Finance clerk received spoofed vendor request", "Phishing", "Spoofed Domain", "High", "Contained", "Finance", "Jamie Fox", "2024-05-27T13:15:00", Some("2024-05-27T13:40:00"), Some("2024-05-27T18:20:00"), 0.4, 5.1, "Potential payment diversion"),
        ("Credential Stuffing Alerts", "Elevated failed logins from single ASN", "Credential Abuse", "Botnet", "Medium", "Monitoring", "Security Automation", "Azra Singh", "2024-05-30T22:30:00", Some("2024-05-30T22:42:00"), None, 0.2, 0.0, "Possible account takeover"),
        ("Suspicious USB Insertions", "Multiple USB devices on finance workstations", "Insider", "Physical", "High", "Resolved", "Security Awareness", "Morgan Hale", "2024-05-12T10:05:00", Some("2024-05-12T10:25:00"), Some("2024-05-12T14:55:00"), 0.3, 4.8, "Malware propagation concern"),
        ("Phishing Portal Clone", "Fake VPN landing page discovered", "Phishing", "Web Spoof", "Critical", "Open", "Threat Intel", "Jamie Fox", "2024-06-09T07:50:00", Some("2024-06-09T08:20:00"), None, 0.5, 0.0, "Credentials exfiltration active"),
    ];

    for row in baseline {
        sqlx::query(
            r#"
            INSERT INTO incidents (
                title, description, category, threat_vector, severity, status, reported_by, assigned_to,
                detected_at, first_response_at, resolved_at, time_to_first_response_hours,
                time_to_resolve_hours, business_impact
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.0)
        .bind(row.1)
        .bind(row.2)
        .bind(row.3)
        .bind(row.4)
        .bind(row.5)
        .bind(row.6)
        .bind(row.7)
        .bind(row.8)
        .bind(row.9)
        .bind(row.10)
        .bind(row.11)
        .bind(row.12)
        .bind(row.13)
        .execute(pool)
        .await?;
    }

    info!("Seeded baseline security incidents");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::create_all_tables;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_all_tables(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn empty_store_gets_full_baseline() {
        let pool = setup_test_db().await;

        seed_baseline_data(&pool).await.unwrap();

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        let datasets: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM datasets")
            .fetch_one(&pool)
            .await
            .unwrap();
        let tickets: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
            .fetch_one(&pool)
            .await
            .unwrap();
        let incidents: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM incidents")
            .fetch_one(&pool)
            .await
            .unwrap();
        let csv: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM csv_data")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(users, 2);
        assert_eq!(datasets, 5);
        assert_eq!(tickets, 5);
        assert_eq!(incidents, 5);
        assert_eq!(csv, 0, "CSV staging is never seeded");
    }

    #[tokio::test]
    async fn seeding_twice_does_not_duplicate() {
        let pool = setup_test_db().await;

        seed_baseline_data(&pool).await.unwrap();
        seed_baseline_data(&pool).await.unwrap();

        let datasets: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM datasets")
            .fetch_one(&pool)
            .await
            .unwrap();
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(datasets, 5);
        assert_eq!(users, 2);
    }

    #[tokio::test]
    async fn legacy_placeholder_row_is_replaced() {
        let pool = setup_test_db().await;

        sqlx::query("INSERT INTO datasets (name, description) VALUES ('Initial Logs', 'old seed')")
            .execute(&pool)
            .await
            .unwrap();

        seed_baseline_data(&pool).await.unwrap();

        let placeholder: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM datasets WHERE name = 'Initial Logs'")
                .fetch_one(&pool)
                .await
                .unwrap();
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM datasets")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(placeholder, 0, "placeholder row removed");
        assert_eq!(total, 5, "full baseline inserted, no duplication");
    }

    #[tokio::test]
    async fn genuine_single_row_is_preserved() {
        let pool = setup_test_db().await;

        sqlx::query("INSERT INTO datasets (name, description) VALUES ('Quarterly Revenue', 'real data')")
            .execute(&pool)
            .await
            .unwrap();

        seed_baseline_data(&pool).await.unwrap();

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM datasets")
            .fetch_one(&pool)
            .await
            .unwrap();
        let kept: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM datasets WHERE name = 'Quarterly Revenue'")
                .fetch_one(&pool)
                .await
                .unwrap();

        assert_eq!(total, 1, "user data is not reseeded over");
        assert_eq!(kept, 1);
    }

    #[tokio::test]
    async fn multi_row_table_never_reseeds() {
        let pool = setup_test_db().await;

        // Even with a placeholder-matching title, two rows means real use
        sqlx::query("INSERT INTO tickets (title) VALUES ('Reset Password')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO tickets (title) VALUES ('Laptop Replacement')")
            .execute(&pool)
            .await
            .unwrap();

        seed_baseline_data(&pool).await.unwrap();

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn baseline_accounts_have_distinct_digests() {
        let pool = setup_test_db().await;

        seed_baseline_data(&pool).await.unwrap();

        let hashes: Vec<(String,)> =
            sqlx::query_as("SELECT password_hash FROM users ORDER BY user_id")
                .fetch_all(&pool)
                .await
                .unwrap();

        assert_eq!(hashes.len(), 2);
        assert_ne!(hashes[0].0, hashes[1].0);
        assert!(hashes[0].0.starts_with("$argon2"));
    }
}
