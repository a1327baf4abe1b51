//! Security incident repository

use crate::db::models::{Incident, NewIncident};
use crate::Result;
use sqlx::SqlitePool;

/// Insert an incident, returning the generated incident_id
pub async fn add_incident(pool: &SqlitePool, incident: &NewIncident) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO incidents (
            title, description, category, threat_vector, severity, status, reported_by, assigned_to,
            detected_at, first_response_at, resolved_at, time_to_first_response_hours,
            time_to_resolve_hours, business_impact
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&incident.title)
    .bind(&incident.description)
    .bind(&incident.category)
    .bind(&incident.threat_vector)
    .bind(incident.severity)
    .bind(&incident.status)
    .bind(&incident.reported_by)
    .bind(&incident.assigned_to)
    .bind(&incident.detected_at)
    .bind(&incident.first_response_at)
    .bind(&incident.resolved_at)
    .bind(incident.time_to_first_response_hours)
    .bind(incident.time_to_resolve_hours)
    .bind(&incident.business_impact)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All incidents in insertion order
pub async fn list_incidents(pool: &SqlitePool) -> Result<Vec<Incident>> {
    let rows = sqlx::query_as::<_, Incident>(
        r#"
        SELECT incident_id, title, description, category, threat_vector, severity, status,
               reported_by, assigned_to, detected_at, first_response_at, resolved_at,
               time_to_first_response_hours, time_to_resolve_hours, business_impact
        FROM incidents
        ORDER BY incident_id
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
    use crate::db::models::Severity;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn add_then_list_preserves_severity() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_all_tables(&pool).await.unwrap();

        let incident = NewIncident {
            title: "Beaconing host".to_string(),
            description: "Workstation calling known C2 domain".to_string(),
            category: "Malware".to_string(),
            threat_vector: "Drive-by".to_string(),
            severity: Severity::Critical,
            status: "Investigating".to_string(),
            reported_by: "EDR".to_string(),
            assigned_to: "Jamie Fox".to_string(),
            detected_at: "2024-06-11T03:12:00".to_string(),
            first_response_at: Some("2024-06-11T03:30:00".to_string()),
            resolved_at: None,
            time_to_first_response_hours: 0.3,
            time_to_resolve_hours: 0.0,
            business_impact: "Lateral movement risk".to_string(),
        };

        let id = add_incident(&pool, &incident).await.unwrap();
        let rows = list_incidents(&pool).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].incident_id, id);
        assert_eq!(rows[0].severity, Severity::Critical);
        assert_eq!(rows[0].resolved_at, None);
    }
}
