//! Service desk ticket repository

use crate::db::models::{NewTicket, Ticket};
use crate::Result;
use sqlx::SqlitePool;

/// Insert a ticket, returning the generated ticket_id
pub async fn add_ticket(pool: &SqlitePool, ticket: &NewTicket) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO tickets (
            title, description, status, stage, priority, created_at, updated_at, resolved_at,
            assigned_to, time_to_resolve_hours, waiting_stage_hours, customer_satisfaction, channel
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&ticket.title)
    .bind(&ticket.description)
    .bind(&ticket.status)
    .bind(&ticket.stage)
    .bind(&ticket.priority)
    .bind(&ticket.created_at)
    .bind(&ticket.updated_at)
    .bind(&ticket.resolved_at)
    .bind(&ticket.assigned_to)
    .bind(ticket.time_to_resolve_hours)
    .bind(ticket.waiting_stage_hours)
    .bind(ticket.customer_satisfaction)
    .bind(&ticket.channel)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All tickets in insertion order
pub async fn list_tickets(pool: &SqlitePool) -> Result<Vec<Ticket>> {
    let rows = sqlx::query_as::<_, Ticket>(
        r#"
        SELECT ticket_id, title, description, status, stage, priority, created_at, updated_at,
               resolved_at, assigned_to, time_to_resolve_hours, waiting_stage_hours,
               customer_satisfaction, channel
        FROM tickets
        ORDER BY ticket_id
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
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn unresolved_ticket_round_trips_null_resolved_at() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_all_tables(&pool).await.unwrap();

        let ticket = NewTicket {
            title: "VPN down".to_string(),
            description: "Site-to-site tunnel flapping".to_string(),
            status: "Open".to_string(),
            stage: "Investigation".to_string(),
            priority: "High".to_string(),
            created_at: "2024-06-01".to_string(),
            updated_at: "2024-06-02".to_string(),
            resolved_at: None,
            assigned_to: "Morgan Lee".to_string(),
            time_to_resolve_hours: 0.0,
            waiting_stage_hours: 4.5,
            customer_satisfaction: 0,
            channel: "Portal".to_string(),
        };

        let id = add_ticket(&pool, &ticket).await.unwrap();
        let rows = list_tickets(&pool).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticket_id, id);
        assert_eq!(rows[0].resolved_at, None);
        assert_eq!(rows[0].waiting_stage_hours, 4.5);
    }
}
