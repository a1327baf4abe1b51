//! Credential store
//!
//! Username-keyed account records. The `username` UNIQUE constraint is the
//! authoritative backstop for the check-then-insert in [`add_user`]: two
//! concurrent registrations race past the pre-check, and the loser's
//! constraint violation is translated into the same `false` return.

use crate::db::models::{Role, User};
use crate::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Insert a new account; returns false when the username is taken
pub async fn add_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    role: Role,
    password_hash: &str,
) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
        .bind(username)
        .fetch_one(pool)
        .await?;

    if exists {
        return Ok(false);
    }

    try_insert_user(pool, username, email, role, password_hash).await
}

/// Insert without the pre-check; the UNIQUE constraint is the backstop
async fn try_insert_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    role: Role,
    password_hash: &str,
) -> Result<bool> {
    let insert = sqlx::query(
        "INSERT INTO users (username, email, role, password_hash) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(role)
    .bind(password_hash)
    .execute(pool)
    .await;

    match insert {
        Ok(_) => Ok(true),
        Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE constraint failed") => {
            debug!("Concurrent registration lost the race for username '{}'", username);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Exact-match lookup by username
pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT user_id, username, email, role, password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// All accounts in insertion order
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT user_id, username, email, role, password_hash FROM users ORDER BY user_id",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}
