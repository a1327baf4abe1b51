//! Account service
//!
//! Registration and login over the credential store. Login failure is a
//! single outcome: a missing account and a wrong password are
//! indistinguishable to the caller.

use crate::auth::password;
use crate::db::models::{Role, User};
use crate::db::users;
use crate::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Registration and login against the users table
#[derive(Clone)]
pub struct AuthService {
    db: SqlitePool,
}

impl AuthService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Create an account with a freshly hashed password
    ///
    /// Returns false when the username or password is empty, or when the
    /// username is already taken. The plaintext is never stored.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<bool> {
        if username.is_empty() || password.is_empty() {
            debug!("rejected registration with empty username or password");
            return Ok(false);
        }

        let digest = password::hash_password(password)?;
        users::add_user(&self.db, username, email, role, &digest).await
    }

    /// Check credentials, returning the account on success
    ///
    /// Unknown username, wrong password, and an unreadable stored digest all
    /// yield None.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let user = match users::get_user_by_username(&self.db, username).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        if password::verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::create_all_tables;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn service() -> AuthService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_all_tables(&pool).await.unwrap();
        AuthService::new(pool)
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let auth = service().await;

        let created = auth
            .register("casey", "casey@example.com", "pa55word", Role::Analyst)
            .await
            .unwrap();
        assert!(created);

        let user = auth.authenticate("casey", "pa55word").await.unwrap();
        let user = user.expect("valid credentials should authenticate");
        assert_eq!(user.username, "casey");
        assert_eq!(user.role, Role::Analyst);
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn wrong_password_is_none() {
        let auth = service().await;
        auth.register("casey", "casey@example.com", "pa55word", Role::User)
            .await
            .unwrap();

        assert!(auth.authenticate("casey", "wrong").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_user_is_none() {
        let auth = service().await;
        assert!(auth.authenticate("nobody", "whatever").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_credentials_rejected() {
        let auth = service().await;

        assert!(!auth
            .register("", "a@example.com", "pw", Role::User)
            .await
            .unwrap());
        assert!(!auth
            .register("casey", "a@example.com", "", Role::User)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn duplicate_username_rejected() {
        let auth = service().await;

        assert!(auth
            .register("casey", "a@example.com", "first", Role::User)
            .await
            .unwrap());
        assert!(!auth
            .register("casey", "b@example.com", "second", Role::Admin)
            .await
            .unwrap());

        // Original credentials still work
        assert!(auth.authenticate("casey", "first").await.unwrap().is_some());
        assert!(auth.authenticate("casey", "second").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unreadable_stored_digest_is_none() {
        let auth = service().await;
        sqlx::query("INSERT INTO users (username, email, role, password_hash) VALUES (?, ?, ?, ?)")
            .bind("legacy")
            .bind("legacy@example.com")
            .bind("user")
            .bind("deadbeef$cafebabe")
            .execute(&auth.db)
            .await
            .unwrap();

        assert!(auth.authenticate("legacy", "anything").await.unwrap().is_none());
    }
}
