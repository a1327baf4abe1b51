//! Integration tests for registration and login

use mdp_common::auth::AuthService;
use mdp_common::db::init::init_schema;
use mdp_common::db::models::Role;
use sqlx::sqlite::SqlitePoolOptions;

async fn auth_over_seeded_db() -> AuthService {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init_schema(&pool).await.unwrap();
    AuthService::new(pool)
}

#[tokio::test]
async fn register_login_cycle() {
    let auth = auth_over_seeded_db().await;

    assert!(auth
        .register("taylor", "taylor@example.com", "orange-tabby-9", Role::Viewer)
        .await
        .unwrap());

    let user = auth
        .authenticate("taylor", "orange-tabby-9")
        .await
        .unwrap()
        .expect("fresh account should log in");
    assert_eq!(user.email, "taylor@example.com");
    assert_eq!(user.role, Role::Viewer);
}

#[tokio::test]
async fn seeded_username_cannot_be_reclaimed() {
    let auth = auth_over_seeded_db().await;

    let created = auth
        .register("admin", "evil@example.com", "takeover", Role::Admin)
        .await
        .unwrap();
    assert!(!created);

    // Seeded credentials unaffected
    assert!(auth.authenticate("admin", "admin").await.unwrap().is_some());
    assert!(auth.authenticate("admin", "takeover").await.unwrap().is_none());
}

#[tokio::test]
async fn login_failure_modes_are_uniform() {
    let auth = auth_over_seeded_db().await;

    // Unknown account and wrong password look identical to the caller
    let unknown = auth.authenticate("ghost", "pw").await.unwrap();
    let wrong = auth.authenticate("analyst", "not-the-password").await.unwrap();
    assert!(unknown.is_none());
    assert!(wrong.is_none());
}
