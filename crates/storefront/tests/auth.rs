//! Integration tests for registration, login and admin seeding.

mod common;

use lakkeriet_core::Email;
use lakkeriet_storefront::db::UserRepository;
use lakkeriet_storefront::services::auth::{AuthError, AuthService, hash_password};

use common::test_pool;

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_and_login_roundtrip() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);

    let registered = auth
        .register("kari@example.com", "passord123")
        .await
        .expect("register");
    assert_eq!(registered.email.as_str(), "kari@example.com");
    assert!(!registered.is_admin);

    let logged_in = auth
        .login("kari@example.com", "passord123")
        .await
        .expect("login");
    assert_eq!(logged_in.id, registered.id);
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);

    let result = auth.register("not-an-email", "passord123").await;
    assert!(matches!(result, Err(AuthError::InvalidEmail(_))));

    let result = auth.register("kari@example.com", "kort").await;
    assert!(matches!(result, Err(AuthError::WeakPassword(_))));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);

    auth.register("kari@example.com", "passord123")
        .await
        .expect("register");

    let result = auth.register("kari@example.com", "annetpassord").await;
    assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);

    auth.register("kari@example.com", "passord123")
        .await
        .expect("register");

    // Wrong password, unknown account and malformed email all come back
    // as the same error.
    let wrong_password = auth.login("kari@example.com", "feilpassord").await;
    assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));

    let unknown = auth.login("ola@example.com", "passord123").await;
    assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));

    let malformed = auth.login("ikke-epost", "passord123").await;
    assert!(matches!(malformed, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_stored_hash_is_not_the_password() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);

    auth.register("kari@example.com", "passord123")
        .await
        .expect("register");

    let email = Email::parse("kari@example.com").expect("email");
    let (_, hash) = UserRepository::new(&pool)
        .get_password_hash(&email)
        .await
        .expect("get")
        .expect("some");

    assert_ne!(hash, "passord123");
    assert!(hash.starts_with("$argon2"));
}

// =============================================================================
// Admin Seeding
// =============================================================================

#[tokio::test]
async fn test_ensure_admin_creates_once() {
    let pool = test_pool().await;
    let users = UserRepository::new(&pool);

    let email = Email::parse("admin@example.com").expect("email");
    let hash = hash_password("adminpassord").expect("hash");

    assert!(users.ensure_admin(&email, &hash).await.expect("first"));
    assert!(!users.ensure_admin(&email, &hash).await.expect("second"));

    let user = users.get_by_email(&email).await.expect("get").expect("some");
    assert!(user.is_admin);

    // The seeded account logs in like any other.
    let logged_in = AuthService::new(&pool)
        .login("admin@example.com", "adminpassord")
        .await
        .expect("login");
    assert!(logged_in.is_admin);
}
