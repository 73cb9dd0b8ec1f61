//! End-to-end tests for the authentication API, driven through the full
//! router with an in-memory database.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::{Extension, Router, middleware, routing::get};
use backend::auth::middleware::{authorize, protect};
use backend::config::Config;
use backend::database::Database;
use backend::database::models::Role;
use backend::repositories::user_repository::UserRepository;
use chrono::Utc;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::time::Duration;
use tower::ServiceExt;

const TEST_SECRET: &str = "integration-test-secret";

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        acquire_timeout_seconds: 3,
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expires_in: Duration::from_secs(86400),
        server_port: 0,
        cookie_secure: false,
    }
}

async fn test_app() -> (Router, SqlitePool, Config) {
    let config = test_config();
    let db = Database::new(&config).await.unwrap();
    let pool = db.pool().clone();
    let app = backend::build_router(pool.clone(), config.clone());
    (app, pool, config)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    headers: &[(header::HeaderName, String)],
) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(name.clone(), value.clone());
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value, set_cookie)
}

async fn register(app: &Router, email: &str) -> (StatusCode, Value, Option<String>) {
    send(
        app,
        "POST",
        "/api/auth/register",
        Some(json!({ "nom": "Alice Martin", "email": email, "password": "secret1" })),
        &[],
    )
    .await
}

#[tokio::test]
async fn register_issues_a_token_and_never_echoes_the_password() {
    let (app, _pool, _config) = test_app().await;

    let (status, body, set_cookie) = register(&app, "a@x.com").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert!(!body["token"].as_str().unwrap().is_empty());

    let user = body["data"]["user"].as_object().unwrap();
    assert_eq!(user["email"], "a@x.com");
    assert_eq!(user["role"], "Seller");
    assert_eq!(user["active"], true);
    assert!(user.keys().all(|key| !key.contains("password")));

    let cookie = set_cookie.expect("registration must mirror the token into a cookie");
    assert!(cookie.starts_with("jwt="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
}

#[tokio::test]
async fn register_with_missing_fields_is_refused() {
    let (app, _pool, _config) = test_app().await;

    let (status, body, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "email": "a@x.com" })),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Please provide a name, email address and password."
    );
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let (app, _pool, _config) = test_app().await;

    let (status, _, _) = register(&app, "a@x.com").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body, _) = register(&app, "a@x.com").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "This email address is already in use.");
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let (app, _pool, _config) = test_app().await;

    let (status, body, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "nom": "Alice Martin",
            "email": "a@x.com",
            "password": "secret1",
            "role": "Manager"
        })),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Role 'Manager' is not supported.");
}

#[tokio::test]
async fn login_returns_a_fresh_token() {
    let (app, _pool, _config) = test_app().await;
    register(&app, "a@x.com").await;

    let (status, body, set_cookie) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "a@x.com", "password": "secret1" })),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert!(set_cookie.is_some());
}

#[tokio::test]
async fn failed_logins_are_indistinguishable() {
    let (app, _pool, _config) = test_app().await;
    register(&app, "a@x.com").await;

    let (wrong_password_status, wrong_password_body, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "a@x.com", "password": "wrong" })),
        &[],
    )
    .await;
    let (unknown_email_status, unknown_email_body, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "nobody@x.com", "password": "secret1" })),
        &[],
    )
    .await;

    assert_eq!(wrong_password_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email_status, StatusCode::UNAUTHORIZED);
    // Identical bodies: nothing reveals which credential was wrong.
    assert_eq!(wrong_password_body, unknown_email_body);
    assert_eq!(wrong_password_body["message"], "Incorrect email or password.");
}

#[tokio::test]
async fn login_with_missing_fields_is_refused() {
    let (app, _pool, _config) = test_app().await;

    let (status, body, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "a@x.com" })),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide your email and password.");
}

#[tokio::test]
async fn me_requires_a_token() {
    let (app, _pool, _config) = test_app().await;

    let (status, body, _) = send(&app, "GET", "/api/auth/me", None, &[]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access denied. Please log in.");
}

#[tokio::test]
async fn me_accepts_a_bearer_token() {
    let (app, _pool, _config) = test_app().await;
    let (_, body, _) = register(&app, "a@x.com").await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body, _) = send(
        &app,
        "GET",
        "/api/auth/me",
        None,
        &[(header::AUTHORIZATION, format!("Bearer {token}"))],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "a@x.com");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn me_accepts_the_jwt_cookie() {
    let (app, _pool, _config) = test_app().await;
    let (_, body, _) = register(&app, "a@x.com").await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body, _) = send(
        &app,
        "GET",
        "/api/auth/me",
        None,
        &[(header::COOKIE, format!("jwt={token}"))],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn expired_and_foreign_tokens_are_rejected() {
    let (app, _pool, _config) = test_app().await;
    let (_, body, _) = register(&app, "a@x.com").await;
    let user_id = body["data"]["user"]["id"].as_str().unwrap();

    let now = Utc::now().timestamp();
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({ "sub": user_id, "iat": now - 7200, "exp": now - 3600 }),
        &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();
    let foreign = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({ "sub": user_id, "iat": now, "exp": now + 3600 }),
        &jsonwebtoken::EncodingKey::from_secret(b"some-other-secret"),
    )
    .unwrap();

    for token in [expired, foreign] {
        let (status, body, _) = send(
            &app,
            "GET",
            "/api/auth/me",
            None,
            &[(header::AUTHORIZATION, format!("Bearer {token}"))],
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body["message"],
            "Invalid or expired token. Please log in again."
        );
    }
}

#[tokio::test]
async fn deactivated_user_is_locked_out_with_a_valid_token() {
    let (app, pool, _config) = test_app().await;
    let (_, body, _) = register(&app, "a@x.com").await;
    let token = body["token"].as_str().unwrap().to_string();
    let user_id = body["data"]["user"]["id"].as_str().unwrap().to_string();

    let repo = UserRepository::new(&pool);
    assert!(repo.set_active(&user_id, false).await.unwrap());

    let (status, body, _) = send(
        &app,
        "GET",
        "/api/auth/me",
        None,
        &[(header::AUTHORIZATION, format!("Bearer {token}"))],
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Your account has been disabled.");
}

#[tokio::test]
async fn role_gate_admits_only_the_listed_roles() {
    let (app, pool, config) = test_app().await;

    let admin_route = Router::new()
        .route(
            "/admin",
            get(|| async { "ok" })
                .layer(middleware::from_fn(authorize(&[Role::Admin])))
                .layer(middleware::from_fn(protect)),
        )
        .layer(Extension(pool.clone()))
        .layer(Extension(config.clone()));

    let (_, body, _) = register(&app, "seller@x.com").await;
    let seller_token = body["token"].as_str().unwrap().to_string();

    let (_, body, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "nom": "Ada Admin",
            "email": "admin@x.com",
            "password": "secret1",
            "role": "Admin"
        })),
        &[],
    )
    .await;
    let admin_token = body["token"].as_str().unwrap().to_string();

    let denied = Request::builder()
        .method("GET")
        .uri("/admin")
        .header(header::AUTHORIZATION, format!("Bearer {seller_token}"))
        .body(Body::empty())
        .unwrap();
    let response = admin_route.clone().oneshot(denied).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let allowed = Request::builder()
        .method("GET")
        .uri("/admin")
        .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
        .body(Body::empty())
        .unwrap();
    let response = admin_route.clone().oneshot(allowed).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn password_reset_endpoints_are_declared_but_stubbed() {
    let (app, _pool, _config) = test_app().await;

    let (status, body, _) = send(&app, "POST", "/api/auth/forgot-password", None, &[]).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "This feature is not yet implemented.");

    let (status, body, _) = send(
        &app,
        "PATCH",
        "/api/auth/reset-password/some-token",
        None,
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["message"], "This feature is not yet implemented.");
}

#[tokio::test]
async fn status_route_and_json_fallback() {
    let (app, _pool, _config) = test_app().await;

    let (status, body, _) = send(&app, "GET", "/api/status", None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (status, body, _) = send(&app, "GET", "/api/no-such-route", None, &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
}
