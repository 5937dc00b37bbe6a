mod common;

use common::{TestApp, error_code};
use http::{Method, StatusCode};
use restaurant_server::{AppError, ErrorCode};
use restaurant_server::auth::{TokenPair, TokenStore};
use restaurant_server::db::repository::RepoError;
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app.request(Method::GET, "/menus", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), ErrorCode::NotAuthenticated.code() as u64);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/menus", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), ErrorCode::TokenInvalid.code() as u64);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new().await;
    let session = app.signup("old@example.com", "555-0001", "USER").await;

    let issued_at = chrono::Utc::now().timestamp() - 25 * 3600;
    let stale = app
        .state
        .jwt_service
        .issue_at(issued_at, "old@example.com", "Ada", "Lovelace", &session.user_id)
        .unwrap();

    let (status, body) = app.get("/menus", &stale.token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), ErrorCode::TokenExpired.code() as u64);
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = TestApp::new().await;
    let session = app.signup("bearer@example.com", "555-0002", "USER").await;

    let request = http::Request::builder()
        .uri("/menus")
        .header("Authorization", format!("Bearer {}", session.token))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.app.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_signup_login_and_refresh() {
    let app = TestApp::new().await;
    let session = app.signup("ada@example.com", "555-0003", "USER").await;

    let (status, body) = app
        .post(
            "/users/login",
            None,
            json!({ "email": "ada@example.com", "password": "secret123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], session.user_id.as_str());
    assert!(body["user"].get("password_hash").is_none());
    let login_token = body["token"].as_str().unwrap().to_string();

    // Login records the pair on the user
    let stored = app
        .state
        .repos
        .users
        .find_by_id(&session.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.token.as_deref(), Some(login_token.as_str()));

    let (status, body) = app
        .post(
            "/users/refresh",
            None,
            json!({ "refresh_token": session.refresh_token }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let refreshed = body["token"].as_str().unwrap();
    let (status, _) = app.get("/menus", refreshed).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = TestApp::new().await;
    let session = app.signup("swap@example.com", "555-0004", "USER").await;

    let (status, _) = app.get("/menus", &session.refresh_token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post("/users/refresh", None, json!({ "refresh_token": session.token }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = TestApp::new().await;
    app.signup("ada@example.com", "555-0005", "USER").await;

    let (wrong_status, wrong_body) = app
        .post(
            "/users/login",
            None,
            json!({ "email": "ada@example.com", "password": "wrong-password" }),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .post(
            "/users/login",
            None,
            json!({ "email": "nobody@example.com", "password": "secret123" }),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(error_code(&wrong_body), ErrorCode::InvalidCredentials.code() as u64);
}

#[tokio::test]
async fn test_duplicate_email_and_phone() {
    let app = TestApp::new().await;
    app.signup("ada@example.com", "555-0006", "USER").await;

    let payload = |email: &str, phone: &str| {
        json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": email,
            "password": "secret123",
            "phone": phone,
        })
    };

    let (status, body) = app
        .post("/users/signup", None, payload("ada@example.com", "555-0999"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), ErrorCode::EmailExists.code() as u64);

    let (status, body) = app
        .post("/users/signup", None, payload("other@example.com", "555-0006"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), ErrorCode::PhoneExists.code() as u64);
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post(
            "/users/signup",
            None,
            json!({
                "first_name": "A",
                "last_name": "Lovelace",
                "email": "not-an-email",
                "password": "secret123",
                "phone": "555-0007",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), ErrorCode::ValidationFailed.code() as u64);
    assert_eq!(body["details"]["fields"], json!(["email", "first_name"]));
}

#[tokio::test]
async fn test_manager_capability() {
    let app = TestApp::new().await;
    let manager = app.manager().await;
    let user = app.signup("guest@example.com", "555-0008", "USER").await;
    let table = json!({ "number_of_guests": 2, "table_number": 9 });

    // Plain user acting as themselves
    let (status, body) = app
        .post(&format!("/tables/{}", user.user_id), Some(&user.token), table.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), ErrorCode::RoleRequired.code() as u64);

    // Plain user borrowing a manager's id
    let (status, body) = app
        .post(&format!("/tables/{}", manager.user_id), Some(&user.token), table.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), ErrorCode::PermissionDenied.code() as u64);

    let (status, _) = app
        .post(&format!("/tables/{}", manager.user_id), Some(&manager.token), table)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_listing_is_paginated() {
    let app = TestApp::new().await;
    let session = app.signup("u1@example.com", "555-0011", "USER").await;
    app.signup("u2@example.com", "555-0012", "USER").await;
    app.signup("u3@example.com", "555-0013", "USER").await;

    let (status, body) = app
        .get("/users?page=2&record_per_page=2", &session.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .get(&format!("/users/{}", session.user_id), &session.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "u1@example.com");
}

#[tokio::test]
async fn test_persist_never_creates_a_user() {
    let app = TestApp::new().await;
    let tokens = TokenPair {
        token: "a".into(),
        refresh_token: "r".into(),
    };

    let result = app.state.repos.users.persist(&tokens, "missing-user").await;
    assert!(matches!(result, Err(RepoError::NotFound(_))));

    let (total, _) = app.state.repos.users.find_page(0, 10).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_unique_violation_does_not_expose_schema() {
    let app = TestApp::new().await;
    app.signup("ada@example.com", "555-0007", "USER").await;
    let mut copy = app
        .state
        .repos
        .users
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    copy.id = "another-id".into();

    let err = app.state.repos.users.create(copy).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    let err: AppError = err.into();
    assert_eq!(err.code, ErrorCode::AlreadyExists);
    assert_eq!(err.message, "Record already exists");
    assert!(!err.message.contains("UNIQUE"));
}
