//! API Integration Tests
//!
//! Each test spins up the real router on an ephemeral port backed by the
//! in-memory store, so no external services are required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, TestServer,
};
use reqwest::{header, StatusCode};
use serde_json::{json, Value};
use task_client::{AccessToken, Task, TaskList};
use task_core::TaskStatus;

async fn create_task(server: &TestServer, token: &str, title: &str) -> Task {
    let response = server
        .post_auth("/tasks", token, &task_body(title))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_root_banner() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Task Management Backend is running");
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "in_memory");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_sets_cookie_attributes() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/auth/register", &Credentials::unique())
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    let body: AccessToken = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(!body.access_token.is_empty());
    assert!(cookie.starts_with("refreshToken="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (credentials, _) = server.register().await.unwrap();

    let response = server.post("/auth/register", &credentials).await.unwrap();
    let (error, code) = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error, "Email already registered");
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_validation_messages() {
    let server = TestServer::start().await.expect("Failed to start server");

    let cases = [
        (json!({ "email": "nope", "password": "secret1" }), "Invalid email format"),
        (
            json!({ "email": "a@example.com", "password": "12345" }),
            "Password must be at least 6 characters",
        ),
    ];
    for (body, expected) in cases {
        let response = server.post("/auth/register", &body).await.unwrap();
        let (error, code) = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(error, expected);
        assert_eq!(code, "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_login() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (credentials, _) = server.register().await.unwrap();

    let response = server.post("/auth/login", &credentials).await.unwrap();
    let body: AccessToken = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (credentials, _) = server.register().await.unwrap();

    for body in [
        credentials.with_password("wrong-password"),
        Credentials::unique(),
    ] {
        let response = server.post("/auth/login", &body).await.unwrap();
        let (error, _) = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(error, "Invalid email or password");
    }
}

#[tokio::test]
async fn test_login_requires_password() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/auth/login", &json!({ "email": "a@example.com" }))
        .await
        .unwrap();
    let (error, _) = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error, "Password is required");
}

#[tokio::test]
async fn test_refresh_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, first_access) = server.register().await.unwrap();

    let response = server.post_empty("/auth/refresh").await.unwrap();
    let AccessToken { access_token } = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(access_token, first_access);

    // The refresh token is not rotated, so it keeps working
    let response = server.post_empty("/auth/refresh").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // And the new access token is usable
    let response = server.get_auth("/tasks", &access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post_empty("/auth/refresh").await.unwrap();
    let (error, code) = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error, "Refresh token missing");
    assert_eq!(code, "MISSING_REFRESH_TOKEN");
}

#[tokio::test]
async fn test_login_supersedes_previous_refresh_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (credentials, _) = server.register().await.unwrap();

    // A second browser logs in as the same user
    let other = server.new_client().unwrap();
    let response = other
        .post(format!("{}/auth/login", server.base_url()))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The first session's refresh token is no longer the stored one
    let response = server.post_empty("/auth/refresh").await.unwrap();
    let (_, code) = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");

    let response = other
        .post(format!("{}/auth/refresh", server.base_url()))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_logout() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, access_token) = server.register().await.unwrap();

    let response = server.post_empty("/auth/logout").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, json!({ "ok": true }));

    // Cookie cleared: the refresh endpoint sees no token
    let response = server.post_empty("/auth/refresh").await.unwrap();
    let (_, code) = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_REFRESH_TOKEN");

    // Access tokens are stateless and stay valid until they expire
    let response = server.get_auth("/tasks", &access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_token_held_elsewhere() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.register().await.unwrap();

    let response = server.post_empty("/auth/logout").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Logging out twice is still fine
    let response = server.post_empty("/auth/logout").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Bearer Auth Tests
// ============================================================================

#[tokio::test]
async fn test_tasks_unauthorized() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/tasks").await.unwrap();
    let (error, code) = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error, "Missing authorization header");
    assert_eq!(code, "MISSING_AUTH");

    let response = server.get_auth("/tasks", "garbage").await.unwrap();
    let (error, code) = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error, "Invalid or expired token");
    assert_eq!(code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .client
        .get(format!("{}/tasks", server.base_url()))
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .send()
        .await
        .unwrap();
    let (error, _) = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error, "Invalid authorization format");
}

// ============================================================================
// Task Tests
// ============================================================================

#[tokio::test]
async fn test_create_task() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.register().await.unwrap();

    let response = server
        .post_auth(
            "/tasks",
            &token,
            &task_body_with_description("Write docs", "README first"),
        )
        .await
        .unwrap();
    let task: Task = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(task.title, "Write docs");
    assert_eq!(task.description.as_deref(), Some("README first"));
    assert_eq!(task.status, TaskStatus::Open);
}

#[tokio::test]
async fn test_create_task_requires_title() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.register().await.unwrap();

    let response = server
        .post_auth("/tasks", &token, &json!({ "description": "no title" }))
        .await
        .unwrap();
    let (error, _) = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error, "Title is required");
}

#[tokio::test]
async fn test_get_update_toggle_delete_task() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.register().await.unwrap();
    let task = create_task(&server, &token, "Draft").await;
    let path = format!("/tasks/{}", task.id);

    let response = server.get_auth(&path, &token).await.unwrap();
    let fetched: Task = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched, task);

    let response = server
        .patch_auth(&path, &token, &json!({ "description": "notes" }))
        .await
        .unwrap();
    let updated: Task = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Draft");
    assert_eq!(updated.description.as_deref(), Some("notes"));

    let response = server
        .patch_auth(&path, &token, &json!({ "title": "" }))
        .await
        .unwrap();
    let (error, _) = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error, "Title cannot be empty");

    let response = server
        .post_empty_auth(&format!("{path}/toggle"), &token)
        .await
        .unwrap();
    let toggled: Task = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.status, TaskStatus::Done);

    let response = server.delete_auth(&path, &token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, json!({ "ok": true }));

    let response = server.get_auth(&path, &token).await.unwrap();
    let (error, _) = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error, "Task not found");
}

#[tokio::test]
async fn test_task_ownership() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = server.register().await.unwrap();
    let task = create_task(&server, &owner, "Private").await;

    // Second user on the same server, separate cookie jar
    let other = server.new_client().unwrap();
    let response = other
        .post(format!("{}/auth/register", server.base_url()))
        .json(&Credentials::unique())
        .send()
        .await
        .unwrap();
    let AccessToken {
        access_token: stranger,
    } = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/tasks/{}", task.id);
    let responses = [
        server.get_auth(&path, &stranger).await.unwrap(),
        server
            .patch_auth(&path, &stranger, &json!({ "title": "Mine now" }))
            .await
            .unwrap(),
        server
            .post_empty_auth(&format!("{path}/toggle"), &stranger)
            .await
            .unwrap(),
        server.delete_auth(&path, &stranger).await.unwrap(),
    ];
    for response in responses {
        let (error, _) = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
        assert_eq!(error, "Task not found");
    }

    // The stranger's list is empty and the owner's task is untouched
    let response = server.get_auth("/tasks", &stranger).await.unwrap();
    let page: TaskList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 0);

    let response = server.get_auth(&path, &owner).await.unwrap();
    let fetched: Task = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched, task);
}

#[tokio::test]
async fn test_non_numeric_task_id() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.register().await.unwrap();

    let response = server.get_auth("/tasks/abc", &token).await.unwrap();
    let (_, code) = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_list_tasks_pagination() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.register().await.unwrap();
    for i in 1..=12 {
        create_task(&server, &token, &format!("Task {i}")).await;
    }

    let response = server
        .get_auth("/tasks?page=2&limit=5", &token)
        .await
        .unwrap();
    let page: TaskList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.page, 2);
    assert_eq!(page.limit, 5);
    assert_eq!(page.total_pages, 3);
    let titles: Vec<_> = page.data.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Task 7", "Task 6", "Task 5", "Task 4", "Task 3"]);

    // Out-of-range and unparsable values fall back
    let response = server
        .get_auth("/tasks?page=abc&limit=1000", &token)
        .await
        .unwrap();
    let page: TaskList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 100);
    assert_eq!(page.data.len(), 12);
}

#[tokio::test]
async fn test_list_tasks_filters() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.register().await.unwrap();
    let milk = create_task(&server, &token, "Buy milk").await;
    create_task(&server, &token, "Walk dog").await;
    create_task(&server, &token, "MILKSHAKE").await;
    server
        .post_empty_auth(&format!("/tasks/{}/toggle", milk.id), &token)
        .await
        .unwrap();

    let response = server.get_auth("/tasks?search=milk", &token).await.unwrap();
    let page: TaskList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 2);

    let response = server
        .get_auth("/tasks?status=DONE&search=", &token)
        .await
        .unwrap();
    let page: TaskList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].id, milk.id);

    let response = server.get_auth("/tasks?status=LATER", &token).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
