//! Client Integration Tests
//!
//! Drives `task-client` against the real router and against a scripted mock
//! to pin down the refresh-and-retry behaviour.
//!
//! Run with: cargo test -p integration-tests --test client_tests

use integration_tests::{fixtures::*, MockApi, TestServer, MOCK_FRESH_TOKEN};
use task_client::{ApiClient, ClientError, CreateTask, ListTasks, TaskUpdate, TokenHolder};
use task_core::TaskStatus;

// ============================================================================
// Against the real server
// ============================================================================

#[tokio::test]
async fn test_client_session_lifecycle() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.api_client().unwrap();
    let credentials = Credentials::unique();

    let token = client
        .register(&credentials.email, &credentials.password)
        .await
        .unwrap();
    assert_eq!(client.token_holder().get().as_deref(), Some(token.as_str()));

    let task = client
        .create_task(&CreateTask::new("Ship it").with_description("today"))
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Open);

    let toggled = client.toggle_task(task.id).await.unwrap();
    assert_eq!(toggled.status, TaskStatus::Done);

    let updated = client
        .update_task(
            task.id,
            &TaskUpdate {
                title: Some("Shipped".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Shipped");
    assert_eq!(updated.status, TaskStatus::Done);

    let page = client.list_tasks(&ListTasks::paged(1, 10)).await.unwrap();
    assert_eq!(page.total, 1);

    client.delete_task(task.id).await.unwrap();
    let err = client.get_task(task.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Task not found");

    client.logout().await.unwrap();
    assert!(!client.token_holder().is_authenticated());
}

#[tokio::test]
async fn test_client_refreshes_stale_access_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.api_client().unwrap();
    let credentials = Credentials::unique();
    client
        .register(&credentials.email, &credentials.password)
        .await
        .unwrap();

    // Simulate an expired access token; the refresh cookie is still valid
    client.token_holder().set("stale");

    let page = client.list_tasks(&ListTasks::default()).await.unwrap();
    assert_eq!(page.total, 0);

    let token = client.token_holder().get().unwrap();
    assert_ne!(token, "stale");
}

#[tokio::test]
async fn test_client_session_expires_after_logout_elsewhere() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();

    let client = server.api_client().unwrap();
    client
        .register(&credentials.email, &credentials.password)
        .await
        .unwrap();

    // A second session supersedes this client's refresh token
    let other = server.api_client().unwrap();
    other
        .login(&credentials.email, &credentials.password)
        .await
        .unwrap();

    client.token_holder().set("stale");
    let err = client.list_tasks(&ListTasks::default()).await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired));
    assert!(!client.token_holder().is_authenticated());
}

#[tokio::test]
async fn test_client_login_error_is_not_retried() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.api_client().unwrap();

    let err = client
        .login("nobody@example.com", "secret1")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!client.token_holder().is_authenticated());
}

#[tokio::test]
async fn test_clients_share_token_holder() {
    let server = TestServer::start().await.expect("Failed to start server");
    let holder = TokenHolder::new();
    let first = ApiClient::with_token_holder(server.base_url(), holder.clone()).unwrap();
    let credentials = Credentials::unique();

    first
        .register(&credentials.email, &credentials.password)
        .await
        .unwrap();

    assert!(holder.is_authenticated());
}

// ============================================================================
// Against the scripted mock
// ============================================================================

#[tokio::test]
async fn test_retry_happens_exactly_once() {
    let mock = MockApi::start(true, false).await.unwrap();
    let client = ApiClient::new(mock.base_url()).unwrap();
    client.token_holder().set("stale");

    let page = client.list_tasks(&ListTasks::default()).await.unwrap();

    assert_eq!(page.total, 0);
    assert_eq!(mock.refresh_calls(), 1);
    assert_eq!(mock.task_calls(), 2);
    assert_eq!(client.token_holder().get().as_deref(), Some(MOCK_FRESH_TOKEN));
}

#[tokio::test]
async fn test_unauthorized_retry_is_returned() {
    let mock = MockApi::start(true, true).await.unwrap();
    let client = ApiClient::new(mock.base_url()).unwrap();
    client.token_holder().set("stale");

    let err = client.list_tasks(&ListTasks::default()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.code(), Some("INVALID_TOKEN"));
    assert_eq!(mock.refresh_calls(), 1);
    assert_eq!(mock.task_calls(), 2);
}

#[tokio::test]
async fn test_failed_refresh_clears_holder() {
    let mock = MockApi::start(false, false).await.unwrap();
    let client = ApiClient::new(mock.base_url()).unwrap();
    client.token_holder().set("stale");

    let err = client.list_tasks(&ListTasks::default()).await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired));
    assert!(!client.token_holder().is_authenticated());
    assert_eq!(mock.refresh_calls(), 1);
    assert_eq!(mock.task_calls(), 1);
}

#[tokio::test]
async fn test_valid_token_skips_refresh() {
    let mock = MockApi::start(true, false).await.unwrap();
    let client = ApiClient::new(mock.base_url()).unwrap();
    client.token_holder().set(MOCK_FRESH_TOKEN);

    client.list_tasks(&ListTasks::default()).await.unwrap();

    assert_eq!(mock.refresh_calls(), 0);
    assert_eq!(mock.task_calls(), 1);
}
