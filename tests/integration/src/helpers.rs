//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers on ephemeral ports and
//! making HTTP requests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode as AxumStatus},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use task_api::{create_app, create_app_state};
use task_client::{AccessToken, ApiClient};
use task_common::{AppConfig, RateLimitConfig};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::Credentials;

/// Test server instance that manages lifecycle
///
/// The HTTP client keeps cookies, like a browser would.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on the in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            client: cookie_client()?,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Fresh HTTP client with its own cookie jar
    pub fn new_client(&self) -> Result<Client> {
        cookie_client()
    }

    /// Typed client pointed at this server
    pub fn api_client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(self.base_url())?)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request without a body (cookies only)
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Register a unique user through this server's client
    pub async fn register(&self) -> Result<(Credentials, String)> {
        let credentials = Credentials::unique();
        let response = self.post("/auth/register", &credentials).await?;
        let AccessToken { access_token } = assert_json(response, StatusCode::CREATED).await?;
        Ok((credentials, access_token))
    }
}

/// Create a test configuration
///
/// Always the in-memory store, with a rate limit generous enough for a test
/// hammering the server.
pub fn test_config() -> AppConfig {
    AppConfig {
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 10_000,
        },
        ..AppConfig::default()
    }
}

fn cookie_client() -> Result<Client> {
    Ok(Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(10))
        .build()?)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its `(error, code)` pair
pub async fn assert_error(
    response: Response,
    expected_status: StatusCode,
) -> Result<(String, String)> {
    let body: Value = assert_json(response, expected_status).await?;
    let field = |name: &str| body[name].as_str().unwrap_or_default().to_string();
    Ok((field("error"), field("code")))
}

// ============================================================================
// Mock upstream for client retry tests
// ============================================================================

/// Access token the mock accepts
pub const MOCK_FRESH_TOKEN: &str = "fresh";

/// Call counters of a [`MockApi`]
#[derive(Debug, Default)]
pub struct MockCounters {
    pub refresh_calls: AtomicUsize,
    pub task_calls: AtomicUsize,
}

#[derive(Clone)]
struct MockState {
    counters: Arc<MockCounters>,
    refresh_succeeds: bool,
    tasks_always_unauthorized: bool,
}

/// Minimal stand-in for the API with scripted auth behaviour
pub struct MockApi {
    pub addr: SocketAddr,
    pub counters: Arc<MockCounters>,
    _handle: JoinHandle<()>,
}

impl MockApi {
    /// `/auth/refresh` answers `refresh_succeeds`; `/tasks` accepts only
    /// [`MOCK_FRESH_TOKEN`] unless `tasks_always_unauthorized`
    pub async fn start(refresh_succeeds: bool, tasks_always_unauthorized: bool) -> Result<Self> {
        let counters = Arc::new(MockCounters::default());
        let state = MockState {
            counters: Arc::clone(&counters),
            refresh_succeeds,
            tasks_always_unauthorized,
        };

        let app = Router::new()
            .route("/auth/refresh", post(mock_refresh))
            .route("/tasks", get(mock_list_tasks))
            .with_state(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            counters,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn refresh_calls(&self) -> usize {
        self.counters.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn task_calls(&self) -> usize {
        self.counters.task_calls.load(Ordering::SeqCst)
    }
}

fn unauthorized() -> axum::response::Response {
    (
        AxumStatus::UNAUTHORIZED,
        Json(json!({ "error": "Invalid or expired token", "code": "INVALID_TOKEN" })),
    )
        .into_response()
}

async fn mock_refresh(State(state): State<MockState>) -> axum::response::Response {
    state.counters.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if state.refresh_succeeds {
        Json(json!({ "accessToken": MOCK_FRESH_TOKEN })).into_response()
    } else {
        unauthorized()
    }
}

async fn mock_list_tasks(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> axum::response::Response {
    state.counters.task_calls.fetch_add(1, Ordering::SeqCst);

    let expected = format!("Bearer {MOCK_FRESH_TOKEN}");
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);

    if authorized && !state.tasks_always_unauthorized {
        Json(json!({ "data": [], "total": 0, "page": 1, "limit": 10, "totalPages": 0 }))
            .into_response()
    } else {
        unauthorized()
    }
}
