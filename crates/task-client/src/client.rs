//! HTTP client for the task API

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Serialize,
};
use task_core::TaskId;
use tracing::{debug, instrument};

use crate::error::{ClientError, ClientResult};
use crate::models::{AccessToken, CreateTask, ListTasks, Task, TaskList, TaskUpdate};
use crate::token_holder::TokenHolder;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Task API client
///
/// Keeps a cookie store so the HTTP-only refresh cookie set by login and
/// register is sent back on `/auth/refresh` and `/auth/logout`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: TokenHolder,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Client with its own, initially empty, token holder
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_token_holder(base_url, TokenHolder::new())
    }

    /// Client sharing an existing token holder
    pub fn with_token_holder(
        base_url: impl Into<String>,
        tokens: TokenHolder,
    ) -> ClientResult<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn token_holder(&self) -> &TokenHolder {
        &self.tokens
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Create an account; stores the returned access token
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> ClientResult<String> {
        let request = self
            .http
            .post(self.url("/auth/register"))
            .json(&Credentials { email, password });
        self.store_token(request).await
    }

    /// Sign in; stores the returned access token
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<String> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&Credentials { email, password });
        self.store_token(request).await
    }

    /// Exchange the refresh cookie for a new access token and store it
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> ClientResult<String> {
        self.store_token(self.http.post(self.url("/auth/refresh")))
            .await
    }

    /// Sign out; the local token is cleared even if the request fails
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ClientResult<()> {
        let result = self.http.post(self.url("/auth/logout")).send().await;
        self.tokens.clear();

        decode::<IgnoredAny>(result?).await?;
        Ok(())
    }

    async fn store_token(&self, request: RequestBuilder) -> ClientResult<String> {
        let AccessToken { access_token } = decode(request.send().await?).await?;
        self.tokens.set(access_token.clone());
        Ok(access_token)
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    pub async fn list_tasks(&self, query: &ListTasks) -> ClientResult<TaskList> {
        self.send_authorized(|http| http.get(self.url("/tasks")).query(query))
            .await
    }

    pub async fn create_task(&self, task: &CreateTask) -> ClientResult<Task> {
        self.send_authorized(|http| http.post(self.url("/tasks")).json(task))
            .await
    }

    pub async fn get_task(&self, id: TaskId) -> ClientResult<Task> {
        self.send_authorized(|http| http.get(self.url(&format!("/tasks/{id}"))))
            .await
    }

    pub async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> ClientResult<Task> {
        self.send_authorized(|http| http.patch(self.url(&format!("/tasks/{id}"))).json(update))
            .await
    }

    pub async fn delete_task(&self, id: TaskId) -> ClientResult<()> {
        self.send_authorized::<IgnoredAny, _>(|http| {
            http.delete(self.url(&format!("/tasks/{id}")))
        })
        .await?;
        Ok(())
    }

    pub async fn toggle_task(&self, id: TaskId) -> ClientResult<Task> {
        self.send_authorized(|http| http.post(self.url(&format!("/tasks/{id}/toggle"))))
            .await
    }

    /// Send with the bearer token; on a 401 refresh once and retry once
    ///
    /// If the refresh fails the token holder is cleared and
    /// `ClientError::SessionExpired` is returned. A 401 on the retry is
    /// returned as is.
    async fn send_authorized<T, F>(&self, build: F) -> ClientResult<T>
    where
        T: DeserializeOwned,
        F: Fn(&Client) -> RequestBuilder,
    {
        let response = self.with_bearer(build(&self.http)).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return decode(response).await;
        }

        debug!("Access token rejected, refreshing");
        if let Err(e) = self.refresh().await {
            debug!(error = %e, "Refresh failed, clearing session");
            self.tokens.clear();
            return Err(ClientError::SessionExpired);
        }

        let retried = self.with_bearer(build(&self.http)).send().await?;
        decode(retried).await
    }

    fn with_bearer(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::from_body(status.as_u16(), &body))
}
