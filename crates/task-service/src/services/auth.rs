//! Authentication service
//!
//! Handles user registration, login, token refresh, logout and bearer
//! authentication. Password hashing runs on the blocking thread pool.

use task_common::{AppError, TokenPair};
use task_core::{DomainError, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::token::TokenService;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and sign them in
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<TokenPair> {
        // Check if email already exists
        if self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.hash_password(request.password).await?;

        // The store re-checks uniqueness atomically
        let user = self
            .ctx
            .user_repo()
            .create(&request.email, &password_hash)
            .await?;

        let tokens = TokenService::new(self.ctx).issue_and_persist(user.id).await?;

        info!(user_id = user.id, "User registered successfully");
        Ok(tokens)
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenPair> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !self.verify_password(request.password, password_hash).await? {
            warn!(user_id = user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let tokens = TokenService::new(self.ctx).issue_and_persist(user.id).await?;

        info!(user_id = user.id, "User logged in successfully");
        Ok(tokens)
    }

    /// Mint a new access token from the refresh token cookie
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<String> {
        TokenService::new(self.ctx).rotate(refresh_token).await
    }

    /// Log out; revokes the refresh token if one was presented
    pub async fn logout(&self, refresh_token: Option<&str>) {
        if let Some(token) = refresh_token {
            TokenService::new(self.ctx).revoke(token).await;
        }
    }

    /// Resolve a bearer access token to its user id
    ///
    /// # Errors
    /// Returns `AppError::InvalidToken` for invalid or expired tokens
    pub fn authenticate(&self, access_token: &str) -> ServiceResult<UserId> {
        let claims = self.ctx.jwt_service().verify_access_token(access_token)?;
        Ok(claims.user_id)
    }

    async fn hash_password(&self, password: String) -> ServiceResult<String> {
        let hasher = self.ctx.password_hasher();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ServiceError::internal(format!("Password hashing task failed: {e}")))??;
        Ok(hash)
    }

    async fn verify_password(&self, password: String, hash: String) -> ServiceResult<bool> {
        let hasher = self.ctx.password_hasher();
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| ServiceError::internal(format!("Password verification task failed: {e}")))??;
        Ok(valid)
    }
}
