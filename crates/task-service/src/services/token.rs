//! Token issuance and rotation
//!
//! Access tokens are stateless. The refresh token is persisted verbatim on the
//! user record, so a user has at most one usable refresh token at a time:
//! persisting a new one supersedes the previous one, and revoking clears it.
//! A refresh token is accepted only when it verifies cryptographically AND
//! equals the stored value.

use tracing::{debug, instrument};

use task_common::{AppError, TokenPair};
use task_core::UserId;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Refresh-token lifecycle service
pub struct TokenService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TokenService<'a> {
    /// Create a new TokenService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mint a fresh access token and refresh token for a user
    ///
    /// Pure; the caller decides whether to persist the refresh token.
    pub fn issue(&self, user_id: UserId) -> ServiceResult<TokenPair> {
        Ok(self.ctx.jwt_service().issue(user_id)?)
    }

    /// Overwrite the stored refresh token for a user
    #[instrument(skip(self, refresh_token))]
    pub async fn persist_refresh_token(
        &self,
        user_id: UserId,
        refresh_token: &str,
    ) -> ServiceResult<()> {
        self.ctx
            .user_repo()
            .update_refresh_token(user_id, Some(refresh_token))
            .await?;
        Ok(())
    }

    /// Issue a token pair and make its refresh token the only valid one
    pub async fn issue_and_persist(&self, user_id: UserId) -> ServiceResult<TokenPair> {
        let pair = self.issue(user_id)?;
        self.persist_refresh_token(user_id, &pair.refresh_token)
            .await?;
        Ok(pair)
    }

    /// Exchange a refresh token for a new access token
    ///
    /// The refresh token itself is not rotated and stays valid.
    ///
    /// # Errors
    /// Returns `AppError::InvalidToken` if the token fails verification, its
    /// user cannot be loaded, or it is not the currently stored token
    #[instrument(skip_all)]
    pub async fn rotate(&self, presented: &str) -> ServiceResult<String> {
        let claims = self.ctx.jwt_service().verify_refresh_token(presented)?;

        let user = match self.ctx.user_repo().find_by_id(claims.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(user_id = claims.user_id, "Refresh rejected: unknown user");
                return Err(AppError::InvalidToken.into());
            }
            Err(e) => {
                debug!(user_id = claims.user_id, error = %e, "Refresh rejected: user lookup failed");
                return Err(AppError::InvalidToken.into());
            }
        };

        if !user.holds_refresh_token(presented) {
            debug!(user_id = user.id, "Refresh rejected: token is not the stored one");
            return Err(AppError::InvalidToken.into());
        }

        Ok(self.ctx.jwt_service().issue_access_token(user.id)?)
    }

    /// Invalidate the stored refresh token of the token's owner
    ///
    /// Never fails: an unverifiable token or a missing user is a no-op.
    #[instrument(skip_all)]
    pub async fn revoke(&self, presented: &str) {
        let Ok(claims) = self.ctx.jwt_service().verify_refresh_token(presented) else {
            debug!("Revocation skipped: token did not verify");
            return;
        };

        if let Err(e) = self
            .ctx
            .user_repo()
            .update_refresh_token(claims.user_id, None)
            .await
        {
            debug!(user_id = claims.user_id, error = %e, "Revocation skipped");
        }
    }
}
