//! Authentication handlers
//!
//! Endpoints for user registration, login, token refresh and logout. The
//! access token travels in the JSON body; the refresh token only ever travels
//! in the `refreshToken` HTTP-only cookie.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use task_common::AppError;
use task_service::{AccessTokenResponse, AuthService, LoginRequest, OkResponse, RegisterRequest};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Name of the refresh token cookie
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Build the refresh cookie: HttpOnly, SameSite=Lax, Path=/, lives as long as
/// the token itself
fn refresh_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(
            state.jwt_service().refresh_token_expiry(),
        ))
        .secure(state.secure_cookies())
        .build()
}

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<(CookieJar, Json<AccessTokenResponse>)>> {
    let service = AuthService::new(state.service_context());
    let tokens = service.register(request).await?;

    let jar = jar.add(refresh_cookie(&state, tokens.refresh_token));
    Ok(Created((
        jar,
        Json(AccessTokenResponse::new(tokens.access_token)),
    )))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AccessTokenResponse>)> {
    let service = AuthService::new(state.service_context());
    let tokens = service.login(request).await?;

    let jar = jar.add(refresh_cookie(&state, tokens.refresh_token));
    Ok((jar, Json(AccessTokenResponse::new(tokens.access_token))))
}

/// Exchange the refresh cookie for a new access token
///
/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<AccessTokenResponse>> {
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(Cookie::value)
        .ok_or(AppError::MissingRefreshToken)?;

    let service = AuthService::new(state.service_context());
    let access_token = service.refresh(refresh_token).await?;
    Ok(Json(AccessTokenResponse::new(access_token)))
}

/// Revoke the refresh token (if any) and clear the cookie
///
/// POST /auth/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<OkResponse>) {
    let service = AuthService::new(state.service_context());
    service
        .logout(jar.get(REFRESH_COOKIE).map(Cookie::value))
        .await;

    let jar = jar.remove(Cookie::build(REFRESH_COOKIE).path("/"));
    (jar, Json(OkResponse::ok()))
}
