//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppResult, AppState};

use super::AuthenticatedUser;

/// Login request
#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Pre-fill the username on the next visit
    #[serde(default)]
    pub remember_me: bool,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Lifetime of the token in seconds
    pub expires_in: u64,
}

/// Current session
#[derive(Serialize, ToSchema)]
pub struct SessionInfo {
    pub username: String,
    pub session_id: String,
    pub expires_at: i64,
}

#[skip_serializing_none]
#[derive(Serialize, ToSchema)]
pub struct RememberedUser {
    pub username: Option<String>,
}

/// Log in with the administrator credentials
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing username or password", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    request.validate()?;

    let auth = &state.services.auth;
    let token = auth
        .login(&request.username, &request.password, request.remember_me)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: auth.expiration_hours() * 3600,
    }))
}

/// Close the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> StatusCode {
    state.services.auth.logout(&claims).await;
    StatusCode::NO_CONTENT
}

/// Get the current session
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current session", body = SessionInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedUser(claims): AuthenticatedUser) -> Json<SessionInfo> {
    Json(SessionInfo {
        username: claims.sub,
        session_id: claims.sid.to_string(),
        expires_at: claims.exp,
    })
}

/// Username stored by "remember me", for the login form
#[utoipa::path(
    get,
    path = "/auth/remembered",
    tag = "auth",
    responses(
        (status = 200, description = "Remembered username, if any", body = RememberedUser)
    )
)]
pub async fn remembered(State(state): State<AppState>) -> Json<RememberedUser> {
    Json(RememberedUser {
        username: state.services.auth.remembered().await,
    })
}
