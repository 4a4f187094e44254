//! Settings endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{enums::Theme, session::Preferences},
    AppState,
};

use super::AuthenticatedUser;

/// Settings response
#[derive(Serialize, ToSchema)]
pub struct SettingsResponse {
    pub preferences: Preferences,
    /// Default loan period applied when a borrow has no due date
    pub loan_duration_days: i64,
    /// Number of transactions shown on the dashboard
    pub recent_transactions: usize,
}

/// Update settings request
#[derive(Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    pub theme: Option<Theme>,
    /// Clear the username remembered by the login form
    #[serde(default)]
    pub forget_user: bool,
}

fn response(state: &AppState, preferences: Preferences) -> SettingsResponse {
    SettingsResponse {
        preferences,
        loan_duration_days: state.config.inventory.loan_duration_days,
        recent_transactions: state.config.inventory.recent_transactions,
    }
}

/// Get current settings
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current settings", body = SettingsResponse)
    )
)]
pub async fn get_settings(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Json<SettingsResponse> {
    let preferences = state.services.settings.get_settings().await;
    Json(response(&state, preferences))
}

/// Update settings
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings updated", body = SettingsResponse)
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<UpdateSettingsRequest>,
) -> Json<SettingsResponse> {
    let settings = &state.services.settings;
    if let Some(theme) = request.theme {
        settings.update_theme(theme).await;
    }
    if request.forget_user {
        settings.forget_user().await;
    }
    let preferences = settings.get_settings().await;
    Json(response(&state, preferences))
}
