//! Dashboard and analytics endpoints

use axum::{extract::Query, extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{models::transaction::TransactionDetails, AppState};

use super::AuthenticatedUser;

/// Dashboard response
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub books: CountCard,
    /// ICS and PAR combined
    pub equipment: CountCard,
    pub transactions: TransactionStats,
    /// Registered borrowers
    pub borrowers: i64,
    /// Latest transactions, newest first
    pub recent_transactions: Vec<TransactionDetails>,
}

#[derive(Serialize, ToSchema)]
pub struct CountCard {
    pub total: i64,
    pub available: i64,
    pub borrowed: i64,
}

#[derive(Serialize, ToSchema)]
pub struct TransactionStats {
    pub total: i64,
    pub active: i64,
    pub overdue: i64,
    pub returned: i64,
}

#[derive(Serialize, ToSchema)]
pub struct StatEntry {
    pub label: String,
    pub value: i64,
}

/// One month of the analytics series
#[derive(Default, Serialize, ToSchema)]
pub struct MonthlyEntry {
    /// Short month name ("Jan")
    pub month: String,
    pub borrowed: i64,
    pub returned: i64,
    /// Borrowed books
    pub books: i64,
    /// Borrowed equipment
    pub equipment: i64,
}

/// Query parameters for GET /analytics
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    /// Calendar year (default: current year)
    pub year: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct AnalyticsResponse {
    pub year: i32,
    pub total_borrowed: i64,
    pub total_returned: i64,
    /// Twelve entries, January first
    pub monthly: Vec<MonthlyEntry>,
    pub by_type: Vec<StatEntry>,
    pub by_role: Vec<StatEntry>,
    pub top_borrowers: Vec<StatEntry>,
}

/// Dashboard summary cards
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Json<DashboardResponse> {
    Json(state.services.stats.dashboard().await)
}

/// Borrowing analytics for a year
#[utoipa::path(
    get,
    path = "/analytics",
    tag = "stats",
    security(("bearer_auth" = [])),
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Analytics series", body = AnalyticsResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> Json<AnalyticsResponse> {
    Json(state.services.stats.analytics(query.year).await)
}
