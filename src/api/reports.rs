//! Report endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::report::{ReportEntry, ReportKind, ReportTable},
    AppState,
};

use super::AuthenticatedUser;

/// Index of the report pages
#[utoipa::path(
    get,
    path = "/reports",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Available reports", body = Vec<ReportEntry>)
    )
)]
pub async fn list_reports(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Json<Vec<ReportEntry>> {
    Json(state.services.reports.index().await)
}

/// One report as a titled table
#[utoipa::path(
    get,
    path = "/reports/{kind}",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(("kind" = ReportKind, Path, description = "Report slug, e.g. books-borrowed")),
    responses(
        (status = 200, description = "Report table", body = ReportTable),
        (status = 404, description = "Unknown report")
    )
)]
pub async fn get_report(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(kind): Path<String>,
) -> AppResult<Json<ReportTable>> {
    let kind: ReportKind = kind.parse().map_err(AppError::NotFound)?;
    Ok(Json(state.services.reports.build(kind).await))
}
