//! Equipment API endpoints (ICS and PAR)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::equipment::{
        CreateIcsEquipment, CreateParEquipment, EquipmentQuery, EquipmentSummary, IcsEquipment,
        ParEquipment, UpdateIcsEquipment, UpdateParEquipment,
    },
    AppState,
};

use super::{AuthenticatedUser, ForceParams};

/// Totals for both equipment classes
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipment summary", body = EquipmentSummary)
    )
)]
pub async fn get_summary(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Json<EquipmentSummary> {
    Json(state.services.equipment.summary().await)
}

/// List ICS equipment
#[utoipa::path(
    get,
    path = "/equipment/ics",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(EquipmentQuery),
    responses(
        (status = 200, description = "ICS equipment list", body = Vec<IcsEquipment>)
    )
)]
pub async fn list_ics(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<EquipmentQuery>,
) -> Json<Vec<IcsEquipment>> {
    Json(state.services.equipment.list_ics(&query).await)
}

/// Get ICS equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/ics/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = IcsEquipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_ics(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<IcsEquipment>> {
    let equipment = state.services.equipment.get_ics(id).await?;
    Ok(Json(equipment))
}

/// Create ICS equipment
#[utoipa::path(
    post,
    path = "/equipment/ics",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateIcsEquipment,
    responses(
        (status = 201, description = "Equipment created", body = IcsEquipment),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Equipment number already used by ICS or PAR equipment")
    )
)]
pub async fn create_ics(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateIcsEquipment>,
) -> AppResult<(StatusCode, Json<IcsEquipment>)> {
    let equipment = state.services.equipment.create_ics(data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update ICS equipment
#[utoipa::path(
    put,
    path = "/equipment/ics/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateIcsEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = IcsEquipment),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Equipment number already used by ICS or PAR equipment"),
        (status = 422, description = "Equipment is borrowed and cannot be renumbered")
    )
)]
pub async fn update_ics(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateIcsEquipment>,
) -> AppResult<Json<IcsEquipment>> {
    let equipment = state.services.equipment.update_ics(id, data).await?;
    Ok(Json(equipment))
}

/// Delete ICS equipment
#[utoipa::path(
    delete,
    path = "/equipment/ics/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID"), ForceParams),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 422, description = "Equipment is borrowed")
    )
)]
pub async fn delete_ics(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(params): Query<ForceParams>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete_ics(id, params.force()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List PAR equipment
#[utoipa::path(
    get,
    path = "/equipment/par",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(EquipmentQuery),
    responses(
        (status = 200, description = "PAR equipment list", body = Vec<ParEquipment>)
    )
)]
pub async fn list_par(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<EquipmentQuery>,
) -> Json<Vec<ParEquipment>> {
    Json(state.services.equipment.list_par(&query).await)
}

/// Get PAR equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/par/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = ParEquipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_par(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ParEquipment>> {
    let equipment = state.services.equipment.get_par(id).await?;
    Ok(Json(equipment))
}

/// Create PAR equipment
#[utoipa::path(
    post,
    path = "/equipment/par",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateParEquipment,
    responses(
        (status = 201, description = "Equipment created", body = ParEquipment),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Equipment number already used by ICS or PAR equipment")
    )
)]
pub async fn create_par(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateParEquipment>,
) -> AppResult<(StatusCode, Json<ParEquipment>)> {
    let equipment = state.services.equipment.create_par(data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update PAR equipment
#[utoipa::path(
    put,
    path = "/equipment/par/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateParEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = ParEquipment),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Equipment number already used by ICS or PAR equipment"),
        (status = 422, description = "Equipment is borrowed and cannot be renumbered")
    )
)]
pub async fn update_par(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateParEquipment>,
) -> AppResult<Json<ParEquipment>> {
    let equipment = state.services.equipment.update_par(id, data).await?;
    Ok(Json(equipment))
}

/// Delete PAR equipment
#[utoipa::path(
    delete,
    path = "/equipment/par/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID"), ForceParams),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 422, description = "Equipment is borrowed")
    )
)]
pub async fn delete_par(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(params): Query<ForceParams>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete_par(id, params.force()).await?;
    Ok(StatusCode::NO_CONTENT)
}
