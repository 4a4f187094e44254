//! Borrower (users page) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        borrower::{BorrowerDetails, BorrowerQuery, CreateBorrower, UpdateBorrower},
        transaction::TransactionDetails,
    },
    AppState,
};

use super::{AuthenticatedUser, ForceParams};

/// List borrowers with their loan counts
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(BorrowerQuery),
    responses(
        (status = 200, description = "Borrowers", body = Vec<BorrowerDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_borrowers(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<BorrowerQuery>,
) -> Json<Vec<BorrowerDetails>> {
    Json(state.services.borrowers.list(&query).await)
}

/// Get borrower details by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Borrower details", body = BorrowerDetails),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn get_borrower(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowerDetails>> {
    let borrower = state.services.borrowers.get_by_id(id).await?;
    Ok(Json(borrower))
}

/// Items currently on loan to a borrower
#[utoipa::path(
    get,
    path = "/users/{id}/loans",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Active loans", body = Vec<TransactionDetails>),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn get_borrower_loans(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<TransactionDetails>>> {
    let loans = state.services.borrowers.loans(id).await?;
    Ok(Json(loans))
}

/// Register a borrower
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateBorrower,
    responses(
        (status = 201, description = "Borrower created", body = BorrowerDetails),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Name already registered")
    )
)]
pub async fn create_borrower(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateBorrower>,
) -> AppResult<(StatusCode, Json<BorrowerDetails>)> {
    let created = state.services.borrowers.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a borrower
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Borrower ID")),
    request_body = UpdateBorrower,
    responses(
        (status = 200, description = "Borrower updated", body = BorrowerDetails),
        (status = 404, description = "Borrower not found"),
        (status = 422, description = "Borrower has open loans and cannot be renamed")
    )
)]
pub async fn update_borrower(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateBorrower>,
) -> AppResult<Json<BorrowerDetails>> {
    let updated = state.services.borrowers.update(id, data).await?;
    Ok(Json(updated))
}

/// Delete a borrower
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Borrower ID"), ForceParams),
    responses(
        (status = 204, description = "Borrower deleted"),
        (status = 404, description = "Borrower not found"),
        (status = 422, description = "Borrower has open loans and force is not set")
    )
)]
pub async fn delete_borrower(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(params): Query<ForceParams>,
) -> AppResult<StatusCode> {
    state.services.borrowers.delete(id, params.force()).await?;
    Ok(StatusCode::NO_CONTENT)
}
