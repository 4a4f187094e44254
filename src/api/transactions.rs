//! Borrowing endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::transaction::{CreateTransaction, TransactionDetails, TransactionQuery},
    AppState,
};

use super::AuthenticatedUser;

/// List transactions with overdue information
#[utoipa::path(
    get,
    path = "/borrowing",
    tag = "borrowing",
    security(("bearer_auth" = [])),
    params(TransactionQuery),
    responses(
        (status = 200, description = "Transactions in insertion order", body = Vec<TransactionDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<TransactionQuery>,
) -> Json<Vec<TransactionDetails>> {
    Json(state.services.transactions.list(&query).await)
}

/// Get transaction by ID
#[utoipa::path(
    get,
    path = "/borrowing/{id}",
    tag = "borrowing",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction details", body = TransactionDetails),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<TransactionDetails>> {
    let transaction = state.services.transactions.get_by_id(id).await?;
    Ok(Json(transaction))
}

/// Lend a book or a piece of equipment
#[utoipa::path(
    post,
    path = "/borrowing",
    tag = "borrowing",
    security(("bearer_auth" = [])),
    request_body = CreateTransaction,
    responses(
        (status = 201, description = "Item lent", body = TransactionDetails),
        (status = 400, description = "Invalid dates or missing fields"),
        (status = 404, description = "Item or borrower not found"),
        (status = 422, description = "Item is already borrowed")
    )
)]
pub async fn borrow_item(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateTransaction>,
) -> AppResult<(StatusCode, Json<TransactionDetails>)> {
    let transaction = state.services.transactions.borrow(data).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Mark a transaction as returned
#[utoipa::path(
    post,
    path = "/borrowing/{id}/return",
    tag = "borrowing",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Item returned", body = TransactionDetails),
        (status = 404, description = "Transaction not found"),
        (status = 422, description = "Already returned")
    )
)]
pub async fn return_item(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<TransactionDetails>> {
    let transaction = state.services.transactions.return_item(id).await?;
    Ok(Json(transaction))
}

/// Delete a transaction; an open one releases its item
#[utoipa::path(
    delete,
    path = "/borrowing/{id}",
    tag = "borrowing",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn delete_transaction(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.transactions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
