//! API handlers for the inventory REST endpoints

pub mod auth;
pub mod books;
pub mod borrowers;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod projects;
pub mod reports;
pub mod settings;
pub mod stats;
pub mod transactions;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, Uri},
    routing::{delete, get, post},
    Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::IntoParams;

use crate::{error::AppError, models::session::SessionClaims, AppState};

/// Extractor for the logged-in administrator; the token's session must be open
pub struct AuthenticatedUser(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Authentication("Missing or invalid authorization header".to_string()))?;

        let claims = state.services.auth.verify(bearer.token()).await?;
        Ok(AuthenticatedUser(claims))
    }
}

/// `?force=true` on delete endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ForceParams {
    /// Delete even when the record is referenced by an open loan
    pub force: Option<bool>,
}

impl ForceParams {
    pub fn force(&self) -> bool {
        self.force.unwrap_or(false)
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/remembered", get(auth::remembered))
        // Dashboard and analytics
        .route("/dashboard", get(stats::get_dashboard))
        .route("/analytics", get(stats::get_analytics))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book).put(books::update_book).delete(books::delete_book),
        )
        // Equipment
        .route("/equipment", get(equipment::get_summary))
        .route("/equipment/ics", get(equipment::list_ics).post(equipment::create_ics))
        .route(
            "/equipment/ics/:id",
            get(equipment::get_ics).put(equipment::update_ics).delete(equipment::delete_ics),
        )
        .route("/equipment/par", get(equipment::list_par).post(equipment::create_par))
        .route(
            "/equipment/par/:id",
            get(equipment::get_par).put(equipment::update_par).delete(equipment::delete_par),
        )
        // Borrowing
        .route(
            "/borrowing",
            get(transactions::list_transactions).post(transactions::borrow_item),
        )
        .route(
            "/borrowing/:id",
            get(transactions::get_transaction).delete(transactions::delete_transaction),
        )
        .route("/borrowing/:id/return", post(transactions::return_item))
        // Borrowers
        .route("/users", get(borrowers::list_borrowers).post(borrowers::create_borrower))
        .route(
            "/users/:id",
            get(borrowers::get_borrower)
                .put(borrowers::update_borrower)
                .delete(borrowers::delete_borrower),
        )
        .route("/users/:id/loans", get(borrowers::get_borrower_loans))
        // Projects
        .route("/projects/dashboard", get(projects::get_dashboard))
        .route(
            "/projects/:project_type",
            get(projects::list_years).post(projects::create_year),
        )
        .route(
            "/projects/:project_type/:year",
            get(projects::get_year).delete(projects::delete_year),
        )
        .route(
            "/projects/:project_type/:year/documents",
            post(projects::upload_document),
        )
        .route(
            "/projects/:project_type/:year/documents/:document_id",
            delete(projects::delete_document),
        )
        // Reports
        .route("/reports", get(reports::list_reports))
        .route("/reports/:kind", get(reports::get_report))
        // Settings
        .route("/settings", get(settings::get_settings).put(settings::update_settings))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
