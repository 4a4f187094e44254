//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, books, borrowers, equipment, health, projects, reports, settings, stats, transactions,
};
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RIC-XI Inventory API",
        version = "1.0.0",
        description = "Books, equipment, borrowing and project attachments REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::logout,
        auth::me,
        auth::remembered,
        // Dashboard and analytics
        stats::get_dashboard,
        stats::get_analytics,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Equipment
        equipment::get_summary,
        equipment::list_ics,
        equipment::get_ics,
        equipment::create_ics,
        equipment::update_ics,
        equipment::delete_ics,
        equipment::list_par,
        equipment::get_par,
        equipment::create_par,
        equipment::update_par,
        equipment::delete_par,
        // Borrowing
        transactions::list_transactions,
        transactions::get_transaction,
        transactions::borrow_item,
        transactions::return_item,
        transactions::delete_transaction,
        // Borrowers
        borrowers::list_borrowers,
        borrowers::get_borrower,
        borrowers::get_borrower_loans,
        borrowers::create_borrower,
        borrowers::update_borrower,
        borrowers::delete_borrower,
        // Projects
        projects::get_dashboard,
        projects::list_years,
        projects::create_year,
        projects::get_year,
        projects::delete_year,
        projects::upload_document,
        projects::delete_document,
        // Reports
        reports::list_reports,
        reports::get_report,
        // Settings
        settings::get_settings,
        settings::update_settings,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::SessionInfo,
            auth::RememberedUser,
            // Enums
            models::enums::ItemStatus,
            models::enums::TransactionType,
            models::enums::TransactionStatus,
            models::enums::BorrowerRole,
            models::enums::Theme,
            models::enums::ProjectType,
            models::enums::DocumentCategory,
            // Books
            models::book::Book,
            models::book::CreateBook,
            models::book::UpdateBook,
            // Equipment
            models::equipment::IcsEquipment,
            models::equipment::CreateIcsEquipment,
            models::equipment::UpdateIcsEquipment,
            models::equipment::ParEquipment,
            models::equipment::CreateParEquipment,
            models::equipment::UpdateParEquipment,
            models::equipment::EquipmentClassSummary,
            models::equipment::EquipmentSummary,
            // Borrowing
            models::transaction::Transaction,
            models::transaction::TransactionDetails,
            models::transaction::CreateTransaction,
            // Borrowers
            models::borrower::Borrower,
            models::borrower::BorrowerDetails,
            models::borrower::CreateBorrower,
            models::borrower::UpdateBorrower,
            // Projects
            models::project::Document,
            models::project::ProjectYear,
            models::project::ProjectYearSummary,
            models::project::ProjectTypeSummary,
            models::project::CreateProjectYear,
            projects::UploadForm,
            // Reports
            models::report::ReportKind,
            models::report::ReportEntry,
            models::report::ReportTable,
            // Stats
            stats::DashboardResponse,
            stats::CountCard,
            stats::TransactionStats,
            stats::StatEntry,
            stats::MonthlyEntry,
            stats::AnalyticsResponse,
            // Settings
            models::session::Preferences,
            settings::SettingsResponse,
            settings::UpdateSettingsRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Login and session endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "equipment", description = "ICS and PAR equipment"),
        (name = "borrowing", description = "Borrowing transactions"),
        (name = "users", description = "Borrowers"),
        (name = "projects", description = "Research and extension project files"),
        (name = "reports", description = "Printable reports"),
        (name = "stats", description = "Dashboard and analytics"),
        (name = "settings", description = "Client preferences")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
