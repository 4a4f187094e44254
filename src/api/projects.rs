//! Research and extension project endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{DocumentCategory, ProjectType},
        project::{CreateProjectYear, Document, ProjectTypeSummary, ProjectYear, ProjectYearSummary},
    },
    AppState,
};

use super::AuthenticatedUser;

/// Multipart upload form
#[derive(ToSchema)]
pub struct UploadForm {
    /// File contents; only the name is kept
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Target tab; inferred from the extension when missing
    pub category: Option<DocumentCategory>,
}

fn project_type(slug: &str) -> AppResult<ProjectType> {
    ProjectType::ALL
        .into_iter()
        .find(|t| t.as_str() == slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown project type: {}", slug)))
}

/// Projects dashboard: one card per project type
#[utoipa::path(
    get,
    path = "/projects/dashboard",
    tag = "projects",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Project type cards", body = Vec<ProjectTypeSummary>)
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Json<Vec<ProjectTypeSummary>> {
    Json(state.services.projects.dashboard().await)
}

/// List the years of a project type
#[utoipa::path(
    get,
    path = "/projects/{project_type}",
    tag = "projects",
    security(("bearer_auth" = [])),
    params(("project_type" = ProjectType, Path, description = "Project type")),
    responses(
        (status = 200, description = "Years in creation order", body = Vec<ProjectYearSummary>),
        (status = 404, description = "Unknown project type")
    )
)]
pub async fn list_years(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<ProjectYearSummary>>> {
    let project_type = project_type(&slug)?;
    Ok(Json(state.services.projects.list_years(project_type).await))
}

/// Add a year to a project type
#[utoipa::path(
    post,
    path = "/projects/{project_type}",
    tag = "projects",
    security(("bearer_auth" = [])),
    params(("project_type" = ProjectType, Path, description = "Project type")),
    request_body = CreateProjectYear,
    responses(
        (status = 201, description = "Year created", body = ProjectYear),
        (status = 409, description = "Year already exists")
    )
)]
pub async fn create_year(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(slug): Path<String>,
    Json(data): Json<CreateProjectYear>,
) -> AppResult<(StatusCode, Json<ProjectYear>)> {
    let project_type = project_type(&slug)?;
    let bucket = state.services.projects.create_year(project_type, data).await?;
    Ok((StatusCode::CREATED, Json(bucket)))
}

/// View a year with its attachments
#[utoipa::path(
    get,
    path = "/projects/{project_type}/{year}",
    tag = "projects",
    security(("bearer_auth" = [])),
    params(
        ("project_type" = ProjectType, Path, description = "Project type"),
        ("year" = i32, Path, description = "Year")
    ),
    responses(
        (status = 200, description = "Year attachments", body = ProjectYear),
        (status = 404, description = "Year not found")
    )
)]
pub async fn get_year(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path((slug, year)): Path<(String, i32)>,
) -> AppResult<Json<ProjectYear>> {
    let project_type = project_type(&slug)?;
    let bucket = state.services.projects.get_year(project_type, year).await?;
    Ok(Json(bucket))
}

/// Delete a year and all its attachments
#[utoipa::path(
    delete,
    path = "/projects/{project_type}/{year}",
    tag = "projects",
    security(("bearer_auth" = [])),
    params(
        ("project_type" = ProjectType, Path, description = "Project type"),
        ("year" = i32, Path, description = "Year")
    ),
    responses(
        (status = 204, description = "Year deleted"),
        (status = 404, description = "Year not found")
    )
)]
pub async fn delete_year(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path((slug, year)): Path<(String, i32)>,
) -> AppResult<StatusCode> {
    let project_type = project_type(&slug)?;
    state.services.projects.delete_year(project_type, year).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload a file to a year
#[utoipa::path(
    post,
    path = "/projects/{project_type}/{year}/documents",
    tag = "projects",
    security(("bearer_auth" = [])),
    params(
        ("project_type" = ProjectType, Path, description = "Project type"),
        ("year" = i32, Path, description = "Year")
    ),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Document recorded", body = Document),
        (status = 400, description = "No file in the form"),
        (status = 404, description = "Year not found")
    )
)]
pub async fn upload_document(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path((slug, year)): Path<(String, i32)>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Document>)> {
    let project_type = project_type(&slug)?;

    let mut file_name = None;
    let mut category = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().map(str::to_string);
                // Drain the body; contents are not stored
                let size = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
                    .len();
                tracing::debug!("Received {:?} ({} bytes)", name, size);
                file_name = name;
            }
            Some("category") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !value.trim().is_empty() {
                    category = Some(
                        value
                            .trim()
                            .parse::<DocumentCategory>()
                            .map_err(AppError::Validation)?,
                    );
                }
            }
            _ => {}
        }
    }

    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Missing file field".to_string()))?;

    let document = state
        .services
        .projects
        .upload(project_type, year, &file_name, category)
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// Delete an attachment
#[utoipa::path(
    delete,
    path = "/projects/{project_type}/{year}/documents/{document_id}",
    tag = "projects",
    security(("bearer_auth" = [])),
    params(
        ("project_type" = ProjectType, Path, description = "Project type"),
        ("year" = i32, Path, description = "Year"),
        ("document_id" = i32, Path, description = "Document ID")
    ),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Document not found")
    )
)]
pub async fn delete_document(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path((slug, year, document_id)): Path<(String, i32, i32)>,
) -> AppResult<StatusCode> {
    let project_type = project_type(&slug)?;
    state
        .services
        .projects
        .delete_document(project_type, year, document_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
