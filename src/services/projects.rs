//! Research and extension projects service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{DocumentCategory, ProjectType},
        project::{CreateProjectYear, Document, ProjectTypeSummary, ProjectYear, ProjectYearSummary},
    },
    repository::Repository,
    services::clock::Clock,
};

#[derive(Clone)]
pub struct ProjectsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl ProjectsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// One card per project type
    pub async fn dashboard(&self) -> Vec<ProjectTypeSummary> {
        let mut cards = Vec::with_capacity(ProjectType::ALL.len());
        for project_type in ProjectType::ALL {
            let years: Vec<ProjectYearSummary> = self
                .repository
                .projects
                .list_years(project_type)
                .await
                .iter()
                .map(ProjectYearSummary::from)
                .collect();
            cards.push(ProjectTypeSummary {
                project_type,
                title: project_type.title().to_string(),
                total_documents: years.iter().map(|y| y.total).sum(),
                years,
            });
        }
        cards
    }

    pub async fn list_years(&self, project_type: ProjectType) -> Vec<ProjectYearSummary> {
        self.repository
            .projects
            .list_years(project_type)
            .await
            .iter()
            .map(ProjectYearSummary::from)
            .collect()
    }

    pub async fn get_year(&self, project_type: ProjectType, year: i32) -> AppResult<ProjectYear> {
        self.repository.projects.get_year(project_type, year).await
    }

    pub async fn create_year(
        &self,
        project_type: ProjectType,
        data: CreateProjectYear,
    ) -> AppResult<ProjectYear> {
        data.validate()?;
        let bucket = self.repository.projects.create_year(project_type, data.year).await?;
        tracing::info!("Year {} added to {}", bucket.year, project_type);
        Ok(bucket)
    }

    pub async fn delete_year(&self, project_type: ProjectType, year: i32) -> AppResult<()> {
        let bucket = self.repository.projects.delete_year(project_type, year).await?;
        tracing::info!(
            "Year {} removed from {} with {} attachment(s)",
            bucket.year,
            project_type,
            bucket.total()
        );
        Ok(())
    }

    /// Record an uploaded file. Only its name, extension and today's date are kept.
    pub async fn upload(
        &self,
        project_type: ProjectType,
        year: i32,
        file_name: &str,
        category: Option<DocumentCategory>,
    ) -> AppResult<Document> {
        let name = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name)
            .trim();
        if name.is_empty() {
            return Err(AppError::Validation("File name is required".to_string()));
        }

        let file_type = Document::extension_of(name);
        let category = category.unwrap_or_else(|| DocumentCategory::from_extension(&file_type));

        let document = Document {
            id: 0,
            name: name.to_string(),
            file_type,
            upload_date: self.clock.today(),
        };

        let document = self
            .repository
            .projects
            .add_document(project_type, year, category, document)
            .await?;

        tracing::info!(
            "Uploaded {} to {} {} ({:?})",
            document.name,
            project_type,
            year,
            category
        );
        Ok(document)
    }

    pub async fn delete_document(
        &self,
        project_type: ProjectType,
        year: i32,
        document_id: i32,
    ) -> AppResult<()> {
        let document = self
            .repository
            .projects
            .delete_document(project_type, year, document_id)
            .await?;
        tracing::info!("Deleted {} from {} {}", document.name, project_type, year);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::MockClock;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn service() -> ProjectsService {
        let mut clock = MockClock::new();
        clock.expect_today().return_const(today());
        ProjectsService::new(Repository::seeded(today()), Arc::new(clock))
    }

    #[tokio::test]
    async fn dashboard_lists_every_project_type() {
        let cards = service().dashboard().await;
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].project_type, ProjectType::Research);
        assert_eq!(cards[0].total_documents, 4);
        assert_eq!(cards[0].years.iter().map(|y| y.year).collect::<Vec<_>>(), vec![2023, 2024]);
    }

    #[tokio::test]
    async fn upload_infers_category_and_keeps_only_metadata() {
        let svc = service();
        let doc = svc
            .upload(ProjectType::Extension, 2024, "C:\\Users\\me\\Poster.PNG", None)
            .await
            .unwrap();
        assert_eq!(doc.name, "Poster.PNG");
        assert_eq!(doc.file_type, "png");
        assert_eq!(doc.upload_date, today());

        let bucket = svc.get_year(ProjectType::Extension, 2024).await.unwrap();
        assert!(bucket.photos.iter().any(|d| d.id == doc.id));
    }

    #[tokio::test]
    async fn explicit_category_wins() {
        let svc = service();
        let doc = svc
            .upload(ProjectType::Research, 2024, "scan.pdf", Some(DocumentCategory::Other))
            .await
            .unwrap();
        let bucket = svc.get_year(ProjectType::Research, 2024).await.unwrap();
        assert!(bucket.other.iter().any(|d| d.id == doc.id));
        assert!(bucket.pdf.iter().all(|d| d.id != doc.id));
    }

    #[tokio::test]
    async fn upload_to_missing_year_fails() {
        let result = service()
            .upload(ProjectType::Research, 1999, "a.pdf", None)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn empty_file_name_is_rejected() {
        let result = service().upload(ProjectType::Research, 2024, "  ", None).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
