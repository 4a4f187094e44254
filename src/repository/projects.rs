//! Project year buckets and their attachments

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{DocumentCategory, ProjectType},
        project::{Document, ProjectYear},
    },
};

type Buckets = HashMap<ProjectType, IndexMap<i32, ProjectYear>>;

#[derive(Clone, Default)]
pub struct ProjectsRepository {
    buckets: Arc<RwLock<Buckets>>,
}

impl ProjectsRepository {
    pub fn new(years: Vec<(ProjectType, ProjectYear)>) -> Self {
        let mut buckets = Buckets::new();
        for (project_type, bucket) in years {
            buckets
                .entry(project_type)
                .or_default()
                .insert(bucket.year, bucket);
        }
        Self {
            buckets: Arc::new(RwLock::new(buckets)),
        }
    }

    /// Year buckets of a project type, in creation order
    pub async fn list_years(&self, project_type: ProjectType) -> Vec<ProjectYear> {
        self.buckets
            .read()
            .await
            .get(&project_type)
            .map(|years| years.values().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn get_year(&self, project_type: ProjectType, year: i32) -> AppResult<ProjectYear> {
        self.buckets
            .read()
            .await
            .get(&project_type)
            .and_then(|years| years.get(&year))
            .cloned()
            .ok_or_else(|| year_not_found(project_type, year))
    }

    pub async fn create_year(&self, project_type: ProjectType, year: i32) -> AppResult<ProjectYear> {
        let mut buckets = self.buckets.write().await;
        let years = buckets.entry(project_type).or_default();

        if years.contains_key(&year) {
            return Err(AppError::Conflict(format!(
                "Year {} already exists for {}",
                year, project_type
            )));
        }

        let bucket = ProjectYear::new(year);
        years.insert(year, bucket.clone());
        Ok(bucket)
    }

    /// Delete a year with all its attachments
    pub async fn delete_year(&self, project_type: ProjectType, year: i32) -> AppResult<ProjectYear> {
        self.buckets
            .write()
            .await
            .get_mut(&project_type)
            .and_then(|years| years.shift_remove(&year))
            .ok_or_else(|| year_not_found(project_type, year))
    }

    /// Attach a document to a year; ids are unique across all projects
    pub async fn add_document(
        &self,
        project_type: ProjectType,
        year: i32,
        category: DocumentCategory,
        mut document: Document,
    ) -> AppResult<Document> {
        let mut buckets = self.buckets.write().await;

        let next_id = buckets
            .values()
            .flat_map(|years| years.values())
            .flat_map(|bucket| bucket.all_documents())
            .map(|d| d.id)
            .max()
            .map_or(1, |max| max + 1);

        let bucket = buckets
            .get_mut(&project_type)
            .and_then(|years| years.get_mut(&year))
            .ok_or_else(|| year_not_found(project_type, year))?;

        document.id = next_id;
        bucket.category_mut(category).push(document.clone());
        Ok(document)
    }

    pub async fn delete_document(
        &self,
        project_type: ProjectType,
        year: i32,
        document_id: i32,
    ) -> AppResult<Document> {
        let mut buckets = self.buckets.write().await;
        let bucket = buckets
            .get_mut(&project_type)
            .and_then(|years| years.get_mut(&year))
            .ok_or_else(|| year_not_found(project_type, year))?;

        bucket
            .remove_document(document_id)
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", document_id)))
    }
}

fn year_not_found(project_type: ProjectType, year: i32) -> AppError {
    AppError::NotFound(format!("Year {} not found for {}", year, project_type))
}
