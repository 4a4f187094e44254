//! Research and extension project attachments

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{DocumentCategory, ProjectType};
use super::search::Searchable;

/// Uploaded file metadata. File contents are never kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i32,
    pub name: String,
    /// Extension without the dot ("pdf", "jpg"...)
    #[serde(rename = "type")]
    pub file_type: String,
    pub upload_date: NaiveDate,
}

impl Document {
    /// Extension of a file name, lowercased; empty when there is none
    pub fn extension_of(file_name: &str) -> String {
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
            _ => String::new(),
        }
    }
}

impl Searchable for Document {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.file_type]
    }
}

/// Attachments of one project year, split by tab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectYear {
    pub year: i32,
    pub documents: Vec<Document>,
    pub photos: Vec<Document>,
    pub pdf: Vec<Document>,
    pub other: Vec<Document>,
}

impl ProjectYear {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    pub fn category(&self, category: DocumentCategory) -> &Vec<Document> {
        match category {
            DocumentCategory::Documents => &self.documents,
            DocumentCategory::Photos => &self.photos,
            DocumentCategory::Pdf => &self.pdf,
            DocumentCategory::Other => &self.other,
        }
    }

    pub fn category_mut(&mut self, category: DocumentCategory) -> &mut Vec<Document> {
        match category {
            DocumentCategory::Documents => &mut self.documents,
            DocumentCategory::Photos => &mut self.photos,
            DocumentCategory::Pdf => &mut self.pdf,
            DocumentCategory::Other => &mut self.other,
        }
    }

    pub fn all_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents
            .iter()
            .chain(self.photos.iter())
            .chain(self.pdf.iter())
            .chain(self.other.iter())
    }

    pub fn total(&self) -> usize {
        self.documents.len() + self.photos.len() + self.pdf.len() + self.other.len()
    }

    /// Remove a document from whichever tab holds it
    pub fn remove_document(&mut self, document_id: i32) -> Option<Document> {
        for category in DocumentCategory::ALL {
            let docs = self.category_mut(category);
            if let Some(pos) = docs.iter().position(|d| d.id == document_id) {
                return Some(docs.remove(pos));
            }
        }
        None
    }
}

/// Year entry in a project type listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectYearSummary {
    pub year: i32,
    pub documents: usize,
    pub photos: usize,
    pub pdf: usize,
    pub other: usize,
    pub total: usize,
}

impl From<&ProjectYear> for ProjectYearSummary {
    fn from(bucket: &ProjectYear) -> Self {
        Self {
            year: bucket.year,
            documents: bucket.documents.len(),
            photos: bucket.photos.len(),
            pdf: bucket.pdf.len(),
            other: bucket.other.len(),
            total: bucket.total(),
        }
    }
}

/// Card on the projects dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectTypeSummary {
    pub project_type: ProjectType,
    pub title: String,
    pub years: Vec<ProjectYearSummary>,
    pub total_documents: usize,
}

/// Create year request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProjectYear {
    #[validate(range(min = 1900, max = 2999, message = "Year is out of range"))]
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: i32, name: &str) -> Document {
        Document {
            id,
            name: name.to_string(),
            file_type: Document::extension_of(name),
            upload_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn extension_is_lowercased_and_optional() {
        assert_eq!(Document::extension_of("Report.PDF"), "pdf");
        assert_eq!(Document::extension_of("archive.tar.gz"), "gz");
        assert_eq!(Document::extension_of("README"), "");
        assert_eq!(Document::extension_of(".env"), "");
    }

    #[test]
    fn remove_document_searches_every_tab() {
        let mut bucket = ProjectYear::new(2024);
        bucket.photos.push(doc(1, "a.jpg"));
        bucket.other.push(doc(2, "b.zip"));

        assert_eq!(bucket.remove_document(2).map(|d| d.id), Some(2));
        assert!(bucket.remove_document(2).is_none());
        assert_eq!(bucket.total(), 1);
    }
}
