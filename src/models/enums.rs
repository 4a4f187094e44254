//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// ItemStatus
// ---------------------------------------------------------------------------

/// Availability of a book or a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum ItemStatus {
    #[default]
    Available,
    Borrowed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "Available",
            ItemStatus::Borrowed => "Borrowed",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// What kind of item a borrowing transaction refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TransactionType {
    Book,
    Equipment,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransactionType::Book => "Book",
            TransactionType::Equipment => "Equipment",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum TransactionStatus {
    #[default]
    Borrowed,
    Returned,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransactionStatus::Borrowed => "Borrowed",
            TransactionStatus::Returned => "Returned",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// BorrowerRole
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BorrowerRole {
    Student,
    Faculty,
    Staff,
}

impl BorrowerRole {
    pub const ALL: [BorrowerRole; 3] = [BorrowerRole::Student, BorrowerRole::Faculty, BorrowerRole::Staff];
}

impl std::fmt::Display for BorrowerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BorrowerRole::Student => "Student",
            BorrowerRole::Faculty => "Faculty",
            BorrowerRole::Staff => "Staff",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Dashboard color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Project families shown on the projects dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    Research,
    Extension,
    ResearchActivities,
    ExtensionActivities,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        ProjectType::Research,
        ProjectType::Extension,
        ProjectType::ResearchActivities,
        ProjectType::ExtensionActivities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Research => "research",
            ProjectType::Extension => "extension",
            ProjectType::ResearchActivities => "research-activities",
            ProjectType::ExtensionActivities => "extension-activities",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ProjectType::Research => "Research Projects",
            ProjectType::Extension => "Extension Projects",
            ProjectType::ResearchActivities => "Research Activities",
            ProjectType::ExtensionActivities => "Extension Activities",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Attachment tab inside a project year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Documents,
    Photos,
    Pdf,
    Other,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 4] = [
        DocumentCategory::Documents,
        DocumentCategory::Photos,
        DocumentCategory::Pdf,
        DocumentCategory::Other,
    ];

    /// Pick the tab a file lands in from its extension (without the dot)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => DocumentCategory::Pdf,
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" | "svg" => DocumentCategory::Photos,
            "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "txt" | "odt" | "ods" | "rtf"
            | "csv" => DocumentCategory::Documents,
            _ => DocumentCategory::Other,
        }
    }
}

impl std::str::FromStr for DocumentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "documents" => Ok(DocumentCategory::Documents),
            "photos" => Ok(DocumentCategory::Photos),
            "pdf" => Ok(DocumentCategory::Pdf),
            "other" => Ok(DocumentCategory::Other),
            _ => Err(format!("Invalid document category: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_is_inferred_from_extension() {
        assert_eq!(DocumentCategory::from_extension("PDF"), DocumentCategory::Pdf);
        assert_eq!(DocumentCategory::from_extension("jpeg"), DocumentCategory::Photos);
        assert_eq!(DocumentCategory::from_extension("docx"), DocumentCategory::Documents);
        assert_eq!(DocumentCategory::from_extension("zip"), DocumentCategory::Other);
        assert_eq!(DocumentCategory::from_extension(""), DocumentCategory::Other);
    }

    #[test]
    fn project_type_uses_route_slugs() {
        let json = serde_json::to_string(&ProjectType::ResearchActivities).unwrap();
        assert_eq!(json, "\"research-activities\"");
        let parsed: ProjectType = serde_json::from_str("\"extension\"").unwrap();
        assert_eq!(parsed, ProjectType::Extension);
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Photos".parse::<DocumentCategory>(), Ok(DocumentCategory::Photos));
        assert!("music".parse::<DocumentCategory>().is_err());
    }
}
