//! Printable report tables

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Report sub-pages, addressed by their slug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Books,
    BooksAvailable,
    BooksBorrowed,
    EquipmentIcs,
    EquipmentPar,
    EquipmentBorrowed,
    Transactions,
    TransactionsActive,
    TransactionsOverdue,
    Borrowers,
    ProjectsResearch,
    ProjectsExtension,
}

impl ReportKind {
    pub const ALL: [ReportKind; 12] = [
        ReportKind::Books,
        ReportKind::BooksAvailable,
        ReportKind::BooksBorrowed,
        ReportKind::EquipmentIcs,
        ReportKind::EquipmentPar,
        ReportKind::EquipmentBorrowed,
        ReportKind::Transactions,
        ReportKind::TransactionsActive,
        ReportKind::TransactionsOverdue,
        ReportKind::Borrowers,
        ReportKind::ProjectsResearch,
        ReportKind::ProjectsExtension,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::Books => "books",
            ReportKind::BooksAvailable => "books-available",
            ReportKind::BooksBorrowed => "books-borrowed",
            ReportKind::EquipmentIcs => "equipment-ics",
            ReportKind::EquipmentPar => "equipment-par",
            ReportKind::EquipmentBorrowed => "equipment-borrowed",
            ReportKind::Transactions => "transactions",
            ReportKind::TransactionsActive => "transactions-active",
            ReportKind::TransactionsOverdue => "transactions-overdue",
            ReportKind::Borrowers => "borrowers",
            ReportKind::ProjectsResearch => "projects-research",
            ReportKind::ProjectsExtension => "projects-extension",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Books => "Book Inventory",
            ReportKind::BooksAvailable => "Available Books",
            ReportKind::BooksBorrowed => "Borrowed Books",
            ReportKind::EquipmentIcs => "ICS Equipment",
            ReportKind::EquipmentPar => "PAR Equipment",
            ReportKind::EquipmentBorrowed => "Borrowed Equipment",
            ReportKind::Transactions => "Transaction History",
            ReportKind::TransactionsActive => "Active Transactions",
            ReportKind::TransactionsOverdue => "Overdue Transactions",
            ReportKind::Borrowers => "Borrowers",
            ReportKind::ProjectsResearch => "Research Project Files",
            ReportKind::ProjectsExtension => "Extension Project Files",
        }
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| format!("Unknown report: {}", s))
    }
}

/// Entry of the reports index
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportEntry {
    pub kind: ReportKind,
    pub title: String,
    pub rows: usize,
}

/// A titled table ready to print
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportTable {
    pub kind: ReportKind,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(kind: ReportKind, columns: &[&str]) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}
