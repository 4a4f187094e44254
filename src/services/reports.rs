//! Report tables built from the live inventory

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    models::{
        enums::{DocumentCategory, ItemStatus, ProjectType, TransactionType},
        report::{ReportEntry, ReportKind, ReportTable},
        transaction::Transaction,
    },
    repository::Repository,
    services::{borrowers::borrower_details, clock::Clock},
};

const TRANSACTION_COLUMNS: [&str; 9] = [
    "ID",
    "Type",
    "Item No.",
    "Description",
    "Borrower",
    "Borrow Date",
    "Due Date",
    "Return Date",
    "Status",
];

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl ReportsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// All report pages with their current row counts
    pub async fn index(&self) -> Vec<ReportEntry> {
        let mut entries = Vec::with_capacity(ReportKind::ALL.len());
        for kind in ReportKind::ALL {
            let table = self.build(kind).await;
            entries.push(ReportEntry {
                kind,
                title: table.title,
                rows: table.rows.len(),
            });
        }
        entries
    }

    pub async fn build(&self, kind: ReportKind) -> ReportTable {
        let today = self.clock.today();
        match kind {
            ReportKind::Books => self.books(kind, None).await,
            ReportKind::BooksAvailable => self.books(kind, Some(ItemStatus::Available)).await,
            ReportKind::BooksBorrowed => self.books(kind, Some(ItemStatus::Borrowed)).await,
            ReportKind::EquipmentIcs => self.ics(kind).await,
            ReportKind::EquipmentPar => self.par(kind).await,
            ReportKind::EquipmentBorrowed => self.borrowed_equipment(kind).await,
            ReportKind::Transactions => self.transactions(kind, today, |_| true).await,
            ReportKind::TransactionsActive => {
                self.transactions(kind, today, Transaction::is_active).await
            }
            ReportKind::TransactionsOverdue => {
                self.transactions(kind, today, |t| t.is_overdue(today)).await
            }
            ReportKind::Borrowers => self.borrowers(kind, today).await,
            ReportKind::ProjectsResearch => self.projects(kind, ProjectType::Research).await,
            ReportKind::ProjectsExtension => self.projects(kind, ProjectType::Extension).await,
        }
    }

    async fn books(&self, kind: ReportKind, status: Option<ItemStatus>) -> ReportTable {
        let mut table = ReportTable::new(
            kind,
            &["Book No.", "Title", "Author", "Location", "Year", "Status"],
        );
        table.rows = self
            .repository
            .books
            .list()
            .await
            .into_iter()
            .filter(|b| status.map_or(true, |s| b.status == s))
            .map(|b| {
                vec![
                    b.book_no,
                    b.title,
                    b.author,
                    b.location,
                    b.year.to_string(),
                    b.status.to_string(),
                ]
            })
            .collect();
        table
    }

    async fn ics(&self, kind: ReportKind) -> ReportTable {
        let mut table = ReportTable::new(
            kind,
            &[
                "Inventory Item No.",
                "Description",
                "Quantity",
                "Unit",
                "Total Amount",
                "Estimated Useful Life",
                "RIS No.",
                "ICS No.",
                "Status",
            ],
        );
        table.rows = self
            .repository
            .ics
            .list()
            .await
            .into_iter()
            .map(|e| {
                vec![
                    e.inventory_item_no,
                    e.description,
                    e.quantity.to_string(),
                    e.unit,
                    e.total_amount.to_string(),
                    e.estimated_useful_life,
                    e.ris_no,
                    e.ics_no,
                    e.status.to_string(),
                ]
            })
            .collect();
        table
    }

    async fn par(&self, kind: ReportKind) -> ReportTable {
        let mut table = ReportTable::new(
            kind,
            &[
                "Property No.",
                "Description",
                "Quantity",
                "Unit",
                "Date Acquired",
                "Amount",
                "PAR No.",
                "Status",
            ],
        );
        table.rows = self
            .repository
            .par
            .list()
            .await
            .into_iter()
            .map(|e| {
                vec![
                    e.property_no,
                    e.description,
                    e.quantity.to_string(),
                    e.unit,
                    format_date(e.date_acquired),
                    e.amount.to_string(),
                    e.par_no,
                    e.status.to_string(),
                ]
            })
            .collect();
        table
    }

    /// ICS and PAR items currently out, with the open transaction's borrower
    async fn borrowed_equipment(&self, kind: ReportKind) -> ReportTable {
        let mut table = ReportTable::new(
            kind,
            &["Class", "Item No.", "Description", "Borrower", "Due Date"],
        );
        let transactions = self.repository.transactions.list().await;
        let open_loan = |item_no: &str| {
            transactions
                .iter()
                .find(|t| t.holds(TransactionType::Equipment, item_no))
                .map(|t| (t.borrower.clone(), format_date(t.due_date)))
                .unwrap_or_default()
        };

        for e in self.repository.ics.list().await {
            if e.status == ItemStatus::Borrowed {
                let (borrower, due) = open_loan(&e.inventory_item_no);
                table.rows.push(vec![
                    "ICS".to_string(),
                    e.inventory_item_no,
                    e.description,
                    borrower,
                    due,
                ]);
            }
        }
        for e in self.repository.par.list().await {
            if e.status == ItemStatus::Borrowed {
                let (borrower, due) = open_loan(&e.property_no);
                table.rows.push(vec![
                    "PAR".to_string(),
                    e.property_no,
                    e.description,
                    borrower,
                    due,
                ]);
            }
        }
        table
    }

    async fn transactions<F>(&self, kind: ReportKind, today: NaiveDate, keep: F) -> ReportTable
    where
        F: Fn(&Transaction) -> bool,
    {
        let mut columns = TRANSACTION_COLUMNS.to_vec();
        if kind == ReportKind::TransactionsOverdue {
            columns.push("Days Overdue");
        }
        let mut table = ReportTable::new(kind, &columns);

        table.rows = self
            .repository
            .transactions
            .list()
            .await
            .into_iter()
            .filter(|t| keep(t))
            .map(|t| {
                let mut row = vec![
                    t.id.to_string(),
                    t.transaction_type.to_string(),
                    t.item_no.clone(),
                    t.description.clone(),
                    t.borrower.clone(),
                    format_date(t.borrow_date),
                    format_date(t.due_date),
                    t.return_date.map(format_date).unwrap_or_default(),
                    t.status.to_string(),
                ];
                if kind == ReportKind::TransactionsOverdue {
                    row.push(t.days_overdue(today).to_string());
                }
                row
            })
            .collect();
        table
    }

    async fn borrowers(&self, kind: ReportKind, today: NaiveDate) -> ReportTable {
        let mut table = ReportTable::new(kind, &["ID", "Name", "Role", "Borrowed", "Overdue"]);
        let transactions = self.repository.transactions.list().await;
        table.rows = self
            .repository
            .borrowers
            .list()
            .await
            .iter()
            .map(|b| borrower_details(b, &transactions, today))
            .map(|d| {
                vec![
                    d.id.to_string(),
                    d.name,
                    d.role.to_string(),
                    d.borrowed.to_string(),
                    d.overdue.to_string(),
                ]
            })
            .collect();
        table
    }

    async fn projects(&self, kind: ReportKind, project_type: ProjectType) -> ReportTable {
        let mut table = ReportTable::new(
            kind,
            &["Year", "Category", "File Name", "Type", "Upload Date"],
        );
        for bucket in self.repository.projects.list_years(project_type).await {
            for category in DocumentCategory::ALL {
                for doc in bucket.category(category) {
                    table.rows.push(vec![
                        bucket.year.to_string(),
                        category_label(category).to_string(),
                        doc.name.clone(),
                        doc.file_type.clone(),
                        format_date(doc.upload_date),
                    ]);
                }
            }
        }
        table
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn category_label(category: DocumentCategory) -> &'static str {
    match category {
        DocumentCategory::Documents => "Documents",
        DocumentCategory::Photos => "Photos",
        DocumentCategory::Pdf => "PDF",
        DocumentCategory::Other => "Other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::MockClock;

    fn service() -> ReportsService {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut clock = MockClock::new();
        clock.expect_today().return_const(today);
        ReportsService::new(Repository::seeded(today), Arc::new(clock))
    }

    #[tokio::test]
    async fn index_lists_twelve_reports() {
        let index = service().index().await;
        assert_eq!(index.len(), 12);
        let books = index.iter().find(|e| e.kind == ReportKind::Books).unwrap();
        assert_eq!(books.rows, 8);
    }

    #[tokio::test]
    async fn book_reports_split_by_status() {
        let svc = service();
        let available = svc.build(ReportKind::BooksAvailable).await;
        let borrowed = svc.build(ReportKind::BooksBorrowed).await;
        assert_eq!(available.rows.len(), 5);
        assert_eq!(borrowed.rows.len(), 3);
        assert!(borrowed.rows.iter().all(|r| r[5] == "Borrowed"));
    }

    #[tokio::test]
    async fn overdue_report_shows_days() {
        let table = service().build(ReportKind::TransactionsOverdue).await;
        assert_eq!(table.columns.last().map(String::as_str), Some("Days Overdue"));
        let days: Vec<(&str, &str)> = table
            .rows
            .iter()
            .map(|r| (r[0].as_str(), r[9].as_str()))
            .collect();
        assert_eq!(days, vec![("1", "3"), ("3", "13")]);
    }

    #[tokio::test]
    async fn borrowed_equipment_names_the_borrower() {
        let table = service().build(ReportKind::EquipmentBorrowed).await;
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], "INV-ICS-002");
        assert_eq!(table.rows[0][3], "Pedro Reyes");
        assert_eq!(table.rows[1][3], "Maria Santos");
    }

    #[tokio::test]
    async fn research_report_lists_every_attachment() {
        let table = service().build(ReportKind::ProjectsResearch).await;
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0][0], "2023");
        assert_eq!(table.rows[0][1], "Documents");
    }
}
