//! Mock catalog loaded at startup.
//!
//! Item statuses agree with the seeded transactions: every item marked
//! `Borrowed` has exactly one active transaction. Transaction dates are
//! relative to the startup day so the dashboard always shows a mix of
//! current and overdue loans.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use super::{
    books::BooksRepository,
    borrowers::BorrowersRepository,
    equipment::{IcsRepository, ParRepository},
    projects::ProjectsRepository,
    transactions::TransactionsRepository,
    Repository,
};
use crate::models::{
    Book, Borrower, BorrowerRole, Document, IcsEquipment, ItemStatus, ParEquipment, ProjectType,
    ProjectYear, Transaction, TransactionStatus, TransactionType,
};

pub fn books() -> Vec<Book> {
    let rows = [
        ("B1001", "Introduction to Computer Science", "John Smith", "Shelf A-1", 2020, ItemStatus::Available),
        ("B1002", "Advanced Web Development", "Sarah Johnson", "Shelf A-2", 2021, ItemStatus::Borrowed),
        ("B1003", "Data Structures and Algorithms", "Michael Brown", "Shelf B-1", 2019, ItemStatus::Available),
        ("B1004", "Machine Learning Fundamentals", "Emily Davis", "Shelf B-2", 2022, ItemStatus::Borrowed),
        ("B1005", "Database Management Systems", "Robert Wilson", "Shelf C-1", 2018, ItemStatus::Available),
        ("B1006", "Software Engineering Principles", "Lisa Anderson", "Shelf C-2", 2020, ItemStatus::Available),
        ("B1007", "Computer Networks", "David Martinez", "Shelf D-1", 2021, ItemStatus::Borrowed),
        ("B1008", "Operating Systems Concepts", "Jennifer Taylor", "Shelf D-2", 2019, ItemStatus::Available),
    ];

    rows.into_iter()
        .zip(1..)
        .map(|((book_no, title, author, location, year, status), id)| Book {
            id,
            book_no: book_no.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            location: location.to_string(),
            year,
            status,
        })
        .collect()
}

pub fn ics_equipment() -> Vec<IcsEquipment> {
    let rows = [
        ("Wireless Mouse", 10, "pc", Decimal::new(350000, 2), "INV-ICS-001", "3 years", "RIS-2023-001", "ICS-2023-001", ItemStatus::Available),
        ("Laptop Computer", 1, "unit", Decimal::new(4500000, 2), "INV-ICS-002", "5 years", "RIS-2023-002", "ICS-2023-002", ItemStatus::Borrowed),
        ("Office Chair", 5, "pc", Decimal::new(1250000, 2), "INV-ICS-003", "5 years", "RIS-2023-003", "ICS-2023-003", ItemStatus::Available),
        ("External Hard Drive 1TB", 3, "pc", Decimal::new(900000, 2), "INV-ICS-004", "3 years", "RIS-2024-001", "ICS-2024-001", ItemStatus::Available),
    ];

    rows.into_iter()
        .zip(1..)
        .map(
            |((description, quantity, unit, total_amount, item_no, life, ris_no, ics_no, status), id)| {
                IcsEquipment {
                    id,
                    description: description.to_string(),
                    quantity,
                    unit: unit.to_string(),
                    total_amount,
                    inventory_item_no: item_no.to_string(),
                    estimated_useful_life: life.to_string(),
                    ris_no: ris_no.to_string(),
                    ics_no: ics_no.to_string(),
                    status,
                }
            },
        )
        .collect()
}

pub fn par_equipment() -> Vec<ParEquipment> {
    let rows = [
        ("PROP-2022-001", "LCD Projector", 1, "unit", (2022, 3, 15), Decimal::new(3500000, 2), "PAR-2022-001", ItemStatus::Available),
        ("PROP-2022-002", "Air Conditioning Unit", 2, "unit", (2022, 6, 1), Decimal::new(6000000, 2), "PAR-2022-002", ItemStatus::Available),
        ("PROP-2023-003", "Desktop Computer", 1, "set", (2023, 1, 20), Decimal::new(5500000, 2), "PAR-2023-003", ItemStatus::Borrowed),
    ];

    rows.into_iter()
        .zip(1..)
        .filter_map(|((property_no, description, quantity, unit, (y, m, d), amount, par_no, status), id)| {
            Some(ParEquipment {
                id,
                property_no: property_no.to_string(),
                description: description.to_string(),
                quantity,
                unit: unit.to_string(),
                date_acquired: NaiveDate::from_ymd_opt(y, m, d)?,
                amount,
                par_no: par_no.to_string(),
                status,
            })
        })
        .collect()
}

pub fn borrowers() -> Vec<Borrower> {
    let rows = [
        ("Juan Dela Cruz", BorrowerRole::Student),
        ("Maria Santos", BorrowerRole::Faculty),
        ("Pedro Reyes", BorrowerRole::Staff),
        ("Ana Garcia", BorrowerRole::Student),
        ("Carlos Mendoza", BorrowerRole::Faculty),
    ];

    rows.into_iter()
        .zip(1..)
        .map(|((name, role), id)| Borrower {
            id,
            name: name.to_string(),
            role,
        })
        .collect()
}

/// Transactions dated relative to `today`.
///
/// As of `today`: #1 is 3 days overdue, #3 is 13 days overdue, #2, #5 and
/// #7 are within their loan period, #4 and #6 are returned.
pub fn transactions(today: NaiveDate) -> Vec<Transaction> {
    let day = |offset: i64| today + Duration::days(offset);
    let rows = [
        (TransactionType::Book, "B1002", "Advanced Web Development", "Juan Dela Cruz", -10, -3, None),
        (TransactionType::Book, "B1004", "Machine Learning Fundamentals", "Maria Santos", -3, 4, None),
        (TransactionType::Equipment, "INV-ICS-002", "Laptop Computer", "Pedro Reyes", -20, -13, None),
        (TransactionType::Book, "B1001", "Introduction to Computer Science", "Ana Garcia", -30, -23, Some(-25)),
        (TransactionType::Book, "B1007", "Computer Networks", "Ana Garcia", -5, 2, None),
        (TransactionType::Equipment, "PROP-2022-001", "LCD Projector", "Carlos Mendoza", -15, -8, Some(-9)),
        (TransactionType::Equipment, "PROP-2023-003", "Desktop Computer", "Maria Santos", -2, 5, None),
    ];

    rows.into_iter()
        .zip(1..)
        .map(|((kind, item_no, description, borrower, borrowed, due, returned), id)| Transaction {
            id,
            transaction_type: kind,
            item_no: item_no.to_string(),
            description: description.to_string(),
            borrower: borrower.to_string(),
            borrow_date: day(borrowed),
            due_date: day(due),
            return_date: returned.map(day),
            status: if returned.is_some() {
                TransactionStatus::Returned
            } else {
                TransactionStatus::Borrowed
            },
        })
        .collect()
}

pub fn project_years() -> Vec<(ProjectType, ProjectYear)> {
    let mut next_id = 0;
    let mut doc = |name: &str, date: (i32, u32, u32)| {
        next_id += 1;
        Document {
            id: next_id,
            name: name.to_string(),
            file_type: Document::extension_of(name),
            upload_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
        }
    };

    let mut research_2023 = ProjectYear::new(2023);
    research_2023.documents.push(doc("Research Proposal.docx", (2023, 2, 14)));
    research_2023.photos.push(doc("field_visit.jpg", (2023, 6, 3)));
    research_2023.pdf.push(doc("Final Report.pdf", (2023, 11, 28)));

    let mut research_2024 = ProjectYear::new(2024);
    research_2024.pdf.push(doc("Progress Report.pdf", (2024, 7, 9)));

    let mut extension_2024 = ProjectYear::new(2024);
    extension_2024.documents.push(doc("Training Plan.docx", (2024, 3, 11)));
    extension_2024.photos.push(doc("community_outreach.png", (2024, 4, 20)));

    let mut research_activities_2024 = ProjectYear::new(2024);
    research_activities_2024.pdf.push(doc("Seminar Proceedings.pdf", (2024, 9, 5)));

    let mut extension_activities_2023 = ProjectYear::new(2023);
    extension_activities_2023.other.push(doc("event_highlights.mp4", (2023, 12, 1)));

    vec![
        (ProjectType::Research, research_2023),
        (ProjectType::Research, research_2024),
        (ProjectType::Extension, extension_2024),
        (ProjectType::ResearchActivities, research_activities_2024),
        (ProjectType::ExtensionActivities, extension_activities_2023),
    ]
}

impl Repository {
    /// Repository pre-filled with the mock catalog
    pub fn seeded(today: NaiveDate) -> Self {
        Self {
            books: BooksRepository::new(books()),
            ics: IcsRepository::new(ics_equipment()),
            par: ParRepository::new(par_equipment()),
            transactions: TransactionsRepository::new(transactions(today)),
            borrowers: BorrowersRepository::new(borrowers()),
            projects: ProjectsRepository::new(project_years()),
            ..Default::default()
        }
    }
}
