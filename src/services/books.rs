//! Book catalog service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        enums::ItemStatus,
        search::filter_by_query,
    },
    repository::Repository,
    services::clock::Clock,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

/// New items enter the catalog available; borrowing goes through a transaction
pub(crate) fn ensure_starts_available(status: ItemStatus) -> AppResult<()> {
    if status == ItemStatus::Borrowed {
        return Err(AppError::Validation(
            "New items must be Available; record a borrowing transaction instead".to_string(),
        ));
    }
    Ok(())
}

impl BooksService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// List books matching the search box and status filter, in insertion order
    pub async fn list(&self, query: &BookQuery) -> Vec<Book> {
        let books = self.repository.books.list().await;
        filter_by_query(&books, query.search.as_deref())
            .into_iter()
            .filter(|b| query.status.map_or(true, |s| b.status == s))
            .cloned()
            .collect()
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        data.validate()?;
        ensure_starts_available(data.status)?;
        let book = self.repository.books.create(&data).await?;
        tracing::info!("Book {} ({}) added with id {}", book.book_no, book.title, book.id);
        Ok(book)
    }

    pub async fn update(&self, id: i32, data: UpdateBook) -> AppResult<Book> {
        data.validate()?;
        self.repository.books_update(id, &data).await
    }

    /// Delete a book. A borrowed book is kept unless `force` is set, in which
    /// case its loan is closed as returned today.
    pub async fn delete(&self, id: i32, force: bool) -> AppResult<Book> {
        let (deleted, closed) = self
            .repository
            .books_delete(id, force, self.clock.today())
            .await?;
        if closed > 0 {
            tracing::warn!(
                "Book {} deleted while on loan; closed {} loan(s)",
                deleted.book_no,
                closed
            );
        } else {
            tracing::info!("Book {} deleted", deleted.book_no);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorCode,
        models::{
            enums::{TransactionStatus, TransactionType},
            transaction::CreateTransaction,
        },
        services::{clock::MockClock, transactions::TransactionsService},
    };
    use chrono::NaiveDate;
    use tokio_test::assert_ok;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_today().return_const(today());
        Arc::new(clock)
    }

    fn service() -> BooksService {
        BooksService::new(Repository::seeded(today()), clock())
    }

    fn services() -> (BooksService, TransactionsService, Repository) {
        let repository = Repository::seeded(today());
        (
            BooksService::new(repository.clone(), clock()),
            TransactionsService::new(repository.clone(), clock(), 7),
            repository,
        )
    }

    fn new_book(book_no: &str) -> CreateBook {
        CreateBook {
            book_no: book_no.to_string(),
            title: "Test".to_string(),
            author: "X".to_string(),
            location: "Shelf A".to_string(),
            year: 2024,
            status: ItemStatus::Available,
        }
    }

    #[tokio::test]
    async fn search_web_finds_only_b1002() {
        let books = service()
            .list(&BookQuery {
                search: Some("web".to_string()),
                status: None,
            })
            .await;
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].book_no, "B1002");
        assert_eq!(books[0].title, "Advanced Web Development");
    }

    #[tokio::test]
    async fn search_covers_author_and_book_number() {
        let svc = service();
        let by_author = svc
            .list(&BookQuery { search: Some("JOHNSON".to_string()), status: None })
            .await;
        assert_eq!(by_author.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2]);

        let by_number = svc
            .list(&BookQuery { search: Some("b100".to_string()), status: None })
            .await;
        assert_eq!(by_number.len(), 8);
    }

    #[tokio::test]
    async fn status_filter_keeps_order() {
        let borrowed = service()
            .list(&BookQuery { search: None, status: Some(ItemStatus::Borrowed) })
            .await;
        let ids: Vec<i32> = borrowed.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 4, 7]);
    }

    #[tokio::test]
    async fn adding_a_book_assigns_next_id() {
        let svc = service();
        let book = assert_ok!(svc.create(new_book("B1009")).await);
        assert_eq!(book.id, 9);
        assert_eq!(svc.list(&BookQuery::default()).await.len(), 9);
    }

    #[tokio::test]
    async fn duplicate_book_number_is_rejected() {
        let result = service().create(new_book("b1001")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn missing_title_fails_validation() {
        let mut book = new_book("B2000");
        book.title = String::new();
        assert!(matches!(service().create(book).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_book() {
        let svc = service();
        assert_ok!(svc.delete(3, false).await);
        let ids: Vec<i32> = svc.list(&BookQuery::default()).await.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5, 6, 7, 8]);
    }

    #[tokio::test]
    async fn borrowed_book_needs_force_to_delete() {
        let svc = service();
        assert!(matches!(
            svc.delete(2, false).await,
            Err(AppError::BusinessRule(ErrorCode::ItemOnLoan, _))
        ));
        assert_ok!(svc.delete(2, true).await);
    }

    #[tokio::test]
    async fn forced_delete_closes_the_open_loan() {
        let (books, transactions, repo) = services();
        assert_ok!(books.delete(2, true).await);

        let loan = assert_ok!(repo.transactions.get_by_id(1).await);
        assert_eq!(loan.status, TransactionStatus::Returned);
        assert_eq!(loan.return_date, Some(today()));

        let borrowed = |status: ItemStatus| i64::from(status == ItemStatus::Borrowed);
        let books: i64 = repo.books.list().await.iter().map(|b| borrowed(b.status)).sum();
        let ics: i64 = repo.ics.list().await.iter().map(|e| borrowed(e.status)).sum();
        let par: i64 = repo.par.list().await.iter().map(|e| borrowed(e.status)).sum();
        let borrowed_items = books + ics + par;
        assert_eq!(transactions.count_active().await, borrowed_items);
        assert_eq!(transactions.count_active().await, 4);
    }

    #[tokio::test]
    async fn new_book_cannot_start_borrowed() {
        let mut book = new_book("B2001");
        book.status = ItemStatus::Borrowed;
        assert!(matches!(service().create(book).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn borrowed_book_keeps_its_number() {
        let (books, transactions, repo) = services();
        let rename = UpdateBook {
            book_no: Some("B9999".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            books.update(2, rename).await,
            Err(AppError::BusinessRule(ErrorCode::ItemOnLoan, _))
        ));

        // Other fields can still be edited, and the loan still returns the book
        let edit = UpdateBook {
            book_no: Some("b1002".to_string()),
            location: Some("Shelf Z-9".to_string()),
            ..Default::default()
        };
        let edited = assert_ok!(books.update(2, edit).await);
        assert_eq!(edited.location, "Shelf Z-9");
        assert_eq!(edited.status, ItemStatus::Borrowed);

        assert_ok!(transactions.return_item(1).await);
        assert_eq!(assert_ok!(repo.books.get_by_id(2).await).status, ItemStatus::Available);
    }

    #[tokio::test]
    async fn available_book_can_be_renumbered_and_borrowed() {
        let (books, transactions, _) = services();
        let rename = UpdateBook {
            book_no: Some("B3003".to_string()),
            ..Default::default()
        };
        assert_eq!(assert_ok!(books.update(3, rename).await).book_no, "B3003");

        let loan = assert_ok!(
            transactions
                .borrow(CreateTransaction {
                    transaction_type: TransactionType::Book,
                    item_no: "B3003".to_string(),
                    description: None,
                    borrower: "Ana Garcia".to_string(),
                    borrow_date: None,
                    due_date: None,
                })
                .await
        );
        assert_eq!(loan.description, "Data Structures and Algorithms");
    }
}
