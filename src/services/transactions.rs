//! Borrowing transactions service

use std::sync::Arc;

use chrono::Duration;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        search::{count_where, filter_by_query},
        transaction::{CreateTransaction, TransactionDetails, TransactionQuery},
    },
    repository::Repository,
    services::clock::Clock,
};

#[derive(Clone)]
pub struct TransactionsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
    loan_duration_days: i64,
}

impl TransactionsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>, loan_duration_days: i64) -> Self {
        Self {
            repository,
            clock,
            loan_duration_days,
        }
    }

    /// List transactions with their overdue state as of today
    pub async fn list(&self, query: &TransactionQuery) -> Vec<TransactionDetails> {
        let today = self.clock.today();
        let transactions = self.repository.transactions.list().await;

        filter_by_query(&transactions, query.search.as_deref())
            .into_iter()
            .filter(|t| query.status.map_or(true, |s| t.status == s))
            .filter(|t| query.transaction_type.map_or(true, |k| t.transaction_type == k))
            .filter(|t| !query.overdue_only || t.is_overdue(today))
            .map(|t| TransactionDetails::new(t, today))
            .collect()
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<TransactionDetails> {
        let transaction = self.repository.transactions.get_by_id(id).await?;
        Ok(TransactionDetails::new(&transaction, self.clock.today()))
    }

    /// Borrow an item for a registered borrower
    pub async fn borrow(&self, data: CreateTransaction) -> AppResult<TransactionDetails> {
        data.validate()?;

        let today = self.clock.today();
        let borrow_date = data.borrow_date.unwrap_or(today);
        let due_date = data
            .due_date
            .unwrap_or_else(|| borrow_date + Duration::days(self.loan_duration_days));

        if due_date < borrow_date {
            return Err(AppError::Validation(
                "Due date cannot be before the borrow date".to_string(),
            ));
        }

        let transaction = self
            .repository
            .transactions_borrow(&data, borrow_date, due_date)
            .await?;

        tracing::info!(
            "{} borrowed {} {} (transaction {}, due {})",
            transaction.borrower,
            transaction.transaction_type,
            transaction.item_no,
            transaction.id,
            transaction.due_date
        );

        Ok(TransactionDetails::new(&transaction, today))
    }

    /// Return a borrowed item today
    pub async fn return_item(&self, id: i32) -> AppResult<TransactionDetails> {
        let today = self.clock.today();
        let transaction = self.repository.transactions_return(id, today).await?;
        tracing::info!("{} returned {}", transaction.borrower, transaction.item_no);
        Ok(TransactionDetails::new(&transaction, today))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let transaction = self.repository.transactions_delete(id).await?;
        tracing::info!("Transaction {} ({}) deleted", transaction.id, transaction.item_no);
        Ok(())
    }

    pub async fn count_active(&self) -> i64 {
        let transactions = self.repository.transactions.list().await;
        count_where(&transactions, |t| t.is_active())
    }

    pub async fn count_overdue(&self) -> i64 {
        let today = self.clock.today();
        let transactions = self.repository.transactions.list().await;
        count_where(&transactions, |t| t.is_overdue(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorCode,
        models::enums::{ItemStatus, TransactionStatus, TransactionType},
        services::clock::MockClock,
    };
    use chrono::NaiveDate;
    use tokio_test::assert_ok;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn service() -> (TransactionsService, Repository) {
        let repository = Repository::seeded(today());
        let mut clock = MockClock::new();
        clock.expect_today().return_const(today());
        (
            TransactionsService::new(repository.clone(), Arc::new(clock), 7),
            repository,
        )
    }

    fn borrow_request(kind: TransactionType, item_no: &str) -> CreateTransaction {
        CreateTransaction {
            transaction_type: kind,
            item_no: item_no.to_string(),
            description: None,
            borrower: "carlos mendoza".to_string(),
            borrow_date: None,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn overdue_days_follow_the_clock() {
        let (svc, _) = service();
        let overdue = svc
            .list(&TransactionQuery {
                overdue_only: true,
                ..Default::default()
            })
            .await;
        let days: Vec<(i32, i64)> = overdue.iter().map(|t| (t.id, t.days_overdue)).collect();
        assert_eq!(days, vec![(1, 3), (3, 13)]);
        assert_eq!(svc.count_overdue().await, 2);
        assert_eq!(svc.count_active().await, 5);
    }

    #[tokio::test]
    async fn borrowing_marks_the_book_borrowed() {
        let (svc, repo) = service();
        let created = assert_ok!(svc.borrow(borrow_request(TransactionType::Book, "b1003")).await);

        assert_eq!(created.id, 8);
        assert_eq!(created.item_no, "B1003");
        assert_eq!(created.description, "Data Structures and Algorithms");
        assert_eq!(created.due_date, today() + Duration::days(7));
        assert_eq!(created.borrower, "Carlos Mendoza");
        assert_eq!(repo.books.get_by_id(3).await.unwrap().status, ItemStatus::Borrowed);
    }

    #[tokio::test]
    async fn borrowing_a_borrowed_item_is_refused() {
        let (svc, _) = service();
        let result = svc.borrow(borrow_request(TransactionType::Book, "B1002")).await;
        assert!(matches!(
            result,
            Err(AppError::BusinessRule(ErrorCode::ItemNotAvailable, _))
        ));
    }

    #[tokio::test]
    async fn equipment_is_found_in_either_class() {
        let (svc, repo) = service();
        assert_ok!(svc.borrow(borrow_request(TransactionType::Equipment, "INV-ICS-001")).await);
        assert_ok!(svc.borrow(borrow_request(TransactionType::Equipment, "PROP-2022-002")).await);
        assert_eq!(repo.ics.get_by_id(1).await.unwrap().status, ItemStatus::Borrowed);
        assert_eq!(repo.par.get_by_id(2).await.unwrap().status, ItemStatus::Borrowed);
    }

    #[tokio::test]
    async fn unknown_borrower_is_rejected() {
        let (svc, _) = service();
        let mut request = borrow_request(TransactionType::Book, "B1003");
        request.borrower = "Nobody".to_string();
        assert!(matches!(svc.borrow(request).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn returning_releases_the_item_once() {
        let (svc, repo) = service();
        let returned = assert_ok!(svc.return_item(1).await);
        assert_eq!(returned.status, TransactionStatus::Returned);
        assert_eq!(returned.return_date, Some(today()));
        assert_eq!(returned.days_overdue, 0);
        assert_eq!(repo.books.get_by_id(2).await.unwrap().status, ItemStatus::Available);

        assert!(matches!(
            svc.return_item(1).await,
            Err(AppError::BusinessRule(ErrorCode::AlreadyReturned, _))
        ));
    }

    #[tokio::test]
    async fn deleting_an_active_transaction_releases_the_item() {
        let (svc, repo) = service();
        assert_ok!(svc.delete(7).await);
        assert_eq!(repo.par.get_by_id(3).await.unwrap().status, ItemStatus::Available);
        assert!(svc.get_by_id(7).await.is_err());
    }
}
