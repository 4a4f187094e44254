//! Borrower management service

use std::sync::Arc;

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        borrower::{Borrower, BorrowerDetails, BorrowerQuery, CreateBorrower, UpdateBorrower},
        search::filter_by_query,
        transaction::{Transaction, TransactionDetails},
    },
    repository::Repository,
    services::clock::Clock,
};

#[derive(Clone)]
pub struct BorrowersService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

/// Attach loan counts to a borrower
pub fn borrower_details(
    borrower: &Borrower,
    transactions: &[Transaction],
    today: NaiveDate,
) -> BorrowerDetails {
    let active: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.is_active() && t.is_borrowed_by(&borrower.name))
        .collect();

    BorrowerDetails {
        id: borrower.id,
        name: borrower.name.clone(),
        role: borrower.role,
        borrowed: active.len() as i64,
        overdue: active.iter().filter(|t| t.is_overdue(today)).count() as i64,
    }
}

impl BorrowersService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn list(&self, query: &BorrowerQuery) -> Vec<BorrowerDetails> {
        let today = self.clock.today();
        let borrowers = self.repository.borrowers.list().await;
        let transactions = self.repository.transactions.list().await;

        filter_by_query(&borrowers, query.search.as_deref())
            .into_iter()
            .filter(|b| query.role.map_or(true, |r| b.role == r))
            .map(|b| borrower_details(b, &transactions, today))
            .collect()
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<BorrowerDetails> {
        let borrower = self.repository.borrowers.get_by_id(id).await?;
        let transactions = self.repository.transactions.list().await;
        Ok(borrower_details(&borrower, &transactions, self.clock.today()))
    }

    /// Active loans of a borrower
    pub async fn loans(&self, id: i32) -> AppResult<Vec<TransactionDetails>> {
        let borrower = self.repository.borrowers.get_by_id(id).await?;
        let today = self.clock.today();
        Ok(self
            .repository
            .transactions
            .list()
            .await
            .iter()
            .filter(|t| t.is_active() && t.is_borrowed_by(&borrower.name))
            .map(|t| TransactionDetails::new(t, today))
            .collect())
    }

    pub async fn create(&self, data: CreateBorrower) -> AppResult<BorrowerDetails> {
        data.validate()?;
        let borrower = self.repository.borrowers.create(&data).await?;
        tracing::info!("Borrower {} registered as {}", borrower.name, borrower.role);
        self.get_by_id(borrower.id).await
    }

    /// Update a borrower. Renaming is refused while loans are open under the old name.
    pub async fn update(&self, id: i32, data: UpdateBorrower) -> AppResult<BorrowerDetails> {
        data.validate()?;
        self.repository.borrowers_update(id, &data).await?;
        self.get_by_id(id).await
    }

    /// Delete a borrower. One with items on loan is kept unless `force` is set.
    pub async fn delete(&self, id: i32, force: bool) -> AppResult<()> {
        let deleted = self.repository.borrowers_delete(id, force).await?;
        tracing::info!("Borrower {} deleted", deleted.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ErrorCode};
    use crate::models::enums::BorrowerRole;
    use crate::services::clock::MockClock;
    use tokio_test::assert_ok;

    fn service() -> BorrowersService {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut clock = MockClock::new();
        clock.expect_today().return_const(today);
        BorrowersService::new(Repository::seeded(today), Arc::new(clock))
    }

    #[tokio::test]
    async fn counts_are_derived_from_transactions() {
        let rows = service().list(&BorrowerQuery::default()).await;
        let counts: Vec<(&str, i64, i64)> = rows
            .iter()
            .map(|b| (b.name.as_str(), b.borrowed, b.overdue))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("Juan Dela Cruz", 1, 1),
                ("Maria Santos", 2, 0),
                ("Pedro Reyes", 1, 1),
                ("Ana Garcia", 1, 0),
                ("Carlos Mendoza", 0, 0),
            ]
        );
    }

    #[tokio::test]
    async fn role_filter_and_search_combine() {
        let rows = service()
            .list(&BorrowerQuery {
                search: Some("a".to_string()),
                role: Some(BorrowerRole::Faculty),
            })
            .await;
        let names: Vec<&str> = rows.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Maria Santos", "Carlos Mendoza"]);
    }

    #[tokio::test]
    async fn borrower_with_loans_is_protected() {
        let svc = service();
        assert!(svc.delete(2, false).await.is_err());
        assert!(svc.delete(5, false).await.is_ok());
        assert!(svc.delete(2, true).await.is_ok());
    }

    #[tokio::test]
    async fn borrower_with_loans_keeps_their_name() {
        let svc = service();
        let rename = UpdateBorrower {
            name: Some("Maria S. Santos".to_string()),
            role: None,
        };
        assert!(matches!(
            svc.update(2, rename).await,
            Err(AppError::BusinessRule(ErrorCode::BorrowerHasLoans, _))
        ));

        let recase = UpdateBorrower {
            name: Some("MARIA SANTOS".to_string()),
            role: Some(BorrowerRole::Staff),
        };
        let updated = assert_ok!(svc.update(2, recase).await);
        assert_eq!(updated.borrowed, 2);
        assert_eq!(updated.role, BorrowerRole::Staff);

        let rename = UpdateBorrower {
            name: Some("Carlos M. Mendoza".to_string()),
            role: None,
        };
        assert_eq!(assert_ok!(svc.update(5, rename).await).name, "Carlos M. Mendoza");
    }

    #[tokio::test]
    async fn new_borrower_gets_next_id() {
        let created = service()
            .create(CreateBorrower {
                name: "Rosa Lim".to_string(),
                role: BorrowerRole::Staff,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 6);
        assert_eq!(created.borrowed, 0);
    }

    #[tokio::test]
    async fn loans_list_active_transactions_only() {
        let loans = service().loans(4).await.unwrap();
        let ids: Vec<i32> = loans.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5]);
    }
}
