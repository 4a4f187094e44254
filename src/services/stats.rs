//! Statistics service: dashboard cards and the analytics page

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::{
    api::stats::{
        AnalyticsResponse, CountCard, DashboardResponse, MonthlyEntry, StatEntry, TransactionStats,
    },
    models::{
        enums::{BorrowerRole, ItemStatus, TransactionType},
        search::{count_where, same_key},
        transaction::{Transaction, TransactionDetails},
    },
    repository::Repository,
    services::clock::Clock,
};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const TOP_BORROWERS: usize = 5;

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
    recent_transactions: usize,
}

impl StatsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>, recent_transactions: usize) -> Self {
        Self {
            repository,
            clock,
            recent_transactions,
        }
    }

    /// Summary cards and the most recent transactions, newest first
    pub async fn dashboard(&self) -> DashboardResponse {
        let today = self.clock.today();
        let books = self.repository.books.list().await;
        let ics = self.repository.ics.list().await;
        let par = self.repository.par.list().await;
        let transactions = self.repository.transactions.list().await;
        let borrowers = self.repository.borrowers.list().await;

        let equipment_available = count_where(&ics, |e| e.status == ItemStatus::Available)
            + count_where(&par, |e| e.status == ItemStatus::Available);
        let equipment_borrowed = count_where(&ics, |e| e.status == ItemStatus::Borrowed)
            + count_where(&par, |e| e.status == ItemStatus::Borrowed);

        DashboardResponse {
            books: CountCard {
                total: books.len() as i64,
                available: count_where(&books, |b| b.status == ItemStatus::Available),
                borrowed: count_where(&books, |b| b.status == ItemStatus::Borrowed),
            },
            equipment: CountCard {
                total: (ics.len() + par.len()) as i64,
                available: equipment_available,
                borrowed: equipment_borrowed,
            },
            transactions: TransactionStats {
                total: transactions.len() as i64,
                active: count_where(&transactions, Transaction::is_active),
                overdue: count_where(&transactions, |t| t.is_overdue(today)),
                returned: count_where(&transactions, |t| !t.is_active()),
            },
            borrowers: borrowers.len() as i64,
            recent_transactions: transactions
                .iter()
                .rev()
                .take(self.recent_transactions)
                .map(|t| TransactionDetails::new(t, today))
                .collect(),
        }
    }

    /// Borrowing activity for one calendar year (current year by default)
    pub async fn analytics(&self, year: Option<i32>) -> AnalyticsResponse {
        let today = self.clock.today();
        let year = year.unwrap_or_else(|| today.year());

        let transactions = self.repository.transactions.list().await;
        let roles: HashMap<String, BorrowerRole> = self
            .repository
            .borrowers
            .list()
            .await
            .into_iter()
            .map(|b| (b.name.trim().to_lowercase(), b.role))
            .collect();

        let in_year = |date: NaiveDate| date.year() == year;

        let mut monthly: Vec<MonthlyEntry> = MONTHS
            .iter()
            .map(|month| MonthlyEntry {
                month: month.to_string(),
                ..Default::default()
            })
            .collect();

        for t in &transactions {
            if in_year(t.borrow_date) {
                let entry = &mut monthly[t.borrow_date.month0() as usize];
                entry.borrowed += 1;
                match t.transaction_type {
                    TransactionType::Book => entry.books += 1,
                    TransactionType::Equipment => entry.equipment += 1,
                }
            }
            if let Some(returned) = t.return_date.filter(|d| in_year(*d)) {
                monthly[returned.month0() as usize].returned += 1;
            }
        }

        let borrowed: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| in_year(t.borrow_date))
            .collect();

        let by_type = [TransactionType::Book, TransactionType::Equipment]
            .into_iter()
            .map(|kind| StatEntry {
                label: kind.to_string(),
                value: borrowed.iter().filter(|t| t.transaction_type == kind).count() as i64,
            })
            .collect();

        let role_of = |t: &Transaction| roles.get(&t.borrower.trim().to_lowercase()).copied();
        let mut by_role: Vec<StatEntry> = BorrowerRole::ALL
            .into_iter()
            .map(|role| StatEntry {
                label: role.to_string(),
                value: borrowed.iter().filter(|t| role_of(t) == Some(role)).count() as i64,
            })
            .collect();
        let unregistered = borrowed.iter().filter(|t| role_of(t).is_none()).count() as i64;
        if unregistered > 0 {
            by_role.push(StatEntry {
                label: "Unregistered".to_string(),
                value: unregistered,
            });
        }

        AnalyticsResponse {
            year,
            total_borrowed: borrowed.len() as i64,
            total_returned: monthly.iter().map(|m| m.returned).sum(),
            monthly,
            by_type,
            by_role,
            top_borrowers: top_borrowers(&borrowed, TOP_BORROWERS),
        }
    }
}

/// Borrowers ranked by number of loans; ties keep first-seen order
fn top_borrowers(transactions: &[&Transaction], limit: usize) -> Vec<StatEntry> {
    let mut ranking: Vec<StatEntry> = Vec::new();
    for t in transactions {
        match ranking
            .iter_mut()
            .find(|e| same_key(&e.label, &t.borrower))
        {
            Some(entry) => entry.value += 1,
            None => ranking.push(StatEntry {
                label: t.borrower.clone(),
                value: 1,
            }),
        }
    }
    ranking.sort_by(|a, b| b.value.cmp(&a.value));
    ranking.truncate(limit);
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::CreateTransaction;
    use crate::services::{clock::MockClock, transactions::TransactionsService};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
    }

    fn clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_today().return_const(today());
        Arc::new(clock)
    }

    #[tokio::test]
    async fn dashboard_counts_match_the_tables() {
        let repository = Repository::seeded(today());
        let dashboard = StatsService::new(repository, clock(), 5).dashboard().await;

        assert_eq!(dashboard.books.total, 8);
        assert_eq!(dashboard.books.borrowed, 3);
        assert_eq!(dashboard.books.available, 5);
        assert_eq!(dashboard.equipment.total, 7);
        assert_eq!(dashboard.equipment.borrowed, 2);
        assert_eq!(dashboard.transactions.active, 5);
        assert_eq!(dashboard.transactions.overdue, 2);
        assert_eq!(dashboard.borrowers, 5);
    }

    #[tokio::test]
    async fn recent_transactions_are_newest_first() {
        let dashboard = StatsService::new(Repository::seeded(today()), clock(), 5)
            .dashboard()
            .await;
        let ids: Vec<i32> = dashboard.recent_transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }

    #[tokio::test]
    async fn dashboard_follows_a_new_borrow() {
        let repository = Repository::seeded(today());
        let stats = StatsService::new(repository.clone(), clock(), 5);
        let transactions = TransactionsService::new(repository, clock(), 7);

        transactions
            .borrow(CreateTransaction {
                transaction_type: TransactionType::Book,
                item_no: "B1003".to_string(),
                description: None,
                borrower: "Carlos Mendoza".to_string(),
                borrow_date: None,
                due_date: None,
            })
            .await
            .unwrap();

        let dashboard = stats.dashboard().await;
        assert_eq!(dashboard.books.borrowed, 4);
        assert_eq!(dashboard.transactions.active, 6);
        assert_eq!(dashboard.recent_transactions[0].item_no, "B1003");
    }

    #[tokio::test]
    async fn analytics_buckets_by_month() {
        let analytics = StatsService::new(Repository::seeded(today()), clock(), 5)
            .analytics(None)
            .await;

        assert_eq!(analytics.year, 2024);
        assert_eq!(analytics.monthly.len(), 12);
        assert_eq!(analytics.total_borrowed, 7);
        assert_eq!(analytics.total_returned, 2);

        let borrowed_by_month: i64 = analytics.monthly.iter().map(|m| m.borrowed).sum();
        assert_eq!(borrowed_by_month, 7);

        let by_type: Vec<(&str, i64)> = analytics
            .by_type
            .iter()
            .map(|e| (e.label.as_str(), e.value))
            .collect();
        assert_eq!(by_type, vec![("Book", 4), ("Equipment", 3)]);

        let faculty = analytics.by_role.iter().find(|e| e.label == "Faculty").unwrap();
        assert_eq!(faculty.value, 3);
        assert_eq!(analytics.top_borrowers[0].label, "Maria Santos");
    }

    #[tokio::test]
    async fn analytics_for_an_empty_year() {
        let analytics = StatsService::new(Repository::seeded(today()), clock(), 5)
            .analytics(Some(2001))
            .await;
        assert_eq!(analytics.total_borrowed, 0);
        assert!(analytics.top_borrowers.is_empty());
        assert!(analytics.monthly.iter().all(|m| m.borrowed == 0 && m.returned == 0));
    }
}
