//! Business logic services

pub mod auth;
pub mod books;
pub mod borrowers;
pub mod clock;
pub mod equipment;
pub mod projects;
pub mod reports;
pub mod settings;
pub mod stats;
pub mod transactions;

use std::sync::Arc;

use crate::{config::AppConfig, repository::Repository};

use self::clock::Clock;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
    pub equipment: equipment::EquipmentService,
    pub transactions: transactions::TransactionsService,
    pub borrowers: borrowers::BorrowersService,
    pub projects: projects::ProjectsService,
    pub reports: reports::ReportsService,
    pub stats: stats::StatsService,
    pub settings: settings::SettingsService,
}

impl Services {
    /// Create all services over the same repository and clock
    pub fn new(repository: Repository, config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), config.auth.clone()),
            books: books::BooksService::new(repository.clone(), clock.clone()),
            equipment: equipment::EquipmentService::new(repository.clone(), clock.clone()),
            transactions: transactions::TransactionsService::new(
                repository.clone(),
                clock.clone(),
                config.inventory.loan_duration_days,
            ),
            borrowers: borrowers::BorrowersService::new(repository.clone(), clock.clone()),
            projects: projects::ProjectsService::new(repository.clone(), clock.clone()),
            reports: reports::ReportsService::new(repository.clone(), clock.clone()),
            stats: stats::StatsService::new(
                repository.clone(),
                clock,
                config.inventory.recent_transactions,
            ),
            settings: settings::SettingsService::new(repository),
        }
    }
}
