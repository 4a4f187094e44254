//! RIC-XI Inventory System
//!
//! REST JSON server for a campus inventory: books, ICS and PAR equipment,
//! borrowing transactions, borrowers, and research/extension project files.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire the services over a repository
    pub fn new(config: AppConfig, repository: repository::Repository, clock: Arc<dyn services::clock::Clock>) -> Self {
        let services = services::Services::new(repository, &config, clock);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
