//! Repository layer over the in-memory tables

pub mod books;
pub mod borrowers;
pub mod equipment;
pub mod preferences;
pub mod projects;
pub mod seed;
pub mod store;
pub mod transactions;

/// All tables of the inventory. Clones share the same data.
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub ics: equipment::IcsRepository,
    pub par: equipment::ParRepository,
    pub transactions: transactions::TransactionsRepository,
    pub borrowers: borrowers::BorrowersRepository,
    pub projects: projects::ProjectsRepository,
    pub preferences: preferences::PreferencesRepository,
    pub sessions: preferences::SessionsRepository,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}
