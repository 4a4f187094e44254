//! Borrowers repository

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::{
        borrower::{Borrower, CreateBorrower, UpdateBorrower},
        search::same_key,
        transaction::Transaction,
    },
};

use super::{
    store::{next_id, Table},
    Repository,
};

#[derive(Clone, Default)]
pub struct BorrowersRepository {
    table: Table<Borrower>,
}

impl BorrowersRepository {
    pub fn new(rows: Vec<Borrower>) -> Self {
        Self { table: Table::new(rows) }
    }

    pub(super) fn table(&self) -> &Table<Borrower> {
        &self.table
    }

    pub async fn list(&self) -> Vec<Borrower> {
        self.table.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Borrower> {
        self.table.get(id).await.ok_or_else(|| not_found(id))
    }

    /// Create a borrower. Names identify borrowers on transactions, so they are unique.
    pub async fn create(&self, data: &CreateBorrower) -> AppResult<Borrower> {
        let mut rows = self.table.write().await;
        let name = data.name.trim();

        if rows.iter().any(|b| same_key(&b.name, name)) {
            return Err(AppError::Conflict(format!("Borrower {} already exists", name)));
        }

        let borrower = Borrower {
            id: next_id(&rows),
            name: name.to_string(),
            role: data.role,
        };
        rows.push(borrower.clone());
        Ok(borrower)
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Borrower with id {} not found", id))
}

fn open_loans(transactions: &[Transaction], name: &str) -> usize {
    transactions
        .iter()
        .filter(|t| t.is_active() && t.is_borrowed_by(name))
        .count()
}

impl Repository {
    /// Update a borrower. Renaming is refused while loans are open under the old name.
    pub async fn borrowers_update(&self, id: i32, data: &UpdateBorrower) -> AppResult<Borrower> {
        let transactions = self.transactions.table().read().await;
        let mut borrowers = self.borrowers.table.write().await;

        if let Some(ref name) = data.name {
            if borrowers.iter().any(|b| b.id != id && same_key(&b.name, name)) {
                return Err(AppError::Conflict(format!("Borrower {} already exists", name.trim())));
            }
        }

        let borrower = borrowers
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found(id))?;

        if let Some(ref name) = data.name {
            if !same_key(&borrower.name, name) && open_loans(&transactions, &borrower.name) > 0 {
                return Err(AppError::BusinessRule(
                    ErrorCode::BorrowerHasLoans,
                    format!("{} has items on loan and cannot be renamed", borrower.name),
                ));
            }
            borrower.name = name.trim().to_string();
        }
        if let Some(role) = data.role {
            borrower.role = role;
        }

        Ok(borrower.clone())
    }

    /// Delete a borrower. One with items on loan is kept unless `force` is set.
    pub async fn borrowers_delete(&self, id: i32, force: bool) -> AppResult<Borrower> {
        let transactions = self.transactions.table().read().await;
        let mut borrowers = self.borrowers.table.write().await;

        let pos = borrowers
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| not_found(id))?;

        let loans = open_loans(&transactions, &borrowers[pos].name);
        if loans > 0 && !force {
            return Err(AppError::BusinessRule(
                ErrorCode::BorrowerHasLoans,
                format!("{} still has {} item(s) on loan", borrowers[pos].name, loans),
            ));
        }

        Ok(borrowers.remove(pos))
    }
}
