//! Borrowing transactions.
//!
//! Borrow, return and delete change both the transaction table and the
//! status of the referenced item. Every operation spanning several tables
//! takes its locks in one fixed order: books, ICS, PAR, transactions,
//! borrowers. An item is `Borrowed` exactly when one active transaction
//! holds it.

use chrono::NaiveDate;

use super::{
    store::{next_id, Table},
    Repository,
};
use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::{
        book::Book,
        enums::{ItemStatus, TransactionStatus, TransactionType},
        equipment::{IcsEquipment, ParEquipment},
        search::same_key,
        transaction::{CreateTransaction, Transaction},
    },
};

#[derive(Clone, Default)]
pub struct TransactionsRepository {
    table: Table<Transaction>,
}

impl TransactionsRepository {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { table: Table::new(rows) }
    }

    pub async fn list(&self) -> Vec<Transaction> {
        self.table.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Transaction> {
        self.table
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Transaction with id {} not found", id)))
    }

    pub(super) fn table(&self) -> &Table<Transaction> {
        &self.table
    }
}

/// Whether an active transaction holds the item
pub(super) fn on_loan(transactions: &[Transaction], kind: TransactionType, item_no: &str) -> bool {
    transactions.iter().any(|t| t.holds(kind, item_no))
}

/// Refuse to renumber an item while a loan refers to it by its current number
pub(super) fn ensure_renumberable(
    transactions: &[Transaction],
    kind: TransactionType,
    current: &str,
    requested: Option<&String>,
) -> AppResult<()> {
    match requested {
        Some(new_no) if !same_key(current, new_no) && on_loan(transactions, kind, current) => {
            Err(AppError::BusinessRule(
                ErrorCode::ItemOnLoan,
                format!("{} is on loan and cannot be renumbered", current),
            ))
        }
        _ => Ok(()),
    }
}

/// Close every open loan of a removed item as returned on `today`.
/// Returns how many were closed.
pub(super) fn close_loans(
    transactions: &mut [Transaction],
    kind: TransactionType,
    item_no: &str,
    today: NaiveDate,
) -> usize {
    let mut closed = 0;
    for transaction in transactions.iter_mut().filter(|t| t.holds(kind, item_no)) {
        transaction.status = TransactionStatus::Returned;
        transaction.return_date = Some(today);
        closed += 1;
    }
    closed
}

/// Mutable view of the item a transaction points to
struct ItemSlot<'a> {
    item_no: String,
    label: String,
    status: &'a mut ItemStatus,
}

fn find_item<'a>(
    books: &'a mut [Book],
    ics: &'a mut [IcsEquipment],
    par: &'a mut [ParEquipment],
    kind: TransactionType,
    item_no: &str,
) -> Option<ItemSlot<'a>> {
    match kind {
        TransactionType::Book => books
            .iter_mut()
            .find(|b| same_key(&b.book_no, item_no))
            .map(|b| ItemSlot {
                item_no: b.book_no.clone(),
                label: b.title.clone(),
                status: &mut b.status,
            }),
        TransactionType::Equipment => {
            if let Some(e) = ics
                .iter_mut()
                .find(|e| same_key(&e.inventory_item_no, item_no))
            {
                return Some(ItemSlot {
                    item_no: e.inventory_item_no.clone(),
                    label: e.description.clone(),
                    status: &mut e.status,
                });
            }
            par.iter_mut()
                .find(|e| same_key(&e.property_no, item_no))
                .map(|e| ItemSlot {
                    item_no: e.property_no.clone(),
                    label: e.description.clone(),
                    status: &mut e.status,
                })
        }
    }
}

impl Repository {
    /// Record a borrow and mark the item as borrowed. The borrower must be
    /// registered; the transaction stores the name as registered.
    pub async fn transactions_borrow(
        &self,
        data: &CreateTransaction,
        borrow_date: NaiveDate,
        due_date: NaiveDate,
    ) -> AppResult<Transaction> {
        let mut books = self.books.table().write().await;
        let mut ics = self.ics.table().write().await;
        let mut par = self.par.table().write().await;
        let mut transactions = self.transactions.table.write().await;
        let borrowers = self.borrowers.table().read().await;

        let borrower = borrowers
            .iter()
            .find(|b| same_key(&b.name, &data.borrower))
            .map(|b| b.name.clone())
            .ok_or_else(|| {
                AppError::NotFound(format!("Borrower {} is not registered", data.borrower.trim()))
            })?;

        let slot = find_item(&mut books, &mut ics, &mut par, data.transaction_type, &data.item_no)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} with number {} not found",
                    data.transaction_type, data.item_no
                ))
            })?;

        if *slot.status == ItemStatus::Borrowed {
            return Err(AppError::BusinessRule(
                ErrorCode::ItemNotAvailable,
                format!("{} is already borrowed", slot.item_no),
            ));
        }

        let description = data
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or(slot.label);

        let transaction = Transaction {
            id: next_id(&transactions),
            transaction_type: data.transaction_type,
            item_no: slot.item_no,
            description,
            borrower,
            borrow_date,
            due_date,
            return_date: None,
            status: TransactionStatus::Borrowed,
        };

        *slot.status = ItemStatus::Borrowed;
        transactions.push(transaction.clone());

        Ok(transaction)
    }

    /// Close a transaction and release its item
    pub async fn transactions_return(&self, id: i32, return_date: NaiveDate) -> AppResult<Transaction> {
        let mut books = self.books.table().write().await;
        let mut ics = self.ics.table().write().await;
        let mut par = self.par.table().write().await;
        let mut transactions = self.transactions.table.write().await;

        let transaction = transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Transaction with id {} not found", id)))?;

        if !transaction.is_active() {
            return Err(AppError::BusinessRule(
                ErrorCode::AlreadyReturned,
                "Transaction already returned".to_string(),
            ));
        }

        transaction.status = TransactionStatus::Returned;
        transaction.return_date = Some(return_date);

        match find_item(
            &mut books,
            &mut ics,
            &mut par,
            transaction.transaction_type,
            &transaction.item_no,
        ) {
            Some(slot) => *slot.status = ItemStatus::Available,
            None => tracing::warn!(
                "Returned transaction {} references missing item {}",
                id,
                transaction.item_no
            ),
        }

        Ok(transaction.clone())
    }

    /// Delete a transaction; an active one releases its item first
    pub async fn transactions_delete(&self, id: i32) -> AppResult<Transaction> {
        let mut books = self.books.table().write().await;
        let mut ics = self.ics.table().write().await;
        let mut par = self.par.table().write().await;
        let mut transactions = self.transactions.table.write().await;

        let pos = transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Transaction with id {} not found", id)))?;
        let transaction = transactions.remove(pos);

        if transaction.is_active() {
            if let Some(slot) = find_item(
                &mut books,
                &mut ics,
                &mut par,
                transaction.transaction_type,
                &transaction.item_no,
            ) {
                *slot.status = ItemStatus::Available;
            }
        }

        Ok(transaction)
    }
}
