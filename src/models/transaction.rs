//! Borrowing transaction model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{TransactionStatus, TransactionType};
use super::search::{same_key, Searchable};

/// Borrowing transaction as stored
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i32,
    pub transaction_type: TransactionType,
    /// Book number, ICS inventory item number or PAR property number
    pub item_no: String,
    pub description: String,
    /// Borrower name, matched against registered borrowers by name
    pub borrower: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn is_active(&self) -> bool {
        self.status == TransactionStatus::Borrowed
    }

    /// Whole days past the due date as of `today`; zero when returned or not yet due
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        if !self.is_active() {
            return 0;
        }
        crate::services::clock::days_overdue(self.due_date, today)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.days_overdue(today) > 0
    }

    pub fn is_borrowed_by(&self, name: &str) -> bool {
        same_key(&self.borrower, name)
    }

    /// Whether this is an open loan of the item numbered `item_no`
    pub fn holds(&self, kind: TransactionType, item_no: &str) -> bool {
        self.is_active() && self.transaction_type == kind && same_key(&self.item_no, item_no)
    }
}

impl Searchable for Transaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.item_no, &self.description, &self.borrower]
    }
}

/// Transaction with its overdue state computed for display
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub id: i32,
    pub transaction_type: TransactionType,
    pub item_no: String,
    pub description: String,
    pub borrower: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: TransactionStatus,
    pub is_overdue: bool,
    pub days_overdue: i64,
}

impl TransactionDetails {
    pub fn new(transaction: &Transaction, today: NaiveDate) -> Self {
        Self {
            id: transaction.id,
            transaction_type: transaction.transaction_type,
            item_no: transaction.item_no.clone(),
            description: transaction.description.clone(),
            borrower: transaction.borrower.clone(),
            borrow_date: transaction.borrow_date,
            due_date: transaction.due_date,
            return_date: transaction.return_date,
            status: transaction.status,
            is_overdue: transaction.is_overdue(today),
            days_overdue: transaction.days_overdue(today),
        }
    }
}

/// Borrow request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransaction {
    pub transaction_type: TransactionType,
    #[validate(length(min = 1, message = "Item number is required"))]
    pub item_no: String,
    /// Defaults to the item's title or description
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Borrower is required"))]
    pub borrower: String,
    /// Defaults to today
    pub borrow_date: Option<NaiveDate>,
    /// Defaults to borrow date plus the configured loan duration
    pub due_date: Option<NaiveDate>,
}

/// Transaction list filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionQuery {
    /// Matches item number, description or borrower
    pub search: Option<String>,
    pub status: Option<TransactionStatus>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// Only borrowed transactions past their due date
    #[serde(default)]
    pub overdue_only: bool,
}
