//! Borrower (registered user) model and related types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::BorrowerRole;
use super::search::Searchable;

/// Registered borrower as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Borrower {
    pub id: i32,
    pub name: String,
    pub role: BorrowerRole,
}

impl Searchable for Borrower {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }
}

/// Borrower with loan counts derived from the transaction table
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowerDetails {
    pub id: i32,
    pub name: String,
    pub role: BorrowerRole,
    /// Items currently borrowed
    pub borrowed: i64,
    /// Borrowed items past their due date
    pub overdue: i64,
}

/// Create borrower request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBorrower {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub role: BorrowerRole,
}

/// Update borrower request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBorrower {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub role: Option<BorrowerRole>,
}

/// Borrower list filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BorrowerQuery {
    /// Matches the borrower name
    pub search: Option<String>,
    pub role: Option<BorrowerRole>,
}
