//! Book model and related types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::ItemStatus;
use super::search::Searchable;

/// Library book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    /// Shelf identifier printed on the book (e.g. "B1002")
    pub book_no: String,
    pub title: String,
    pub author: String,
    /// Shelf or room where the book is kept
    pub location: String,
    /// Publication year
    pub year: i32,
    pub status: ItemStatus,
}

impl Searchable for Book {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.author, &self.book_no]
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Book number is required"))]
    pub book_no: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(range(min = 1000, max = 9999, message = "Year must have four digits"))]
    pub year: i32,
    /// Only `Available` is accepted; books become borrowed through a transaction
    #[serde(default)]
    pub status: ItemStatus,
}

/// Update book request. Status follows the borrowing transactions.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Book number cannot be empty"))]
    pub book_no: Option<String>,
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: Option<String>,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: Option<String>,
    #[validate(range(min = 1000, max = 9999, message = "Year must have four digits"))]
    pub year: Option<i32>,
}

/// Book list filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Matches title, author or book number
    pub search: Option<String>,
    pub status: Option<ItemStatus>,
}
