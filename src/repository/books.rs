//! Books repository

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::{
        book::{Book, CreateBook, UpdateBook},
        enums::TransactionType,
        search::same_key,
    },
};

use super::{
    store::{next_id, Table},
    transactions::{close_loans, ensure_renumberable, on_loan},
    Repository,
};

#[derive(Clone, Default)]
pub struct BooksRepository {
    table: Table<Book>,
}

impl BooksRepository {
    pub fn new(rows: Vec<Book>) -> Self {
        Self { table: Table::new(rows) }
    }

    pub fn table(&self) -> &Table<Book> {
        &self.table
    }

    /// List all books in insertion order
    pub async fn list(&self) -> Vec<Book> {
        self.table.list().await
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.table.get(id).await.ok_or_else(|| not_found(id))
    }

    /// Create a book; the book number must be unique
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut rows = self.table.write().await;

        if rows.iter().any(|b| same_key(&b.book_no, &data.book_no)) {
            return Err(AppError::Conflict(format!(
                "Book number {} already exists",
                data.book_no
            )));
        }

        let book = Book {
            id: next_id(&rows),
            book_no: data.book_no.trim().to_string(),
            title: data.title.trim().to_string(),
            author: data.author.trim().to_string(),
            location: data.location.trim().to_string(),
            year: data.year,
            status: data.status,
        };
        rows.push(book.clone());
        Ok(book)
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book with id {} not found", id))
}

impl Repository {
    /// Update a book. Its number cannot change while it is on loan.
    pub async fn books_update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let mut books = self.books.table().write().await;
        let transactions = self.transactions.table().read().await;

        if let Some(ref book_no) = data.book_no {
            if books.iter().any(|b| b.id != id && same_key(&b.book_no, book_no)) {
                return Err(AppError::Conflict(format!(
                    "Book number {} already exists",
                    book_no.trim()
                )));
            }
        }

        let book = books.iter_mut().find(|b| b.id == id).ok_or_else(|| not_found(id))?;
        ensure_renumberable(
            &transactions,
            TransactionType::Book,
            &book.book_no,
            data.book_no.as_ref(),
        )?;

        if let Some(ref v) = data.book_no {
            book.book_no = v.trim().to_string();
        }
        if let Some(ref v) = data.title {
            book.title = v.trim().to_string();
        }
        if let Some(ref v) = data.author {
            book.author = v.trim().to_string();
        }
        if let Some(ref v) = data.location {
            book.location = v.trim().to_string();
        }
        if let Some(v) = data.year {
            book.year = v;
        }

        Ok(book.clone())
    }

    /// Delete exactly the book with the given id.
    ///
    /// A book on loan is kept unless `force` is set; a forced delete closes
    /// its loan as returned on `today`. Returns the book and the number of
    /// loans closed.
    pub async fn books_delete(
        &self,
        id: i32,
        force: bool,
        today: NaiveDate,
    ) -> AppResult<(Book, usize)> {
        let mut books = self.books.table().write().await;
        let mut transactions = self.transactions.table().write().await;

        let pos = books.iter().position(|b| b.id == id).ok_or_else(|| not_found(id))?;
        let book_no = books[pos].book_no.clone();

        if !force && on_loan(&transactions, TransactionType::Book, &book_no) {
            return Err(AppError::BusinessRule(
                ErrorCode::ItemOnLoan,
                format!("Book {} is currently borrowed", book_no),
            ));
        }

        let closed = close_loans(&mut transactions, TransactionType::Book, &book_no, today);
        Ok((books.remove(pos), closed))
    }
}
