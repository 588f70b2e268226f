//! Book (catalog entry) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog entry. `is_borrowed` and `borrow_by` move together:
/// `is_borrowed` is true exactly when `borrow_by` holds a card number.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub author: String,
    pub title: String,
    pub is_borrowed: bool,
    /// Card number of the current borrower, empty string when on the shelf
    pub borrow_by: String,
    /// URL or path of a cover photo
    pub img: String,
    pub description: String,
}

impl Book {
    /// Whether the book is on the shelf and can be borrowed
    pub fn is_available(&self) -> bool {
        self.borrow_by.is_empty()
    }
}
