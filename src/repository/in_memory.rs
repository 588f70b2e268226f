//! In-memory book and user stores, used by the test suite and as a
//! database-free backend for local experiments

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::{Book, User},
};

use super::{BookStore, UserStore};

#[derive(Default)]
pub struct InMemoryBookStore {
    books: Mutex<BTreeMap<i32, Book>>,
}

impl InMemoryBookStore {
    /// Add a book with explicit state, returning its assigned id
    pub async fn insert(
        &self,
        author: &str,
        title: &str,
        borrow_by: &str,
        img: &str,
        description: &str,
    ) -> i32 {
        let mut books = self.books.lock().await;
        let id = books.keys().next_back().copied().unwrap_or(0) + 1;
        books.insert(
            id,
            Book {
                id,
                author: author.to_string(),
                title: title.to_string(),
                is_borrowed: !borrow_by.is_empty(),
                borrow_by: borrow_by.to_string(),
                img: img.to_string(),
                description: description.to_string(),
            },
        );
        id
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn all(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.lock().await.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.books.lock().await.get(&id).cloned())
    }

    async fn borrowed_by(&self, card_number: &str) -> AppResult<Vec<Book>> {
        Ok(self
            .books
            .lock()
            .await
            .values()
            .filter(|b| b.borrow_by == card_number)
            .cloned()
            .collect())
    }

    async fn mark_borrowed(&self, id: i32, card_number: &str) -> AppResult<Book> {
        let mut books = self.books.lock().await;
        let book = books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        if !book.borrow_by.is_empty() {
            return Err(AppError::Conflict(format!("Book {} is already borrowed", id)));
        }
        book.is_borrowed = true;
        book.borrow_by = card_number.to_string();
        Ok(book.clone())
    }

    async fn mark_returned(&self, id: i32) -> AppResult<Book> {
        let mut books = self.books.lock().await;
        let book = books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        book.is_borrowed = false;
        book.borrow_by.clear();
        Ok(book.clone())
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub async fn insert(&self, card_number: &str, name: &str) {
        let mut users = self.users.lock().await;
        let id = users.len() as i32 + 1;
        users.push(User {
            id,
            card_number: card_number.to_string(),
            name: name.to_string(),
        });
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_card(&self, card_number: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|u| u.card_number == card_number)
            .cloned())
    }
}
