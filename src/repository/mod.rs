//! Repository layer for document store operations

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, User},
};

pub use in_memory::{InMemoryBookStore, InMemoryUserStore};
pub use postgres::{PgBookStore, PgUserStore};

/// Store of book records. Borrow/return are the only mutations; both keep
/// `is_borrowed` and `borrow_by` in lockstep.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, in id order
    async fn all(&self) -> AppResult<Vec<Book>>;

    /// Book by id, `None` when absent
    async fn find(&self, id: i32) -> AppResult<Option<Book>>;

    /// Books currently held by the given card number
    async fn borrowed_by(&self, card_number: &str) -> AppResult<Vec<Book>>;

    /// Record a borrow. Fails with `AppError::Conflict` if the book already
    /// has a borrower and `AppError::NotFound` if the id is unknown.
    async fn mark_borrowed(&self, id: i32, card_number: &str) -> AppResult<Book>;

    /// Put a book back on the shelf. Fails with `AppError::NotFound` if the
    /// id is unknown; clearing an unborrowed book is a no-op.
    async fn mark_returned(&self, id: i32) -> AppResult<Book>;
}

/// Store of card holder records (read-only from the service's perspective)
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Card holder by exact card number match
    async fn find_by_card(&self, card_number: &str) -> AppResult<Option<User>>;
}

/// Main repository struct aggregating the per-collection stores
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub users: Arc<dyn UserStore>,
}

impl Repository {
    pub fn new(books: Arc<dyn BookStore>, users: Arc<dyn UserStore>) -> Self {
        Self { books, users }
    }

    /// Repository backed by a PostgreSQL pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PgBookStore::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool)),
        }
    }
}
