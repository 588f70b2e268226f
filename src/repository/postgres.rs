//! PostgreSQL-backed book and user stores

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Book, User},
};

use super::{BookStore, UserStore};

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn find(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn borrowed_by(&self, card_number: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE borrow_by = $1 ORDER BY id",
        )
        .bind(card_number)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn mark_borrowed(&self, id: i32, card_number: &str) -> AppResult<Book> {
        // Conditional update: only an unborrowed row matches, so two
        // concurrent borrows of one book cannot both succeed.
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET is_borrowed = TRUE, borrow_by = $2
            WHERE id = $1 AND borrow_by = ''
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(card_number)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(book) => Ok(book),
            None => match self.find(id).await? {
                Some(_) => Err(AppError::Conflict(format!(
                    "Book {} is already borrowed",
                    id
                ))),
                None => Err(AppError::NotFound(format!("Book {} not found", id))),
            },
        }
    }

    async fn mark_returned(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET is_borrowed = FALSE, borrow_by = ''
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: Pool<Postgres>,
}

impl PgUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_card(&self, card_number: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE card_number = $1 LIMIT 1",
        )
        .bind(card_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
