//! Borrow/return workflow

use crate::{
    config::CirculationConfig,
    error::{AppError, AppResult},
    models::Book,
    repository::Repository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
    config: CirculationConfig,
}

impl CirculationService {
    pub fn new(repository: Repository, config: CirculationConfig) -> Self {
        Self { repository, config }
    }

    /// Borrow a book for the given card number.
    ///
    /// The store rejects the update when the book already has a borrower
    /// (`AppError::Conflict`) or does not exist (`AppError::NotFound`).
    pub async fn borrow(&self, book_id: i32, card_number: &str) -> AppResult<Book> {
        let book = self.repository.books.mark_borrowed(book_id, card_number).await?;
        tracing::info!(book_id, card_number, "book borrowed");
        Ok(book)
    }

    /// Return a book to the shelf.
    ///
    /// `caller_card` is the card number of the requesting session, if any.
    /// With `enforce_return_ownership` off (the default) anyone may return
    /// any book; with it on, only the current borrower may.
    pub async fn return_book(&self, book_id: i32, caller_card: Option<&str>) -> AppResult<Book> {
        if self.config.enforce_return_ownership {
            let book = self
                .repository
                .books
                .find(book_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))?;
            if book.borrow_by != caller_card.unwrap_or("") {
                return Err(AppError::Authorization(
                    "Only the current borrower may return this book".to_string(),
                ));
            }
        }

        let book = self.repository.books.mark_returned(book_id).await?;
        tracing::info!(book_id, "book returned");
        Ok(book)
    }
}
