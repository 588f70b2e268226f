//! Catalog queries

use crate::{error::AppResult, models::Book, repository::Repository};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// The whole catalog, in id order
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.all().await
    }

    /// Books currently held by the given card number
    pub async fn borrowed_by(&self, card_number: &str) -> AppResult<Vec<Book>> {
        self.repository.books.borrowed_by(card_number).await
    }
}
