//! Card-number authentication service
//!
//! Identity is a bare card-number lookup; there is no password or
//! second factor.

use crate::{
    error::{AppError, AppResult},
    models::User,
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
}

impl AuthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Authenticate a card holder by exact card number match
    pub async fn login(&self, card_number: &str) -> AppResult<User> {
        let user = self
            .repository
            .users
            .find_by_card(card_number)
            .await?
            .ok_or_else(|| AppError::Authentication("Unknown card number".to_string()))?;

        tracing::info!(card_number = %user.card_number, "card holder signed in");
        Ok(user)
    }
}
