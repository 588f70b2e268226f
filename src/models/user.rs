//! Library card holder model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered card holder. The card number is the sole credential and is
/// treated as a lookup key; the schema does not enforce uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub card_number: String,
    pub name: String,
}
