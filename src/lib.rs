//! Biblio Library Catalog
//!
//! A small library-catalog web application: server-rendered pages for
//! listing, borrowing and returning books, with cookie-session
//! authentication by library card number.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod session;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub sessions: Arc<dyn session::SessionStore>,
    pub renderer: Arc<dyn views::ViewRenderer>,
}
