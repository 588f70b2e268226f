//! View selection and rendering seam
//!
//! Handlers pick a [`View`] and fill a [`ViewContext`]; turning that into
//! HTML is the renderer's job, behind [`ViewRenderer`] so a template engine
//! can be swapped in without touching the handlers. [`HtmlRenderer`] is the
//! built-in backend.

pub mod html;

use serde::Serialize;

use crate::{error::AppResult, models::Book};

pub use html::HtmlRenderer;

/// Named views of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    Profile,
    Error,
    Logout,
}

impl View {
    /// Template name for this view
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Login => "login",
            View::Profile => "profile",
            View::Error => "error",
            View::Logout => "logout",
        }
    }
}

/// Data handed to the renderer. Serializable so template-engine backends
/// can consume it as a plain data context.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ViewContext {
    pub is_logged_in: bool,
    pub username: Option<String>,
    pub books: Vec<Book>,
    pub message: Option<String>,
    pub success: bool,
}

impl ViewContext {
    /// Context carrying only the session display state
    pub fn with_session(is_logged_in: bool, username: Option<String>) -> Self {
        Self {
            is_logged_in,
            username,
            ..Self::default()
        }
    }
}

/// Renders a named view with its data context into an HTML page
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: View, ctx: &ViewContext) -> AppResult<String>;
}
