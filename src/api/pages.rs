//! Page handlers
//!
//! Workflow errors (unknown book, not logged in, bad card number) render
//! the error view with a user-facing message, as the pages are the only
//! interface. Store failures propagate to [`AppError`] and become a
//! generic 500 page.

use axum::{
    extract::{Path, State},
    response::{Html, Redirect, Response},
    Form,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    views::{View, ViewContext},
    AppState,
};

use super::SessionCtx;

fn error_page(state: &AppState, session: &SessionCtx, message: &str) -> AppResult<Response> {
    let mut ctx =
        ViewContext::with_session(session.data.logged_in, session.data.username.clone());
    ctx.message = Some(message.to_string());
    let page = state.renderer.render(View::Error, &ctx)?;
    Ok(session.respond(Html(page)))
}

/// `GET /` - the catalog, public, personalized when logged in
pub async fn home(State(state): State<AppState>, session: SessionCtx) -> AppResult<Response> {
    let books = state.services.catalog.list_books().await?;

    if books.is_empty() {
        return error_page(&state, &session, "No more books available");
    }

    let mut ctx =
        ViewContext::with_session(session.data.logged_in, session.data.username.clone());
    ctx.books = books;
    let page = state.renderer.render(View::Home, &ctx)?;
    Ok(session.respond(Html(page)))
}

/// `POST /borrow/:id` - borrow a book onto the session's card
pub async fn borrow_book(
    State(state): State<AppState>,
    session: SessionCtx,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    if !session.data.logged_in {
        return error_page(&state, &session, "Please log in to borrow this book");
    }

    let card_number = session.data.card_number.clone().unwrap_or_default();

    match state.services.circulation.borrow(id, &card_number).await {
        Ok(_) => Ok(session.respond(Redirect::to("/"))),
        Err(AppError::NotFound(_)) => {
            error_page(&state, &session, "This book is cannot be found")
        }
        Err(AppError::Conflict(_)) => {
            error_page(&state, &session, "This book is already borrowed")
        }
        Err(e) => Err(e),
    }
}

/// `GET /login` - login form, shown to everyone
pub async fn login_page(
    State(state): State<AppState>,
    session: SessionCtx,
) -> AppResult<Response> {
    let ctx = ViewContext::with_session(session.data.logged_in, session.data.username.clone());
    let page = state.renderer.render(View::Login, &ctx)?;
    Ok(session.respond(Html(page)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(rename = "cardNum")]
    #[validate(length(min = 1))]
    pub card_num: String,
}

/// `POST /login` - authenticate by card number alone
pub async fn login_submit(
    State(state): State<AppState>,
    mut session: SessionCtx,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if form.validate().is_err() {
        return error_page(&state, &session, "Invalid Card Number");
    }

    match state.services.auth.login(&form.card_num).await {
        Ok(user) => {
            session.data.logged_in = true;
            session.data.username = Some(user.name);
            session.data.card_number = Some(user.card_number);
            session.save().await?;
            Ok(session.respond(Redirect::to("/")))
        }
        Err(AppError::Authentication(_)) => {
            error_page(&state, &session, "Invalid Card Number")
        }
        Err(e) => Err(e),
    }
}

/// `GET /profile` - the session's borrowed books
pub async fn profile(State(state): State<AppState>, session: SessionCtx) -> AppResult<Response> {
    if !session.data.logged_in {
        return error_page(&state, &session, "Please log in to see your profile");
    }

    let card_number = session.data.card_number.clone().unwrap_or_default();
    let books = state.services.catalog.borrowed_by(&card_number).await?;

    if books.is_empty() {
        return error_page(&state, &session, "You are not borrowing any books");
    }

    let mut ctx =
        ViewContext::with_session(session.data.logged_in, session.data.username.clone());
    ctx.books = books;
    let page = state.renderer.render(View::Profile, &ctx)?;
    Ok(session.respond(Html(page)))
}

/// `POST /return/:id` - put a book back on the shelf.
///
/// No login required by default; see `circulation.enforce_return_ownership`.
pub async fn return_book(
    State(state): State<AppState>,
    session: SessionCtx,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let caller_card = session.data.card_number.as_deref();

    match state.services.circulation.return_book(id, caller_card).await {
        Ok(_) => {
            let mut ctx =
                ViewContext::with_session(session.data.logged_in, session.data.username.clone());
            ctx.message = Some("You have returned sucessfully".to_string());
            ctx.success = true;
            let page = state.renderer.render(View::Error, &ctx)?;
            Ok(session.respond(Html(page)))
        }
        Err(AppError::NotFound(_)) => error_page(
            &state,
            &session,
            "Something went wrong, this book cannot be found!",
        ),
        Err(AppError::Authorization(_)) => error_page(
            &state,
            &session,
            "You can only return a book you have borrowed",
        ),
        Err(e) => Err(e),
    }
}

/// `POST /logout` - destroy the session record
pub async fn logout(State(state): State<AppState>, mut session: SessionCtx) -> AppResult<Response> {
    session.destroy().await?;
    let page = state.renderer.render(View::Logout, &ViewContext::default())?;
    Ok(session.respond(Html(page)))
}
