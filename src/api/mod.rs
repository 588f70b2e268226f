//! HTTP surface: session extractor, page handlers and router

pub mod health;
pub mod pages;

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tower_http::trace::TraceLayer;

use crate::{
    error::{AppError, AppResult},
    session::{self, SessionData},
    AppState,
};

/// Per-request session state, loaded from the signed session cookie
pub struct SessionCtx {
    pub id: String,
    pub data: SessionData,
    /// True when this request minted a new session id
    fresh: bool,
    store: Arc<dyn session::SessionStore>,
    cookie_name: String,
    secret: String,
}

impl SessionCtx {
    /// Persist the current session data under this session's key
    pub async fn save(&self) -> AppResult<()> {
        self.store.set(&self.id, &self.data).await
    }

    /// Drop the session record and reset to an anonymous state
    pub async fn destroy(&mut self) -> AppResult<()> {
        self.store.destroy(&self.id).await?;
        self.data = SessionData::new();
        Ok(())
    }

    /// Wrap a response, attaching the session cookie when the session
    /// is new to this browser
    pub fn respond(&self, inner: impl IntoResponse) -> Response {
        let mut response = inner.into_response();
        if self.fresh {
            let cookie = Cookie::build((
                self.cookie_name.clone(),
                session::cookie_value(&self.id, &self.secret),
            ))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
            if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }
        response
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionCtx {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let settings = &state.config.session;
        let jar = CookieJar::from_headers(&parts.headers);

        if let Some(cookie) = jar.get(&settings.cookie_name) {
            if let Some(id) = session::verify_cookie_value(cookie.value(), &settings.secret) {
                if let Some(data) = state.sessions.get(&id).await? {
                    return Ok(Self {
                        id,
                        data,
                        fresh: false,
                        store: state.sessions.clone(),
                        cookie_name: settings.cookie_name.clone(),
                        secret: settings.secret.clone(),
                    });
                }
            }
        }

        // Missing, unsigned or expired cookie: start an anonymous session
        Ok(Self {
            id: session::new_session_id(),
            data: SessionData::new(),
            fresh: true,
            store: state.sessions.clone(),
            cookie_name: settings.cookie_name.clone(),
            secret: settings.secret.clone(),
        })
    }
}

/// Build the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/borrow/:id", post(pages::borrow_book))
        .route("/login", get(pages::login_page).post(pages::login_submit))
        .route("/profile", get(pages::profile))
        .route("/return/:id", post(pages::return_book))
        .route("/logout", post(pages::logout))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
