//! Cookie-backed session state
//!
//! A session is a small server-side record keyed by an opaque id carried in
//! a signed browser cookie. The store behind it is pluggable: in-memory by
//! default (session lifetime tied to server uptime), Redis when configured.

pub mod in_memory;
pub mod redis;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::AppResult;

pub use in_memory::InMemorySessionStore;
pub use redis::RedisSessionStore;

/// Server-side state for one browser session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub logged_in: bool,
    pub username: Option<String>,
    pub card_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new() -> Self {
        Self {
            logged_in: false,
            username: None,
            card_number: None,
            created_at: Utc::now(),
        }
    }
}

impl Default for SessionData {
    fn default() -> Self {
        Self::new()
    }
}

/// Key/value session store: get, set and destroy by opaque key
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<SessionData>>;
    async fn set(&self, key: &str, data: &SessionData) -> AppResult<()>;
    async fn destroy(&self, key: &str) -> AppResult<()>;
}

/// Mint a new opaque session id
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

fn signature(id: &str, secret: &str) -> String {
    hex::encode(Sha256::digest(format!("{}.{}", id, secret).as_bytes()))
}

/// Encode a session id into a signed cookie value (`<id>.<sig>`)
pub fn cookie_value(id: &str, secret: &str) -> String {
    format!("{}.{}", id, signature(id, secret))
}

/// Decode a signed cookie value back into a session id. Returns `None` when
/// the signature does not match the configured secret.
pub fn verify_cookie_value(value: &str, secret: &str) -> Option<String> {
    let (id, sig) = value.rsplit_once('.')?;
    if sig == signature(id, secret) {
        Some(id.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_round_trip() {
        let id = new_session_id();
        let value = cookie_value(&id, "s3cret");
        assert_eq!(verify_cookie_value(&value, "s3cret"), Some(id));
    }

    #[test]
    fn tampered_cookie_is_rejected() {
        let value = cookie_value(&new_session_id(), "s3cret");
        let mut forged = value.clone();
        forged.replace_range(..1, "x");
        assert_eq!(verify_cookie_value(&forged, "s3cret"), None);
        assert_eq!(verify_cookie_value(&value, "other-secret"), None);
        assert_eq!(verify_cookie_value("no-dot-here", "s3cret"), None);
    }
}
