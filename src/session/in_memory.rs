//! In-memory session store (default backend)
//!
//! Sessions live for the lifetime of the process; a restart logs
//! everyone out.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::AppResult;

use super::{SessionData, SessionStore};

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, SessionData>>,
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> AppResult<Option<SessionData>> {
        Ok(self.sessions.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, data: &SessionData) -> AppResult<()> {
        self.sessions
            .lock()
            .await
            .insert(key.to_string(), data.clone());
        Ok(())
    }

    async fn destroy(&self, key: &str) -> AppResult<()> {
        self.sessions.lock().await.remove(key);
        Ok(())
    }
}
