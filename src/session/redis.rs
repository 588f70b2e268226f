//! Redis-backed session store
//!
//! Serializes [`SessionData`] as JSON under a `session:` key prefix with a
//! configurable TTL, so sessions survive server restarts and expire on
//! their own.

use async_trait::async_trait;
use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

use super::{SessionData, SessionStore};

#[derive(Clone)]
pub struct RedisSessionStore {
    client: Client,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    /// Create a store and verify the connection with a PING
    pub async fn connect(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::SessionStore(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::SessionStore(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::SessionStore(format!("Redis connection test failed: {}", e)))?;

        Ok(Self {
            client,
            ttl_seconds,
        })
    }

    fn key(session_key: &str) -> String {
        format!("session:{}", session_key)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, key: &str) -> AppResult<Option<SessionData>> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::SessionStore(format!("Failed to get Redis connection: {}", e)))?;

        let raw: Option<String> = conn
            .get(Self::key(key))
            .await
            .map_err(|e| AppError::SessionStore(format!("Failed to read session: {}", e)))?;

        match raw {
            Some(json) => {
                let data = serde_json::from_str(&json)
                    .map_err(|e| AppError::SessionStore(format!("Corrupt session record: {}", e)))?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, data: &SessionData) -> AppResult<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::SessionStore(format!("Failed to get Redis connection: {}", e)))?;

        let json = serde_json::to_string(data)
            .map_err(|e| AppError::SessionStore(format!("Failed to serialize session: {}", e)))?;

        conn.set_ex::<_, _, ()>(Self::key(key), json, self.ttl_seconds)
            .await
            .map_err(|e| AppError::SessionStore(format!("Failed to store session: {}", e)))?;

        Ok(())
    }

    async fn destroy(&self, key: &str) -> AppResult<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::SessionStore(format!("Failed to get Redis connection: {}", e)))?;

        let _: () = conn
            .del(Self::key(key))
            .await
            .map_err(|e| AppError::SessionStore(format!("Failed to destroy session: {}", e)))?;

        Ok(())
    }
}
